//! # Error Module
//!
//! Error types for the photo culling engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - photo names, paths, what went wrong
//! - **Per-photo failures are local** - a photo that fails to hash is
//!   dropped from duplicate detection, the batch keeps going

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CullError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Deletion error: {0}")]
    Delete(#[from] DeleteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while enumerating a photo folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Image load errors: the photo could not be decoded into a bitmap.
///
/// Callers treat every variant as "no fingerprint available".
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image {name}: {reason}")]
    DecodeError { name: String, reason: String },

    #[error("Failed to convert {name} to JPEG: {reason}")]
    ConversionFailed { name: String, reason: String },

    #[error("Image is empty or corrupted: {name}")]
    EmptyImage { name: String },

    #[error("Failed to resample image {name}: {reason}")]
    ResampleFailed { name: String, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while comparing fingerprints
#[derive(Error, Debug, PartialEq)]
pub enum CompareError {
    #[error(
        "Fingerprints were produced with different grids ({left_width}x{left_height} vs {right_width}x{right_height})"
    )]
    MismatchedFingerprints {
        left_width: u8,
        left_height: u8,
        right_width: u8,
        right_height: u8,
    },

    #[error("Invalid similarity threshold: {value} (must be between 0 and 1)")]
    InvalidThreshold { value: f64 },

    #[error("Invalid hash grid {width}x{height} (each side 1-255, at most 128 bits)")]
    InvalidGrid { width: u32, height: u32 },
}

/// Errors from the deletion path
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Permission denied deleting {path}. Check that the folder is writable.")]
    PermissionDenied { path: PathBuf },

    #[error("Photo no longer exists: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid relative path: {rel_path}")]
    InvalidPath { rel_path: String },

    #[error("Failed to move {path} to the trash: {reason}")]
    Trash { path: PathBuf, reason: String },

    #[error("Failed to delete {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeleteError {
    /// Map an I/O failure on `path` to the matching deletion error
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied { path },
            std::io::ErrorKind::NotFound => DeleteError::NotFound { path },
            _ => DeleteError::Io { path, source },
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CullError>;
