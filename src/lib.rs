//! # Photo Cull
//!
//! Keyboard-driven photo culling with perceptual duplicate detection.
//!
//! ## How It Works
//! 1. Scan a folder into an ordered list of photos
//! 2. Fingerprint every photo (dHash) and pair near-duplicates
//! 3. Review one photo at a time: keep, trash or skip, with duplicates
//!    shown next to each other
//! 4. Delete what was trashed, or export a script to do it by hand
//!
//! ## Architecture
//! - `core` - The culling engine (no UI dependencies)
//! - `events` - Event-driven progress reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CullError, Result};

/// Initialize tracing for the library, filtered by `RUST_LOG`.
///
/// This should be called once by the application entry point. Fails if a
/// global subscriber is already installed.
pub fn init_tracing() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CullError::Config(format!("tracing subscriber: {e}")))
}
