//! Delete-script export for deleting trashed photos by hand.
//!
//! Writes `files-to-delete.txt` (one relative path per line) next to a
//! shell or batch script that removes each listed file under a base
//! directory given on the command line.

use crate::core::photo::Photo;
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const FILE_LIST_NAME: &str = "files-to-delete.txt";

const UNIX_SCRIPT: &str = r#"# Delete files listed in files-to-delete.txt
# Usage: ./delete-files.sh <base-directory>
# Example: ./delete-files.sh /Users/username/Pictures

if [ -z "$1" ]; then
    echo "Usage: $0 <base-directory>"
    echo "Example: $0 /Users/username/Pictures"
    exit 1
fi

BASE_DIR="$1"
FILE_LIST="files-to-delete.txt"

if [ ! -f "$FILE_LIST" ]; then
    echo "Error: $FILE_LIST not found. Run the script from the folder it was exported to."
    exit 1
fi

while IFS= read -r file; do
    if [ -n "$file" ]; then
        FULL_PATH="$BASE_DIR/$file"
        if [ -f "$FULL_PATH" ]; then
            rm "$FULL_PATH"
            echo "Deleted: $FULL_PATH"
        else
            echo "Warning: File not found: $FULL_PATH"
        fi
    fi
done < "$FILE_LIST"

echo "Deletion complete!"
"#;

const WINDOWS_SCRIPT: &str = r#"REM Delete files listed in files-to-delete.txt
REM Usage: delete-files.bat <base-directory>
REM Example: delete-files.bat C:\Users\username\Pictures
setlocal EnableDelayedExpansion

if "%~1"=="" (
    echo Usage: %0 ^<base-directory^>
    echo Example: %0 C:\Users\username\Pictures
    exit /b 1
)

set BASE_DIR=%~1
set FILE_LIST=files-to-delete.txt

if not exist "%FILE_LIST%" (
    echo Error: %FILE_LIST% not found. Run the script from the folder it was exported to.
    exit /b 1
)

for /f "usebackq delims=" %%f in ("%FILE_LIST%") do (
    set "file=%%f"
    set "file=!file:/=\!"
    if not "!file!"=="" (
        set "FULL_PATH=%BASE_DIR%\!file!"
        if exist "!FULL_PATH!" (
            del /f "!FULL_PATH!"
            echo Deleted: !FULL_PATH!
        ) else (
            echo Warning: File not found: !FULL_PATH!
        )
    )
)

echo Deletion complete!
pause
"#;

/// Script flavour to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPlatform {
    Unix,
    Windows,
}

impl ScriptPlatform {
    pub fn current() -> Self {
        if cfg!(windows) {
            ScriptPlatform::Windows
        } else {
            ScriptPlatform::Unix
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptPlatform::Unix => "delete-files.sh",
            ScriptPlatform::Windows => "delete-files.bat",
        }
    }
}

/// Paths written by [`DeleteScript::write`]
#[derive(Debug, Clone)]
pub struct ExportedScript {
    pub file_list: PathBuf,
    pub script: PathBuf,
    pub file_count: usize,
}

/// Builds the file list and deletion script for a set of photos
#[derive(Debug, Clone)]
pub struct DeleteScript {
    platform: ScriptPlatform,
}

impl DeleteScript {
    pub fn new(platform: ScriptPlatform) -> Self {
        Self { platform }
    }

    pub fn for_current_platform() -> Self {
        Self::new(ScriptPlatform::current())
    }

    pub fn platform(&self) -> ScriptPlatform {
        self.platform
    }

    /// One relative path per line
    pub fn file_list(&self, photos: &[&Photo]) -> String {
        let line_ending = match self.platform {
            ScriptPlatform::Unix => "\n",
            ScriptPlatform::Windows => "\r\n",
        };
        photos
            .iter()
            .map(|p| format!("{}{}", p.rel_path, line_ending))
            .collect()
    }

    pub fn script(&self) -> String {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.platform {
            ScriptPlatform::Unix => {
                format!("#!/bin/bash\n# Generated by photo-cull on {generated}\n{UNIX_SCRIPT}")
            }
            ScriptPlatform::Windows => format!(
                "@echo off\r\nREM Generated by photo-cull on {generated}\r\n{}",
                WINDOWS_SCRIPT.replace('\n', "\r\n")
            ),
        }
    }

    /// Write both files into `dir`, replacing earlier exports
    pub fn write(&self, dir: &Path, photos: &[&Photo]) -> std::io::Result<ExportedScript> {
        std::fs::create_dir_all(dir)?;

        let file_list = dir.join(FILE_LIST_NAME);
        let script = dir.join(self.platform.file_name());

        write_atomically(dir, &file_list, self.file_list(photos).as_bytes())?;
        write_atomically(dir, &script, self.script().as_bytes())?;
        make_executable(&script)?;

        info!(
            dir = %dir.display(),
            files = photos.len(),
            script = self.platform.file_name(),
            "Exported delete script"
        );

        Ok(ExportedScript {
            file_list,
            script,
            file_count: photos.len(),
        })
    }
}

impl Default for DeleteScript {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

fn write_atomically(dir: &Path, target: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
