//! # photo-cull CLI
//!
//! Command-line interface for keyboard-driven photo culling.
//!
//! ## Usage
//! ```bash
//! photo-cull scan ~/Pictures --threshold 0.9
//! photo-cull review ~/Pictures --script ~/Desktop
//! ```

mod cli;

use photo_cull::Result;

fn main() -> Result<()> {
    photo_cull::init_tracing()?;
    cli::run()
}
