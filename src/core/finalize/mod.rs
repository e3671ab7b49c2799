//! # Finalize Module
//!
//! Acts on a finished review: moves trashed photos to the system trash,
//! deletes them permanently, or exports a script so they can be removed
//! by hand.
//!
//! Nothing is deleted without an explicit call; the review itself never
//! touches storage.

mod deleter;
mod script;

pub use deleter::{DeleteReport, FsDeleter, PhotoDeleter, TrashDeleter};
pub use script::{DeleteScript, ExportedScript, ScriptPlatform, FILE_LIST_NAME};

use crate::core::review::ReviewSession;

/// Delete the session's trashed photos, then clear the session.
///
/// The session is only cleared when every deletion succeeded (or in a
/// dry run), so failures can be retried.
pub fn finalize_review(session: &mut ReviewSession, deleter: &dyn PhotoDeleter) -> DeleteReport {
    let report = deleter.delete_all(&session.trash_photos());

    if report.is_clean() && !report.dry_run {
        session.clear();
    }
    report
}
