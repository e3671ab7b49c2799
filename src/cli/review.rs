//! Interactive keyboard review in the terminal.

use super::{
    build_detector, display_path, format_bytes, progress_bar, scan_folder,
    spawn_progress_listener,
};
use console::{style, Key, Term};
use photo_cull::core::comparator::{DuplicatePair, MatchType};
use photo_cull::core::finalize::{
    finalize_review, DeleteScript, FsDeleter, PhotoDeleter, TrashDeleter,
};
use photo_cull::core::review::{
    Decision, KeyBindings, NavigationStep, ReviewAction, ReviewKey, ReviewSession,
};
use photo_cull::error::Result;
use std::path::PathBuf;
use tracing::warn;

pub(crate) struct ReviewOptions {
    pub root: PathBuf,
    pub threshold: f64,
    pub detect_duplicates: bool,
    pub dry_run: bool,
    pub permanent: bool,
    pub script_dir: Option<PathBuf>,
    pub parallel: Option<usize>,
}

pub(crate) fn run(options: ReviewOptions) -> Result<()> {
    let term = Term::stdout();
    let bindings = KeyBindings::default();

    let detector = build_detector(Some(options.threshold), None, options.parallel)?;
    let (sender, listener) = spawn_progress_listener(progress_bar(true));

    let scan = scan_folder(&options.root, false, &sender);
    let scan = match scan {
        Ok(scan) => scan,
        Err(e) => {
            drop(sender);
            listener.join().ok();
            return Err(e);
        }
    };

    let pairs: Vec<DuplicatePair> = if options.detect_duplicates {
        detector
            .detect_duplicates_with_events(&scan.photos, &sender)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Duplicate detection failed, reviewing without duplicates");
                Vec::new()
            })
    } else {
        Vec::new()
    };
    drop(sender);
    listener.join().ok();

    if scan.photos.is_empty() {
        term.write_line(&format!(
            "No photos found in {}",
            display_path(&options.root)
        ))
        .ok();
        return Ok(());
    }

    let mut session = ReviewSession::with_duplicates(scan.photos, &pairs);
    let mut notice = String::new();

    loop {
        render(&term, &session, &pairs, &notice);
        notice.clear();

        if session.ready_to_finalize() {
            break;
        }

        let key = term.read_key()?;
        if key == Key::Escape || key == Key::Char('q') {
            break;
        }

        let Some(action) = to_review_key(&key).and_then(|k| bindings.action_for(k)) else {
            continue;
        };

        let step = session.apply(action);
        if let Some(text) = notice_for(step, action) {
            notice = text.to_string();
        }
    }

    finalize(&term, &mut session, &options)
}

/// One-line hint shown after `action` produced `step`
fn notice_for(step: NavigationStep, action: ReviewAction) -> Option<&'static str> {
    match step {
        NavigationStep::CompleteTour => Some(
            "First pass done. The next key still decides the photo shown, \
             then photos without a keep/trash decision come back.",
        ),
        NavigationStep::JumpTo(_) if action != ReviewAction::Previous => {
            Some("Revisiting a photo without a keep/trash decision.")
        }
        _ => None,
    }
}

fn to_review_key(key: &Key) -> Option<ReviewKey> {
    Some(match key {
        Key::ArrowLeft => ReviewKey::ArrowLeft,
        Key::ArrowRight => ReviewKey::ArrowRight,
        Key::ArrowUp => ReviewKey::ArrowUp,
        Key::ArrowDown => ReviewKey::ArrowDown,
        Key::Char(' ') => ReviewKey::Space,
        Key::Backspace => ReviewKey::Backspace,
        Key::Enter => ReviewKey::Enter,
        Key::Escape => ReviewKey::Escape,
        Key::Char(c) => ReviewKey::Char(*c),
        _ => return None,
    })
}

fn render(term: &Term, session: &ReviewSession, pairs: &[DuplicatePair], notice: &str) {
    term.clear_screen().ok();

    let Some(photo) = session.current_photo() else {
        return;
    };
    let stats = session.stats();

    term.write_line(&format!(
        "{} {}",
        style(format!("Photo {}/{}", session.index() + 1, session.len())).bold().cyan(),
        style(if session.tour_completed() { "(sweep)" } else { "(first pass)" }).dim()
    ))
    .ok();
    term.write_line("").ok();
    term.write_line(&format!("  {}", style(&photo.name).bold())).ok();
    term.write_line(&format!(
        "  {} {}",
        style(&photo.rel_path).dim(),
        style(format_bytes(photo.size_bytes)).dim()
    ))
    .ok();

    let decision = match session.current_decision() {
        Decision::Keep => style("KEEP").green().bold(),
        Decision::Trash => style("TRASH").red().bold(),
        Decision::Archive => style("ARCHIVE").yellow(),
        Decision::Undecided => style("undecided").dim(),
    };
    term.write_line(&format!("  Decision: {}", decision)).ok();

    let partners = session.duplicates_of(session.index());
    if !partners.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} {} possible duplicate(s)",
            style("⚠").yellow().bold(),
            partners.len()
        ))
        .ok();
        for partner in partners {
            let similarity = pairs
                .iter()
                .find(|p| p.involves(photo.id) && p.involves(partner.id))
                .map(|p| (p.similarity, p.match_type()))
                .unwrap_or((0.0, MatchType::Similar));
            term.write_line(&format!(
                "    {} {} {}",
                style("○").dim(),
                partner.rel_path,
                style(format!("{} {:.0}%", similarity.1, similarity.0 * 100.0)).yellow()
            ))
            .ok();
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "  {} kept ({})  {} trashed ({})  {} pending",
        style(stats.keep_count).green(),
        format_bytes(stats.keep_bytes),
        style(stats.trash_count).red(),
        format_bytes(stats.trash_bytes),
        style(stats.pending).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {}",
        style("→ keep   ← trash   space skip   backspace back   esc finish").dim()
    ))
    .ok();

    if !notice.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("  {}", style(notice).yellow())).ok();
    }
}

fn finalize(term: &Term, session: &mut ReviewSession, options: &ReviewOptions) -> Result<()> {
    let stats = session.stats();
    let trash = session.trash_photos();

    term.clear_screen().ok();
    term.write_line(&format!("{} Review finished", style("✓").green().bold()))
        .ok();
    term.write_line(&format!(
        "  {} kept, {} trashed ({}), {} pending",
        style(stats.keep_count).green(),
        style(stats.trash_count).red(),
        format_bytes(stats.trash_bytes),
        style(stats.pending).cyan()
    ))
    .ok();

    if trash.is_empty() {
        term.write_line("  Nothing to delete.").ok();
        return Ok(());
    }

    if let Some(dir) = &options.script_dir {
        let exported = DeleteScript::for_current_platform().write(dir, &trash)?;
        term.write_line(&format!(
            "  Wrote {} and {} ({} files). Run the script with {} as its argument.",
            display_path(&exported.file_list),
            display_path(&exported.script),
            exported.file_count,
            display_path(&options.root)
        ))
        .ok();
        return Ok(());
    }

    let verb = match (options.dry_run, options.permanent) {
        (true, _) => "Check",
        (false, true) => "Permanently delete",
        (false, false) => "Move to trash",
    };
    term.write_str(&format!(
        "  {} {} photos ({})? [y/N] ",
        verb,
        trash.len(),
        format_bytes(stats.trash_bytes)
    ))
    .ok();
    let answer = term.read_line()?;
    if !matches!(answer.trim(), "y" | "Y" | "yes") {
        term.write_line("  Nothing was deleted.").ok();
        return Ok(());
    }

    let deleter: Box<dyn PhotoDeleter> = if options.permanent {
        Box::new(FsDeleter::new(&options.root).dry_run(options.dry_run))
    } else {
        Box::new(TrashDeleter::new(&options.root).dry_run(options.dry_run))
    };
    let report = finalize_review(session, deleter.as_ref());

    let done = match (report.dry_run, options.permanent) {
        (true, _) => "would be removed",
        (false, true) => "deleted",
        (false, false) => "moved to trash",
    };
    term.write_line(&format!(
        "  {} photos {} ({} freed)",
        style(report.deleted.len()).green(),
        done,
        format_bytes(report.bytes_freed)
    ))
    .ok();
    for (rel_path, error) in &report.failed {
        term.write_line(&format!("  {} {}: {}", style("✗").red(), rel_path, error))
            .ok();
    }

    Ok(())
}
