//! # CLI Module
//!
//! Command-line interface for photo culling.
//!
//! ## Usage
//! ```bash
//! # List near-duplicate pairs in a folder
//! photo-cull scan ~/Pictures/2024
//!
//! # Stricter threshold, 4 hashing threads, JSON output
//! photo-cull scan ~/Pictures/2024 --threshold 0.95 --parallel 4 --output json
//!
//! # Group similar shots (burst mode, retakes)
//! photo-cull clusters ~/Pictures/2024 --max-distance 8
//!
//! # Keyboard review: → keep, ← trash, space skip, backspace back
//! photo-cull review ~/Pictures/2024
//! ```

mod output;
mod review;

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_cull::core::comparator::DEFAULT_CLUSTER_DISTANCE;
use photo_cull::core::detector::DuplicateDetector;
use photo_cull::core::photo::Photo;
use photo_cull::core::scanner::{PhotoScanner, ScanConfig, ScanResult, WalkDirScanner};
use photo_cull::error::Result;
use photo_cull::events::{Event, EventChannel, EventSender, HashEvent, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Cull - keep the best shots, trash the rest
#[derive(Parser, Debug)]
#[command(name = "photo-cull")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find near-duplicate pairs in a folder
    Scan {
        /// Folder to scan
        path: PathBuf,

        /// Minimum similarity for a pair (0-1, higher = stricter)
        #[arg(short, long, default_value = "0.9")]
        threshold: f64,

        /// Hashing threads (sequential when omitted)
        #[arg(short, long)]
        parallel: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },

    /// Group similar photos around anchor shots
    Clusters {
        /// Folder to scan
        path: PathBuf,

        /// Maximum differing fingerprint bits within a cluster
        #[arg(short, long, default_value_t = DEFAULT_CLUSTER_DISTANCE)]
        max_distance: u32,

        /// Hashing threads (sequential when omitted)
        #[arg(short, long)]
        parallel: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Review photos one at a time and delete the ones you trash
    Review {
        /// Folder to review
        path: PathBuf,

        /// Minimum similarity for duplicate badges (0-1)
        #[arg(short, long, default_value = "0.9")]
        threshold: f64,

        /// Skip duplicate detection and review in folder order
        #[arg(long)]
        no_duplicates: bool,

        /// Report what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,

        /// Delete permanently instead of moving to the system trash
        #[arg(long)]
        permanent: bool,

        /// Export files-to-delete.txt and a delete script here instead of deleting
        #[arg(long, value_name = "DIR")]
        script: Option<PathBuf>,

        /// Hashing threads (sequential when omitted)
        #[arg(short, long)]
        parallel: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (tab-separated paths)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            path,
            threshold,
            parallel,
            output,
            include_hidden,
        } => run_scan(&path, threshold, parallel, output, include_hidden),
        Commands::Clusters {
            path,
            max_distance,
            parallel,
            output,
        } => run_clusters(&path, max_distance, parallel, output),
        Commands::Review {
            path,
            threshold,
            no_duplicates,
            dry_run,
            permanent,
            script,
            parallel,
        } => review::run(review::ReviewOptions {
            root: path,
            threshold,
            detect_duplicates: !no_duplicates,
            dry_run,
            permanent,
            script_dir: script,
            parallel,
        }),
    }
}

pub(crate) fn build_detector(
    threshold: Option<f64>,
    max_distance: Option<u32>,
    parallel: Option<usize>,
) -> Result<DuplicateDetector> {
    let mut builder = DuplicateDetector::builder();
    if let Some(threshold) = threshold {
        builder = builder.threshold(threshold);
    }
    if let Some(distance) = max_distance {
        builder = builder.cluster_distance(distance);
    }
    if let Some(threads) = parallel {
        builder = builder.parallelism(threads);
    }
    builder.build()
}

pub(crate) fn progress_bar(visible: bool) -> Option<ProgressBar> {
    if !visible {
        return None;
    }
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("█▓░"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    Some(pb)
}

/// Forward scan and hash events to a progress bar until the sender drops
pub(crate) fn spawn_progress_listener(
    progress: Option<ProgressBar>,
) -> (EventSender, thread::JoinHandle<()>) {
    let (sender, receiver) = EventChannel::new();

    let handle = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(pb) = progress.as_ref() else {
                continue;
            };
            match event {
                Event::Scan(ScanEvent::Started { .. }) => pb.set_message("Scanning"),
                Event::Scan(ScanEvent::Completed { total_photos }) => {
                    pb.set_length(total_photos as u64)
                }
                Event::Hash(HashEvent::Started { total_photos }) => {
                    pb.set_length(total_photos as u64);
                    pb.set_message("Fingerprinting");
                }
                Event::Hash(HashEvent::Progress(p)) => pb.set_position(p.completed as u64),
                Event::Hash(HashEvent::Completed { .. }) => pb.finish_and_clear(),
                _ => {}
            }
        }
    });

    (sender, handle)
}

pub(crate) fn scan_folder(root: &Path, include_hidden: bool, events: &EventSender) -> Result<ScanResult> {
    let scanner = WalkDirScanner::new(ScanConfig::new().include_hidden(include_hidden));
    let result = scanner.scan_with_events(root, events)?;
    for error in &result.errors {
        tracing::warn!(error = %error, "Scan error");
    }
    Ok(result)
}

fn run_scan(
    root: &Path,
    threshold: f64,
    parallel: Option<usize>,
    output: OutputFormat,
    include_hidden: bool,
) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);
    if pretty {
        output::print_header(&term, "Duplicate scan");
    }

    let detector = build_detector(Some(threshold), None, parallel)?;
    let (sender, listener) = spawn_progress_listener(progress_bar(pretty));

    let scan = scan_folder(root, include_hidden, &sender)?;
    let pairs = detector.detect_duplicates_with_events(&scan.photos, &sender);

    drop(sender);
    listener.join().ok();
    let pairs = pairs?;

    match output {
        OutputFormat::Pretty => output::print_pretty_pairs(&term, &scan, &pairs),
        OutputFormat::Json => output::print_json_pairs(&scan, &pairs)?,
        OutputFormat::Minimal => output::print_minimal_pairs(&scan, &pairs),
    }

    Ok(())
}

fn run_clusters(
    root: &Path,
    max_distance: u32,
    parallel: Option<usize>,
    output: OutputFormat,
) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);
    if pretty {
        output::print_header(&term, "Similarity clusters");
    }

    let detector = build_detector(None, Some(max_distance), parallel)?;
    let progress = progress_bar(pretty);
    let (sender, listener) = spawn_progress_listener(None);
    let scan = scan_folder(root, false, &sender);
    drop(sender);
    listener.join().ok();
    let scan = scan?;

    if let Some(pb) = &progress {
        pb.set_length(scan.photos.len() as u64);
        pb.set_message("Fingerprinting");
    }
    let bar = progress.clone();
    let clusters = detector.cluster_similar_photos(&scan.photos, move |done, _| {
        if let Some(pb) = &bar {
            pb.set_position(done as u64);
        }
    })?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match output {
        OutputFormat::Pretty => output::print_pretty_clusters(&term, &scan, &clusters),
        OutputFormat::Json => output::print_json_clusters(&clusters)?,
        OutputFormat::Minimal => output::print_minimal_clusters(&clusters),
    }

    Ok(())
}

/// Shorten paths under the home directory to `~/...`
pub(crate) fn display_path(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        },
        None => path.display().to_string(),
    }
}

pub(crate) fn photo_label(photo: &Photo) -> String {
    format!("{} {}", photo.rel_path, style(format_bytes(photo.size_bytes)).dim())
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn cli_parses_review_flags() {
        let cli = Cli::try_parse_from([
            "photo-cull",
            "review",
            "/photos",
            "--no-duplicates",
            "--script",
            "/tmp/out",
        ])
        .unwrap();

        match cli.command {
            Commands::Review {
                no_duplicates,
                script,
                threshold,
                permanent,
                ..
            } => {
                assert!(no_duplicates);
                assert!(!permanent);
                assert_eq!(script, Some(PathBuf::from("/tmp/out")));
                assert_eq!(threshold, 0.9);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn cli_parses_permanent_delete() {
        let cli = Cli::try_parse_from(["photo-cull", "review", "/photos", "--permanent"]).unwrap();

        assert!(matches!(cli.command, Commands::Review { permanent: true, .. }));
    }

    #[test]
    fn paths_outside_home_are_unchanged() {
        assert_eq!(display_path(Path::new("/definitely/not/home")), "/definitely/not/home");
    }
}
