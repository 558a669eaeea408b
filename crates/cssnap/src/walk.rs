//! Recursive directory walker that rewrites matching stylesheet files.
//!
//! Per-file failures (unreadable, non-UTF-8, unwritable) are logged and
//! skipped; a single bad file never aborts the batch.

use anyhow::{Context as _, Result, ensure};
use cssnap_config::WalkPlan;
use cssnap_pipeline::{Config, transform_file_content};
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Counters reported after a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Files with a target extension that were read and processed.
    pub scanned: usize,
    /// Files whose content changed (or would change under `--dry-run`).
    pub rewritten: usize,
}

/// Process the plan's target path: a single file, or a directory tree with
/// excluded components skipped. Writes back only when output differs from
/// input; with `dry_run` nothing is written.
///
/// # Errors
/// Returns an error when the target path is missing or a directory cannot be
/// listed. Per-file I/O problems are logged, not returned.
pub fn process_tree(plan: &WalkPlan, config: &Config, dry_run: bool) -> Result<WalkStats> {
    let target = plan.target_path.as_path();
    ensure!(target.exists(), "target path {} does not exist", target.display());
    let mut stats = WalkStats::default();
    if target.is_dir() {
        visit(target, plan, config, dry_run, &mut stats)?;
    } else {
        process_file(target, config, dry_run, &mut stats);
    }
    Ok(stats)
}

fn visit(
    directory: &Path,
    plan: &WalkPlan,
    config: &Config,
    dry_run: bool,
    stats: &mut WalkStats,
) -> Result<()> {
    let entries = fs::read_dir(directory)
        .with_context(|| format!("listing directory {}", directory.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("listing directory {}", directory.display()))?;
        let path = entry.path();
        if path.is_dir() {
            let name = entry.file_name();
            if plan.exclude_paths.iter().any(|excluded| OsStr::new(excluded) == name) {
                debug!("skipping excluded directory {}", path.display());
                continue;
            }
            visit(&path, plan, config, dry_run, stats)?;
        } else if has_target_extension(&path, plan) {
            process_file(&path, config, dry_run, stats);
        }
    }
    Ok(())
}

fn has_target_extension(path: &Path, plan: &WalkPlan) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .is_some_and(|extension| plan.target_extensions.contains(&extension))
}

fn process_file(path: &Path, config: &Config, dry_run: bool, stats: &mut WalkStats) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            warn!("skipping {}: {error}", path.display());
            return;
        }
    };
    stats.scanned += 1;
    let transformed = transform_file_content(&content, config);
    if transformed == content {
        debug!("unchanged: {}", path.display());
        return;
    }
    if dry_run {
        info!("would rewrite {}", path.display());
    } else {
        if let Err(error) = fs::write(path, &transformed) {
            warn!("failed to write {}: {error}", path.display());
            return;
        }
        info!("rewrote {}", path.display());
    }
    stats.rewritten += 1;
}
