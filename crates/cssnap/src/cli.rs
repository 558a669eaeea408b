//! Command-line argument parsing, kept dependency-free.

use anyhow::{Result, bail};
use std::path::PathBuf;

pub const USAGE: &str = "\
cssnap — snap stylesheet lengths to a design size scale

Usage: cssnap [TARGET] [options]

Arguments:
  TARGET             File or directory to rewrite (default: config targetPath)

Options:
  --config PATH      Config document (default: ./cssnap.json, else built-in)
  --dry-run          Report would-be changes without writing
  -h, --help         Show this help";

/// Parsed command-line arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Positional target path; overrides the config's `targetPath`.
    pub target: Option<PathBuf>,
    /// Explicit config document path.
    pub config: Option<PathBuf>,
    /// Report changes without writing files.
    pub dry_run: bool,
    /// Print usage and exit.
    pub help: bool,
}

/// Parse arguments (program name already skipped).
///
/// # Errors
/// Returns an error for unknown flags, a missing flag value, or more than
/// one positional target.
pub fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut pending_config = false;
    for arg in args {
        if pending_config {
            parsed.config = Some(PathBuf::from(arg));
            pending_config = false;
            continue;
        }
        if let Some(rest) = arg.strip_prefix("--config=") {
            parsed.config = Some(PathBuf::from(rest));
            continue;
        }
        match arg.as_str() {
            "--config" => pending_config = true,
            "--dry-run" => parsed.dry_run = true,
            "-h" | "--help" => parsed.help = true,
            flag if flag.starts_with('-') => bail!("unknown option `{flag}`\n\n{USAGE}"),
            _ => {
                if parsed.target.is_some() {
                    bail!("more than one target path given\n\n{USAGE}");
                }
                parsed.target = Some(PathBuf::from(arg));
            }
        }
    }
    if pending_config {
        bail!("`--config` requires a path\n\n{USAGE}");
    }
    Ok(parsed)
}
