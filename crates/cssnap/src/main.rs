use anyhow::Result;
use cssnap::cli::{self, USAGE};
use cssnap::walk::process_tree;
use cssnap_config::ConfigFile;
use env_logger::{Builder, Env};
use log::{error, info};
use std::env;
use std::path::Path;
use std::process::exit;

/// Default config document looked up next to the working directory.
const DEFAULT_CONFIG_PATH: &str = "cssnap.json";

fn main() {
    Builder::from_env(Env::default().filter_or("RUST_LOG", "info")).init();
    if let Err(error) = run() {
        error!("{error:#}");
        exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args(env::args().skip(1))?;
    if args.help {
        eprintln!("{USAGE}");
        return Ok(());
    }

    let document = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                ConfigFile::load(default_path)?
            } else {
                ConfigFile::builtin()?
            }
        }
    };
    let (config, mut plan) = document.build()?;
    if let Some(target) = args.target {
        plan.target_path = target;
    }

    let stats = process_tree(&plan, &config, args.dry_run)?;
    info!(
        "{} files scanned, {} rewritten{}",
        stats.scanned,
        stats.rewritten,
        if args.dry_run { " (dry run)" } else { "" }
    );
    Ok(())
}
