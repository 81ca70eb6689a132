// mediascan-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use mediascan_core::config::{ENV_ASSET_DIR, ENV_FORCE_DEBUG, ENV_LOG_DIR};
use mediascan_core::{CoreConfig, CoreConfigBuilder};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Mediascan: media track catalog",
    long_about = "Catalogs video files, their embedded audio/subtitle tracks and sidecar subtitles in a local store."
)]
pub struct Cli {
    /// Video file to check and mark complete
    #[arg(value_name = "PATH", conflicts_with_all = ["search", "reconcile"])]
    pub path: Option<PathBuf>,

    /// Walk a directory (default: the current one) and catalogue every video
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    pub search: Option<PathBuf>,

    /// With --search, also check every discovered video
    #[arg(long, requires = "search")]
    pub deep: bool,

    /// Check every incomplete record and complete the embedded ones
    #[arg(long, conflicts_with = "search")]
    pub reconcile: bool,

    /// Directory holding the store file
    #[arg(long, value_name = "DIR", env = ENV_ASSET_DIR)]
    pub asset_dir: Option<PathBuf>,

    /// Directory for daily log files
    #[arg(long, value_name = "DIR", env = ENV_LOG_DIR)]
    pub log_dir: Option<PathBuf>,

    /// Echo every log line to the console
    #[arg(long, env = ENV_FORCE_DEBUG)]
    pub debug: bool,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Check(PathBuf),
    Search { dir: PathBuf, deep: bool },
    Reconcile,
    MissingPath,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.reconcile {
            Mode::Reconcile
        } else if let Some(dir) = &self.search {
            Mode::Search {
                dir: dir.clone(),
                deep: self.deep,
            }
        } else if let Some(path) = &self.path {
            Mode::Check(path.clone())
        } else {
            Mode::MissingPath
        }
    }

    /// Core configuration: defaults, overridden by any directory given here.
    pub fn core_config(&self) -> CoreConfig {
        let mut builder = CoreConfigBuilder::from_config(CoreConfig::from_env());
        if let Some(dir) = &self.asset_dir {
            builder = builder.asset_dir(dir.clone());
        }
        if let Some(dir) = &self.log_dir {
            builder = builder.log_dir(dir.clone());
        }
        if self.debug {
            builder = builder.force_debug(true);
        }
        builder.build()
    }
}
