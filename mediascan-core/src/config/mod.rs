//! Configuration structures and constants for the mediascan-core library.
//!
//! The configuration is built once by the caller (usually mediascan-cli) and
//! passed into the [`Scanner`](crate::scanner::Scanner); nothing in the core
//! reads process-wide state after construction.

mod builder;
pub mod utils;

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;
use utils::{get_env_bool, get_env_path, get_env_string};

// Default constants

/// Name of the asset directory holding the store, relative to the executable.
pub const DEFAULT_ASSET_DIR_NAME: &str = "assets";

/// Name of the log directory, relative to the current directory.
pub const DEFAULT_LOG_DIR_NAME: &str = ".logs";

/// Extension recognized as a store file inside the asset directory.
pub const DEFAULT_STORE_EXTENSION: &str = "db";

/// Environment variable overriding the asset directory.
pub const ENV_ASSET_DIR: &str = "MEDIASCAN_ASSET_DIR";

/// Environment variable overriding the log directory.
pub const ENV_LOG_DIR: &str = "MEDIASCAN_LOG_DIR";

/// Environment variable forcing every log line onto the console.
pub const ENV_FORCE_DEBUG: &str = "MEDIASCAN_FORCE_DEBUG";

/// Environment variable overriding the store extension.
pub const ENV_STORE_EXTENSION: &str = "MEDIASCAN_STORE_EXTENSION";

/// Main configuration structure for the mediascan-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use mediascan_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .asset_dir(PathBuf::from("/srv/mediascan/assets"))
///     .log_dir(PathBuf::from("/srv/mediascan/.logs"))
///     .force_debug(true)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Directory searched for the newest store file, and where a fresh store
    /// is created when none exists
    pub asset_dir: PathBuf,

    /// Directory for daily log files
    pub log_dir: PathBuf,

    /// Extension (without the dot) identifying store files
    pub store_extension: String,

    /// Echo every log line to the console
    pub force_debug: bool,
}

impl CoreConfig {
    /// Creates a configuration with explicit directories and default options.
    pub fn new(asset_dir: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            asset_dir,
            log_dir,
            ..Default::default()
        }
    }

    /// Builds the configuration from `MEDIASCAN_*` environment variables,
    /// falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            asset_dir: get_env_path(ENV_ASSET_DIR, defaults.asset_dir),
            log_dir: get_env_path(ENV_LOG_DIR, defaults.log_dir),
            store_extension: get_env_string(ENV_STORE_EXTENSION, defaults.store_extension),
            force_debug: get_env_bool(ENV_FORCE_DEBUG, defaults.force_debug),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            asset_dir: exe_dir.join(DEFAULT_ASSET_DIR_NAME),
            log_dir: PathBuf::from(".").join(DEFAULT_LOG_DIR_NAME),
            store_extension: DEFAULT_STORE_EXTENSION.to_string(),
            force_debug: false,
        }
    }
}
