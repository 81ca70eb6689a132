// ============================================================================
// mediascan-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Unset fields fall back to CoreConfig::default().

use std::path::PathBuf;

use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use mediascan_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .asset_dir(PathBuf::from("/tmp/assets"))
///     .store_extension("sqlite")
///     .build();
/// assert_eq!(config.store_extension, "sqlite");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    asset_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    store_extension: Option<String>,
    force_debug: Option<bool>,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration (e.g. one read from the
    /// environment) so only overridden fields change.
    pub fn from_config(config: CoreConfig) -> Self {
        Self {
            asset_dir: Some(config.asset_dir),
            log_dir: Some(config.log_dir),
            store_extension: Some(config.store_extension),
            force_debug: Some(config.force_debug),
        }
    }

    pub fn asset_dir(mut self, dir: PathBuf) -> Self {
        self.asset_dir = Some(dir);
        self
    }

    pub fn log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = Some(dir);
        self
    }

    /// Sets the store extension; a leading dot is ignored.
    pub fn store_extension(mut self, extension: &str) -> Self {
        self.store_extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    pub fn force_debug(mut self, force: bool) -> Self {
        self.force_debug = Some(force);
        self
    }

    pub fn build(self) -> CoreConfig {
        let defaults = CoreConfig::default();
        CoreConfig {
            asset_dir: self.asset_dir.unwrap_or(defaults.asset_dir),
            log_dir: self.log_dir.unwrap_or(defaults.log_dir),
            store_extension: self.store_extension.unwrap_or(defaults.store_extension),
            force_debug: self.force_debug.unwrap_or(defaults.force_debug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let base = CoreConfig::new(PathBuf::from("/assets"), PathBuf::from("/logs"));
        let config = CoreConfigBuilder::from_config(base)
            .force_debug(true)
            .store_extension(".sqlite")
            .build();

        assert_eq!(config.asset_dir, PathBuf::from("/assets"));
        assert_eq!(config.log_dir, PathBuf::from("/logs"));
        assert_eq!(config.store_extension, "sqlite");
        assert!(config.force_debug);
    }
}
