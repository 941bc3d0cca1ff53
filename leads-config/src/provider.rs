//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
use crate::error::{ConfigError, ConfigResult};
use crate::types::LeadsConfig;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Prefix for environment overrides; `__` separates nested keys
pub const ENV_PREFIX: &str = "LEADS_";

/// Loads [`LeadsConfig`] from every source in precedence order.
///
/// Later sources override earlier ones:
/// 1. Default values
/// 2. Discovered files (global, then project)
/// 3. An explicit file, e.g. from `--config`
/// 4. `LEADS_` environment variables
#[derive(Debug, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit_file: Option<PathBuf>,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search these directories instead of the home and current directory
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Merge this file after the discovered ones
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<LeadsConfig> {
        let config: LeadsConfig = self.build_figment()?.extract()?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(LeadsConfig::default()));

        for file in self.discovery.discover_all() {
            figment = figment.merge(Self::file_provider(&file));
        }

        if let Some(path) = &self.explicit_file {
            figment = figment.merge(Self::explicit_provider(path)?);
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
            ConfigFormat::Json => Figment::from(Json::file(&file.path)),
        }
    }

    fn explicit_provider(path: &Path) -> ConfigResult<Figment> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            format: path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<none>".to_string()),
        })?;
        Ok(Self::file_provider(&ConfigFile::new(
            path.to_path_buf(),
            format,
            ConfigScope::Project,
        )))
    }
}

/// Load configuration from the standard locations plus an optional explicit file
pub fn load_configuration(explicit_file: Option<&Path>) -> ConfigResult<LeadsConfig> {
    let provider = match explicit_file {
        Some(path) => ConfigProvider::new().with_file(path),
        None => ConfigProvider::new(),
    };
    provider.load()
}
