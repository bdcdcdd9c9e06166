use crate::config::MonitorConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads monitor configuration from the default `config/Config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<MonitorConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Loads monitor configuration by layering defaults, a TOML file, and
    /// `VAULT_`-prefixed environment variables (nested keys split on `__`,
    /// e.g. `VAULT_EMAIL__PASSWORD`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<MonitorConfig> {
        let config: MonitorConfig = Figment::from(Serialized::defaults(MonitorConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("VAULT_").split("__"))
            .extract()?;

        Ok(config)
    }
}
