//! Configuration loader

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{BotError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Plain deployment variables (`TOKEN`, `DISCORD_TOKEN`, `PORT`, `PREFIX`)
/// 2. Environment variables like `APP__DISCORD__TOKEN` (`APP` prefix, `__` separator)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load configuration from a TOML document, without touching the environment
pub fn load_from_toml_str(toml: &str) -> Result<AppConfig> {
    let config = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;
    Ok(config.try_deserialize()?)
}

/// Apply the plain deployment variables on top of `config`
///
/// `lookup` resolves a variable name to its value.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup("TOKEN").or_else(|| lookup("DISCORD_TOKEN")) {
        config.discord.token = Some(token);
    }

    if let Some(prefix) = lookup("PREFIX") {
        config.discord.prefix = prefix;
    }

    if let Some(port) = lookup("PORT") {
        config.settings.liveness_port = port
            .trim()
            .parse()
            .map_err(|e| BotError::Configuration(format!("Invalid PORT '{}': {}", port, e)))?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = load_from_toml_str(
            r#"
            [discord]
            prefix = "?"

            [settings]
            poll_interval_seconds = 10
            trend_range = "6mo"
            "#,
        )
        .unwrap();

        assert_eq!(config.discord.prefix, "?");
        assert_eq!(config.discord.executive_role, "Executive");
        assert_eq!(config.settings.poll_interval_seconds, 10);
        assert_eq!(config.settings.alert_interval_seconds, 5);
        assert_eq!(config.settings.trend_range, "6mo");
    }

    #[test]
    fn test_token_and_port_from_env() {
        let config = apply_env_overrides(
            AppConfig::default(),
            lookup_from(&[("TOKEN", "secret"), ("PORT", "9090")]),
        )
        .unwrap();

        assert_eq!(config.discord.token.as_deref(), Some("secret"));
        assert_eq!(config.settings.liveness_port, 9090);
    }

    #[test]
    fn test_discord_token_fallback() {
        let config = apply_env_overrides(
            AppConfig::default(),
            lookup_from(&[("DISCORD_TOKEN", "fallback")]),
        )
        .unwrap();
        assert_eq!(config.discord.token.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_port_defaults_to_8080() {
        let config = apply_env_overrides(AppConfig::default(), lookup_from(&[])).unwrap();
        assert_eq!(config.settings.liveness_port, 8080);
        assert!(config.discord.token.is_none());
    }

    #[test]
    fn test_invalid_port_is_configuration_error() {
        let result = apply_env_overrides(AppConfig::default(), lookup_from(&[("PORT", "http")]));
        assert!(matches!(result, Err(BotError::Configuration(_))));
    }
}
