// ============================
// policy-lib/src/config.rs
// ============================
//! Policy configuration.
use anyhow::Result;
use chrono::Duration;
use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde::Deserialize;

/// Tunable policy parameters.
///
/// These are runtime configuration rather than compile-time constants so
/// embedders can vary them per deployment (or per tenant, by constructing
/// one engine per tenant).
#[derive(Debug, Clone, Deserialize)]
pub struct PolicySettings {
    /// How many of the most recent history entries the reuse check inspects.
    pub history_limit: usize,
    /// Days a committed credential remains valid.
    pub expiration_days: i64,
    /// Minimum candidate length before composition checks apply.
    pub min_length: usize,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            history_limit: 5,
            expiration_days: 90,
            min_length: 5,
        }
    }
}

impl PolicySettings {
    /// The expiration window as a duration.
    pub fn expiration_window(&self) -> Duration {
        Duration::days(self.expiration_days)
    }
}

/// Load settings from config files and environment variables.
///
/// Later sources win: `policy.toml`, then `policy.yaml`, then `policy.json`,
/// then `CREDPOLICY_`-prefixed environment variables.
pub fn load_settings() -> Result<PolicySettings> {
    let settings = Figment::from(figment::providers::Serialized::defaults(
        PolicySettingsDefaults::default(),
    ))
    .merge(Toml::file("policy.toml"))
    .merge(Yaml::file("policy.yaml"))
    .merge(Json::file("policy.json"))
    .merge(Env::prefixed("CREDPOLICY_"))
    .extract()?;

    Ok(settings)
}

// Serializable mirror of the defaults, so partial config files work.
#[derive(Debug, serde::Serialize)]
struct PolicySettingsDefaults {
    history_limit: usize,
    expiration_days: i64,
    min_length: usize,
}

impl Default for PolicySettingsDefaults {
    fn default() -> Self {
        let d = PolicySettings::default();
        Self {
            history_limit: d.history_limit,
            expiration_days: d.expiration_days,
            min_length: d.min_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PolicySettings::default();
        assert_eq!(settings.history_limit, 5);
        assert_eq!(settings.expiration_days, 90);
        assert_eq!(settings.min_length, 5);
        assert_eq!(settings.expiration_window(), Duration::days(90));
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CREDPOLICY_HISTORY_LIMIT", "3");
            jail.set_env("CREDPOLICY_EXPIRATION_DAYS", "30");
            let settings = load_settings().expect("settings should load");
            assert_eq!(settings.history_limit, 3);
            assert_eq!(settings.expiration_days, 30);
            // untouched key keeps its default
            assert_eq!(settings.min_length, 5);
            Ok(())
        });
    }
}
