use std::path::PathBuf;
use std::time::Duration;

use crate::error::VerifyError;

/// Env file loaded before the process environment is read.
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Verification settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Connection string shared by both clients.
    pub database_url: String,
    /// Connection acquisition timeout applied to both clients (default: `30s`).
    pub connect_timeout: Duration,
    /// Apply `db/migrations` before the checks (default: `false`).
    pub run_migrations: bool,
}

impl VerifyConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default     |
    /// |---------------------------|-------------|
    /// | `DATABASE_URL`            | (required)  |
    /// | `DB_CONNECT_TIMEOUT_SECS` | `30`        |
    /// | `NUCAP_RUN_MIGRATIONS`    | `false`     |
    pub fn from_env() -> Result<Self, VerifyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`VerifyConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VerifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(VerifyError::MissingDatabaseUrl)?;

        let connect_timeout_secs: u64 = match lookup("DB_CONNECT_TIMEOUT_SECS") {
            None => 30,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(VerifyError::InvalidConfig {
                    key: "DB_CONNECT_TIMEOUT_SECS",
                    value: raw,
                    reason: "expected a positive number of seconds",
                })?,
        };

        let run_migrations = match lookup("NUCAP_RUN_MIGRATIONS") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or(VerifyError::InvalidConfig {
                key: "NUCAP_RUN_MIGRATIONS",
                value: raw,
                reason: "expected true/false",
            })?,
        };

        Ok(Self {
            database_url,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            run_migrations,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Load `NUCAP_ENV_FILE` (default [`DEFAULT_ENV_FILE`]) and then `.env`.
///
/// Variables already present in the process environment win. Missing files
/// are ignored. Returns the env file paths that were actually loaded.
pub fn load_env_files() -> Vec<PathBuf> {
    let primary = std::env::var("NUCAP_ENV_FILE").unwrap_or_else(|_| DEFAULT_ENV_FILE.into());

    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::from_filename(&primary) {
        loaded.push(path);
    }
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }
    loaded
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_url_is_set() {
        let config =
            VerifyConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/app")])).unwrap();
        assert_eq!(config.database_url, "postgres://db/app");
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(!config.run_migrations);
    }

    #[test]
    fn missing_url_is_a_distinct_error() {
        let err = VerifyConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_matches!(err, VerifyError::MissingDatabaseUrl);
        assert!(err.is_config());
    }

    #[test]
    fn blank_url_counts_as_missing() {
        let err = VerifyConfig::from_lookup(lookup(&[("DATABASE_URL", "   ")])).unwrap_err();
        assert_matches!(err, VerifyError::MissingDatabaseUrl);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = VerifyConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("DB_CONNECT_TIMEOUT_SECS", "5"),
            ("NUCAP_RUN_MIGRATIONS", "yes"),
        ]))
        .unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(config.run_migrations);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for raw in ["abc", "0", "-3"] {
            let err = VerifyConfig::from_lookup(lookup(&[
                ("DATABASE_URL", "postgres://db/app"),
                ("DB_CONNECT_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert_matches!(
                err,
                VerifyError::InvalidConfig { key: "DB_CONNECT_TIMEOUT_SECS", .. }
            );
        }
    }

    #[test]
    fn bad_migration_flag_is_rejected() {
        let err = VerifyConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/app"),
            ("NUCAP_RUN_MIGRATIONS", "maybe"),
        ]))
        .unwrap_err();
        assert_matches!(err, VerifyError::InvalidConfig { key: "NUCAP_RUN_MIGRATIONS", .. });
    }
}
