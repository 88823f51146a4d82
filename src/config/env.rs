//! Configuration loading from environment variables.

use thiserror::Error;

use crate::config::schema::CheckConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl CheckConfig {
    /// Load and validate the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let ports_raw = lookup("PORT").ok_or(ConfigError::Missing("PORT"))?;
        config.workers.ports = ports_raw.split_whitespace().map(str::to_string).collect();
        if config.workers.ports.is_empty() {
            return Err(ConfigError::Invalid {
                var: "PORT",
                value: ports_raw,
                reason: "expected at least one port".to_string(),
            });
        }

        let max_raw = lookup("MAX_CONNECTIONS").ok_or(ConfigError::Missing("MAX_CONNECTIONS"))?;
        config.workers.max_connections =
            max_raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    var: "MAX_CONNECTIONS",
                    value: max_raw.clone(),
                    reason: "expected an integer".to_string(),
                })?;
        if config.workers.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_CONNECTIONS",
                value: max_raw,
                reason: "must be at least 1".to_string(),
            });
        }

        if let Some(target) = lookup("TARGET") {
            config.target = target;
        }

        config.resolution.enabled = flag_enabled(&lookup, "PRE_RESOLVE");
        if config.resolution.enabled {
            let raw = lookup("NAMESERVERS").ok_or(ConfigError::Missing("NAMESERVERS"))?;
            config.resolution.nameservers = raw
                .split_whitespace()
                .map(|entry| {
                    entry.parse().map_err(|_| ConfigError::Invalid {
                        var: "NAMESERVERS",
                        value: raw.clone(),
                        reason: format!("{entry:?} is not an ip address"),
                    })
                })
                .collect::<Result<_, _>>()?;
            if config.resolution.nameservers.is_empty() {
                return Err(ConfigError::Invalid {
                    var: "NAMESERVERS",
                    value: raw,
                    reason: "expected at least one nameserver".to_string(),
                });
            }
        }

        config.http_probe.enabled = flag_enabled(&lookup, "HTTP_HEALTHCHECK");
        if let Some(url) = lookup("HTTP_HEALTHCHECK_URL") {
            config.http_probe.url = url;
        }
        config.http_probe.timeout_ms = timeout_ms(
            &lookup,
            "HTTP_HEALTHCHECK_TIMEOUT_MS",
            config.http_probe.timeout_ms,
        )?;

        config.smtp_probe.enabled = flag_enabled(&lookup, "SMTP_HEALTHCHECK");
        if let Some(url) = lookup("SMTP_HEALTHCHECK_URL") {
            config.smtp_probe.url = url;
        }
        if let Some(command) = lookup("SMTP_HEALTHCHECK_COMMAND") {
            config.smtp_probe.command = command;
        }
        config.smtp_probe.timeout_ms = timeout_ms(
            &lookup,
            "SMTP_HEALTHCHECK_TIMEOUT_MS",
            config.smtp_probe.timeout_ms,
        )?;

        Ok(config)
    }
}

fn flag_enabled<F>(lookup: &F, var: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).as_deref() == Some("1")
}

fn timeout_ms<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            value: raw,
            reason: "expected a millisecond integer".to_string(),
        }),
    }
}
