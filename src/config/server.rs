use std::{
    env,
    net::{IpAddr, SocketAddr},
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "adventures=debug,tower_http=debug,axum::rejection=trace";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process-level settings for the HTTP server, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub environment: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => match raw.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let environment = current_environment();

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            environment,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: self.host.clone(),
            })?;
        Ok(SocketAddr::from((ip, self.port)))
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn current_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    #[derive(Default)]
    struct EnvGuard {
        original: HashMap<String, Option<String>>,
    }

    impl EnvGuard {
        fn set(&mut self, key: &str, value: impl Into<String>) {
            self.original
                .entry(key.to_string())
                .or_insert_with(|| env::var(key).ok());
            env::set_var(key, value.into());
        }

        fn remove(&mut self, key: &str) {
            self.original
                .entry(key.to_string())
                .or_insert_with(|| env::var(key).ok());
            env::remove_var(key);
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.original.drain() {
                match value {
                    Some(v) => env::set_var(&key, v),
                    None => env::remove_var(&key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_when_only_database_url_is_set() {
        let mut guard = EnvGuard::default();
        guard.set("DATABASE_URL", "sqlite://data/test.db");
        guard.remove("HOST");
        guard.remove("PORT");
        guard.remove("DATABASE_MAX_CONNECTIONS");
        guard.remove("ENVIRONMENT");

        let config = ServerConfig::from_env().expect("config should load");
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!config.is_production());
        assert_eq!(
            config.socket_addr().expect("default host parses"),
            "127.0.0.1:8080".parse::<SocketAddr>().expect("literal addr")
        );
    }

    #[test]
    #[serial]
    fn missing_database_url_is_rejected() {
        let mut guard = EnvGuard::default();
        guard.remove("DATABASE_URL");

        assert_eq!(
            ServerConfig::from_env().unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    #[serial]
    fn invalid_port_is_rejected() {
        let mut guard = EnvGuard::default();
        guard.set("DATABASE_URL", "sqlite://data/test.db");
        guard.set("PORT", "eighty");

        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    #[serial]
    fn zero_connections_is_rejected() {
        let mut guard = EnvGuard::default();
        guard.set("DATABASE_URL", "sqlite://data/test.db");
        guard.remove("PORT");
        guard.set("DATABASE_MAX_CONNECTIONS", "0");

        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                ..
            })
        ));
    }

    #[test]
    fn unparsable_host_fails_socket_addr() {
        let config = ServerConfig {
            host: "not-an-ip".to_string(),
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            environment: "production".to_string(),
        };

        assert!(config.is_production());
        assert!(config.socket_addr().is_err());
    }
}
