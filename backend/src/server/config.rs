//! Server settings loaded via OrthoConfig, and the resolved server
//! configuration built from them.
//!
//! Settings merge CLI flags, `USER_SERVICE_*` environment variables and an
//! optional configuration file. Only the database URL is mandatory.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use user_service::outbound::persistence::{DbPool, PoolConfig};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raw settings as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Skip applying embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

/// Settings that cannot be turned into a runnable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database url is required (set USER_SERVICE_DATABASE_URL or --database-url)")]
    MissingDatabaseUrl,
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
}

impl ServerSettings {
    /// The configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The listen address, defaulting to all interfaces on port 8080.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Pool sizing with defaults for anything left unset.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let mut config = PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
            .with_min_idle(Some(
                self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE),
            ));
        if let Some(secs) = self.pool_connection_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Whether pending migrations run before the listener binds.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}

/// Resolved configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const ENV_KEYS: [&str; 6] = [
        "USER_SERVICE_DATABASE_URL",
        "USER_SERVICE_BIND_ADDR",
        "USER_SERVICE_POOL_MAX_SIZE",
        "USER_SERVICE_POOL_MIN_IDLE",
        "USER_SERVICE_POOL_CONNECTION_TIMEOUT_SECS",
        "USER_SERVICE_SKIP_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("user-service")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_only_database_url_is_set() {
        let _guard = lock_env(ENV_KEYS.map(|key| {
            let value = (key == "USER_SERVICE_DATABASE_URL")
                .then(|| "postgres://localhost/users".to_owned());
            (key, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), Ok("postgres://localhost/users"));
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert!(settings.run_migrations());

        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.max_size(), 10);
        assert_eq!(pool.min_idle(), Some(2));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "USER_SERVICE_DATABASE_URL",
                Some("postgres://db:5432/users".to_owned()),
            ),
            ("USER_SERVICE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("USER_SERVICE_POOL_MAX_SIZE", Some("4".to_owned())),
            ("USER_SERVICE_POOL_MIN_IDLE", Some("1".to_owned())),
            (
                "USER_SERVICE_POOL_CONNECTION_TIMEOUT_SECS",
                Some("5".to_owned()),
            ),
            ("USER_SERVICE_SKIP_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9000)))
        );
        assert!(!settings.run_migrations());

        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://db:5432/users");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn missing_database_url_is_reported() {
        let _guard = lock_env(ENV_KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.pool_config().map(|_| ()),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = ServerSettings {
            database_url: Some("postgres://localhost/users".to_owned()),
            bind_addr: Some("localhost".to_owned()),
            pool_max_size: None,
            pool_min_idle: None,
            pool_connection_timeout_secs: None,
            skip_migrations: false,
        };

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { value, .. }) if value == "localhost"
        ));
    }
}
