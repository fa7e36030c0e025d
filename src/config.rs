use std::env;
use std::time::Duration;

use crate::db::DbCredentials;
use crate::error::{AppError, AppResult};
use crate::services::DigestScheme;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_timezone: Option<String>,
    pub lookup_credentials: DbCredentials,
    pub role_credentials: DbCredentials,
    pub digest_scheme: DigestScheme,
    pub auth_timeout: Duration,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_vars<F>(var: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let db_port = match var("DB_PORT") {
            Some(v) => v
                .parse()
                .map_err(|_| AppError::Config(format!("DB_PORT is not a port number: {}", v)))?,
            None => 3306,
        };

        let digest_scheme = match var("PASSWORD_DIGEST") {
            Some(v) => v.parse().map_err(AppError::Config)?,
            None => DigestScheme::Md5,
        };

        let timeout_secs: u64 = match var("AUTH_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| {
                AppError::Config(format!("AUTH_TIMEOUT_SECS is not a number: {}", v))
            })?,
            None => 10,
        };
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "AUTH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            db_host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            db_port,
            db_name: var("DB_NAME").unwrap_or_else(|| "vuelos".to_string()),
            db_timezone: var("DB_TIMEZONE").filter(|v| !v.is_empty()),
            lookup_credentials: DbCredentials::new(
                required("LOOKUP_DB_USER")?,
                required("LOOKUP_DB_PASSWORD")?,
            ),
            role_credentials: DbCredentials::new(
                required("ROLE_DB_USER")?,
                required("ROLE_DB_PASSWORD")?,
            ),
            digest_scheme,
            auth_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn db_addr(&self) -> String {
        format!("{}:{}/{}", self.db_host, self.db_port, self.db_name)
    }
}
