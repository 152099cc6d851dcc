use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// Default address the HTTP server binds to
pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
/// Default map provider base URL
pub static DEFAULT_MAP_API_URL: &str = "https://apis.mapmyindia.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    /// Allowed CORS origin, any origin is allowed when unset
    pub client_url: Option<String>,
    pub map_api_url: String,
    pub map_client_id: Option<String>,
    pub map_client_secret: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub ledger_enabled: bool,
    pub auto_cancel_sweep: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            client_url: optional("CLIENT_URL"),
            map_api_url: optional("MAP_API_URL")
                .unwrap_or_else(|| DEFAULT_MAP_API_URL.to_string()),
            map_client_id: optional("MAP_CLIENT_ID"),
            map_client_secret: optional("MAP_CLIENT_SECRET"),
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
            ledger_enabled: parsed("LEDGER_ENABLED")?.unwrap_or(false),
            auto_cancel_sweep: parsed("AUTO_CANCEL_SWEEP")?.unwrap_or(false),
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Reads a variable, treating an empty value the same as an unset one
fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T>(var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(var)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::invalid(var, e))
        })
        .transpose()
}
