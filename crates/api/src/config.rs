use std::path::PathBuf;
use std::str::FromStr;

use travelguide_core::validation::DEFAULT_PASSWORD_MIN_LENGTH;

/// HTTP server settings, read once at startup.
///
/// | Env Var                | Default                    |
/// |------------------------|----------------------------|
/// | `HOST`                 | `0.0.0.0`                  |
/// | `PORT`                 | `3000`                     |
/// | `CORS_ORIGINS`         | `http://localhost:5173`    |
/// | `REQUEST_TIMEOUT_SECS` | `30`                       |
/// | `PASSWORD_MIN_LENGTH`  | `8`                        |
/// | `MEDIA_ROOT`           | `media`                    |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`; blanks are dropped.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Shortest password accepted at registration.
    pub password_min_length: usize,
    /// Directory served under `/media`; the collector writes images here.
    pub media_root: PathBuf,
}

impl ServerConfig {
    /// Panics on values that are present but unparsable.
    pub fn from_env() -> Self {
        Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parsed_var("PORT", 3000),
            cors_origins: var_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS", 30),
            password_min_length: parsed_var("PASSWORD_MIN_LENGTH", DEFAULT_PASSWORD_MIN_LENGTH),
            media_root: PathBuf::from(var_or("MEDIA_ROOT", "media")),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_var<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
