//! Application configuration parsed from environment variables.

pub const DEFAULT_COOKIE_NAME: &str = "access_token";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Identity Service base URL, without trailing slash.
    pub api_base: String,
    pub cookie_name: String,
    /// Public URL of this app, used for absolute redirects.
    pub app_url: String,
    pub cookie_secure: bool,
    pub port: u16,
}

impl AppConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `API_BASE`
    ///
    /// Optional:
    /// - `AUTH_COOKIE`: default `access_token`
    /// - `APP_URL`: default `http://localhost:3000`
    /// - `APP_ENV`: `production` turns on `Secure` cookies
    /// - `COOKIE_SECURE`: explicit boolean override for `Secure`
    /// - `PORT`: default 3000
    ///
    /// # Errors
    ///
    /// Returns an error if `API_BASE` is missing or `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("API_BASE"))?;

        let cookie_name = lookup("AUTH_COOKIE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_owned());

        let app_url = lookup("APP_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let cookie_secure = parse_bool(lookup("COOKIE_SECURE").as_deref())
            .unwrap_or_else(|| is_production(lookup("APP_ENV").as_deref()));

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => match raw.trim().parse() {
                Ok(port) => port,
                Err(_) => return Err(ConfigError::Invalid { var: "PORT", value: raw }),
            },
        };

        Ok(Self { api_base, cookie_name, app_url, cookie_secure, port })
    }

    /// Minimal config for tests and local tooling.
    #[must_use]
    pub fn for_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            cookie_name: DEFAULT_COOKIE_NAME.to_owned(),
            app_url: DEFAULT_APP_URL.to_owned(),
            cookie_secure: false,
            port: DEFAULT_PORT,
        }
    }
}

pub(crate) fn parse_bool(raw: Option<&str>) -> Option<bool> {
    raw.and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

fn is_production(app_env: Option<&str>) -> bool {
    app_env.is_some_and(|v| v.trim().eq_ignore_ascii_case("production"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
