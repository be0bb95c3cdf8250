use std::fmt;
use std::time::Duration;

use crate::config::expiry::parse_expiry;
use crate::error::AppError;

const DEFAULT_PORT: u16 = 3000;
const DEV_ACCESS_SECRET: &str = "local-dev-access-secret-key";
const DEV_REFRESH_SECRET: &str = "local-dev-refresh-secret-key";

/// Runtime environment, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than `production`/`prod` runs as development.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secret and lifetime for one token type.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub ttl: Duration,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub access: TokenSettings,
    pub refresh: TokenSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    pub format: LogFormat,
}

/// The single credential pair accepted by the static credential store.
#[derive(Clone)]
pub struct DemoCredentials {
    pub username: String,
    pub password: String,
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self {
            username: "demo@example.com".to_string(),
            password: "demo123".to_string(),
        }
    }
}

impl fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
    pub logging: LogSettings,
    pub cors_allowed_origins: Vec<String>,
    pub demo: DemoCredentials,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Development falls back to local secrets and a one hour access token;
    /// production requires both secrets and defaults to fifteen minutes.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = Environment::parse(var("APP_ENV").as_deref());
        let production = environment.is_production();

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let (access_secret, refresh_secret) = if production {
            (
                must_var(&var, "JWT_ACCESS_TOKEN_SECRET")?,
                must_var(&var, "JWT_REFRESH_TOKEN_SECRET")?,
            )
        } else {
            (
                var("JWT_ACCESS_TOKEN_SECRET").unwrap_or_else(|| DEV_ACCESS_SECRET.to_string()),
                var("JWT_REFRESH_TOKEN_SECRET").unwrap_or_else(|| DEV_REFRESH_SECRET.to_string()),
            )
        };
        if production && access_secret == refresh_secret {
            return Err(AppError::config(
                "JWT_ACCESS_TOKEN_SECRET and JWT_REFRESH_TOKEN_SECRET must differ",
            ));
        }

        let default_access_expiry = if production { "15m" } else { "1h" };
        let access_ttl = parse_expiry(
            &var("JWT_ACCESS_TOKEN_EXPIRY").unwrap_or_else(|| default_access_expiry.to_string()),
        )?;
        let refresh_ttl =
            parse_expiry(&var("JWT_REFRESH_TOKEN_EXPIRY").unwrap_or_else(|| "7d".to_string()))?;

        let logs_forced = var("ENABLE_LOGS")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let format = match var("LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()) {
            Some(f) if f == "json" => LogFormat::Json,
            Some(f) if f == "pretty" => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::config(format!(
                    "LOG_FORMAT must be 'json' or 'pretty', got '{other}'"
                )))
            }
            None if production => LogFormat::Json,
            None => LogFormat::Pretty,
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        let defaults = DemoCredentials::default();
        let demo = DemoCredentials {
            username: var("DEMO_USERNAME").unwrap_or(defaults.username),
            password: var("DEMO_PASSWORD").unwrap_or(defaults.password),
        };

        Ok(Self {
            environment,
            host,
            port,
            jwt: JwtSettings {
                access: TokenSettings {
                    secret: access_secret,
                    ttl: access_ttl,
                },
                refresh: TokenSettings {
                    secret: refresh_secret,
                    ttl: refresh_ttl,
                },
            },
            logging: LogSettings {
                enabled: !production || logs_forced,
                format,
            },
            cors_allowed_origins,
            demo,
        })
    }
}

/// Comma-separated origins; blanks, `null` and non-http(s) entries are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

fn must_var<F>(var: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    var(name).ok_or_else(|| {
        AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))
    })
}
