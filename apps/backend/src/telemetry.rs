use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{Environment, LogFormat, LogSettings};

/// Target for records that stay visible when logging is disabled
/// (startup banner, fatal errors).
pub const IMPORTANT: &str = "important";

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(settings: &LogSettings, environment: Environment) -> String {
    if !settings.enabled {
        return format!("error,{IMPORTANT}=info");
    }
    if environment.is_production() {
        "info,actix_web=info".to_string()
    } else {
        "debug,actix_web=info".to_string()
    }
}

pub fn init_tracing(settings: &LogSettings, environment: Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(settings, environment)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match settings.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_ansi(false)
                    .json(),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_ansi(true).pretty())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool) -> LogSettings {
        LogSettings {
            enabled,
            format: LogFormat::Json,
        }
    }

    #[test]
    fn disabled_logging_keeps_errors_and_important() {
        assert_eq!(
            default_directives(&settings(false), Environment::Production),
            "error,important=info"
        );
    }

    #[test]
    fn enabled_levels_follow_environment() {
        assert_eq!(
            default_directives(&settings(true), Environment::Production),
            "info,actix_web=info"
        );
        assert_eq!(
            default_directives(&settings(true), Environment::Development),
            "debug,actix_web=info"
        );
    }
}
