pub mod app;
pub mod expiry;

pub use app::{
    AppConfig, DemoCredentials, Environment, JwtSettings, LogFormat, LogSettings, TokenSettings,
};
pub use expiry::parse_expiry;
