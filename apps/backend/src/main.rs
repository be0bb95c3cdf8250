use actix_web::{web, HttpServer};
use starter_backend::app::build_app;
use starter_backend::config::AppConfig;
use starter_backend::state::build_state;
use starter_backend::telemetry::{self, IMPORTANT};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A local .env is optional; real deployments set variables directly.
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(&config.logging, config.environment);

    let app_state = match build_state().with_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(target: IMPORTANT, error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    tracing::info!(
        target: IMPORTANT,
        "🚀 Server running on port {} in {} mode",
        config.port,
        config.environment
    );
    if config.environment.is_production() && !config.logging.enabled {
        tracing::info!(
            target: IMPORTANT,
            "📝 Logging is disabled in production. Set ENABLE_LOGS=true to enable it."
        );
    }

    HttpServer::new(move || build_app(data.clone(), &origins))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
