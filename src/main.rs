use tracing_subscriber::EnvFilter;

use koina::{config::Config, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let state = match startup::build_state(&config).await {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Startup error: {err}");
            std::process::exit(1);
        }
    };

    let app = router::routes().with_state(state);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("Failed to bind {}: {err}", config.listen_addr);
            std::process::exit(1);
        }
    };

    tracing::info!("listening on {}", config.listen_addr);
    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("Server error: {err}");
        std::process::exit(1);
    }
}
