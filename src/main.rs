use domain::gateway::kauth;
use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting the K-Auth backend-to-backend example...");

    let provider = match kauth::new_provider(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("Failed to create the K-Auth provider: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(config, provider);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
