use log::{error, info};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    info!("Starting the K-Auth client-side example host...");

    if let Err(e) = web::init_client_side_server(config).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
