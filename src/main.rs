use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use ride_ml_inference::config::Settings;
use ride_ml_inference::logging::init_logging;
use ride_ml_inference::routes::{self, AppState};
use ride_ml_inference::services::ModelRegistry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting ML inference service...");

    // Load models once; missing or corrupt artifacts leave their slot empty
    let registry = ModelRegistry::load(&settings.models);
    let status = registry.status();

    info!(
        "Model slots: eta={}, demand={}, match={}",
        status.eta, status.demand, status.match_model
    );

    let app_state = AppState::new(registry);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .configure(routes::configure_app(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server
        .bind((host, port))
        .map_err(|e| {
            error!("Failed to bind HTTP server: {}", e);
            e
        })?
        .run()
        .await
}
