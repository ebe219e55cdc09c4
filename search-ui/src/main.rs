use search_ui::config::Settings;
use search_ui::routes::router;
use search_ui::services::catalog::CatalogClient;
use search_ui::services::controller::QueryController;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("search_ui=info,tower_http=info")),
        )
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match CatalogClient::new(&settings.catalog_url, settings.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build catalog client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using catalog at {}", catalog.url());

    let controller = QueryController::spawn(Arc::new(catalog), settings.controller_options());
    let app = router(Arc::new(controller));

    let addr = format!("0.0.0.0:{}", settings.port);
    info!("Search UI starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
