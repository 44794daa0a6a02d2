use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use gripgear::{
    handlers::api::{create_app, ApiState},
    init_observability,
    observability::{BusinessTracingMiddleware, Metrics},
    repositories::{FileAccountStore, FileCartStore, StaticCatalog},
    services::{AccountService, CartService, CatalogService, CheckoutService},
    shutdown_observability, Config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    // Initialize comprehensive observability
    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref().unwrap_or(""),
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!("Starting gripgear service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Data directory: {}", config.storage.data_dir);

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Initialize stores and the product catalog
    let data_dir = config.storage.data_path();
    let cart_store = Arc::new(FileCartStore::new(data_dir.clone()));
    let account_store = Arc::new(FileAccountStore::new(data_dir));
    let catalog = Arc::new(StaticCatalog::new());
    info!("Stores initialized successfully");

    // Initialize services
    let catalog_service = Arc::new(CatalogService::new(catalog.clone()));
    let cart_service = Arc::new(CartService::new(cart_store, catalog));
    let checkout_service = Arc::new(CheckoutService::new(cart_service.clone()));
    let account_service = Arc::new(AccountService::new(account_store));
    info!("Services initialized successfully");

    let state = ApiState {
        catalog_service,
        cart_service,
        checkout_service,
        account_service,
        business: Arc::new(BusinessTracingMiddleware::new(metrics.clone())),
    };

    // Build the application router
    let app = create_app(metrics, state);

    // Create socket address
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    // Create TCP listener
    let listener = TcpListener::bind(addr).await?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
        shutdown_observability().await;
    };

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
