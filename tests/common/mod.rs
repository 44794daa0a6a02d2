use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reqwest::Client;
use tempfile::TempDir;
use tokio::net::TcpListener;

use gripgear::handlers::api::{create_app, ApiState};
use gripgear::observability::{BusinessTracingMiddleware, Metrics};
use gripgear::repositories::{FileAccountStore, FileCartStore, StaticCatalog};
use gripgear::services::{AccountService, CartService, CatalogService, CheckoutService};

/// A full service instance listening on an ephemeral port, backed by a
/// throwaway data directory that is removed when the environment drops.
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    data_dir: TempDir,
}

fn build_app(data_dir: &Path) -> Router {
    let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));

    let cart_store = Arc::new(FileCartStore::new(data_dir.to_path_buf()));
    let account_store = Arc::new(FileAccountStore::new(data_dir.to_path_buf()));
    let catalog = Arc::new(StaticCatalog::new());

    let catalog_service = Arc::new(CatalogService::new(catalog.clone()));
    let cart_service = Arc::new(CartService::new(cart_store, catalog));
    let checkout_service = Arc::new(CheckoutService::new(cart_service.clone()));
    let account_service = Arc::new(AccountService::new(account_store));

    let state = ApiState {
        catalog_service,
        cart_service,
        checkout_service,
        account_service,
        business: Arc::new(BusinessTracingMiddleware::new(metrics.clone())),
    };

    create_app(metrics, state)
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let data_dir = TempDir::new().expect("Failed to create temp data dir");
        let app = build_app(data_dir.path());

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self {
            client,
            base_url,
            data_dir,
        }
    }

    /// Path of the on-disk mirror for a session's cart
    pub fn cart_mirror_path(&self, session_id: &str) -> PathBuf {
        self.data_dir
            .path()
            .join("carts")
            .join(format!("{}.json", session_id))
    }
}
