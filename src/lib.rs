pub mod config;
pub mod error;
pub mod models;
pub mod controllers;
pub mod middleware;
pub mod services;
pub mod store_client;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use services::{accounts::AccountService, admin::AdminService, mobile::MobileService};
use store_client::{StoreClient, StoreError};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: StoreClient,
    pub accounts: AccountService,
    pub admin: AdminService,
    pub mobile: MobileService,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, StoreError> {
        let store = StoreClient::from_config(&config.store)?;

        let state = Arc::new(Self {
            accounts: AccountService::new(store.clone()),
            admin: AdminService::new(store.clone()),
            mobile: MobileService::new(store.clone(), config.console.clone()),
            store,
            config,
        });

        Ok(state)
    }
}

/// Корневой роутер: служебные маршруты + API под /api
pub fn app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/", get(|| async { "Hotel Console API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if state.config.features.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
