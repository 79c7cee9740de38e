use std::sync::Arc;

use axum::{Json, response::IntoResponse};

use crate::{clock::Clock, db::shop_store::ShopStore, models::InfoResponse};

pub mod departments;
pub mod goods;
pub mod sales;
pub mod workers;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShopStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<dyn ShopStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

/// Liveness/info handler
#[utoipa::path(
    get,
    path = "/",
    tag = "info",
    responses((status = 200, description = "Service is up", body = InfoResponse))
)]
pub async fn root() -> impl IntoResponse {
    Json(InfoResponse {
        message: "Shop API is running. Go to /openapi.json".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
