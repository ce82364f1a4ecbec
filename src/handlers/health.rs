use axum::Json;
use serde::{Deserialize, Serialize};

use crate::utils::price::{BULK_TIERS, BulkTier};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn handle_bulk_tiers() -> Json<Vec<BulkTier>> {
    Json(BULK_TIERS.to_vec())
}
