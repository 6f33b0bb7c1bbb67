//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub vocabulary_size: usize,
    pub label_count: usize,
}

/// `GET /api/health`: liveness plus loaded model shape.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let service = &ctx.core.service;
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        vocabulary_size: service.vocabulary().len(),
        label_count: service.labels().len(),
    })
}
