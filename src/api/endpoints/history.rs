//! Prediction history endpoints.
//!
//! - `GET /api/predictions`: most recent predictions
//! - `GET /api/predictions/:id/report`: PDF report for one prediction

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::advice_for;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{self, PredictionRecord};
use crate::report::{render_report, ReportInput};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub predictions: Vec<PredictionRecord>,
}

/// `GET /api/predictions?limit=N`
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let conn = ctx.core.history()?;
    let predictions = db::list_recent(&conn, limit)?;
    Ok(Json(HistoryResponse { predictions }))
}

/// `GET /api/predictions/:id/report`
pub async fn report(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| ApiError::NotFound(format!("Prediction {id} not found")))?;

    let record = {
        let conn = ctx.core.history()?;
        db::fetch_prediction(&conn, &id)?
    };

    let percentages = record.percentage_pairs();
    let pdf = render_report(&ReportInput {
        user_input: &record.user_input,
        predicted_disease: &record.predicted_disease,
        advice: advice_for(&record.predicted_disease),
        percentages: &percentages,
    })?;

    tracing::debug!(%id, bytes = pdf.len(), "Report rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"symptocheck-report-{id}.pdf\""),
            ),
        ],
        pdf,
    )
        .into_response())
}
