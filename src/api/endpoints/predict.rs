//! `POST /api/predict`: free text in, ranked diagnosis out.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advice::advice_for;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::PredictionRecord;

/// Longer inputs are rejected before extraction.
pub const MAX_INPUT_CHARS: usize = 5_000;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct TopPrediction {
    pub label: String,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction_id: Uuid,
    pub predicted_disease: String,
    pub advice: &'static str,
    pub symptoms: Vec<String>,
    /// Every label → percentage (0-100, two decimals).
    pub probabilities: BTreeMap<String, f64>,
    /// Highest first. Chart data for the client.
    pub top_predictions: Vec<TopPrediction>,
    /// `None` when the prediction could not be stored.
    pub report_url: Option<String>,
}

pub async fn predict(
    State(ctx): State<ApiContext>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if request.user_input.chars().count() > MAX_INPUT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Input is limited to {MAX_INPUT_CHARS} characters"
        )));
    }

    // Fuzzy extraction and the history insert are CPU and disk work: keep
    // them off the async workers.
    let core = ctx.core.clone();
    let (result, record, stored) = tokio::task::spawn_blocking(move || {
        let result = core.service.predict(&request.user_input)?;
        let record = PredictionRecord::from_result(&request.user_input, &result);
        let stored = core.record_prediction(&record);
        Ok::<_, ApiError>((result, record, stored))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Prediction task failed: {e}")))??;

    Ok(Json(PredictResponse {
        prediction_id: record.id,
        advice: advice_for(&result.predicted_disease),
        symptoms: result.symptoms.to_vec(),
        probabilities: result.percentages(),
        top_predictions: result
            .top_percentages()
            .into_iter()
            .map(|(label, percentage)| TopPrediction { label, percentage })
            .collect(),
        report_url: stored.then(|| format!("/api/predictions/{}/report", record.id)),
        predicted_disease: result.predicted_disease,
    }))
}
