use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::pipeline::PredictionResult;

/// One stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user_input: String,
    pub predicted_disease: String,
    pub symptoms: Vec<String>,
    /// Label → percentage (0-100) for every label.
    pub probabilities: BTreeMap<String, f64>,
}

impl PredictionRecord {
    pub fn from_result(user_input: &str, result: &PredictionResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            user_input: user_input.to_string(),
            predicted_disease: result.predicted_disease.clone(),
            symptoms: result.symptoms.to_vec(),
            probabilities: result.percentages(),
        }
    }

    /// `(label, percentage)` pairs for the report renderer.
    pub fn percentage_pairs(&self) -> Vec<(String, f64)> {
        self.probabilities
            .iter()
            .map(|(label, pct)| (label.clone(), *pct))
            .collect()
    }
}

pub fn save_prediction(conn: &Connection, record: &PredictionRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO predictions (id, created_at, user_input, predicted_disease, symptoms, probabilities)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.id.to_string(),
            record.created_at,
            record.user_input,
            record.predicted_disease,
            serde_json::to_string(&record.symptoms)?,
            serde_json::to_string(&record.probabilities)?,
        ],
    )?;
    Ok(())
}

pub fn fetch_prediction(conn: &Connection, id: &Uuid) -> Result<PredictionRecord, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, user_input, predicted_disease, symptoms, probabilities
         FROM predictions WHERE id = ?1",
    )?;

    let mut rows = stmt.query_map(params![id.to_string()], read_row)?;
    match rows.next() {
        Some(row) => row_to_record(row?),
        None => Err(DatabaseError::NotFound {
            entity_type: "Prediction".into(),
            id: id.to_string(),
        }),
    }
}

/// Most recent first.
pub fn list_recent(conn: &Connection, limit: u32) -> Result<Vec<PredictionRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, created_at, user_input, predicted_disease, symptoms, probabilities
         FROM predictions ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;

    let rows = stmt.query_map(params![limit], read_row)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row_to_record(row?)?);
    }
    Ok(records)
}

type PredictionRow = (String, DateTime<Utc>, String, String, String, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PredictionRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn row_to_record(row: PredictionRow) -> Result<PredictionRecord, DatabaseError> {
    let (id, created_at, user_input, predicted_disease, symptoms, probabilities) = row;
    let id = Uuid::parse_str(&id)
        .map_err(|e| DatabaseError::Corrupt(format!("prediction id {id}: {e}")))?;
    Ok(PredictionRecord {
        id,
        created_at,
        user_input,
        predicted_disease,
        symptoms: serde_json::from_str(&symptoms)?,
        probabilities: serde_json::from_str(&probabilities)?,
    })
}
