//! Hosted model inference.
//!
//! The hosted model is a peer producer of [`PredictionResult`]. Its raw
//! output is reconciled into the same shape as local scoring, with risk
//! factors ranked from the extended weight table.

mod client;

use serde_json::Value;

use crate::error::ScoreError;
use crate::record::{Field, HealthRecord};
use crate::scores::{PROBABILITY_CEILING, PredictionResult, WeightTable, classify};
use crate::scores::{rank_risk_factors, weigh};

pub use client::InferenceClient;

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/sinansahinbas/heart-disease-prediction";
pub const TOKEN_ENV: &str = "HUGGINGFACE_API_TOKEN";
pub const FALLBACK_PROBABILITY: f64 = 0.5;

/// Model input vector in canonical field order.
pub fn prepare_model_input(record: &HealthRecord) -> [f64; 13] {
    Field::ALL.map(|f| record.value(f))
}

pub fn reconcile_model_output(
    output: &Value,
    record: &HealthRecord,
) -> Result<PredictionResult, ScoreError> {
    let weights = weigh(WeightTable::Extended, record)?;
    let probability = extract_probability(output).clamp(0.0, PROBABILITY_CEILING);
    Ok(PredictionResult {
        prediction: classify(probability),
        probability,
        risk_factors: rank_risk_factors(&weights),
    })
}

/// Reads `[ {score} | {probability} | number, ... ]`, falling back to 0.5.
pub fn extract_probability(output: &Value) -> f64 {
    let first = match output.as_array().and_then(|a| a.first()) {
        Some(v) => v,
        None => return FALLBACK_PROBABILITY,
    };
    let found = if let Some(obj) = first.as_object() {
        obj.get("score")
            .or_else(|| obj.get("probability"))
            .and_then(Value::as_f64)
    } else {
        first.as_f64()
    };
    match found {
        Some(p) if p.is_finite() => p,
        _ => FALLBACK_PROBABILITY,
    }
}
