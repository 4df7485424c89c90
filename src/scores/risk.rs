use std::cmp::Ordering;

use crate::error::ScoreError;
use crate::record::HealthRecord;
use crate::scores::{
    BASE_PROBABILITY, DECISION_THRESHOLD, FieldWeight, MAX_RISK_FACTORS, PROBABILITY_CEILING,
    PredictionResult, RiskFactor, WeightTable,
};

/// Scores one record with the canonical heuristic table.
///
/// Pure: identical input always yields an identical result. Records outside
/// the validated domain are rejected with `InvalidInput`.
pub fn score(record: &HealthRecord) -> Result<PredictionResult, ScoreError> {
    let weights = weigh(WeightTable::Heuristic, record)?;
    let weighted_sum: f64 = weights.iter().map(|w| w.weight).sum();
    let probability = probability_from(weighted_sum);
    Ok(PredictionResult {
        prediction: classify(probability),
        probability,
        risk_factors: rank_risk_factors(&weights),
    })
}

/// Validates the record and evaluates every rule of `table`.
pub fn weigh(table: WeightTable, record: &HealthRecord) -> Result<Vec<FieldWeight>, ScoreError> {
    record.validate()?;
    Ok(table.weights(record))
}

pub fn probability_from(weighted_sum: f64) -> f64 {
    (BASE_PROBABILITY + weighted_sum).clamp(0.0, PROBABILITY_CEILING)
}

/// 1 only when strictly above the decision threshold.
pub fn classify(probability: f64) -> u8 {
    if probability > DECISION_THRESHOLD { 1 } else { 0 }
}

/// Top risk factors, at most `MAX_RISK_FACTORS`.
pub fn rank_risk_factors(weights: &[FieldWeight]) -> Vec<RiskFactor> {
    let mut factors = contributions(weights);
    factors.truncate(MAX_RISK_FACTORS);
    factors
}

/// Every positive weight as a percentage of the positive total, sorted
/// descending. Equal contributions keep canonical field order.
///
/// Returns an empty list when no weight is positive.
pub fn contributions(weights: &[FieldWeight]) -> Vec<RiskFactor> {
    let total: f64 = weights
        .iter()
        .filter(|w| w.weight > 0.0)
        .map(|w| w.weight)
        .sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut factors: Vec<RiskFactor> = weights
        .iter()
        .filter(|w| w.weight > 0.0)
        .map(|w| RiskFactor {
            name: w.field,
            contribution: w.weight / total * 100.0,
        })
        .collect();
    factors.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(Ordering::Equal)
            .then(a.name.cmp(&b.name))
    });
    factors
}
