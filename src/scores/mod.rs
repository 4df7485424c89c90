pub mod batch;
pub mod risk;
pub mod weights;

use serde::{Deserialize, Serialize};

use crate::record::Field;

pub use risk::{classify, contributions, probability_from, rank_risk_factors, score, weigh};
pub use weights::WeightTable;

pub const BASE_PROBABILITY: f64 = 0.20;
pub const PROBABILITY_CEILING: f64 = 0.95;
pub const DECISION_THRESHOLD: f64 = 0.5;
pub const MAX_RISK_FACTORS: usize = 5;
pub const MAX_AGGREGATE_FACTORS: usize = 10;

/// Unnormalised rule output for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeight {
    pub field: Field,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: Field,
    /// Percentage of total positive weight, 0-100.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub probability: f64,
    pub risk_factors: Vec<RiskFactor>,
}

impl PredictionResult {
    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }

    /// Probability as a rounded whole percentage.
    pub fn risk_percent(&self) -> u32 {
        (self.probability * 100.0).round() as u32
    }

    pub fn top_factor(&self) -> Option<&RiskFactor> {
        self.risk_factors.first()
    }
}

#[derive(Debug, Clone)]
pub struct AggregateFactor {
    pub name: Field,
    pub total_contribution: f64,
}

#[derive(Debug, Clone)]
pub struct CohortSummary {
    pub records: usize,
    pub positive: usize,
    pub positive_fraction: f64,
    pub mean_probability: f64,
    pub median_probability: f64,
    pub top_factors: Vec<AggregateFactor>,
    pub agreement: Option<f64>,
}
