use serde::{Deserialize, Serialize};

use crate::record::HealthRecord;
use crate::scores::{PredictionResult, WeightTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub source: Option<String>,
    pub records: u64,
    pub has_targets: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub id: String,
    pub record: HealthRecord,
    pub result: PredictionResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateFactor {
    pub name: String,
    pub label: String,
    pub total_contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSummary {
    pub records: u64,
    pub positive: u64,
    pub negative: u64,
    pub positive_fraction: f64,
    pub mean_probability: f64,
    pub median_probability: f64,
    pub top_factors: Vec<AggregateFactor>,
    pub agreement: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRiskV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub weight_table: WeightTable,
    pub input_meta: InputMeta,
    pub records: Vec<ScoredRecord>,
    pub summary: Option<CohortSummary>,
}

impl HeartRiskV1 {
    pub fn empty(tool_version: &str, source: Option<String>) -> Self {
        Self {
            tool: "kira-heartrisk".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            weight_table: WeightTable::Heuristic,
            input_meta: InputMeta {
                source,
                records: 0,
                has_targets: false,
            },
            records: Vec::new(),
            summary: None,
        }
    }
}
