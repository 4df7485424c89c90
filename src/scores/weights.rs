use serde::{Deserialize, Serialize};

use crate::record::{ChestPain, Field, HealthRecord, Sex, Thal};
use crate::scores::FieldWeight;

/// Rule tables mapping a record to per-field weights.
///
/// `Heuristic` is the canonical table behind [`crate::scores::score`]; its
/// weights are fractions added to the base probability. `Extended` carries
/// percentage-scale weights and an extra thalassemia rule. It only ranks
/// risk factors for predictions produced by the hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTable {
    #[default]
    Heuristic,
    Extended,
}

impl WeightTable {
    pub fn name(self) -> &'static str {
        match self {
            WeightTable::Heuristic => "heuristic",
            WeightTable::Extended => "extended",
        }
    }

    /// Weights in canonical field order. Fields without a rule are omitted.
    pub fn weights(self, record: &HealthRecord) -> Vec<FieldWeight> {
        match self {
            WeightTable::Heuristic => heuristic(record),
            WeightTable::Extended => extended(record),
        }
    }
}

fn heuristic(r: &HealthRecord) -> Vec<FieldWeight> {
    vec![
        w(Field::Age, if r.age > 50 { 0.20 } else { 0.05 }),
        w(Field::Sex, if r.sex == Sex::Male { 0.10 } else { 0.05 }),
        w(Field::Cp, if r.cp.code() >= ChestPain::NonAnginal.code() { 0.15 } else { 0.02 }),
        w(Field::Trestbps, if r.trestbps > 140 { 0.10 } else { 0.02 }),
        w(Field::Chol, if r.chol > 240 { 0.15 } else { 0.03 }),
        w(Field::Thalach, if r.thalach < 140 { 0.10 } else { 0.0 }),
        w(Field::Exang, if r.exang { 0.15 } else { 0.0 }),
        w(
            Field::Oldpeak,
            if r.oldpeak > 2.0 {
                0.15
            } else if r.oldpeak > 1.0 {
                0.05
            } else {
                0.0
            },
        ),
        w(Field::Ca, if r.ca > 0 { 0.10 * r.ca as f64 } else { 0.0 }),
    ]
}

fn extended(r: &HealthRecord) -> Vec<FieldWeight> {
    vec![
        w(Field::Age, if r.age > 50 { 25.0 } else { 5.0 }),
        w(Field::Sex, if r.sex == Sex::Male { 15.0 } else { 5.0 }),
        w(Field::Cp, if r.cp.code() >= ChestPain::NonAnginal.code() { 20.0 } else { 3.0 }),
        w(Field::Trestbps, if r.trestbps > 140 { 12.0 } else { 2.0 }),
        w(Field::Chol, if r.chol > 240 { 18.0 } else { 3.0 }),
        w(Field::Thalach, if r.thalach < 140 { 10.0 } else { 2.0 }),
        w(Field::Exang, if r.exang { 15.0 } else { 0.0 }),
        w(
            Field::Oldpeak,
            if r.oldpeak > 2.0 {
                20.0
            } else if r.oldpeak > 1.0 {
                10.0
            } else {
                2.0
            },
        ),
        w(Field::Ca, if r.ca > 0 { 12.0 * r.ca as f64 } else { 1.0 }),
        w(Field::Thal, if r.thal != Thal::ReversibleDefect { 15.0 } else { 0.0 }),
    ]
}

fn w(field: Field, weight: f64) -> FieldWeight {
    FieldWeight { field, weight }
}
