pub mod cli;
pub mod ctx;
pub mod error;
pub mod history;
pub mod io;
pub mod math;
pub mod pipeline;
pub mod record;
pub mod remote;
pub mod schema;
pub mod scores;

pub use error::ScoreError;
pub use record::HealthRecord;
pub use scores::{PredictionResult, RiskFactor, score};
