use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::io::records::read_record_json;
use crate::record::{Field, HealthRecord, RawRecord};
use crate::remote::{DEFAULT_ENDPOINT, TOKEN_ENV};

#[derive(Debug, Parser)]
#[command(
    name = "kira-heartrisk",
    version,
    about = "Heuristic heart-disease risk scoring CLI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one record given as flags or a JSON file
    Score(ScoreArgs),
    /// Score every row of a TSV/CSV file
    Batch(BatchArgs),
    /// Inspect or clear saved predictions
    History(HistoryArgs),
    /// Score one record with the hosted model
    Remote(RemoteArgs),
    /// Describe the thirteen input fields
    Fields,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RecordArgs {
    #[arg(long, help = "JSON file with one record (optionally wrapped in \"formData\")")]
    pub record: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Start from the form defaults")]
    pub defaults: bool,

    #[arg(long, help = "Age in years")]
    pub age: Option<String>,

    #[arg(long, help = "Sex (1 = male, 0 = female)")]
    pub sex: Option<String>,

    #[arg(long, help = "Chest pain type (0-3)")]
    pub cp: Option<String>,

    #[arg(long, help = "Resting blood pressure (mm Hg)")]
    pub trestbps: Option<String>,

    #[arg(long, help = "Serum cholesterol (mg/dl)")]
    pub chol: Option<String>,

    #[arg(long, help = "Fasting blood sugar > 120 mg/dl (0/1)")]
    pub fbs: Option<String>,

    #[arg(long, help = "Resting ECG result (0-2)")]
    pub restecg: Option<String>,

    #[arg(long, help = "Maximum heart rate achieved")]
    pub thalach: Option<String>,

    #[arg(long, help = "Exercise induced angina (0/1)")]
    pub exang: Option<String>,

    #[arg(long, help = "ST depression induced by exercise")]
    pub oldpeak: Option<String>,

    #[arg(long, help = "Slope of the peak exercise ST segment (0-2)")]
    pub slope: Option<String>,

    #[arg(long, help = "Major vessels colored by fluoroscopy (0-4)")]
    pub ca: Option<String>,

    #[arg(long, help = "Thalassemia (0-3)")]
    pub thal: Option<String>,
}

impl RecordArgs {
    fn flag(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Age => &self.age,
            Field::Sex => &self.sex,
            Field::Cp => &self.cp,
            Field::Trestbps => &self.trestbps,
            Field::Chol => &self.chol,
            Field::Fbs => &self.fbs,
            Field::Restecg => &self.restecg,
            Field::Thalach => &self.thalach,
            Field::Exang => &self.exang,
            Field::Oldpeak => &self.oldpeak,
            Field::Slope => &self.slope,
            Field::Ca => &self.ca,
            Field::Thal => &self.thal,
        };
        value.as_deref()
    }

    /// Layers defaults, then the JSON file, then individual flags.
    pub fn resolve(&self) -> Result<HealthRecord> {
        let mut raw = if self.defaults {
            RawRecord::from(HealthRecord::default())
        } else {
            RawRecord::default()
        };
        if let Some(path) = &self.record {
            let file = read_record_json(path)?;
            for field in Field::ALL {
                if let Some(v) = file.get(field) {
                    raw.set(field, v.clone());
                }
            }
        }
        for field in Field::ALL {
            if let Some(v) = self.flag(field) {
                raw.set(field, v);
            }
        }
        Ok(HealthRecord::try_from(raw)?)
    }
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    #[arg(long, help = "Output directory for --json/--tsv")]
    pub out: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(long, help = "Append the prediction to this history file")]
    pub history: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    #[arg(long, help = "Record file (.tsv or .csv, optionally .gz)")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(long, default_value_t = 0, help = "Number of threads (0 = auto)")]
    pub threads: usize,

    #[arg(long, help = "Append every prediction to this history file")]
    pub history: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    List(StoreArgs),
    Clear(StoreArgs),
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[arg(long, help = "History file (JSON lines)")]
    pub store: PathBuf,
}

#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, default_value_t = 30, help = "Request timeout in seconds")]
    pub timeout_secs: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Use local scoring when the hosted model fails"
    )]
    pub fallback: bool,

    #[arg(long, help = "Append the prediction to this history file")]
    pub history: Option<PathBuf>,
}
