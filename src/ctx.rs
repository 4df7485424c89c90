use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::record::HealthRecord;
use crate::schema::v1::HeartRiskV1;
use crate::scores::{CohortSummary, PredictionResult};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tsv_path: PathBuf,
}

/// State threaded through one pipeline run.
#[derive(Debug)]
pub struct Ctx {
    pub input: Option<PathBuf>,
    pub write_json: bool,
    pub write_tsv: bool,
    pub threads: usize,
    pub history_path: Option<PathBuf>,
    pub now: DateTime<Utc>,
    pub ids: Vec<String>,
    pub records: Vec<HealthRecord>,
    pub targets: Option<Vec<u8>>,
    pub warnings: Vec<String>,
    pub results: Vec<PredictionResult>,
    pub summary: Option<CohortSummary>,
    pub history_written: usize,
    pub output: OutputPaths,
    pub report: HeartRiskV1,
}

impl Ctx {
    pub fn new(
        input: Option<PathBuf>,
        out_dir: PathBuf,
        write_json: bool,
        write_tsv: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("heartrisk.json");
        let tsv_path = out_dir.join("heartrisk.tsv");
        let source = input.as_ref().map(|p| p.display().to_string());
        let report = HeartRiskV1::empty(tool_version, source);
        Self {
            input,
            write_json,
            write_tsv,
            threads: 0,
            history_path: None,
            now: Utc::now(),
            ids: Vec::new(),
            records: Vec::new(),
            targets: None,
            warnings: Vec::new(),
            results: Vec::new(),
            summary: None,
            history_written: 0,
            output: OutputPaths {
                out_dir,
                json_path,
                tsv_path,
            },
            report,
        }
    }

    /// Seeds the run with records supplied directly rather than read from a file.
    pub fn with_records(mut self, ids: Vec<String>, records: Vec<HealthRecord>) -> Self {
        self.ids = ids;
        self.records = records;
        self
    }
}
