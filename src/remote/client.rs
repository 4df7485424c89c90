use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::record::HealthRecord;
use crate::remote::{prepare_model_input, reconcile_model_output};
use crate::scores::PredictionResult;

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: [f64; 13],
}

/// Blocking client for the hosted heart-disease model.
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn predict(&self, record: &HealthRecord) -> Result<PredictionResult> {
        let request = InferenceRequest {
            inputs: prepare_model_input(record),
        };
        debug!(endpoint = %self.endpoint, "sending inference request");

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder
            .send()
            .with_context(|| format!("failed to reach {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("model API error {}: {}", status, body);
        }

        let output: Value = response
            .json()
            .context("failed to parse model response")?;
        info!(raw = %output, "model result received");

        Ok(reconcile_model_output(&output, record)?)
    }
}
