use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;
use crate::schema::v1::{
    AggregateFactor, CohortSummary, HeartRiskV1, InputMeta, ScoredRecord,
};

pub fn build_report(ctx: &Ctx) -> Result<HeartRiskV1> {
    if ctx.results.len() != ctx.records.len() {
        bail!(
            "result count mismatch: {} != {}",
            ctx.results.len(),
            ctx.records.len()
        );
    }

    let input_meta = InputMeta {
        source: ctx.input.as_ref().map(|p| p.display().to_string()),
        records: ctx.records.len() as u64,
        has_targets: ctx.targets.is_some(),
    };

    let records = ctx
        .ids
        .iter()
        .zip(ctx.records.iter())
        .zip(ctx.results.iter())
        .map(|((id, record), result)| ScoredRecord {
            id: id.clone(),
            record: *record,
            result: result.clone(),
        })
        .collect::<Vec<_>>();

    let summary = ctx.summary.as_ref().map(|s| CohortSummary {
        records: s.records as u64,
        positive: s.positive as u64,
        negative: (s.records - s.positive) as u64,
        positive_fraction: s.positive_fraction,
        mean_probability: s.mean_probability,
        median_probability: s.median_probability,
        top_factors: s
            .top_factors
            .iter()
            .map(|f| AggregateFactor {
                name: f.name.as_str().to_string(),
                label: f.name.label().to_string(),
                total_contribution: f.total_contribution,
            })
            .collect(),
        agreement: s.agreement,
    });

    Ok(HeartRiskV1 {
        tool: ctx.report.tool.clone(),
        version: ctx.report.version.clone(),
        schema_version: ctx.report.schema_version.clone(),
        weight_table: ctx.report.weight_table,
        input_meta,
        records,
        summary,
    })
}

pub fn write_json(path: &Path, report: &HeartRiskV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
