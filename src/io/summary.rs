use std::fmt::Write;

use anyhow::{Result, anyhow};

use crate::ctx::Ctx;
use crate::history::HistoryEntry;
use crate::scores::PredictionResult;
use crate::scores::batch::summarize;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let summary = ctx
        .summary
        .as_ref()
        .ok_or_else(|| anyhow!("cohort summary missing"))?;

    let mut out = String::new();
    writeln!(out, "kira-heartrisk v{}", version)?;
    writeln!(
        out,
        "Input: {} records, weights={}",
        summary.records,
        ctx.report.weight_table.name()
    )?;
    writeln!(
        out,
        "Elevated risk: {} ({:.1}%), low risk: {}",
        summary.positive,
        summary.positive_fraction * 100.0,
        summary.records - summary.positive
    )?;
    writeln!(
        out,
        "Probability: mean={:.4} median={:.4}",
        summary.mean_probability, summary.median_probability
    )?;
    if let Some(agreement) = summary.agreement {
        writeln!(out, "Target agreement: {:.1}%", agreement * 100.0)?;
    }

    if summary.top_factors.is_empty() {
        writeln!(out, "Top factors: none")?;
    } else {
        let names: Vec<&str> = summary.top_factors.iter().map(|f| f.name.label()).collect();
        writeln!(out, "Top factors: {}", names.join(", "))?;
    }
    if ctx.history_written > 0 {
        writeln!(out, "History: {} entries saved", ctx.history_written)?;
    }

    Ok(out)
}

pub fn format_prediction(result: &PredictionResult) -> Result<String> {
    let mut out = String::new();
    if result.is_positive() {
        writeln!(out, "Elevated Risk of Heart Disease")?;
    } else {
        writeln!(out, "Low Risk of Heart Disease")?;
    }
    writeln!(
        out,
        "Risk score: {}% (probability={:.4})",
        result.risk_percent(),
        result.probability
    )?;
    if result.risk_factors.is_empty() {
        writeln!(out, "Risk factors: none")?;
    } else {
        writeln!(out, "Risk factors:")?;
        for f in &result.risk_factors {
            writeln!(out, "  {:<16}{:>6.1}%", f.name.label(), f.contribution)?;
        }
    }
    Ok(out)
}

pub fn format_history(entries: &[HistoryEntry]) -> Result<String> {
    let mut out = String::new();
    if entries.is_empty() {
        writeln!(out, "No saved predictions")?;
        return Ok(out);
    }

    for e in entries {
        let top = e
            .result
            .top_factor()
            .map(|f| f.name.label())
            .unwrap_or("-");
        writeln!(
            out,
            "{}\t{}\t{}\t{}%\t{}",
            e.id,
            e.timestamp.format("%Y-%m-%d %H:%M"),
            if e.result.is_positive() {
                "High Risk"
            } else {
                "Low Risk"
            },
            e.result.risk_percent(),
            top
        )?;
    }

    let results: Vec<PredictionResult> = entries.iter().map(|e| e.result.clone()).collect();
    let summary = summarize(&results, None)?;
    writeln!(
        out,
        "entries: {}, high risk: {}, low risk: {}",
        summary.records,
        summary.positive,
        summary.records - summary.positive
    )?;
    for f in &summary.top_factors {
        writeln!(out, "  {:<16}{:>8.1}", f.name.label(), f.total_contribution)?;
    }
    Ok(out)
}
