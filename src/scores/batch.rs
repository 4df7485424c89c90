use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use crate::math::stats::{fraction, mean, median};
use crate::record::{Field, HealthRecord};
use crate::scores::{
    AggregateFactor, CohortSummary, MAX_AGGREGATE_FACTORS, PredictionResult, score,
};

#[cfg(feature = "mt")]
use rayon::prelude::*;

/// Scores every record, preserving input order.
///
/// `threads == 0` uses the global rayon pool when the `mt` feature is on.
pub fn score_batch(records: &[HealthRecord], threads: usize) -> Result<Vec<PredictionResult>> {
    #[cfg(feature = "mt")]
    {
        let run = || {
            records
                .par_iter()
                .enumerate()
                .map(|(i, r)| score(r).with_context(|| format!("record {} rejected", i + 1)))
                .collect::<Result<Vec<_>>>()
        };
        if threads == 0 {
            return run();
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
        pool.install(run)
    }

    #[cfg(not(feature = "mt"))]
    {
        let _ = threads;
        records
            .iter()
            .enumerate()
            .map(|(i, r)| score(r).with_context(|| format!("record {} rejected", i + 1)))
            .collect()
    }
}

/// Aggregates a batch of results. `targets`, when given, are ground-truth
/// labels aligned with `results`.
pub fn summarize(results: &[PredictionResult], targets: Option<&[u8]>) -> Result<CohortSummary> {
    let mut probabilities = Vec::with_capacity(results.len());
    for r in results {
        if r.probability.is_nan() {
            bail!("NaN encountered in probability vector");
        }
        probabilities.push(r.probability);
    }

    let positive = results.iter().filter(|r| r.is_positive()).count();
    let mean_probability = mean(&probabilities);
    let median_probability = median(&mut probabilities);

    let agreement = match targets {
        Some(t) => {
            if t.len() != results.len() {
                bail!(
                    "target length mismatch: {} != {}",
                    t.len(),
                    results.len()
                );
            }
            let agree = results
                .iter()
                .zip(t.iter())
                .filter(|(r, target)| r.prediction == **target)
                .count();
            Some(fraction(agree, results.len()))
        }
        None => None,
    };

    Ok(CohortSummary {
        records: results.len(),
        positive,
        positive_fraction: fraction(positive, results.len()),
        mean_probability,
        median_probability,
        top_factors: aggregate_factors(results),
        agreement,
    })
}

/// Sums contributions per field across results, largest first.
pub fn aggregate_factors(results: &[PredictionResult]) -> Vec<AggregateFactor> {
    let mut totals: BTreeMap<Field, f64> = BTreeMap::new();
    for r in results {
        for f in &r.risk_factors {
            *totals.entry(f.name).or_insert(0.0) += f.contribution.abs();
        }
    }

    let mut out: Vec<AggregateFactor> = totals
        .into_iter()
        .map(|(name, total_contribution)| AggregateFactor {
            name,
            total_contribution,
        })
        .collect();
    out.sort_by(|a, b| {
        b.total_contribution
            .partial_cmp(&a.total_contribution)
            .unwrap_or(Ordering::Equal)
            .then(a.name.cmp(&b.name))
    });
    out.truncate(MAX_AGGREGATE_FACTORS);
    out
}
