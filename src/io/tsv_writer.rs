use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;
use crate::scores::MAX_RISK_FACTORS;

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    let n = ctx.records.len();
    ensure_len(ctx.ids.len(), n, "ids")?;
    ensure_len(ctx.results.len(), n, "results")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    write!(w, "id\tprobability\tprediction")?;
    for i in 1..=MAX_RISK_FACTORS {
        write!(w, "\tfactor_{}", i)?;
    }
    writeln!(w)?;

    for (id, result) in ctx.ids.iter().zip(ctx.results.iter()) {
        if result.probability.is_nan() {
            bail!("NaN probability for record {}", id);
        }
        write!(
            w,
            "{}\t{:.6}\t{}",
            id, result.probability, result.prediction
        )?;
        for i in 0..MAX_RISK_FACTORS {
            match result.risk_factors.get(i) {
                Some(f) => write!(w, "\t{}:{:.4}", f.name, f.contribution)?,
                None => write!(w, "\t")?,
            }
        }
        writeln!(w)?;
    }

    w.flush()?;
    Ok(())
}

fn ensure_len(got: usize, expected: usize, name: &str) -> Result<()> {
    if got != expected {
        bail!("{} length mismatch: {} != {}", name, got, expected);
    }
    Ok(())
}
