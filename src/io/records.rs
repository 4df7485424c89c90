use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use crate::io::open_maybe_gz;
use crate::record::{Field, HealthRecord, RawRecord};

#[derive(Debug, Clone)]
pub struct RecordTable {
    pub ids: Vec<String>,
    pub records: Vec<HealthRecord>,
    pub targets: Option<Vec<u8>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Field(Field),
    Id,
    Target,
    Ignored,
}

/// Reads a delimited record file (`.csv` is comma separated, anything else
/// tab separated; a trailing `.gz` is decompressed).
pub fn read_records(path: &Path) -> Result<RecordTable> {
    let mut reader =
        open_maybe_gz(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_records(&content, &path.display().to_string(), delimiter_for(path))
}

pub fn delimiter_for(path: &Path) -> char {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") { ',' } else { '\t' }
}

pub fn parse_records(content: &str, source: &str, delimiter: char) -> Result<RecordTable> {
    let mut lines = content.lines().enumerate().filter(|(_, line)| {
        let trimmed = line.trim();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    });

    let (_, header) = lines
        .next()
        .ok_or_else(|| anyhow!("{} is empty", source))?;

    let mut warnings = Vec::new();
    let mut columns = Vec::new();
    let mut has_target = false;
    for name in header.split(delimiter) {
        let name = unquote(name);
        let column = if name.eq_ignore_ascii_case("id") {
            Column::Id
        } else if name.eq_ignore_ascii_case("target") {
            has_target = true;
            Column::Target
        } else if let Ok(field) = name.parse::<Field>() {
            Column::Field(field)
        } else {
            warnings.push(format!("{}: ignoring column '{}'", source, name));
            Column::Ignored
        };
        columns.push(column);
    }

    for field in Field::ALL {
        let count = columns
            .iter()
            .filter(|c| matches!(c, Column::Field(f) if *f == field))
            .count();
        if count == 0 {
            bail!("{} missing column '{}'", source, field);
        }
        if count > 1 {
            bail!("{} duplicate column '{}'", source, field);
        }
    }

    let mut ids = Vec::new();
    let mut records = Vec::new();
    let mut targets = Vec::new();

    for (idx, line) in lines {
        let line_no = idx + 1;
        let parts: Vec<&str> = line.split(delimiter).collect();
        if parts.len() != columns.len() {
            bail!(
                "{}:{} expected {} columns, found {}",
                source,
                line_no,
                columns.len(),
                parts.len()
            );
        }

        let mut raw = RawRecord::default();
        let mut id = None;
        for (column, value) in columns.iter().zip(parts) {
            let value = unquote(value);
            match column {
                Column::Field(field) => raw.set(*field, value),
                Column::Id => id = Some(value.to_string()),
                Column::Target => targets.push(parse_target(value, source, line_no)?),
                Column::Ignored => {}
            }
        }

        let record = HealthRecord::try_from(raw)
            .with_context(|| format!("{}:{} invalid record", source, line_no))?;
        records.push(record);
        ids.push(id.unwrap_or_else(|| format!("record_{}", records.len())));
    }

    if records.is_empty() {
        bail!("{} contains no records", source);
    }

    Ok(RecordTable {
        ids,
        records,
        targets: if has_target { Some(targets) } else { None },
        warnings,
    })
}

/// Reads one record from a JSON object, optionally wrapped as
/// `{"formData": {...}}`.
pub fn read_record_json(path: &Path) -> Result<RawRecord> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read record {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let body = match value.get("formData") {
        Some(inner) => inner.clone(),
        None => value,
    };
    if !body.is_object() {
        bail!("{} must contain a JSON object", path.display());
    }
    let raw: RawRecord = serde_json::from_value(body)
        .with_context(|| format!("{} has malformed fields", path.display()))?;
    Ok(raw)
}

fn parse_target(value: &str, source: &str, line_no: usize) -> Result<u8> {
    match value {
        "0" => Ok(0),
        "1" => Ok(1),
        other => bail!("{}:{} target must be 0 or 1, got '{}'", source, line_no, other),
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"')
}
