use std::fmt;

use serde::Deserialize;

use crate::error::ScoreError;
use crate::record::{ChestPain, Field, HealthRecord, RestEcg, Sex, Slope, Thal};

/// A single untyped input value: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// Form-shaped input where any field may be absent or textual.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub age: Option<RawValue>,
    pub sex: Option<RawValue>,
    pub cp: Option<RawValue>,
    pub trestbps: Option<RawValue>,
    pub chol: Option<RawValue>,
    pub fbs: Option<RawValue>,
    pub restecg: Option<RawValue>,
    pub thalach: Option<RawValue>,
    pub exang: Option<RawValue>,
    pub oldpeak: Option<RawValue>,
    pub slope: Option<RawValue>,
    pub ca: Option<RawValue>,
    pub thal: Option<RawValue>,
}

impl RawRecord {
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        match field {
            Field::Age => self.age.as_ref(),
            Field::Sex => self.sex.as_ref(),
            Field::Cp => self.cp.as_ref(),
            Field::Trestbps => self.trestbps.as_ref(),
            Field::Chol => self.chol.as_ref(),
            Field::Fbs => self.fbs.as_ref(),
            Field::Restecg => self.restecg.as_ref(),
            Field::Thalach => self.thalach.as_ref(),
            Field::Exang => self.exang.as_ref(),
            Field::Oldpeak => self.oldpeak.as_ref(),
            Field::Slope => self.slope.as_ref(),
            Field::Ca => self.ca.as_ref(),
            Field::Thal => self.thal.as_ref(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<RawValue>) {
        let slot = match field {
            Field::Age => &mut self.age,
            Field::Sex => &mut self.sex,
            Field::Cp => &mut self.cp,
            Field::Trestbps => &mut self.trestbps,
            Field::Chol => &mut self.chol,
            Field::Fbs => &mut self.fbs,
            Field::Restecg => &mut self.restecg,
            Field::Thalach => &mut self.thalach,
            Field::Exang => &mut self.exang,
            Field::Oldpeak => &mut self.oldpeak,
            Field::Slope => &mut self.slope,
            Field::Ca => &mut self.ca,
            Field::Thal => &mut self.thal,
        };
        *slot = Some(value.into());
    }

    fn number(&self, field: Field) -> Result<f64, ScoreError> {
        let value = self
            .get(field)
            .ok_or_else(|| ScoreError::invalid(field.as_str(), "missing"))?;
        let n = value.as_f64().ok_or_else(|| {
            ScoreError::invalid(field.as_str(), format!("'{}' is not numeric", value))
        })?;
        if !n.is_finite() {
            return Err(ScoreError::invalid(field.as_str(), "not a finite number"));
        }
        Ok(n)
    }

    fn integer(&self, field: Field) -> Result<u32, ScoreError> {
        let n = self.number(field)?;
        if n.fract() != 0.0 || n < 0.0 || n > u32::MAX as f64 {
            return Err(ScoreError::invalid(
                field.as_str(),
                format!("expected a non-negative integer, got {}", n),
            ));
        }
        Ok(n as u32)
    }

    fn code<T>(
        &self,
        field: Field,
        codes: &[u8],
        from_code: fn(u8) -> Option<T>,
    ) -> Result<T, ScoreError> {
        let n = self.integer(field)?;
        u8::try_from(n)
            .ok()
            .and_then(from_code)
            .ok_or_else(|| {
                ScoreError::invalid(
                    field.as_str(),
                    format!("expected one of {:?}, got {}", codes, n),
                )
            })
    }

    fn flag(&self, field: Field) -> Result<bool, ScoreError> {
        match self.integer(field)? {
            0 => Ok(false),
            1 => Ok(true),
            n => Err(ScoreError::invalid(
                field.as_str(),
                format!("expected 0 or 1, got {}", n),
            )),
        }
    }
}

impl From<HealthRecord> for RawRecord {
    fn from(record: HealthRecord) -> Self {
        let mut raw = RawRecord::default();
        for field in Field::ALL {
            raw.set(field, record.value(field));
        }
        raw
    }
}

impl TryFrom<RawRecord> for HealthRecord {
    type Error = ScoreError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let record = HealthRecord {
            age: raw.integer(Field::Age)?,
            sex: raw.code(Field::Sex, Sex::CODES, Sex::from_code)?,
            cp: raw.code(Field::Cp, ChestPain::CODES, ChestPain::from_code)?,
            trestbps: raw.integer(Field::Trestbps)?,
            chol: raw.integer(Field::Chol)?,
            fbs: raw.flag(Field::Fbs)?,
            restecg: raw.code(Field::Restecg, RestEcg::CODES, RestEcg::from_code)?,
            thalach: raw.integer(Field::Thalach)?,
            exang: raw.flag(Field::Exang)?,
            oldpeak: raw.number(Field::Oldpeak)?,
            slope: raw.code(Field::Slope, Slope::CODES, Slope::from_code)?,
            ca: raw.integer(Field::Ca).and_then(|n| {
                u8::try_from(n).map_err(|_| {
                    ScoreError::invalid(Field::Ca.as_str(), format!("{} out of range", n))
                })
            })?,
            thal: raw.code(Field::Thal, Thal::CODES, Thal::from_code)?,
        };
        record.validate()?;
        Ok(record)
    }
}
