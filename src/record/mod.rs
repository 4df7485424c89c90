//! Clinical input record for heart-disease risk scoring.
//!
//! `HealthRecord` is the typed, validated form of the thirteen dataset
//! fields. Untyped input (form values, JSON objects, delimited rows) enters
//! through `RawRecord` and is converted once at the boundary.

mod catalog;
mod raw;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

pub use catalog::{FieldInfo, catalog, field_info};
pub use raw::{RawRecord, RawValue};

pub const AGE_RANGE: (u32, u32) = (1, 120);
pub const TRESTBPS_RANGE: (u32, u32) = (1, 300);
pub const CHOL_RANGE: (u32, u32) = (1, 1000);
pub const THALACH_RANGE: (u32, u32) = (1, 300);
pub const OLDPEAK_RANGE: (f64, f64) = (0.0, 10.0);
pub const MAX_CA: u8 = 4;

/// Field identifiers in canonical dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Age,
    Sex,
    Cp,
    Trestbps,
    Chol,
    Fbs,
    Restecg,
    Thalach,
    Exang,
    Oldpeak,
    Slope,
    Ca,
    Thal,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Age,
        Field::Sex,
        Field::Cp,
        Field::Trestbps,
        Field::Chol,
        Field::Fbs,
        Field::Restecg,
        Field::Thalach,
        Field::Exang,
        Field::Oldpeak,
        Field::Slope,
        Field::Ca,
        Field::Thal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Sex => "sex",
            Field::Cp => "cp",
            Field::Trestbps => "trestbps",
            Field::Chol => "chol",
            Field::Fbs => "fbs",
            Field::Restecg => "restecg",
            Field::Thalach => "thalach",
            Field::Exang => "exang",
            Field::Oldpeak => "oldpeak",
            Field::Slope => "slope",
            Field::Ca => "ca",
            Field::Thal => "thal",
        }
    }

    /// Short display label, e.g. "Blood Pressure".
    pub fn label(self) -> &'static str {
        field_info(self).label
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ScoreError::UnknownField(needle.to_string()))
    }
}

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const CODES: &'static [u8] = &[$($code),+];

            pub fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum!(
    /// 0 = female, 1 = male.
    Sex { Female = 0, Male = 1 }
);

coded_enum!(
    ChestPain {
        TypicalAngina = 0,
        AtypicalAngina = 1,
        NonAnginal = 2,
        Asymptomatic = 3,
    }
);

coded_enum!(
    RestEcg {
        Normal = 0,
        StTAbnormality = 1,
        LvHypertrophy = 2,
    }
);

coded_enum!(
    /// Slope of the peak exercise ST segment.
    Slope {
        Upsloping = 0,
        Flat = 1,
        Downsloping = 2,
    }
);

coded_enum!(
    Thal {
        Normal = 0,
        FixedDefect = 1,
        ReversibleDefect = 2,
        Unknown = 3,
    }
);

/// A complete, validated set of the thirteen clinical parameters.
///
/// Serialises as a flat object of numeric codes (the dataset encoding) and
/// deserialises through [`RawRecord`], so both numbers and numeric strings
/// are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordWire", try_from = "RawRecord")]
pub struct HealthRecord {
    pub age: u32,
    pub sex: Sex,
    pub cp: ChestPain,
    pub trestbps: u32,
    pub chol: u32,
    pub fbs: bool,
    pub restecg: RestEcg,
    pub thalach: u32,
    pub exang: bool,
    pub oldpeak: f64,
    pub slope: Slope,
    pub ca: u8,
    pub thal: Thal,
}

impl HealthRecord {
    /// Numeric dataset encoding of one field.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age as f64,
            Field::Sex => self.sex.code() as f64,
            Field::Cp => self.cp.code() as f64,
            Field::Trestbps => self.trestbps as f64,
            Field::Chol => self.chol as f64,
            Field::Fbs => self.fbs as u8 as f64,
            Field::Restecg => self.restecg.code() as f64,
            Field::Thalach => self.thalach as f64,
            Field::Exang => self.exang as u8 as f64,
            Field::Oldpeak => self.oldpeak,
            Field::Slope => self.slope.code() as f64,
            Field::Ca => self.ca as f64,
            Field::Thal => self.thal.code() as f64,
        }
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        check_range(Field::Age, self.age, AGE_RANGE)?;
        check_range(Field::Trestbps, self.trestbps, TRESTBPS_RANGE)?;
        check_range(Field::Chol, self.chol, CHOL_RANGE)?;
        check_range(Field::Thalach, self.thalach, THALACH_RANGE)?;
        if !self.oldpeak.is_finite()
            || self.oldpeak < OLDPEAK_RANGE.0
            || self.oldpeak > OLDPEAK_RANGE.1
        {
            return Err(ScoreError::invalid(
                Field::Oldpeak.as_str(),
                format!(
                    "{} outside {}..={}",
                    self.oldpeak, OLDPEAK_RANGE.0, OLDPEAK_RANGE.1
                ),
            ));
        }
        if self.ca > MAX_CA {
            return Err(ScoreError::invalid(
                Field::Ca.as_str(),
                format!("{} outside 0..={}", self.ca, MAX_CA),
            ));
        }
        Ok(())
    }
}

impl Default for HealthRecord {
    /// Form defaults shown before the user edits anything.
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::Male,
            cp: ChestPain::TypicalAngina,
            trestbps: 120,
            chol: 200,
            fbs: false,
            restecg: RestEcg::Normal,
            thalach: 150,
            exang: false,
            oldpeak: 1.0,
            slope: Slope::Flat,
            ca: 0,
            thal: Thal::ReversibleDefect,
        }
    }
}

fn check_range(field: Field, value: u32, (min, max): (u32, u32)) -> Result<(), ScoreError> {
    if value < min || value > max {
        return Err(ScoreError::invalid(
            field.as_str(),
            format!("{} outside {}..={}", value, min, max),
        ));
    }
    Ok(())
}

#[derive(Serialize)]
struct RecordWire {
    age: u32,
    sex: u8,
    cp: u8,
    trestbps: u32,
    chol: u32,
    fbs: u8,
    restecg: u8,
    thalach: u32,
    exang: u8,
    oldpeak: f64,
    slope: u8,
    ca: u8,
    thal: u8,
}

impl From<HealthRecord> for RecordWire {
    fn from(r: HealthRecord) -> Self {
        Self {
            age: r.age,
            sex: r.sex.code(),
            cp: r.cp.code(),
            trestbps: r.trestbps,
            chol: r.chol,
            fbs: r.fbs as u8,
            restecg: r.restecg.code(),
            thalach: r.thalach,
            exang: r.exang as u8,
            oldpeak: r.oldpeak,
            slope: r.slope.code(),
            ca: r.ca,
            thal: r.thal.code(),
        }
    }
}
