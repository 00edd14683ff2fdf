// Rubric scoring: weighted yes/no criteria folded into a 0-100 score

pub mod dimensions;

pub use dimensions::DimensionMap;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("Criterion #{index} has no weight")]
    MissingWeight { index: usize },

    #[error("Criterion #{index} has a non-numeric weight")]
    InvalidWeight { index: usize },

    #[error("Criterion #{index} has a non-text judgement")]
    InvalidJudgement { index: usize },
}

/// The two fields of a rubric entry that scoring reads
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion<'a> {
    pub weight: f64,
    /// Empty when the entry has no judgement
    pub judgement: &'a str,
}

impl<'a> Criterion<'a> {
    /// Read weight and judgement from the rubric entry at `index`.
    /// A missing or null weight is an error; a missing or null judgement is empty.
    pub fn from_entry(index: usize, entry: &'a Value) -> Result<Self, ScoreError> {
        let weight = match entry.get("weight") {
            Some(Value::Number(n)) => n.as_f64().ok_or(ScoreError::InvalidWeight { index })?,
            Some(Value::Null) | None => return Err(ScoreError::MissingWeight { index }),
            Some(_) => return Err(ScoreError::InvalidWeight { index }),
        };

        let judgement = match entry.get("judgement") {
            Some(Value::String(text)) => text.as_str(),
            Some(Value::Null) | None => "",
            Some(_) => return Err(ScoreError::InvalidJudgement { index }),
        };

        Ok(Self { weight, judgement })
    }
}

/// Intermediate totals behind a rubric score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Sum of the weights of satisfied criteria (as magnitudes)
    pub achieved: f64,
    /// Sum of absolute weights of every criterion
    pub max: f64,
    /// Number of criteria that earned credit
    pub satisfied: usize,
    /// Number of criteria considered
    pub total: usize,
}

impl ScoreBreakdown {
    /// Score in [0, 100], rounded to two decimals. Zero when `max` is zero.
    pub fn score(&self) -> f64 {
        let raw = if self.max != 0.0 {
            100.0 * self.achieved / self.max
        } else {
            0.0
        };
        round2(raw.clamp(0.0, 100.0))
    }
}

/// Accumulate the rubric totals for a list of rubric entries.
///
/// A positive weight is earned by a judgement containing "yes"; a negative
/// weight (a "must not happen" criterion) is earned by one containing "no".
/// The "yes" check runs first and the two are exclusive. Every weight counts
/// toward the maximum whatever the judgement.
pub fn breakdown(entries: &[Value]) -> Result<ScoreBreakdown, ScoreError> {
    let mut totals = ScoreBreakdown {
        total: entries.len(),
        ..Default::default()
    };

    for (index, entry) in entries.iter().enumerate() {
        let Criterion { weight, judgement } = Criterion::from_entry(index, entry)?;

        totals.max += weight.abs();

        let judgement = judgement.trim().to_lowercase();
        if judgement.contains("yes") && weight > 0.0 {
            totals.achieved += weight;
            totals.satisfied += 1;
        } else if judgement.contains("no") && weight < 0.0 {
            totals.achieved -= weight;
            totals.satisfied += 1;
        }
    }

    Ok(totals)
}

/// Round to two decimal places, ties to even, judged on the exact value of
/// `value` rather than on the rounded product `value * 100`.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // exact rounding error of the product
    let error = value.mul_add(100.0, -scaled);

    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 && error != 0.0 {
        if error > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };

    rounded / 100.0
}
