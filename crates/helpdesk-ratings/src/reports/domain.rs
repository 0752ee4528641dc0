use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed set of categories a helpdesk rating can belong to.
///
/// Rows arrive from the ratings store with the category as text; everything
/// downstream of [`RatingCategory::parse`] works with the enum only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    Spelling,
    Grammar,
    Gdpr,
    Randomness,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 4] = [
        RatingCategory::Spelling,
        RatingCategory::Grammar,
        RatingCategory::Gdpr,
        RatingCategory::Randomness,
    ];

    /// Validate a stored category name. Any name outside the closed set is a
    /// data-integrity fault and aborts the report being built.
    pub fn parse(name: &str) -> Result<Self, ReportError> {
        match name {
            "Spelling" => Ok(Self::Spelling),
            "Grammar" => Ok(Self::Grammar),
            "GDPR" => Ok(Self::Gdpr),
            "Randomness" => Ok(Self::Randomness),
            other => Err(ReportError::UnknownCategory {
                name: other.to_string(),
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spelling => "Spelling",
            Self::Grammar => "Grammar",
            Self::Gdpr => "GDPR",
            Self::Randomness => "Randomness",
        }
    }
}

/// One stored rating as fetched from the ratings store, ordered by day
/// ascending then category. Rows are never mutated; the engine only folds
/// them into accumulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRow {
    pub day: NaiveDate,
    pub category: String,
    /// Raw human-entered rating, 1 through 5.
    pub value: i32,
    /// Category importance weight at query time, non-negative.
    pub weight: f64,
    /// Count of ratings behind this row's aggregate slice; feeds the Totals
    /// record only.
    pub total: i64,
}

/// Which report a [`ScoreRecord`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Totals,
    Daily,
    Weekly,
}

/// One emitted report line: a closed bucket, or the range-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub kind: ScoreKind,
    /// Day string for daily buckets, `"Week N"` for weekly buckets, empty
    /// for totals.
    pub label: String,
    pub spelling: i64,
    pub grammar: i64,
    pub gdpr: i64,
    pub randomness: i64,
}

/// Failures while folding rows into a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unknown category: {name}")]
    UnknownCategory { name: String },
}
