//! Rating aggregation and quality report generation.
//!
//! An ordered sequence of rating rows is folded into a totals record plus
//! daily or weekly detail buckets, each closed into per-category scores.

pub mod accumulator;
pub mod domain;
pub mod period;
pub mod report;
pub mod repository;
pub mod router;
pub mod score;
pub mod service;

pub use accumulator::CategoryAccumulator;
pub use domain::{RatingCategory, RatingRow, ReportError, ScoreKind, ScoreRecord};
pub use period::{classify, within_calendar_month, within_min_window, ReportGranularity};
pub use report::{
    build_report, daily_report, totals_report, weekly_report, ReportPolicy, ScoreFormula,
};
pub use repository::{RatingsRepository, RepositoryError};
pub use router::score_router;
pub use score::{average, weighted_score, WeightedValue};
pub use service::{RatingsService, ServiceError, QUERY_DATE_FORMAT};
