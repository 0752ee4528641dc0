use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use super::domain::{ReportError, ScoreRecord};
use super::period::{self, ReportGranularity};
use super::report::{self, ReportPolicy};
use super::repository::{RatingsRepository, RepositoryError};

/// Format date bounds are rendered to when crossing the repository port.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Service composing argument validation, the repository port, and the
/// report engine. Each call allocates its own accumulators, so concurrent
/// requests share nothing.
pub struct RatingsService<R> {
    repository: Arc<R>,
    policy: ReportPolicy,
}

impl<R> RatingsService<R>
where
    R: RatingsRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_policy(repository, ReportPolicy::default())
    }

    pub fn with_policy(repository: Arc<R>, policy: ReportPolicy) -> Self {
        Self { repository, policy }
    }

    /// Range-wide weighted percentage, computed by the ratings store.
    pub fn get_overall_score(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<f64, ServiceError> {
        let (start, end) = validate_range(start, end)?;
        info!(%start, %end, "processing overall score request");

        let score = self
            .repository
            .fetch_overall_score(&format_bound(start), &format_bound(end))?;
        Ok(score)
    }

    /// Totals record plus daily or weekly detail buckets, granularity chosen
    /// from the range length.
    pub fn get_aggregated_scores(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Vec<ScoreRecord>, ServiceError> {
        let (start, end) = validate_range(start, end)?;

        let rows = self
            .repository
            .fetch_weighted_ratings(&format_bound(start), &format_bound(end))?;

        let granularity = period::classify(start, end);
        match granularity {
            ReportGranularity::Daily => info!(%start, %end, rows = rows.len(), "generating daily report"),
            ReportGranularity::Weekly => info!(%start, %end, rows = rows.len(), "generating weekly report"),
        }

        let records = report::build_report(&rows, granularity, self.policy)?;
        Ok(records)
    }
}

fn validate_range(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<(NaiveDateTime, NaiveDateTime), ServiceError> {
    match (start, end) {
        (Some(start), Some(end)) if start <= end => Ok((start, end)),
        (start, end) => {
            warn!(?start, ?end, "invalid date range");
            Err(ServiceError::InvalidDateRange)
        }
    }
}

fn format_bound(bound: NaiveDateTime) -> String {
    bound.format(QUERY_DATE_FORMAT).to_string()
}

/// Error raised by the ratings service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("start_date and end_date are required, and start_date cannot be after end_date")]
    InvalidDateRange,
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
