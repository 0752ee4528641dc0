use super::domain::RatingRow;

/// Storage port for the ratings store so the engine and service can be
/// exercised without a live backend. Bounds cross this boundary already
/// rendered to the query format `%Y-%m-%dT%H:%M:%S`.
pub trait RatingsRepository: Send + Sync {
    /// All ratings in the range, one row per stored rating, ordered by day
    /// ascending then category.
    fn fetch_weighted_ratings(&self, start: &str, end: &str)
        -> Result<Vec<RatingRow>, RepositoryError>;

    /// The weighted percentage across the whole range, computed by the
    /// adapter with the same formula the detail buckets use.
    fn fetch_overall_score(&self, start: &str, end: &str) -> Result<f64, RepositoryError>;
}

/// Error enumeration for ratings store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("ratings store unavailable: {0}")]
    Unavailable(String),
    #[error("ratings query failed: {0}")]
    Query(String),
}
