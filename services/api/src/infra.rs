use chrono::NaiveDateTime;
use helpdesk_ratings::reports::{
    CategoryAccumulator, RatingCategory, RatingRow, RatingsRepository, RepositoryError,
    QUERY_DATE_FORMAT,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One seeded rating with its creation timestamp.
#[derive(Debug, Clone)]
pub(crate) struct StoredRating {
    pub(crate) created_at: NaiveDateTime,
    pub(crate) category: RatingCategory,
    pub(crate) value: i32,
}

/// Ratings store adapter backed by a vector, standing in for the production
/// database. Category weights are fixed at construction, mirroring the
/// weight column the real store joins in at query time.
#[derive(Clone)]
pub(crate) struct InMemoryRatingsRepository {
    ratings: Arc<Mutex<Vec<StoredRating>>>,
    weights: CategoryAccumulator<f64>,
}

impl InMemoryRatingsRepository {
    pub(crate) fn new(weights: CategoryAccumulator<f64>) -> Self {
        Self {
            ratings: Arc::new(Mutex::new(Vec::new())),
            weights,
        }
    }

    pub(crate) fn with_default_weights() -> Self {
        Self::new(default_category_weights())
    }

    pub(crate) fn record(&self, created_at: NaiveDateTime, category: RatingCategory, value: i32) {
        let mut guard = self.ratings.lock().expect("ratings mutex poisoned");
        guard.push(StoredRating {
            created_at,
            category,
            value,
        });
    }

    fn in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<StoredRating> {
        let guard = self.ratings.lock().expect("ratings mutex poisoned");
        guard
            .iter()
            .filter(|rating| rating.created_at >= start && rating.created_at <= end)
            .cloned()
            .collect()
    }
}

impl RatingsRepository for InMemoryRatingsRepository {
    fn fetch_weighted_ratings(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<RatingRow>, RepositoryError> {
        let start = parse_bound(start)?;
        let end = parse_bound(end)?;

        let mut stored = self.in_range(start, end);
        stored.sort_by_key(|rating| (rating.created_at.date(), rating.category));

        Ok(stored
            .into_iter()
            .map(|rating| RatingRow {
                day: rating.created_at.date(),
                category: rating.category.label().to_string(),
                value: rating.value,
                weight: *self.weights.slot(rating.category),
                total: 1,
            })
            .collect())
    }

    fn fetch_overall_score(&self, start: &str, end: &str) -> Result<f64, RepositoryError> {
        let start = parse_bound(start)?;
        let end = parse_bound(end)?;

        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;
        for rating in self.in_range(start, end) {
            let weight = *self.weights.slot(rating.category);
            weight_sum += weight;
            value_sum += (f64::from(rating.value) / 5.0) * weight;
        }

        if value_sum == 0.0 || weight_sum == 0.0 {
            return Ok(0.0);
        }
        Ok(100.0 * (value_sum / weight_sum))
    }
}

pub(crate) fn default_category_weights() -> CategoryAccumulator<f64> {
    CategoryAccumulator {
        spelling: 0.7,
        grammar: 0.9,
        gdpr: 1.0,
        randomness: 0.3,
    }
}

fn parse_bound(raw: &str) -> Result<NaiveDateTime, RepositoryError> {
    NaiveDateTime::parse_from_str(raw, QUERY_DATE_FORMAT)
        .map_err(|err| RepositoryError::Query(format!("invalid bound '{raw}': {err}")))
}
