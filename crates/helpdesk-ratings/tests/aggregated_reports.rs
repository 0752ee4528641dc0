use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use helpdesk_ratings::reports::{
    RatingRow, RatingsRepository, RatingsService, ReportError, RepositoryError, ReportPolicy,
    ScoreFormula, ScoreKind, ServiceError,
};

struct SeededRepository {
    rows: Vec<RatingRow>,
}

impl RatingsRepository for SeededRepository {
    fn fetch_weighted_ratings(
        &self,
        _start: &str,
        _end: &str,
    ) -> Result<Vec<RatingRow>, RepositoryError> {
        Ok(self.rows.clone())
    }

    fn fetch_overall_score(&self, _start: &str, _end: &str) -> Result<f64, RepositoryError> {
        Ok(0.0)
    }
}

fn service(rows: Vec<RatingRow>) -> RatingsService<SeededRepository> {
    RatingsService::new(Arc::new(SeededRepository { rows }))
}

fn bound(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    Some(
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time"),
    )
}

fn row(year: i32, month: u32, day: u32, category: &str, value: i32, weight: f64) -> RatingRow {
    RatingRow {
        day: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        category: category.to_string(),
        value,
        weight,
        total: 1,
    }
}

#[test]
fn short_range_produces_totals_then_daily_buckets() {
    let rows = vec![
        row(2025, 1, 1, "Spelling", 4, 0.7),
        row(2025, 1, 1, "Spelling", 5, 0.3),
        row(2025, 1, 2, "Grammar", 3, 1.0),
        row(2025, 1, 5, "GDPR", 5, 0.5),
    ];
    let records = service(rows)
        .get_aggregated_scores(bound(2025, 1, 1), bound(2025, 1, 20))
        .expect("report builds");

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].kind, ScoreKind::Totals);
    assert_eq!(records[0].spelling, 2);
    assert_eq!(records[0].grammar, 1);

    assert_eq!(records[1].kind, ScoreKind::Daily);
    assert_eq!(records[1].label, "2025-01-01");
    assert_eq!(records[1].spelling, 86);

    assert_eq!(records[2].label, "2025-01-02");
    assert_eq!(records[2].grammar, 60);

    assert_eq!(records[3].label, "2025-01-05");
    assert_eq!(records[3].gdpr, 100);
}

#[test]
fn long_range_produces_weekly_buckets() {
    // 16 distinct days across two months: two full weeks plus a 2-day tail.
    let mut rows = Vec::new();
    for day in 1..=16 {
        rows.push(row(2025, 3, day, "Spelling", 4, 1.0));
    }
    let records = service(rows)
        .get_aggregated_scores(bound(2025, 3, 1), bound(2025, 4, 15))
        .expect("report builds");

    let labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["", "Week 1", "Week 2", "Week 3"]);
    assert_eq!(records[1].kind, ScoreKind::Weekly);
    assert_eq!(records[3].spelling, 80);
}

#[test]
fn weekly_trailing_single_day_is_dropped() {
    let mut rows = Vec::new();
    for day in 1..=8 {
        rows.push(row(2025, 3, day, "Randomness", 5, 1.0));
    }
    let records = service(rows)
        .get_aggregated_scores(bound(2025, 3, 1), bound(2025, 4, 15))
        .expect("report builds");

    // Totals plus Week 1; the lone day 8 never becomes a bucket.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].randomness, 8);
    assert_eq!(records[1].label, "Week 1");
}

#[test]
fn weekly_average_policy_scores_raw_values() {
    let mut rows = Vec::new();
    for day in 1..=9 {
        rows.push(row(2025, 3, day, "Grammar", (day % 5) as i32 + 1, 0.2));
    }
    let policy = ReportPolicy {
        weekly_formula: ScoreFormula::Average,
        emit_single_day_tail: true,
    };
    let service =
        RatingsService::with_policy(Arc::new(SeededRepository { rows: rows.clone() }), policy);
    let records = service
        .get_aggregated_scores(bound(2025, 3, 1), bound(2025, 4, 15))
        .expect("report builds");

    // Days 1-7 carry values 2,3,4,5,1,2,3 -> truncating mean 2.
    assert_eq!(records[1].grammar, 2);
    // The 2-day tail (values 4, 5) survives under the policy.
    assert_eq!(records.last().expect("tail bucket").grammar, 4);
}

#[test]
fn empty_range_still_answers_with_a_totals_record() {
    let records = service(Vec::new())
        .get_aggregated_scores(bound(2025, 1, 1), bound(2025, 1, 20))
        .expect("report builds");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].kind, ScoreKind::Totals);
    assert_eq!(records[0].label, "");
    assert_eq!(records[0].spelling, 0);
    assert_eq!(records[0].grammar, 0);
    assert_eq!(records[0].gdpr, 0);
    assert_eq!(records[0].randomness, 0);
}

#[test]
fn one_bad_row_fails_the_whole_report() {
    let rows = vec![
        row(2025, 1, 1, "Spelling", 4, 0.7),
        row(2025, 1, 2, "Punctuality", 5, 0.3),
        row(2025, 1, 3, "Grammar", 3, 1.0),
    ];
    match service(rows).get_aggregated_scores(bound(2025, 1, 1), bound(2025, 1, 20)) {
        Err(ServiceError::Report(ReportError::UnknownCategory { name })) => {
            assert_eq!(name, "Punctuality");
        }
        other => panic!("expected unknown category failure, got {other:?}"),
    }
}

#[test]
fn bounds_are_validated_before_touching_the_repository() {
    struct PanickingRepository;

    impl RatingsRepository for PanickingRepository {
        fn fetch_weighted_ratings(
            &self,
            _start: &str,
            _end: &str,
        ) -> Result<Vec<RatingRow>, RepositoryError> {
            panic!("repository must not be reached");
        }

        fn fetch_overall_score(&self, _start: &str, _end: &str) -> Result<f64, RepositoryError> {
            panic!("repository must not be reached");
        }
    }

    let service = RatingsService::new(Arc::new(PanickingRepository));
    assert!(matches!(
        service.get_aggregated_scores(bound(2025, 2, 1), bound(2025, 1, 1)),
        Err(ServiceError::InvalidDateRange)
    ));
    assert!(matches!(
        service.get_overall_score(None, bound(2025, 1, 1)),
        Err(ServiceError::InvalidDateRange)
    ));
}
