use crate::infra::InMemoryRatingsRepository;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clap::Args;
use helpdesk_ratings::error::AppError;
use helpdesk_ratings::reports::{RatingCategory, RatingsService, ScoreKind, ScoreRecord};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// How many days of seeded ratings to generate
    #[arg(long, default_value_t = 42)]
    pub(crate) days: u32,
}

/// Seed an in-memory ratings store and print the overall score, a short
/// daily report, and the full-range weekly report to stdout.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryRatingsRepository::with_default_weights());
    let today = Local::now().date_naive();
    let days = args.days.max(1);
    seed_ratings(&repository, today, days);

    let service = RatingsService::new(repository);

    let end = at_end_of(today);
    let recent_start = at_start_of(today - Duration::days(9));
    let full_start = at_start_of(today - Duration::days(i64::from(days) - 1));

    let overall = service.get_overall_score(Some(full_start), Some(end))?;
    println!("Overall weighted score: {overall:.1}%");

    println!();
    println!("Last 10 days:");
    let daily = service.get_aggregated_scores(Some(recent_start), Some(end))?;
    print_records(&daily);

    println!();
    println!("Full {days}-day window:");
    let weekly = service.get_aggregated_scores(Some(full_start), Some(end))?;
    print_records(&weekly);

    Ok(())
}

fn seed_ratings(repository: &InMemoryRatingsRepository, today: NaiveDate, days: u32) {
    for offset in 0..i64::from(days) {
        let day = today - Duration::days(offset);
        for (index, category) in RatingCategory::ALL.into_iter().enumerate() {
            let value = ((offset as usize + index * 2) % 5) as i32 + 1;
            let created_at = day
                .and_hms_opt(8 + index as u32, 30, 0)
                .expect("valid time");
            repository.record(created_at, category, value);
        }
    }
}

fn print_records(records: &[ScoreRecord]) {
    for record in records {
        let kind = match record.kind {
            ScoreKind::Totals => "totals",
            ScoreKind::Daily => "daily",
            ScoreKind::Weekly => "weekly",
        };
        let label = if record.label.is_empty() {
            "(range)"
        } else {
            record.label.as_str()
        };
        println!(
            "  {kind:<7} {label:<12} spelling={:>3} grammar={:>3} gdpr={:>3} randomness={:>3}",
            record.spelling, record.grammar, record.gdpr, record.randomness
        );
    }
}

fn at_start_of(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(0, 0, 0).expect("valid time")
}

fn at_end_of(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(23, 59, 59).expect("valid time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_ratings::reports::RatingsRepository;

    #[test]
    fn seeded_values_stay_in_rating_domain() {
        let repository = InMemoryRatingsRepository::with_default_weights();
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        seed_ratings(&repository, today, 42);

        let rows = repository
            .fetch_weighted_ratings("2025-05-01T00:00:00", "2025-06-30T23:59:59")
            .expect("fetch succeeds");
        assert_eq!(rows.len(), 42 * 4);
        assert!(rows.iter().all(|row| (1..=5).contains(&row.value)));
    }
}
