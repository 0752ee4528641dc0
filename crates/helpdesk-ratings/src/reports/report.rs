use chrono::NaiveDate;

use super::accumulator::CategoryAccumulator;
use super::domain::{RatingRow, ReportError, ScoreKind, ScoreRecord};
use super::period::ReportGranularity;
use super::score::{self, WeightedValue};

/// Formula used to close a detail bucket into one score per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreFormula {
    /// `round(100 * Σ((value/5)*weight) / Σ(weight))`.
    #[default]
    Weighted,
    /// Plain truncating mean of the raw 1-5 values, ignoring weights.
    Average,
}

/// Per-report policy. Daily buckets always score with the weighted formula;
/// the weekly formula and the fate of a single-day trailing bucket are
/// chosen by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPolicy {
    pub weekly_formula: ScoreFormula,
    /// When false, a trailing weekly bucket spanning exactly one distinct
    /// day is dropped instead of emitted.
    pub emit_single_day_tail: bool,
}

/// Full report body: the totals record first, then the detail buckets in
/// chronological order. Any unknown category aborts the whole build.
pub fn build_report(
    rows: &[RatingRow],
    granularity: ReportGranularity,
    policy: ReportPolicy,
) -> Result<Vec<ScoreRecord>, ReportError> {
    let totals = totals_report(rows)?;
    let detail = match granularity {
        ReportGranularity::Daily => daily_report(rows)?,
        ReportGranularity::Weekly => weekly_report(rows, policy)?,
    };

    let mut records = Vec::with_capacity(detail.len() + 1);
    records.push(totals);
    records.extend(detail);
    Ok(records)
}

/// Range-wide totals: every row's `total` summed per category. Emitted for
/// every report, all-zero when the input is empty.
pub fn totals_report(rows: &[RatingRow]) -> Result<ScoreRecord, ReportError> {
    let mut sums = CategoryAccumulator::<i64>::default();
    for row in rows {
        sums.update(row, |slot, row| *slot += row.total)?;
    }

    Ok(ScoreRecord {
        kind: ScoreKind::Totals,
        label: String::new(),
        spelling: sums.spelling,
        grammar: sums.grammar,
        gdpr: sums.gdpr,
        randomness: sums.randomness,
    })
}

/// Fold state for the daily bucketer: the open bucket's day, its
/// accumulator, and everything emitted so far.
struct DailyFold {
    current_day: NaiveDate,
    bucket: CategoryAccumulator<Vec<WeightedValue>>,
    records: Vec<ScoreRecord>,
}

/// One bucket per distinct day, in first-seen order. The still-open bucket
/// always closes after the last row.
pub fn daily_report(rows: &[RatingRow]) -> Result<Vec<ScoreRecord>, ReportError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut fold = DailyFold {
        current_day: first.day,
        bucket: CategoryAccumulator::default(),
        records: Vec::new(),
    };

    for row in rows {
        if row.day != fold.current_day {
            let closed = std::mem::take(&mut fold.bucket);
            fold.records.push(close_bucket(
                ScoreKind::Daily,
                fold.current_day.to_string(),
                closed,
                ScoreFormula::Weighted,
            ));
            fold.current_day = row.day;
        }
        fold.bucket.update(row, collect_entry)?;
    }

    fold.records.push(close_bucket(
        ScoreKind::Daily,
        fold.current_day.to_string(),
        fold.bucket,
        ScoreFormula::Weighted,
    ));
    Ok(fold.records)
}

/// Fold state for the weekly bucketer. `distinct_days` is 1-based and only
/// advances when the row's day differs from the previous row's day.
struct WeeklyFold {
    previous_day: NaiveDate,
    distinct_days: u32,
    weeks_closed: u32,
    bucket: CategoryAccumulator<Vec<WeightedValue>>,
    records: Vec<ScoreRecord>,
}

/// Buckets of up to 7 distinct days observed in the stream (not calendar
/// weeks). The 8th distinct day closes the open bucket and seeds the next
/// one with the row that triggered the overflow. A trailing bucket spanning
/// a single distinct day is dropped unless the policy says otherwise.
pub fn weekly_report(
    rows: &[RatingRow],
    policy: ReportPolicy,
) -> Result<Vec<ScoreRecord>, ReportError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };

    let mut fold = WeeklyFold {
        previous_day: first.day,
        distinct_days: 1,
        weeks_closed: 0,
        bucket: CategoryAccumulator::default(),
        records: Vec::new(),
    };

    for row in rows {
        if row.day != fold.previous_day {
            fold.distinct_days += 1;
            fold.previous_day = row.day;
        }

        if fold.distinct_days > 7 {
            fold.weeks_closed += 1;
            let closed = std::mem::take(&mut fold.bucket);
            fold.records.push(close_bucket(
                ScoreKind::Weekly,
                format!("Week {}", fold.weeks_closed),
                closed,
                policy.weekly_formula,
            ));
            fold.distinct_days = 1;
        }

        fold.bucket.update(row, collect_entry)?;
    }

    if fold.distinct_days > 1 || policy.emit_single_day_tail {
        fold.records.push(close_bucket(
            ScoreKind::Weekly,
            format!("Week {}", fold.weeks_closed + 1),
            fold.bucket,
            policy.weekly_formula,
        ));
    }

    Ok(fold.records)
}

fn collect_entry(entries: &mut Vec<WeightedValue>, row: &RatingRow) {
    entries.push(WeightedValue {
        value: row.value,
        weight: row.weight,
    });
}

fn close_bucket(
    kind: ScoreKind,
    label: String,
    bucket: CategoryAccumulator<Vec<WeightedValue>>,
    formula: ScoreFormula,
) -> ScoreRecord {
    let scores = bucket.map(|entries| score_entries(&entries, formula));
    ScoreRecord {
        kind,
        label,
        spelling: scores.spelling,
        grammar: scores.grammar,
        gdpr: scores.gdpr,
        randomness: scores.randomness,
    }
}

fn score_entries(entries: &[WeightedValue], formula: ScoreFormula) -> i64 {
    match formula {
        ScoreFormula::Weighted => score::weighted_score(entries),
        ScoreFormula::Average => {
            let values: Vec<i32> = entries.iter().map(|entry| entry.value).collect();
            score::average(&values)
        }
    }
}
