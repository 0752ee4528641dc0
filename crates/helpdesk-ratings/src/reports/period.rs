use chrono::{Datelike, Duration, NaiveDateTime};

/// Rolling window below which a range is still considered "about a month".
pub const MIN_MONTH_DAYS: i64 = 28;

/// Granularity of the detail buckets in an aggregated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportGranularity {
    Daily,
    Weekly,
}

/// Ranges inside a single calendar month, or shorter than the 28-day rolling
/// window, are detailed day by day; anything longer is summarized weekly to
/// bound the response size.
pub fn classify(start: NaiveDateTime, end: NaiveDateTime) -> ReportGranularity {
    if within_calendar_month(start, end) || within_min_window(start, end) {
        ReportGranularity::Daily
    } else {
        ReportGranularity::Weekly
    }
}

/// True iff both bounds fall in the same year and calendar month.
pub fn within_calendar_month(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start.year() == end.year() && start.month() == end.month()
}

/// True iff `start` is after `end - 28 days`, independent of calendar
/// boundaries.
pub fn within_min_window(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start > end - Duration::days(MIN_MONTH_DAYS)
}
