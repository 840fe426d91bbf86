use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate};

use crate::error::{ChartError, Result};
use crate::models::{DateWindow, PeriodKind};

const DAY_FORMAT: &str = "%Y%m%d";
const MONTH_FORMAT: &str = "%Y%m";

/// Source of "today" for period resolution
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a caller-supplied reference date, supporting multiple formats
pub fn parse_reference_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    for format in ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    // Full timestamps keep the calendar day of their own offset
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Ok(timestamp.date_naive());
    }

    Err(ChartError::InvalidDate(format!(
        "Invalid date format: {}. Use YYYY-MM-DD",
        s
    )))
}

/// Resolve the date window the provider expects for `reference` and `kind`.
///
/// - daily: the reference day itself, or today if the reference is in the future
/// - weekly: the Monday..Sunday week of the reference, moved back one week while
///   that week is still in progress
/// - monthly: the reference month, or the month before today if the reference
///   month is the current one or later
pub fn resolve(reference: NaiveDate, kind: PeriodKind, clock: &dyn Clock) -> Result<DateWindow> {
    let today = clock.today();

    let window = match kind {
        PeriodKind::Daily => {
            let day = if reference > today {
                tracing::debug!("Daily reference {} is in the future, using {}", reference, today);
                today
            } else {
                reference
            };
            day_window(day, day)
        }
        PeriodKind::Weekly => {
            let included = if week_start(reference)? == week_start(today)? {
                let shifted = reference
                    .checked_sub_signed(Duration::weeks(1))
                    .ok_or_else(|| out_of_range(reference))?;
                tracing::debug!(
                    "Week of {} is still in progress, using week of {}",
                    reference,
                    shifted
                );
                shifted
            } else {
                reference
            };

            let start = week_start(included)?;
            let end = start
                .checked_add_signed(Duration::days(6))
                .ok_or_else(|| out_of_range(included))?;
            day_window(start, end)
        }
        PeriodKind::Monthly => {
            let in_current_month =
                reference.year() == today.year() && reference.month() == today.month();

            let month = if in_current_month || reference > today {
                let last_month = today
                    .checked_sub_months(Months::new(1))
                    .ok_or_else(|| out_of_range(today))?;
                tracing::debug!(
                    "Month of {} is not finalized, using {}",
                    reference,
                    last_month.format(MONTH_FORMAT)
                );
                last_month
            } else {
                reference
            };

            let token = month.format(MONTH_FORMAT).to_string();
            DateWindow {
                start: token.clone(),
                end: token,
            }
        }
    };

    Ok(window)
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    let offset = date.weekday().num_days_from_monday() as i64;
    date.checked_sub_signed(Duration::days(offset))
        .ok_or_else(|| out_of_range(date))
}

fn day_window(start: NaiveDate, end: NaiveDate) -> DateWindow {
    DateWindow {
        start: start.format(DAY_FORMAT).to_string(),
        end: end.format(DAY_FORMAT).to_string(),
    }
}

fn out_of_range(date: NaiveDate) -> ChartError {
    ChartError::InvalidDate(format!("Date out of supported range: {}", date))
}
