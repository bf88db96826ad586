//! Reporting period resolution.
//!
//! Turns a [`PeriodKind`] and the current date into inclusive local
//! wall-clock bounds. Weeks start on Sunday.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{
    AuditWarning, DateRange, PeriodKind, ResolvedPeriod, WARN_INVALID_PERIOD, WarningSeverity,
};

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59.999 of the given date.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // NaiveTime arithmetic wraps within the day
    date.and_time(NaiveTime::MIN - Duration::milliseconds(1))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

fn last_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Sunday through Saturday around `date`, clipped to the representable range.
fn week_of(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    let sunday = date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN);
    let saturday = sunday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX);
    (sunday, saturday)
}

fn span(kind: PeriodKind, first: NaiveDate, last: NaiveDate, valid: bool) -> ResolvedPeriod {
    ResolvedPeriod {
        kind,
        start: start_of_day(first),
        end: end_of_day(last),
        valid,
    }
}

/// Resolves a period to concrete bounds.
///
/// `today` is the caller's current local date. For [`PeriodKind::Custom`]
/// the supplied range is normalized to midnight through end of day; when
/// `to` precedes `from`, or no range is given, the result is marked
/// invalid and the bounds are left as supplied.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::resolve_period;
/// use taxi_engine::models::{DateRange, PeriodKind};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(); // Thursday
///
/// let week = resolve_period(PeriodKind::Week, None, today);
/// assert_eq!(week.start.date(), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()); // Sunday
/// assert_eq!(week.end.date(), NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()); // Saturday
///
/// let backwards = DateRange {
///     from: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
///     to: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
/// };
/// assert!(!resolve_period(PeriodKind::Custom, Some(backwards), today).valid);
/// ```
pub fn resolve_period(
    kind: PeriodKind,
    custom: Option<DateRange>,
    today: NaiveDate,
) -> ResolvedPeriod {
    match kind {
        PeriodKind::Today => span(kind, today, today, true),
        PeriodKind::Week => {
            let (sunday, saturday) = week_of(today);
            span(kind, sunday, saturday, true)
        }
        PeriodKind::Month => span(kind, first_of_month(today), last_of_month(today), true),
        PeriodKind::Year => span(kind, first_of_year(today), last_of_year(today), true),
        PeriodKind::Custom => match custom {
            Some(range) => span(kind, range.from, range.to, range.to >= range.from),
            None => span(kind, today, today, false),
        },
    }
}

/// Resolves a period, falling back to the current month when it is invalid.
///
/// The returned warning tells the user their custom range was replaced.
pub fn resolve_period_or_fallback(
    kind: PeriodKind,
    custom: Option<DateRange>,
    today: NaiveDate,
) -> (ResolvedPeriod, Option<AuditWarning>) {
    let resolved = resolve_period(kind, custom, today);
    if resolved.valid {
        return (resolved, None);
    }

    let message = match custom {
        Some(range) => format!(
            "Custom range {} to {} ends before it starts; showing the current month instead",
            range.from, range.to
        ),
        None => "Custom period requested without a date range; showing the current month instead"
            .to_string(),
    };
    let warning = AuditWarning {
        code: WARN_INVALID_PERIOD.to_string(),
        message,
        severity: WarningSeverity::High,
        record_id: None,
    };

    (resolve_period(PeriodKind::Month, None, today), Some(warning))
}
