//! Reporting period models.
//!
//! This module contains the [`PeriodKind`] selector, the caller-supplied
//! [`DateRange`] for custom windows, and the [`ResolvedPeriod`] the
//! aggregator filters records against.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The reporting window a dashboard asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// The current calendar day.
    Today,
    /// The current Sunday-to-Saturday week.
    Week,
    /// The current calendar month.
    Month,
    /// The current calendar year.
    Year,
    /// An explicit, inclusive range of dates.
    Custom,
}

/// An inclusive range of calendar dates for a custom period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of the range.
    pub from: NaiveDate,
    /// The last day of the range.
    pub to: NaiveDate,
}

/// A period resolved to concrete local wall-clock bounds.
///
/// `valid` is `false` when the caller supplied a custom range whose end
/// precedes its start (or no range at all). The bounds are kept as supplied
/// so the caller can report them; they are never swapped.
///
/// # Example
///
/// ```
/// use taxi_engine::models::{PeriodKind, ResolvedPeriod};
/// use chrono::NaiveDateTime;
///
/// let period = ResolvedPeriod {
///     kind: PeriodKind::Today,
///     start: NaiveDateTime::parse_from_str("2026-01-15 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-01-15 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap(),
///     valid: true,
/// };
///
/// let noon = NaiveDateTime::parse_from_str("2026-01-15 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert!(period.contains(noon));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// The kind of period that was requested.
    pub kind: PeriodKind,
    /// The first instant of the period (inclusive).
    pub start: NaiveDateTime,
    /// The last instant of the period (inclusive).
    pub end: NaiveDateTime,
    /// Whether the bounds describe a usable window.
    pub valid: bool,
}

impl ResolvedPeriod {
    /// Checks if a timestamp falls within this period, inclusive of both bounds.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}
