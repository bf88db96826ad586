//! Period-based earnings aggregation.
//!
//! This module filters trips and shift expenses into a resolved period and
//! produces the figures a dashboard shows: gross and commission-adjusted
//! income, expenses, net profit, and breakdowns by payment method, expense
//! category and day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AggregateResult, AggregateTotals, AuditWarning, DailyTotal, ExpenseCategoryBreakdown,
    PaymentMethodBreakdown, ResolvedPeriod, ShiftExpense, Trip, WARN_AMOUNT_OVERFLOW,
    WARN_MISSING_TIMESTAMP, WARN_NEGATIVE_AMOUNT, WarningSeverity,
};

use super::commission::{CommissionTable, checked_net_amount};

/// The group key for expenses recorded without a category.
pub const UNCATEGORIZED_EXPENSE: &str = "uncategorized";

// Accumulators are updated with checked arithmetic: a record that would
// overflow any of them is left out of all of them.

#[derive(Debug, Default, Clone, Copy)]
struct MethodTotals {
    trip_count: u32,
    gross: Decimal,
    net: Decimal,
    rate: Decimal,
}

impl MethodTotals {
    fn with_trip(self, amount: Decimal, net: Decimal, rate: Decimal) -> Option<Self> {
        Some(Self {
            trip_count: self.trip_count.checked_add(1)?,
            gross: self.gross.checked_add(amount)?,
            net: self.net.checked_add(net)?,
            rate,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct CategoryTotals {
    count: u32,
    amount: Decimal,
}

impl CategoryTotals {
    fn with_expense(self, amount: Decimal) -> Option<Self> {
        Some(Self {
            count: self.count.checked_add(1)?,
            amount: self.amount.checked_add(amount)?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct DayTotals {
    trip_count: u32,
    gross: Decimal,
    net: Decimal,
    expenses: Decimal,
}

impl DayTotals {
    fn with_trip(self, amount: Decimal, net: Decimal) -> Option<Self> {
        Some(Self {
            trip_count: self.trip_count.checked_add(1)?,
            gross: self.gross.checked_add(amount)?,
            net: self.net.checked_add(net)?,
            ..self
        })
    }

    fn with_expense(self, amount: Decimal) -> Option<Self> {
        Some(Self {
            expenses: self.expenses.checked_add(amount)?,
            ..self
        })
    }
}

/// Period-wide sums.
#[derive(Debug, Default, Clone, Copy)]
struct RunningTotals {
    trip_count: u32,
    gross: Decimal,
    net: Decimal,
    expenses: Decimal,
}

impl RunningTotals {
    fn with_trip(self, amount: Decimal, net: Decimal) -> Option<Self> {
        Some(Self {
            trip_count: self.trip_count.checked_add(1)?,
            gross: self.gross.checked_add(amount)?,
            net: self.net.checked_add(net)?,
            ..self
        })
    }

    fn with_expense(self, amount: Decimal) -> Option<Self> {
        Some(Self {
            expenses: self.expenses.checked_add(amount)?,
            ..self
        })
    }
}

fn overflow_warning(record_kind: &str, record_id: &str, amount: Decimal) -> AuditWarning {
    record_warning(
        WARN_AMOUNT_OVERFLOW,
        record_kind,
        record_id,
        format!("amount {} overflows the period totals; excluded", amount),
    )
}

fn record_warning(code: &str, record_kind: &str, record_id: &str, message: String) -> AuditWarning {
    AuditWarning {
        code: code.to_string(),
        message: format!("{} '{}': {}", record_kind, record_id, message),
        severity: WarningSeverity::Medium,
        record_id: Some(record_id.to_string()),
    }
}

fn normalize_category(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        UNCATEGORIZED_EXPENSE.to_string()
    } else {
        key
    }
}

/// Aggregates trips and expenses over a resolved period.
///
/// A record is included when its timestamp lies within the period, bounds
/// inclusive. Records without a readable timestamp are skipped and reported
/// as `MISSING_TIMESTAMP` warnings; negative amounts are kept and reported as
/// `NEGATIVE_AMOUNT` warnings. A record whose amount would push any total
/// past the `Decimal` range is skipped and reported as `AMOUNT_OVERFLOW`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`] when the period is not valid or its
/// end precedes its start. Malformed records never cause an error.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::{aggregate, resolve_period, CommissionTable};
/// use taxi_engine::models::{PeriodKind, Trip};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let at = NaiveDateTime::parse_from_str("2026-01-15 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let trip = |id: &str, amount: &str, method: &str| Trip {
///     id: id.to_string(),
///     amount: dec(amount),
///     payment_method: method.to_string(),
///     timestamp: Some(at),
///     start_location: None,
///     end_location: None,
///     status: None,
/// };
///
/// let trips = vec![trip("t1", "100", "cash"), trip("t2", "50", "card")];
/// let commissions = CommissionTable::from_rates([("cash", dec("0")), ("card", dec("0.1"))]).unwrap();
/// let period = resolve_period(PeriodKind::Today, None, at.date());
///
/// let result = aggregate(&trips, &[], &period, &commissions).unwrap();
/// assert_eq!(result.totals.gross_income, dec("150"));
/// assert_eq!(result.totals.net_income, dec("145"));
/// ```
pub fn aggregate(
    trips: &[Trip],
    expenses: &[ShiftExpense],
    period: &ResolvedPeriod,
    commissions: &CommissionTable,
) -> EngineResult<AggregateResult> {
    if !period.valid || period.end < period.start {
        return Err(EngineError::InvalidPeriod {
            start: period.start,
            end: period.end,
        });
    }

    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut by_method: BTreeMap<String, MethodTotals> = BTreeMap::new();
    let mut by_category: BTreeMap<String, CategoryTotals> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    let mut totals = RunningTotals::default();

    for trip in trips {
        let Some(timestamp) = trip.timestamp else {
            warnings.push(record_warning(
                WARN_MISSING_TIMESTAMP,
                "Trip",
                &trip.id,
                "timestamp missing or unreadable; excluded".to_string(),
            ));
            continue;
        };
        if !period.contains(timestamp) {
            continue;
        }

        let key = trip.payment_key();
        let rate = commissions.rate_for(&key);
        let date = timestamp.date();
        let updated = checked_net_amount(trip.amount, rate).and_then(|net| {
            Some((
                by_method
                    .get(&key)
                    .copied()
                    .unwrap_or_default()
                    .with_trip(trip.amount, net, rate)?,
                by_day
                    .get(&date)
                    .copied()
                    .unwrap_or_default()
                    .with_trip(trip.amount, net)?,
                totals.with_trip(trip.amount, net)?,
            ))
        });
        let Some((method, day, running)) = updated else {
            warnings.push(overflow_warning("Trip", &trip.id, trip.amount));
            continue;
        };

        if trip.amount < Decimal::ZERO {
            warnings.push(record_warning(
                WARN_NEGATIVE_AMOUNT,
                "Trip",
                &trip.id,
                format!("negative amount {}", trip.amount),
            ));
        }
        by_method.insert(key, method);
        by_day.insert(date, day);
        totals = running;
    }

    for expense in expenses {
        let Some(timestamp) = expense.timestamp else {
            warnings.push(record_warning(
                WARN_MISSING_TIMESTAMP,
                "Expense",
                &expense.id,
                "timestamp missing or unreadable; excluded".to_string(),
            ));
            continue;
        };
        if !period.contains(timestamp) {
            continue;
        }

        let key = normalize_category(&expense.category);
        let date = timestamp.date();
        let updated = (|| {
            Some((
                by_category
                    .get(&key)
                    .copied()
                    .unwrap_or_default()
                    .with_expense(expense.amount)?,
                by_day
                    .get(&date)
                    .copied()
                    .unwrap_or_default()
                    .with_expense(expense.amount)?,
                totals.with_expense(expense.amount)?,
            ))
        })();
        let Some((category, day, running)) = updated else {
            warnings.push(overflow_warning("Expense", &expense.id, expense.amount));
            continue;
        };

        if expense.amount < Decimal::ZERO {
            warnings.push(record_warning(
                WARN_NEGATIVE_AMOUNT,
                "Expense",
                &expense.id,
                format!("negative amount {}", expense.amount),
            ));
        }
        by_category.insert(key, category);
        by_day.insert(date, day);
        totals = running;
    }

    let gross_income = totals.gross;
    let net_income = totals.net;
    let expense_total = totals.expenses;
    let trip_count = totals.trip_count;

    let average_net_per_trip = if trip_count > 0 {
        (net_income / Decimal::from(trip_count))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let mut by_payment_method: Vec<PaymentMethodBreakdown> = by_method
        .into_iter()
        .map(|(payment_method, totals)| PaymentMethodBreakdown {
            label: commissions.label_for(&payment_method),
            payment_method,
            trip_count: totals.trip_count,
            gross: totals.gross,
            net: totals.net,
            commission_rate: totals.rate,
        })
        .collect();
    by_payment_method.sort_by(|a, b| {
        b.net
            .cmp(&a.net)
            .then_with(|| a.payment_method.cmp(&b.payment_method))
    });

    let mut by_expense_category: Vec<ExpenseCategoryBreakdown> = by_category
        .into_iter()
        .map(|(category, totals)| ExpenseCategoryBreakdown {
            category,
            count: totals.count,
            amount: totals.amount,
        })
        .collect();
    by_expense_category.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    let daily: Vec<DailyTotal> = by_day
        .into_iter()
        .map(|(date, totals)| DailyTotal {
            date,
            trip_count: totals.trip_count,
            gross: totals.gross,
            net: totals.net,
            expenses: totals.expenses,
            net_profit: totals.net.saturating_sub(totals.expenses),
        })
        .collect();

    debug!(
        trips = trips.len(),
        expenses = expenses.len(),
        included_trips = trip_count,
        warnings = warnings.len(),
        "Aggregated records"
    );

    Ok(AggregateResult {
        period: *period,
        totals: AggregateTotals {
            gross_income,
            net_income,
            commission_total: gross_income.saturating_sub(net_income),
            expense_total,
            net_profit: net_income.saturating_sub(expense_total),
            trip_count,
            average_net_per_trip,
        },
        by_payment_method,
        by_expense_category,
        daily,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::resolve_period;
    use crate::models::PeriodKind;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_trip(id: &str, amount: &str, method: &str, at: Option<NaiveDateTime>) -> Trip {
        Trip {
            id: id.to_string(),
            amount: dec(amount),
            payment_method: method.to_string(),
            timestamp: at,
            start_location: None,
            end_location: None,
            status: None,
        }
    }

    fn create_expense(id: &str, amount: &str, category: &str, at: Option<NaiveDateTime>) -> ShiftExpense {
        ShiftExpense {
            id: id.to_string(),
            amount: dec(amount),
            category: category.to_string(),
            timestamp: at,
            description: None,
        }
    }

    fn standard_commissions() -> CommissionTable {
        let mut table =
            CommissionTable::from_rates([("cash", dec("0")), ("card", dec("0.1"))]).unwrap();
        table.insert("gett", "Gett".to_string(), dec("0.15")).unwrap();
        table
            .insert("station_bonus", "Station bonus".to_string(), dec("-0.05"))
            .unwrap();
        table
    }

    fn january_15() -> ResolvedPeriod {
        resolve_period(PeriodKind::Today, None, make_date("2026-01-15"))
    }

    #[test]
    fn test_cash_and_card_scenario() {
        let at = Some(make_datetime("2026-01-15", "10:00:00"));
        let trips = vec![
            create_trip("t1", "100", "cash", at),
            create_trip("t2", "50", "card", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.gross_income, dec("150"));
        assert_eq!(result.totals.net_income, dec("145"));
        assert_eq!(result.totals.commission_total, dec("5"));
        assert_eq!(result.totals.trip_count, 2);
        assert_eq!(result.totals.average_net_per_trip, dec("72.50"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unknown_method_net_equals_gross() {
        let at = Some(make_datetime("2026-01-15", "10:00:00"));
        let trips = vec![create_trip("t1", "64.30", "pango", at)];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.net_income, result.totals.gross_income);
        let row = &result.by_payment_method[0];
        assert_eq!(row.payment_method, "pango");
        assert_eq!(row.label, "pango");
        assert_eq!(row.commission_rate, Decimal::ZERO);
    }

    #[test]
    fn test_bonus_rate_increases_net() {
        let at = Some(make_datetime("2026-01-15", "10:00:00"));
        let trips = vec![create_trip("t1", "200", "station_bonus", at)];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.net_income, dec("210"));
        assert!(result.totals.net_income > result.totals.gross_income);
        assert_eq!(result.totals.commission_total, dec("-10"));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let trips = vec![
            create_trip("before", "10", "cash", Some(make_datetime("2026-01-14", "23:59:59"))),
            create_trip("first", "20", "cash", Some(make_datetime("2026-01-15", "00:00:00"))),
            create_trip(
                "last",
                "30",
                "cash",
                Some(
                    NaiveDateTime::parse_from_str("2026-01-15 23:59:59.999", "%Y-%m-%d %H:%M:%S%.f")
                        .unwrap(),
                ),
            ),
            create_trip("after", "40", "cash", Some(make_datetime("2026-01-16", "00:00:00"))),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.trip_count, 2);
        assert_eq!(result.totals.gross_income, dec("50"));
    }

    #[test]
    fn test_missing_timestamp_skipped_with_warning() {
        let trips = vec![
            create_trip("t1", "80", "cash", Some(make_datetime("2026-01-15", "12:00:00"))),
            create_trip("t2", "999", "cash", None),
        ];
        let expenses = vec![create_expense("e1", "120", "fuel", None)];

        let result = aggregate(&trips, &expenses, &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.trip_count, 1);
        assert_eq!(result.totals.gross_income, dec("80"));
        assert_eq!(result.totals.expense_total, Decimal::ZERO);
        assert_eq!(result.warnings.len(), 2);
        assert!(result
            .warnings
            .iter()
            .all(|w| w.code == WARN_MISSING_TIMESTAMP));
        assert_eq!(result.warnings[0].record_id.as_deref(), Some("t2"));
        assert_eq!(result.warnings[1].record_id.as_deref(), Some("e1"));
    }

    #[test]
    fn test_negative_amount_kept_and_flagged() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", "100", "cash", at),
            create_trip("refund", "-20", "cash", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.gross_income, dec("80"));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WARN_NEGATIVE_AMOUNT);
        assert_eq!(result.warnings[0].record_id.as_deref(), Some("refund"));
    }

    #[test]
    fn test_net_profit_may_be_negative() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![create_trip("t1", "40", "cash", at)];
        let expenses = vec![create_expense("e1", "250", "fuel", at)];

        let result = aggregate(&trips, &expenses, &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.expense_total, dec("250"));
        assert_eq!(result.totals.net_profit, dec("-210"));
    }

    #[test]
    fn test_breakdown_sorted_by_net_descending() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", "50", "cash", at),
            create_trip("t2", "100", "Gett", at),
            create_trip("t3", "30", "card", at),
            create_trip("t4", "40", "GETT ", at),
            create_trip("t5", "27", "card", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        let methods: Vec<&str> = result
            .by_payment_method
            .iter()
            .map(|r| r.payment_method.as_str())
            .collect();
        // gett 140 × 0.85 = 119, card 57 × 0.9 = 51.3, cash 50
        assert_eq!(methods, vec!["gett", "card", "cash"]);

        let gett = &result.by_payment_method[0];
        assert_eq!(gett.label, "Gett");
        assert_eq!(gett.trip_count, 2);
        assert_eq!(gett.gross, dec("140"));
        assert_eq!(gett.net, dec("119"));
        assert_eq!(gett.commission_rate, dec("0.15"));
    }

    #[test]
    fn test_breakdown_ties_ordered_by_method() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", "50", "zcash", at),
            create_trip("t2", "50", "acash", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.by_payment_method[0].payment_method, "acash");
        assert_eq!(result.by_payment_method[1].payment_method, "zcash");
    }

    #[test]
    fn test_methods_outside_period_omitted() {
        let trips = vec![
            create_trip("t1", "50", "cash", Some(make_datetime("2026-01-15", "12:00:00"))),
            create_trip("t2", "70", "gett", Some(make_datetime("2026-01-13", "12:00:00"))),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.by_payment_method.len(), 1);
        assert_eq!(result.by_payment_method[0].payment_method, "cash");
    }

    #[test]
    fn test_expense_categories_and_daily_totals() {
        let period = resolve_period(PeriodKind::Week, None, make_date("2026-01-15"));
        let trips = vec![
            create_trip("t1", "100", "cash", Some(make_datetime("2026-01-12", "09:00:00"))),
            create_trip("t2", "60", "card", Some(make_datetime("2026-01-15", "22:00:00"))),
        ];
        let expenses = vec![
            create_expense("e1", "150", "Fuel", Some(make_datetime("2026-01-12", "07:00:00"))),
            create_expense("e2", "35", "car_wash", Some(make_datetime("2026-01-14", "18:00:00"))),
            create_expense("e3", "90", "fuel", Some(make_datetime("2026-01-15", "08:00:00"))),
        ];

        let result = aggregate(&trips, &expenses, &period, &standard_commissions()).unwrap();

        assert_eq!(result.by_expense_category.len(), 2);
        assert_eq!(result.by_expense_category[0].category, "fuel");
        assert_eq!(result.by_expense_category[0].count, 2);
        assert_eq!(result.by_expense_category[0].amount, dec("240"));
        assert_eq!(result.by_expense_category[1].category, "car_wash");

        let dates: Vec<NaiveDate> = result.daily.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                make_date("2026-01-12"),
                make_date("2026-01-14"),
                make_date("2026-01-15")
            ]
        );
        assert_eq!(result.daily[0].net_profit, dec("-50"));
        assert_eq!(result.daily[1].trip_count, 0);
        assert_eq!(result.daily[1].expenses, dec("35"));
        assert_eq!(result.daily[2].net, dec("54"));
        assert_eq!(result.daily[2].net_profit, dec("-36"));

        assert_eq!(result.totals.net_profit, dec("154") - dec("275"));
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[], &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.trip_count, 0);
        assert_eq!(result.totals.gross_income, Decimal::ZERO);
        assert_eq!(result.totals.average_net_per_trip, Decimal::ZERO);
        assert!(result.by_payment_method.is_empty());
        assert!(result.daily.is_empty());
    }

    #[test]
    fn test_average_net_per_trip_rounded() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", "10", "cash", at),
            create_trip("t2", "10", "cash", at),
            create_trip("t3", "0.01", "cash", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        // 20.01 / 3 = 6.67
        assert_eq!(result.totals.average_net_per_trip, dec("6.67"));
    }

    #[test]
    fn test_invalid_period_is_an_error() {
        let mut period = january_15();
        period.valid = false;

        let result = aggregate(&[], &[], &period, &standard_commissions());
        match result {
            Err(EngineError::InvalidPeriod { start, end }) => {
                assert_eq!(start, period.start);
                assert_eq!(end, period.end);
            }
            _ => panic!("Expected InvalidPeriod error"),
        }
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", "45.50", "gett", at),
            create_trip("t2", "12", "cash", None),
            create_trip("t3", "80", "card", at),
        ];
        let expenses = vec![create_expense("e1", "100", "fuel", at)];
        let commissions = standard_commissions();

        let first = aggregate(&trips, &expenses, &january_15(), &commissions).unwrap();
        let second = aggregate(&trips, &expenses, &january_15(), &commissions).unwrap();

        assert_eq!(first, second);
    }

    const HUGE: &str = "50000000000000000000000000000";

    #[test]
    fn test_trip_overflowing_totals_skipped_with_warning() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let trips = vec![
            create_trip("t1", HUGE, "cash", at),
            create_trip("t2", HUGE, "cash", at),
            create_trip("t3", "20", "cash", at),
        ];

        let result = aggregate(&trips, &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.trip_count, 2);
        assert_eq!(result.totals.gross_income, dec(HUGE) + dec("20"));
        assert_eq!(result.by_payment_method[0].trip_count, 2);
        assert_eq!(result.daily[0].trip_count, 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WARN_AMOUNT_OVERFLOW);
        assert_eq!(result.warnings[0].record_id.as_deref(), Some("t2"));
    }

    #[test]
    fn test_bonus_overflowing_net_skipped() {
        let at = Some(make_datetime("2026-01-15", "12:00:00"));
        let mut trip = create_trip("t1", "0", "station_bonus", at);
        trip.amount = Decimal::MAX;

        let result = aggregate(&[trip], &[], &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.trip_count, 0);
        assert!(result.by_payment_method.is_empty());
        assert!(result.daily.is_empty());
        assert_eq!(result.warnings[0].code, WARN_AMOUNT_OVERFLOW);
    }

    #[test]
    fn test_expense_overflowing_totals_skipped() {
        let at = Some(make_datetime("2026-01-15", "08:00:00"));
        let expenses = vec![
            create_expense("e1", HUGE, "fuel", at),
            create_expense("e2", HUGE, "fuel", at),
        ];

        let result = aggregate(&[], &expenses, &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.expense_total, dec(HUGE));
        assert_eq!(result.totals.net_profit, -dec(HUGE));
        assert_eq!(result.by_expense_category[0].count, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].record_id.as_deref(), Some("e2"));
    }

    #[test]
    fn test_net_profit_saturates() {
        let at = Some(make_datetime("2026-01-15", "08:00:00"));
        let trips = vec![create_trip("t1", HUGE, "cash", at)];
        let expenses = vec![create_expense("e1", &format!("-{}", HUGE), "refund", at)];

        let result = aggregate(&trips, &expenses, &january_15(), &standard_commissions()).unwrap();

        assert_eq!(result.totals.net_profit, Decimal::MAX);
        assert_eq!(result.daily[0].net_profit, Decimal::MAX);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, WARN_NEGATIVE_AMOUNT);
    }
}
