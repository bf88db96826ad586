//! Aggregation result models for the Fare and Earnings Engine.
//!
//! This module contains the [`AggregateResult`] type and its associated
//! structures: totals, per-payment-method and per-category breakdowns, daily
//! totals, goal progress, and the audit types shared with the fare calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ResolvedPeriod;

/// Warning code for a record whose timestamp could not be read.
pub const WARN_MISSING_TIMESTAMP: &str = "MISSING_TIMESTAMP";
/// Warning code for a record with a negative amount.
pub const WARN_NEGATIVE_AMOUNT: &str = "NEGATIVE_AMOUNT";
/// Warning code for a record whose amount would overflow the running totals.
pub const WARN_AMOUNT_OVERFLOW: &str = "AMOUNT_OVERFLOW";
/// Warning code for a custom period that was replaced by a fallback.
pub const WARN_INVALID_PERIOD: &str = "INVALID_PERIOD";
/// Warning code for a goal with a negative target.
pub const WARN_GOAL_MISCONFIGURED: &str = "GOAL_MISCONFIGURED";

/// How much attention a warning deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational; figures are unaffected.
    Low,
    /// Figures may be incomplete or skewed.
    Medium,
    /// The requested view could not be produced as asked.
    High,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A data-quality warning raised while calculating.
///
/// Warnings never abort a calculation; they tell the caller which figures
/// may deserve a second look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
    /// The record the warning is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

/// Income and trip figures for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodBreakdown {
    /// The normalized payment method tag.
    pub payment_method: String,
    /// Display label (from the commission table, or the tag itself).
    pub label: String,
    /// Number of trips paid this way.
    pub trip_count: u32,
    /// Sum of trip amounts before commission.
    pub gross: Decimal,
    /// Sum of trip amounts after commission.
    pub net: Decimal,
    /// The commission rate applied (0 when the tag has no rule).
    pub commission_rate: Decimal,
}

/// Expense figures for one expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategoryBreakdown {
    /// The normalized category tag.
    pub category: String,
    /// Number of expenses in this category.
    pub count: u32,
    /// Sum of expense amounts.
    pub amount: Decimal,
}

/// Figures for a single calendar day within the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The day.
    pub date: NaiveDate,
    /// Trips logged that day.
    pub trip_count: u32,
    /// Gross income that day.
    pub gross: Decimal,
    /// Commission-adjusted income that day.
    pub net: Decimal,
    /// Expenses logged that day.
    pub expenses: Decimal,
    /// net − expenses.
    pub net_profit: Decimal,
}

/// Period-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// Sum of trip amounts.
    pub gross_income: Decimal,
    /// Sum of commission-adjusted trip amounts.
    pub net_income: Decimal,
    /// gross − net; negative when bonuses outweigh commissions.
    pub commission_total: Decimal,
    /// Sum of expense amounts.
    pub expense_total: Decimal,
    /// net income − expenses; may be negative.
    pub net_profit: Decimal,
    /// Number of trips in the period.
    pub trip_count: u32,
    /// Net income per trip, rounded to 2 decimal places; zero without trips.
    pub average_net_per_trip: Decimal,
}

/// The complete result of aggregating a record set over a period.
///
/// # Example
///
/// ```
/// use taxi_engine::models::{AggregateResult, AggregateTotals, PeriodKind, ResolvedPeriod};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let result = AggregateResult {
///     period: ResolvedPeriod {
///         kind: PeriodKind::Today,
///         start: NaiveDateTime::parse_from_str("2026-01-15 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///         end: NaiveDateTime::parse_from_str("2026-01-15 23:59:59", "%Y-%m-%d %H:%M:%S").unwrap(),
///         valid: true,
///     },
///     totals: AggregateTotals {
///         gross_income: Decimal::ZERO,
///         net_income: Decimal::ZERO,
///         commission_total: Decimal::ZERO,
///         expense_total: Decimal::ZERO,
///         net_profit: Decimal::ZERO,
///         trip_count: 0,
///         average_net_per_trip: Decimal::ZERO,
///     },
///     by_payment_method: vec![],
///     by_expense_category: vec![],
///     daily: vec![],
///     warnings: vec![],
/// };
/// assert!(result.by_payment_method.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// The period the records were filtered against.
    pub period: ResolvedPeriod,
    /// Period-wide totals.
    pub totals: AggregateTotals,
    /// One row per payment method with at least one trip, by net descending.
    pub by_payment_method: Vec<PaymentMethodBreakdown>,
    /// One row per expense category with at least one expense, by amount descending.
    pub by_expense_category: Vec<ExpenseCategoryBreakdown>,
    /// One row per day with any record, in date order.
    pub daily: Vec<DailyTotal>,
    /// Data-quality warnings raised while aggregating.
    pub warnings: Vec<AuditWarning>,
}

/// Caller-supplied targets for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    /// Net income target.
    pub income: Decimal,
    /// Trip count target.
    pub trips: i64,
}

/// Progress towards a single goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// The goal that was measured against.
    pub goal: Decimal,
    /// The actual figure.
    pub actual: Decimal,
    /// Percentage in [0, 100], rounded to 2 decimal places.
    pub percent: Decimal,
    /// Whether the goal is met.
    pub achieved: bool,
    /// Whether the goal was negative and therefore ignored.
    pub misconfigured: bool,
}

/// Progress towards the income and trip goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Progress of net income against the income goal.
    pub income: GoalProgress,
    /// Progress of trip count against the trip goal.
    pub trips: GoalProgress,
    /// Warnings about misconfigured goals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AuditWarning>,
}
