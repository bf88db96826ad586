//! Core data models for the Fare and Earnings Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregate_result;
mod expense;
mod fare;
mod period;
mod timestamp;
mod trip;

pub use aggregate_result::{
    AggregateResult, AggregateTotals, AuditStep, AuditWarning, DailyTotal,
    ExpenseCategoryBreakdown, GoalProgress, Goals, PaymentMethodBreakdown, ProgressReport,
    WARN_AMOUNT_OVERFLOW, WARN_GOAL_MISCONFIGURED, WARN_INVALID_PERIOD, WARN_MISSING_TIMESTAMP,
    WARN_NEGATIVE_AMOUNT, WarningSeverity,
};
pub use expense::ShiftExpense;
pub use fare::{FareQuote, Surcharge, TariffTier};
pub use period::{DateRange, PeriodKind, ResolvedPeriod};
pub use timestamp::parse_timestamp;
pub use trip::{Location, Trip, UNSPECIFIED_PAYMENT_METHOD, normalize_payment_method};
