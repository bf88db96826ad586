//! Goal progress calculation.
//!
//! Compares aggregated figures with the driver's income and trip targets.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::models::{
    AggregateResult, AuditWarning, GoalProgress, Goals, ProgressReport, WARN_GOAL_MISCONFIGURED,
    WarningSeverity,
};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Measures progress of `actual` towards `goal`.
///
/// With a positive goal the percentage is `100 × actual / goal`, clamped to
/// [0, 100] and rounded to 2 decimal places. A goal of zero is always met
/// unless `actual` is negative. A negative goal is treated the same way but
/// flagged as misconfigured.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::goal_progress;
/// use rust_decimal::Decimal;
///
/// let progress = goal_progress(Decimal::from(300), Decimal::from(1200));
/// assert_eq!(progress.percent, Decimal::from(25));
/// assert!(!progress.achieved);
///
/// let progress = goal_progress(Decimal::from(1500), Decimal::from(1200));
/// assert_eq!(progress.percent, Decimal::from(100));
/// assert!(progress.achieved);
/// ```
pub fn goal_progress(actual: Decimal, goal: Decimal) -> GoalProgress {
    if goal > Decimal::ZERO {
        let achieved = actual >= goal;
        let percent = if achieved {
            ONE_HUNDRED
        } else {
            // Below the goal the ratio is under 1, so an overflow means a
            // hugely negative `actual`.
            actual
                .checked_mul(ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(goal))
                .map_or(Decimal::ZERO, |ratio| {
                    ratio
                        .clamp(Decimal::ZERO, ONE_HUNDRED)
                        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                })
        };
        return GoalProgress {
            goal,
            actual,
            percent,
            achieved,
            misconfigured: false,
        };
    }

    let met = actual >= Decimal::ZERO;
    GoalProgress {
        goal,
        actual,
        percent: if met { ONE_HUNDRED } else { Decimal::ZERO },
        achieved: met,
        misconfigured: goal < Decimal::ZERO,
    }
}

fn misconfigured_warning(name: &str, goal: Decimal) -> AuditWarning {
    AuditWarning {
        code: WARN_GOAL_MISCONFIGURED.to_string(),
        message: format!("The {} goal is negative ({}); treating it as met", name, goal),
        severity: WarningSeverity::Low,
        record_id: None,
    }
}

/// Measures net income and trip count of an aggregate against the goals.
pub fn calculate_progress(result: &AggregateResult, goals: &Goals) -> ProgressReport {
    let income = goal_progress(result.totals.net_income, goals.income);
    let trips = goal_progress(
        Decimal::from(result.totals.trip_count),
        Decimal::from(goals.trips),
    );

    let mut warnings = Vec::new();
    if income.misconfigured {
        warn!(goal = %goals.income, "Negative income goal");
        warnings.push(misconfigured_warning("income", goals.income));
    }
    if trips.misconfigured {
        warn!(goal = goals.trips, "Negative trip goal");
        warnings.push(misconfigured_warning("trip", Decimal::from(goals.trips)));
    }

    ProgressReport {
        income,
        trips,
        warnings,
    }
}
