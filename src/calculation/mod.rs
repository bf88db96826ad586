//! Calculation logic for the Fare and Earnings Engine.
//!
//! This module contains the fare side (tariff tier selection and the metered
//! fare formula) and the earnings side (period resolution, commission-adjusted
//! aggregation and goal progress).

mod aggregation;
mod commission;
mod fare;
mod goal_progress;
mod period;
mod tariff_tier;

pub use aggregation::{UNCATEGORIZED_EXPENSE, aggregate};
pub use commission::{CommissionTable, checked_net_amount, net_amount};
pub use fare::{
    FareResult, MAX_QUANTITY, calculate_fare, clamp_quantity, coerce_quantity, parse_surcharges,
};
pub use goal_progress::{calculate_progress, goal_progress};
pub use period::{resolve_period, resolve_period_or_fallback};
pub use tariff_tier::{select_tariff_tier, select_tariff_tier_with_holidays};
