//! Shift expense model.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// An expense logged during an open shift, such as a fuel purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftExpense {
    /// Unique identifier for the expense.
    pub id: String,
    /// The amount spent.
    pub amount: Decimal,
    /// Category tag (e.g. "fuel").
    #[serde(default = "default_category")]
    pub category: String,
    /// When the expense was logged, in local wall-clock time. `None` when unreadable.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub timestamp: Option<NaiveDateTime>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_category() -> String {
    "fuel".to_string()
}
