//! Trip model and related types.
//!
//! This module defines the [`Trip`] record read from the external store and
//! the optional [`Location`] descriptors attached to it.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// The group key used for trips recorded without a payment method.
pub const UNSPECIFIED_PAYMENT_METHOD: &str = "unspecified";

/// A pickup or drop-off location descriptor.
///
/// Carried through for display; none of the calculations read it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// City name.
    #[serde(default)]
    pub city: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A single logged trip.
///
/// # Example
///
/// ```
/// use taxi_engine::models::Trip;
///
/// let trip: Trip = serde_json::from_str(r#"{
///     "id": "trip_001",
///     "amount": "48.50",
///     "payment_method": "Cash",
///     "timestamp": "2026-01-15T09:30:00+02:00"
/// }"#).unwrap();
///
/// assert_eq!(trip.payment_key(), "cash");
/// assert!(trip.timestamp.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique identifier for the trip.
    pub id: String,
    /// The amount charged for the trip.
    pub amount: Decimal,
    /// Free-form payment method tag (e.g. "cash", "credit_card", "gett").
    #[serde(default)]
    pub payment_method: String,
    /// When the trip was logged, in local wall-clock time. `None` when unreadable.
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub timestamp: Option<NaiveDateTime>,
    /// Where the trip started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Location>,
    /// Where the trip ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Location>,
    /// Free-form status tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Trip {
    /// Returns the normalized payment method used for commission lookup and grouping.
    ///
    /// The tag is trimmed and lower-cased; an empty tag maps to
    /// [`UNSPECIFIED_PAYMENT_METHOD`].
    pub fn payment_key(&self) -> String {
        normalize_payment_method(&self.payment_method)
    }
}

/// Normalizes a payment method tag for lookup.
pub fn normalize_payment_method(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        UNSPECIFIED_PAYMENT_METHOD.to_string()
    } else {
        key
    }
}
