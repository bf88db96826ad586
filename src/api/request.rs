//! Request types for the Fare and Earnings Engine API.
//!
//! This module defines the JSON request structures for the `/fare` and
//! `/aggregate` endpoints.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::calculation::coerce_quantity;
use crate::models::{DateRange, Goals, PeriodKind, ShiftExpense, TariffTier, Trip};

/// Request body for the `/fare` endpoint.
///
/// `minutes` and `kilometers` come straight from live-typed input fields, so
/// they accept a JSON number or string; anything unreadable counts as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FareRequest {
    /// Elapsed ride time in minutes.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub minutes: Decimal,
    /// Distance travelled in kilometers.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub kilometers: Decimal,
    /// Whether the ride was booked in advance.
    #[serde(default)]
    pub has_booking: bool,
    /// Surcharge keys (e.g. "airport"); unknown keys are ignored.
    #[serde(default)]
    pub surcharges: Vec<String>,
    /// The local wall-clock instant to select the tier for; defaults to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<NaiveDateTime>,
    /// Public holidays to apply to tier selection.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    /// An explicit tier, bypassing selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<TariffTier>,
}

/// The reporting period in an aggregate request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Which period to report on.
    pub kind: PeriodKind,
    /// First day of a custom range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    /// Last day of a custom range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl PeriodRequest {
    /// Returns the custom range when both ends were supplied.
    pub fn range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateRange { from, to }),
            _ => None,
        }
    }
}

/// Request body for the `/aggregate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    /// The trips to aggregate.
    #[serde(default)]
    pub trips: Vec<Trip>,
    /// The shift expenses to aggregate.
    #[serde(default)]
    pub expenses: Vec<ShiftExpense>,
    /// The reporting period.
    pub period: PeriodRequest,
    /// The caller's current local date; defaults to the server's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,
    /// Targets to measure progress against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(QuantityVisitor)
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(coerce_quantity(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(coerce_quantity(&v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(coerce_quantity(&v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(coerce_quantity(&v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}
