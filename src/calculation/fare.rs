//! Metered fare calculation.
//!
//! This module prices a ride from elapsed minutes, distance, an optional
//! booking fee and any selected surcharges, using the rates of a tariff tier.
//! It is fed from live-typed UI fields, so it never fails: unusable input is
//! priced as zero.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::TariffConfig;
use crate::models::{AuditStep, FareQuote, Surcharge, TariffTier};

/// The result of a fare calculation, including the quote and audit step.
#[derive(Debug, Clone)]
pub struct FareResult {
    /// The priced fare.
    pub quote: FareQuote,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Largest quantity (minutes or kilometers) a single fare is priced for.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Parses a live-typed quantity (minutes or kilometers).
///
/// Empty, non-numeric and negative input all become zero. A comma is
/// accepted as the decimal separator. Values above [`MAX_QUANTITY`] are
/// capped.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::coerce_quantity;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(coerce_quantity("12,5"), Decimal::from_str("12.5").unwrap());
/// assert_eq!(coerce_quantity("abc"), Decimal::ZERO);
/// assert_eq!(coerce_quantity("-3"), Decimal::ZERO);
/// ```
pub fn coerce_quantity(raw: &str) -> Decimal {
    let cleaned = raw.trim().replace(',', ".");
    Decimal::from_str(&cleaned)
        .map(clamp_quantity)
        .unwrap_or(Decimal::ZERO)
}

/// Clamps a quantity to `[0, MAX_QUANTITY]`.
pub fn clamp_quantity(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_QUANTITY)
}

/// Maps surcharge keys to surcharges, skipping keys that are not recognised.
pub fn parse_surcharges<I, S>(keys: I) -> BTreeSet<Surcharge>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|key| {
            let key = key.as_ref();
            let surcharge = Surcharge::from_key(key);
            if surcharge.is_none() {
                debug!(key, "Ignoring unknown surcharge key");
            }
            surcharge
        })
        .collect()
}

/// Calculates the fare for a ride.
///
/// `fare = base_fee + booking_fee (if booked) + minutes × per_minute
/// + kilometers × per_km + Σ surcharges`, rounded half-up to the cent.
/// Negative minutes or kilometers are treated as zero and larger ones are
/// capped at [`MAX_QUANTITY`]. Charges saturate at the `Decimal` range, so
/// configured rates can never make this panic.
///
/// # Arguments
///
/// * `minutes` - Elapsed ride time in minutes
/// * `kilometers` - Distance travelled
/// * `has_booking` - Whether the ride was booked in advance
/// * `surcharges` - The surcharges selected for this ride
/// * `tier` - The tier whose rates apply
/// * `config` - The tariff configuration containing the rates
///
/// # Examples
///
/// ```no_run
/// use taxi_engine::calculation::calculate_fare;
/// use taxi_engine::config::ConfigLoader;
/// use taxi_engine::models::{Surcharge, TariffTier};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("config/il_taxi").unwrap();
/// let surcharges = BTreeSet::from([Surcharge::Airport]);
///
/// let result = calculate_fare(
///     Decimal::from(10),
///     Decimal::from(5),
///     true,
///     &surcharges,
///     TariffTier::Standard,
///     loader.config(),
/// );
/// // 12.90 + 5.00 + 10 × 0.47 + 5 × 1.86 + 5.00 = 36.90
/// assert_eq!(result.quote.total, Decimal::from_str("36.90").unwrap());
/// ```
pub fn calculate_fare(
    minutes: Decimal,
    kilometers: Decimal,
    has_booking: bool,
    surcharges: &BTreeSet<Surcharge>,
    tier: TariffTier,
    config: &TariffConfig,
) -> FareResult {
    let rates = config.tier_rates(tier);
    let minutes = clamp_quantity(minutes);
    let kilometers = clamp_quantity(kilometers);

    let booking_fee = if has_booking {
        rates.booking_fee
    } else {
        Decimal::ZERO
    };
    let time_charge = minutes.saturating_mul(rates.per_minute);
    let distance_charge = kilometers.saturating_mul(rates.per_km);
    let surcharges_total = surcharges
        .iter()
        .fold(Decimal::ZERO, |acc, s| acc.saturating_add(config.surcharge_amount(*s)));

    let total = [booking_fee, time_charge, distance_charge, surcharges_total]
        .into_iter()
        .fold(rates.base_fee, Decimal::saturating_add)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let surcharge_keys: Vec<&str> = surcharges.iter().map(|s| s.key()).collect();

    let audit_step = AuditStep {
        step_number: 1,
        rule_id: "metered_fare".to_string(),
        rule_name: "Metered Fare".to_string(),
        input: serde_json::json!({
            "tier": tier,
            "minutes": minutes.normalize().to_string(),
            "kilometers": kilometers.normalize().to_string(),
            "has_booking": has_booking,
            "surcharges": surcharge_keys,
        }),
        output: serde_json::json!({
            "base_fee": rates.base_fee.normalize().to_string(),
            "booking_fee": booking_fee.normalize().to_string(),
            "time_charge": time_charge.normalize().to_string(),
            "distance_charge": distance_charge.normalize().to_string(),
            "surcharges_total": surcharges_total.normalize().to_string(),
            "total": total.to_string(),
        }),
        reasoning: format!(
            "{} tariff: {} + {} + {} min × {} + {} km × {} + {} = {}",
            tier,
            rates.base_fee.normalize(),
            booking_fee.normalize(),
            minutes.normalize(),
            rates.per_minute.normalize(),
            kilometers.normalize(),
            rates.per_km.normalize(),
            surcharges_total.normalize(),
            total
        ),
    };

    FareResult {
        quote: FareQuote {
            tier,
            minutes,
            kilometers,
            base_fee: rates.base_fee,
            booking_fee,
            time_charge,
            distance_charge,
            surcharges: surcharges.iter().copied().collect(),
            surcharges_total,
            total,
        },
        audit_step,
    }
}
