//! Fare models: tariff tiers, surcharges and the computed quote.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the three regulated fare-rate presets.
///
/// # Example
///
/// ```
/// use taxi_engine::models::TariffTier;
///
/// let tier: TariffTier = serde_json::from_str("\"night\"").unwrap();
/// assert_eq!(tier, TariffTier::Night);
/// assert_eq!(tier.to_string(), "Night");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffTier {
    /// Weekday daytime rates (tariff 1).
    Standard,
    /// Night rates (tariff 2).
    Night,
    /// Weekend and holiday rates (tariff 3).
    Weekend,
}

impl TariffTier {
    /// All tiers, in tariff order.
    pub const ALL: [TariffTier; 3] = [TariffTier::Standard, TariffTier::Night, TariffTier::Weekend];
}

impl std::fmt::Display for TariffTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TariffTier::Standard => write!(f, "Standard"),
            TariffTier::Night => write!(f, "Night"),
            TariffTier::Weekend => write!(f, "Weekend"),
        }
    }
}

/// A flat add-on charge the driver can toggle for a fare.
///
/// All selected surcharges are summed; there are no exclusivity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surcharge {
    /// Ben Gurion airport access fee.
    Airport,
    /// Highway 6 toll, full route.
    #[serde(rename = "highway_6_full")]
    Highway6Full,
    /// Highway 6 toll, single section.
    #[serde(rename = "highway_6_partial")]
    Highway6Partial,
    /// Carmel Tunnels toll, full passage.
    CarmelTunnelsFull,
    /// Carmel Tunnels toll, partial passage.
    CarmelTunnelsPartial,
}

impl Surcharge {
    /// All surcharges.
    pub const ALL: [Surcharge; 5] = [
        Surcharge::Airport,
        Surcharge::Highway6Full,
        Surcharge::Highway6Partial,
        Surcharge::CarmelTunnelsFull,
        Surcharge::CarmelTunnelsPartial,
    ];

    /// Returns the snake_case key used in requests and configuration.
    pub fn key(&self) -> &'static str {
        match self {
            Surcharge::Airport => "airport",
            Surcharge::Highway6Full => "highway_6_full",
            Surcharge::Highway6Partial => "highway_6_partial",
            Surcharge::CarmelTunnelsFull => "carmel_tunnels_full",
            Surcharge::CarmelTunnelsPartial => "carmel_tunnels_partial",
        }
    }

    /// Looks up a surcharge by key, case-insensitively. Unknown keys yield `None`.
    ///
    /// ```
    /// use taxi_engine::models::Surcharge;
    ///
    /// assert_eq!(Surcharge::from_key("Airport"), Some(Surcharge::Airport));
    /// assert_eq!(Surcharge::from_key("ferry"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Surcharge> {
        let key = key.trim().to_lowercase();
        Surcharge::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// A computed fare with every component that went into it.
///
/// Component amounts are unrounded; only `total` is rounded to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareQuote {
    /// The tier whose rates were applied.
    pub tier: TariffTier,
    /// Minutes charged (after coercion).
    pub minutes: Decimal,
    /// Kilometers charged (after coercion).
    pub kilometers: Decimal,
    /// Initial fee of the tier.
    pub base_fee: Decimal,
    /// Booking fee, zero when the ride was not booked.
    pub booking_fee: Decimal,
    /// minutes × per-minute rate.
    pub time_charge: Decimal,
    /// kilometers × per-km rate.
    pub distance_charge: Decimal,
    /// The surcharges that were applied.
    pub surcharges: Vec<Surcharge>,
    /// Sum of the applied surcharge amounts.
    pub surcharges_total: Decimal,
    /// The fare, rounded half-up to 2 decimal places.
    pub total: Decimal,
}
