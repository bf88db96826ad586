//! Configuration types for fare and commission calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calculation::CommissionTable;
use crate::models::{Surcharge, TariffTier};

/// Metadata about the tariff schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffMetadata {
    /// Identifier of the schedule (e.g., "IL-TAXI-2026").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// URL to the published tariff.
    pub source_url: String,
}

/// The four rate constants of a tariff tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierRates {
    /// Fee added when the ride was booked in advance.
    pub booking_fee: Decimal,
    /// Initial fee charged at flag-fall.
    pub base_fee: Decimal,
    /// Charge per elapsed minute.
    pub per_minute: Decimal,
    /// Charge per kilometer travelled.
    pub per_km: Decimal,
}

/// Rates for every tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierTable {
    /// Tariff 1.
    pub standard: TierRates,
    /// Tariff 2.
    pub night: TierRates,
    /// Tariff 3.
    pub weekend: TierRates,
}

/// Tiers configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// Rates by tier.
    pub tiers: TierTable,
}

/// Flat amounts for every surcharge.
#[derive(Debug, Clone, Deserialize)]
pub struct SurchargeAmounts {
    /// Airport access fee.
    pub airport: Decimal,
    /// Highway 6 toll, full route.
    pub highway_6_full: Decimal,
    /// Highway 6 toll, single section.
    pub highway_6_partial: Decimal,
    /// Carmel Tunnels toll, full passage.
    pub carmel_tunnels_full: Decimal,
    /// Carmel Tunnels toll, partial passage.
    pub carmel_tunnels_partial: Decimal,
}

/// Surcharges configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SurchargesConfig {
    /// Amounts by surcharge.
    pub surcharges: SurchargeAmounts,
}

/// A commission rule for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommissionRule {
    /// Display label for dashboards.
    pub label: String,
    /// Signed rate in [-1, 1]; positive is a commission, negative a bonus.
    pub rate: Decimal,
}

/// Commissions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CommissionsConfig {
    /// Map of payment method tag to its commission rule.
    #[serde(default)]
    pub payment_methods: HashMap<String, CommissionRule>,
}

/// The complete tariff configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TariffConfig {
    metadata: TariffMetadata,
    tiers: TierTable,
    surcharges: SurchargeAmounts,
    commissions: CommissionTable,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(
        metadata: TariffMetadata,
        tiers: TierTable,
        surcharges: SurchargeAmounts,
        commissions: CommissionTable,
    ) -> Self {
        Self {
            metadata,
            tiers,
            surcharges,
            commissions,
        }
    }

    /// Returns the tariff metadata.
    pub fn metadata(&self) -> &TariffMetadata {
        &self.metadata
    }

    /// Returns the rates of a tier.
    pub fn tier_rates(&self, tier: TariffTier) -> &TierRates {
        match tier {
            TariffTier::Standard => &self.tiers.standard,
            TariffTier::Night => &self.tiers.night,
            TariffTier::Weekend => &self.tiers.weekend,
        }
    }

    /// Returns the flat amount of a surcharge.
    pub fn surcharge_amount(&self, surcharge: Surcharge) -> Decimal {
        let s = &self.surcharges;
        match surcharge {
            Surcharge::Airport => s.airport,
            Surcharge::Highway6Full => s.highway_6_full,
            Surcharge::Highway6Partial => s.highway_6_partial,
            Surcharge::CarmelTunnelsFull => s.carmel_tunnels_full,
            Surcharge::CarmelTunnelsPartial => s.carmel_tunnels_partial,
        }
    }

    /// Returns the commission table.
    pub fn commissions(&self) -> &CommissionTable {
        &self.commissions
    }
}
