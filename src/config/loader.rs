//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff and
//! commission configuration from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::calculation::CommissionTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{Surcharge, TariffTier};

use super::types::{
    CommissionsConfig, SurchargesConfig, TariffConfig, TariffMetadata, TierRates, TiersConfig,
};

/// Loads and provides access to tariff configuration.
///
/// # Directory Structure
///
/// ```text
/// config/il_taxi/
/// ├── tariff.yaml       # Schedule metadata
/// ├── tiers.yaml        # Rates for each tariff tier
/// ├── surcharges.yaml   # Flat surcharge amounts
/// └── commissions.yaml  # Commission rate per payment method
/// ```
///
/// # Example
///
/// ```no_run
/// use taxi_engine::config::ConfigLoader;
/// use taxi_engine::models::TariffTier;
///
/// let loader = ConfigLoader::load("./config/il_taxi").unwrap();
/// let rates = loader.tier_rates(TariffTier::Night);
/// println!("Night tariff: {} per km", rates.per_km);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any commission rate lies outside [-1, 1]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use taxi_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/il_taxi")?;
    /// # Ok::<(), taxi_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TariffMetadata>(&path.join("tariff.yaml"))?;
        let tiers = Self::load_yaml::<TiersConfig>(&path.join("tiers.yaml"))?;
        let surcharges = Self::load_yaml::<SurchargesConfig>(&path.join("surcharges.yaml"))?;
        let commissions = Self::load_yaml::<CommissionsConfig>(&path.join("commissions.yaml"))?;

        let commissions = CommissionTable::from_rules(commissions.payment_methods)?;

        debug!(
            tariff = %metadata.code,
            payment_methods = commissions.len(),
            "Loaded tariff configuration"
        );

        let config = TariffConfig::new(metadata, tiers.tiers, surcharges.surcharges, commissions);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Returns the tariff metadata.
    pub fn metadata(&self) -> &TariffMetadata {
        self.config.metadata()
    }

    /// Returns the rates of a tier.
    pub fn tier_rates(&self, tier: TariffTier) -> &TierRates {
        self.config.tier_rates(tier)
    }

    /// Returns the flat amount of a surcharge.
    pub fn surcharge_amount(&self, surcharge: Surcharge) -> Decimal {
        self.config.surcharge_amount(surcharge)
    }

    /// Returns the commission table.
    pub fn commission_table(&self) -> &CommissionTable {
        self.config.commissions()
    }
}
