//! Configuration loading for the Fare and Earnings Engine.
//!
//! This module loads the regulated tariff (tier rates and surcharges) and the
//! payment method commission table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use taxi_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/il_taxi").unwrap();
//! println!("Loaded tariff: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CommissionRule, CommissionsConfig, SurchargeAmounts, SurchargesConfig, TariffConfig,
    TariffMetadata, TierRates, TierTable, TiersConfig,
};
