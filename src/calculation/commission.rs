//! Commission-adjusted income.
//!
//! Platforms take a cut of some payment methods and pay a bonus on others.
//! This module holds the lookup table keyed by payment method tag and the
//! net amount formula `amount × (1 − rate)`.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::CommissionRule;
use crate::error::{EngineError, EngineResult};
use crate::models::normalize_payment_method;

/// Commission rules keyed by normalized payment method tag.
///
/// Unknown tags have a rate of zero and use the tag itself as their label.
///
/// # Example
///
/// ```
/// use taxi_engine::calculation::CommissionTable;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = CommissionTable::from_rates([("card", Decimal::from_str("0.1").unwrap())]).unwrap();
/// assert_eq!(table.rate_for("Card"), Decimal::from_str("0.1").unwrap());
/// assert_eq!(table.rate_for("cash"), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommissionTable {
    rules: HashMap<String, CommissionRule>,
}

impl CommissionTable {
    /// Builds a table from configured rules, rejecting rates outside [-1, 1].
    pub fn from_rules(rules: HashMap<String, CommissionRule>) -> EngineResult<Self> {
        let mut table = Self::default();
        for (tag, rule) in rules {
            table.insert(&tag, rule.label, rule.rate)?;
        }
        Ok(table)
    }

    /// Builds a table from bare rates; labels default to the tags.
    pub fn from_rates<'a, I>(rates: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (&'a str, Decimal)>,
    {
        let mut table = Self::default();
        for (tag, rate) in rates {
            table.insert(tag, tag.to_string(), rate)?;
        }
        Ok(table)
    }

    /// Adds or replaces the rule for a payment method.
    pub fn insert(&mut self, tag: &str, label: String, rate: Decimal) -> EngineResult<()> {
        let key = normalize_payment_method(tag);
        if rate < Decimal::NEGATIVE_ONE || rate > Decimal::ONE {
            return Err(EngineError::InvalidCommissionRate {
                payment_method: key,
                rate,
            });
        }
        self.rules.insert(key, CommissionRule { label, rate });
        Ok(())
    }

    /// Returns the rate for a payment method, zero when it has no rule.
    pub fn rate_for(&self, tag: &str) -> Decimal {
        self.rules
            .get(&normalize_payment_method(tag))
            .map(|r| r.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the display label for a payment method.
    pub fn label_for(&self, tag: &str) -> String {
        let key = normalize_payment_method(tag);
        match self.rules.get(&key) {
            Some(rule) => rule.label.clone(),
            None => key,
        }
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Applies a commission rate to an amount: `amount × (1 − rate)`.
///
/// A negative rate is a bonus, so the net exceeds the amount. The result
/// saturates at the `Decimal` range; see [`checked_net_amount`].
pub fn net_amount(amount: Decimal, rate: Decimal) -> Decimal {
    amount.saturating_mul(Decimal::ONE.saturating_sub(rate))
}

/// Like [`net_amount`], but `None` when the result does not fit a `Decimal`.
pub fn checked_net_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    Decimal::ONE
        .checked_sub(rate)
        .and_then(|keep| amount.checked_mul(keep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_amount_with_commission() {
        assert_eq!(net_amount(dec("50"), dec("0.1")), dec("45"));
    }

    #[test]
    fn test_net_amount_with_bonus_exceeds_amount() {
        assert_eq!(net_amount(dec("100"), dec("-0.05")), dec("105"));
    }

    #[test]
    fn test_net_amount_zero_rate_is_identity() {
        assert_eq!(net_amount(dec("73.40"), Decimal::ZERO), dec("73.40"));
    }

    #[test]
    fn test_net_amount_overflow() {
        // 1.05 × Decimal::MAX does not fit
        assert_eq!(checked_net_amount(Decimal::MAX, dec("-0.05")), None);
        assert_eq!(net_amount(Decimal::MAX, dec("-0.05")), Decimal::MAX);
        assert_eq!(checked_net_amount(dec("100"), dec("0.15")), Some(dec("85")));
    }

    #[test]
    fn test_unknown_tag_has_zero_rate_and_tag_label() {
        let table = CommissionTable::default();
        assert_eq!(table.rate_for("bit"), Decimal::ZERO);
        assert_eq!(table.label_for(" Bit "), "bit");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = CommissionTable::default();
        table.insert("Gett", "Gett".to_string(), dec("0.15")).unwrap();
        assert_eq!(table.rate_for("GETT"), dec("0.15"));
        assert_eq!(table.label_for("gett"), "Gett");
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let mut table = CommissionTable::default();
        let result = table.insert("gett", "Gett".to_string(), dec("1.01"));
        match result {
            Err(EngineError::InvalidCommissionRate {
                payment_method,
                rate,
            }) => {
                assert_eq!(payment_method, "gett");
                assert_eq!(rate, dec("1.01"));
            }
            _ => panic!("Expected InvalidCommissionRate error"),
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_rate_bounds_are_inclusive() {
        let table =
            CommissionTable::from_rates([("free_ride", dec("1")), ("double", dec("-1"))]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(net_amount(dec("40"), table.rate_for("free_ride")), dec("0"));
        assert_eq!(net_amount(dec("40"), table.rate_for("double")), dec("80"));
    }

    #[test]
    fn test_from_rules_rejects_below_minus_one() {
        let mut rules = HashMap::new();
        rules.insert(
            "broken".to_string(),
            CommissionRule {
                label: "Broken".to_string(),
                rate: dec("-1.5"),
            },
        );
        assert!(CommissionTable::from_rules(rules).is_err());
    }
}
