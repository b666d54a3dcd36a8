//! Price-table cost checker driven by configuration.

use super::{CheckError, Checker, CheckerRegistry, CostVerdict};
use crate::config::CostConfig;
use crate::state::RawResource;
use serde_json::json;
use std::collections::BTreeMap;

/// Estimates monthly cost from a fixed price per resource type.
///
/// Each instance of a resource is billed at its type's price; unknown types
/// are reported as unpriced with a cost of zero.
#[derive(Debug, Clone)]
pub struct PriceTableCostChecker {
    prices: BTreeMap<String, f64>,
    currency: String,
}

impl PriceTableCostChecker {
    pub fn new(prices: BTreeMap<String, f64>, currency: &str) -> Self {
        Self {
            prices,
            currency: currency.to_string(),
        }
    }

    pub fn from_config(config: &CostConfig) -> Self {
        Self::new(config.prices.clone(), &config.currency)
    }

    /// Cost checker for the whole `cost` section: one price table per
    /// family, with the top-level table as fallback.
    pub fn registry(config: &CostConfig) -> CheckerRegistry<CostVerdict> {
        config.families.iter().fold(
            CheckerRegistry::new("cost").with_fallback(Self::from_config(config)),
            |registry, (prefix, family)| {
                let currency = family.currency.as_deref().unwrap_or(&config.currency);
                registry.register(prefix, Self::new(family.prices.clone(), currency))
            },
        )
    }
}

impl Checker for PriceTableCostChecker {
    type Verdict = CostVerdict;

    fn name(&self) -> &str {
        "price-table"
    }

    fn run(&self, resource: &RawResource) -> Result<CostVerdict, CheckError> {
        let instances = resource.instance_count();
        let verdict = match self.prices.get(&resource.resource_type) {
            Some(unit) => json!({
                "priced": true,
                "instances": instances,
                "monthly": unit * instances as f64,
                "currency": self.currency,
            }),
            None => json!({
                "priced": false,
                "instances": instances,
                "monthly": 0.0,
                "currency": self.currency,
            }),
        };
        Ok(CostVerdict::new(verdict))
    }
}
