//! Pricing configuration and the quote entry point.
//!
//! `PricingConfig` bundles every table the calculator needs so callers pass
//! one value around instead of six.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculators::compute_price;
use super::models::{
    AddOnCatalog, FrequencyDiscountTable, Selections, ServiceCatalog, UnknownServicePolicy,
    FALLBACK_SERVICE,
};
use super::responses::PriceBreakdown;

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Unknown service type '{service_type}'")]
    UnknownServiceType { service_type: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, errors: Vec<String> },
}

/// Largest base price, add-on or fee a pricing file may set.
pub const MAX_AMOUNT: Decimal = dec!(1000000);

/// Every table and rate used to price a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub services: ServiceCatalog,
    pub frequencies: FrequencyDiscountTable,
    pub add_ons: AddOnCatalog,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_fee: Decimal,
    pub unknown_service: UnknownServicePolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            services: ServiceCatalog::default(),
            frequencies: FrequencyDiscountTable::default(),
            add_ons: AddOnCatalog::default(),
            tax_rate: dec!(0.13),
            initial_fee: dec!(25.00),
            unknown_service: UnknownServicePolicy::default(),
        }
    }
}

impl PricingConfig {
    /// Parse a JSON pricing document and validate it.
    ///
    /// Omitted sections keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PricingError::ConfigurationError {
                message: "invalid pricing document".to_string(),
                errors: vec![e.to_string()],
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON pricing file from disk.
    pub fn from_file(path: &Path) -> Result<Self, PricingError> {
        let json = std::fs::read_to_string(path).map_err(|e| PricingError::ConfigurationError {
            message: format!("cannot read pricing file {}", path.display()),
            errors: vec![e.to_string()],
        })?;
        Self::from_json(&json)
    }

    pub fn with_policy(mut self, policy: UnknownServicePolicy) -> Self {
        self.unknown_service = policy;
        self
    }

    /// Reject tables that would make totals negative, overflow, or leave
    /// the fallback policy with nothing to fall back to.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        if self.services.is_empty() {
            errors.push("service catalog is empty".to_string());
        } else if self.unknown_service == UnknownServicePolicy::Fallback
            && self.services.get(FALLBACK_SERVICE).is_none()
        {
            errors.push(format!(
                "fallback policy needs a '{}' service tier",
                FALLBACK_SERVICE
            ));
        }
        for (key, tier) in self.services.iter() {
            check_amount(&mut errors, &format!("service '{}' base price", key), tier.base_price);
        }
        for (key, option) in self.frequencies.iter() {
            if option.discount < Decimal::ZERO || option.discount >= Decimal::ONE {
                errors.push(format!(
                    "frequency '{}' discount {} outside [0, 1)",
                    key, option.discount
                ));
            }
        }
        for (key, price) in self.add_ons.iter() {
            check_amount(&mut errors, &format!("add-on '{}' price", key), price);
        }
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            errors.push(format!("tax rate {} outside [0, 1]", self.tax_rate));
        }
        check_amount(&mut errors, "initial fee", self.initial_fee);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::ConfigurationError {
                message: format!("{} invalid pricing entries", errors.len()),
                errors,
            })
        }
    }

    /// Price one set of selections against these tables.
    pub fn quote(&self, selections: &Selections) -> Result<PriceBreakdown, PricingError> {
        compute_price(
            selections,
            &self.services,
            &self.frequencies,
            &self.add_ons,
            self.tax_rate,
            self.initial_fee,
            self.unknown_service,
        )
    }
}

fn check_amount(errors: &mut Vec<String>, what: &str, amount: Decimal) {
    if amount < Decimal::ZERO {
        errors.push(format!("{} is negative", what));
    } else if amount > MAX_AMOUNT {
        errors.push(format!("{} {} exceeds {}", what, amount, MAX_AMOUNT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::UnknownServiceType {
            service_type: "airbnb".to_string(),
        };
        assert!(err.to_string().contains("airbnb"));

        let err = PricingError::ConfigurationError {
            message: "test error".to_string(),
            errors: vec![],
        };
        assert!(err.to_string().contains("test error"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tax_rate, dec!(0.13));
        assert_eq!(config.initial_fee, dec!(25.00));
        assert_eq!(config.unknown_service, UnknownServicePolicy::Fallback);
    }

    #[test]
    fn test_from_json_overrides_sections() {
        let json = r#"{
            "addOns": { "airbnb": "35.00", "pets": "15.00" },
            "taxRate": "0.05",
            "unknownService": "reject"
        }"#;
        let config = PricingConfig::from_json(json).unwrap();
        assert_eq!(config.add_ons.price("airbnb"), Some(dec!(35.00)));
        assert_eq!(config.add_ons.price("windows"), None);
        assert_eq!(config.tax_rate, dec!(0.05));
        assert_eq!(config.initial_fee, dec!(25.00));
        assert_eq!(config.unknown_service, UnknownServicePolicy::Reject);
        assert!(config.services.get("deep").is_some());
    }

    #[test]
    fn test_example_pricing_file_matches_defaults() {
        let config =
            PricingConfig::from_json(include_str!("../../config/pricing.example.json")).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_discount() {
        let json = r#"{
            "frequencies": {
                "weekly": { "label": "Weekly", "discount": "1.0" },
                "monthly": { "label": "Monthly", "discount": "-0.1" }
            }
        }"#;
        match PricingConfig::from_json(json) {
            Err(PricingError::ConfigurationError { errors, .. }) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let result = PricingConfig::from_json("{ not json");
        assert!(matches!(
            result,
            Err(PricingError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let config = PricingConfig {
            services: ServiceCatalog::new(),
            tax_rate: dec!(-0.01),
            initial_fee: dec!(-1),
            ..PricingConfig::default()
        };
        match config.validate() {
            Err(PricingError::ConfigurationError { errors, .. }) => assert_eq!(errors.len(), 3),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_rejects_amounts_that_could_overflow() {
        let json = r#"{
            "services": {
                "standard": {
                    "displayName": "Standard House Cleaning",
                    "basePrice": "70000000000000000000000000000"
                }
            },
            "addOns": { "pets": "1000000.01" },
            "taxRate": "1.5"
        }"#;
        match PricingConfig::from_json(json) {
            Err(PricingError::ConfigurationError { errors, .. }) => {
                assert_eq!(errors.len(), 3);
                assert!(errors[0].contains("base price"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_amounts_at_ceiling_still_quote() {
        let config = PricingConfig {
            services: ServiceCatalog::new().with_tier("standard", "Standard", MAX_AMOUNT),
            add_ons: AddOnCatalog::new().with_add_on("pets", MAX_AMOUNT),
            tax_rate: Decimal::ONE,
            initial_fee: MAX_AMOUNT,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_ok());

        let mut selections = Selections::initial();
        selections.square_footage = crate::pricing::SquareFootageBand::From2000Up;
        selections.add_ons.insert("pets".to_string());
        let breakdown = config.quote(&selections).unwrap();
        assert_eq!(breakdown.total, breakdown.recurring_total + MAX_AMOUNT);
    }

    #[test]
    fn test_fallback_policy_requires_standard_tier() {
        let json = r#"{
            "services": {
                "deep": { "displayName": "Deep House Cleaning", "basePrice": "129.00" }
            }
        }"#;
        match PricingConfig::from_json(json) {
            Err(PricingError::ConfigurationError { errors, .. }) => {
                assert_eq!(errors, vec!["fallback policy needs a 'standard' service tier"]);
            }
            other => panic!("expected configuration error, got {:?}", other),
        }

        let config = PricingConfig {
            services: ServiceCatalog::new().with_tier("deep", "Deep House Cleaning", dec!(129)),
            unknown_service: UnknownServicePolicy::Reject,
            ..PricingConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quote_uses_config_policy() {
        let mut selections = Selections::initial();
        selections.service_type = "airbnb".to_string();

        let tolerant = PricingConfig::default();
        assert!(tolerant.quote(&selections).unwrap().used_fallback);

        let strict = PricingConfig::default().with_policy(UnknownServicePolicy::Reject);
        assert_eq!(
            strict.quote(&selections),
            Err(PricingError::UnknownServiceType {
                service_type: "airbnb".to_string()
            })
        );
    }
}
