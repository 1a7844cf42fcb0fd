//! Pricing tables and customer selections.
//!
//! The tables are plain data: they deserialize from a pricing file and
//! default to the rates published on the booking page.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Service tier key used when an unknown service type falls back.
pub const FALLBACK_SERVICE: &str = "standard";

/// One cleaning service tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTier {
    pub display_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
}

/// Service-type key -> tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog(BTreeMap<String, ServiceTier>);

impl ServiceCatalog {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_tier(mut self, key: &str, display_name: &str, base_price: Decimal) -> Self {
        self.0.insert(
            key.to_string(),
            ServiceTier {
                display_name: display_name.to_string(),
                base_price,
            },
        );
        self
    }

    pub fn get(&self, key: &str) -> Option<&ServiceTier> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceTier)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
            .with_tier("standard", "Standard House Cleaning", dec!(89.00))
            .with_tier("deep", "Deep House Cleaning", dec!(129.00))
            .with_tier("move", "Move In/Out Cleaning", dec!(199.00))
            .with_tier("renovation", "Renovation Cleaning", dec!(249.00))
            .with_tier("student", "Student Property Cleaning", dec!(179.00))
    }
}

/// A bookable visit frequency and its discount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyOption {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
}

/// Frequency key -> discount fraction in [0, 1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyDiscountTable(BTreeMap<String, FrequencyOption>);

impl FrequencyDiscountTable {
    /// Label shown when no frequency (or an unknown one) is selected.
    pub const DEFAULT_LABEL: &'static str = "One Time";

    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_option(mut self, key: &str, label: &str, discount: Decimal) -> Self {
        self.0.insert(
            key.to_string(),
            FrequencyOption {
                label: label.to_string(),
                discount,
            },
        );
        self
    }

    /// Discount for `key`; unknown keys discount nothing.
    pub fn discount(&self, key: &str) -> Decimal {
        self.0.get(key).map(|o| o.discount).unwrap_or(Decimal::ZERO)
    }

    /// Display label, e.g. "Weekly - 20% off" or "One Time".
    pub fn label(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(option) if option.discount > Decimal::ZERO => {
                match option.discount.checked_mul(Decimal::ONE_HUNDRED) {
                    Some(percent) => format!("{} - {}% off", option.label, percent.normalize()),
                    None => option.label.clone(),
                }
            }
            Some(option) => option.label.clone(),
            None => Self::DEFAULT_LABEL.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FrequencyOption)> {
        self.0.iter()
    }
}

impl Default for FrequencyDiscountTable {
    fn default() -> Self {
        Self::new()
            .with_option("weekly", "Weekly", dec!(0.20))
            .with_option("biweekly", "Bi-weekly", dec!(0.15))
            .with_option("monthly", "Monthly", dec!(0.10))
            .with_option("one-time", "One Time", dec!(0.00))
    }
}

/// Add-on key -> flat surcharge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddOnCatalog(BTreeMap<String, Decimal>);

impl AddOnCatalog {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_add_on(mut self, key: &str, price: Decimal) -> Self {
        self.0.insert(key.to_string(), price);
        self
    }

    pub fn price(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Sum of surcharges for the selected keys; unknown keys add nothing.
    ///
    /// `None` if the sum overflows.
    pub fn total<'a>(&self, selected: impl IntoIterator<Item = &'a String>) -> Option<Decimal> {
        selected
            .into_iter()
            .filter_map(|key| self.price(key))
            .try_fold(Decimal::ZERO, |sum, price| sum.checked_add(price))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, Decimal)> {
        self.0.iter().map(|(k, p)| (k, *p))
    }
}

impl Default for AddOnCatalog {
    fn default() -> Self {
        Self::new()
            .with_add_on("pets", dec!(15.00))
            .with_add_on("fridge", dec!(25.00))
            .with_add_on("oven", dec!(25.00))
            .with_add_on("cabinets", dec!(20.00))
            .with_add_on("kitchen", dec!(30.00))
            .with_add_on("blinds", dec!(5.00))
            .with_add_on("windows", dec!(40.00))
    }
}

/// What to do when the selected service type is not in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownServicePolicy {
    /// Price as the standard tier
    #[default]
    Fallback,
    /// Fail the quote
    Reject,
}

impl UnknownServicePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(Self::Fallback),
            "reject" | "fail" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Square-footage band from the home details step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SquareFootageBand {
    #[default]
    Unspecified,
    From1000To1499,
    From1500To1999,
    From2000Up,
}

impl SquareFootageBand {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "1000-1499" => Self::From1000To1499,
            "1500-1999" => Self::From1500To1999,
            "2000+" => Self::From2000Up,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::From1000To1499 => "1000-1499",
            Self::From1500To1999 => "1500-1999",
            Self::From2000Up => "2000+",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Unspecified => Decimal::ONE,
            Self::From1000To1499 => dec!(1.2),
            Self::From1500To1999 => dec!(1.4),
            Self::From2000Up => dec!(1.6),
        }
    }
}

/// Bedroom-count band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BedroomBand {
    #[default]
    Unspecified,
    Three,
    FourOrMore,
}

impl BedroomBand {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "3" => Self::Three,
            "4+" => Self::FourOrMore,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::Three => "3",
            Self::FourOrMore => "4+",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Unspecified => Decimal::ONE,
            Self::Three => dec!(1.1),
            Self::FourOrMore => dec!(1.25),
        }
    }
}

/// Bathroom-count band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BathroomBand {
    #[default]
    Unspecified,
    ThreeOrMore,
}

impl BathroomBand {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "3+" => Self::ThreeOrMore,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "",
            Self::ThreeOrMore => "3+",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Unspecified => Decimal::ONE,
            Self::ThreeOrMore => dec!(1.15),
        }
    }
}

macro_rules! string_band_conversions {
    ($($band:ty),*) => {
        $(
            impl From<String> for $band {
                fn from(value: String) -> Self {
                    Self::parse(&value)
                }
            }

            impl From<$band> for String {
                fn from(value: $band) -> Self {
                    value.as_str().to_string()
                }
            }
        )*
    };
}

string_band_conversions!(SquareFootageBand, BedroomBand, BathroomBand);

/// Customer selections owned by the booking form.
///
/// Every field tolerates partial entry: empty strings and unrecognized
/// bands price as no-ops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selections {
    pub service_type: String,
    pub frequency: String,
    pub add_ons: BTreeSet<String>,
    pub square_footage: SquareFootageBand,
    pub bedrooms: BedroomBand,
    pub bathrooms: BathroomBand,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
}

impl Selections {
    /// Starting state of the booking page.
    pub fn initial() -> Self {
        Self {
            service_type: FALLBACK_SERVICE.to_string(),
            frequency: "one-time".to_string(),
            ..Default::default()
        }
    }

    /// Toggle an add-on; returns true when it is now selected.
    pub fn toggle_add_on(&mut self, key: &str) -> bool {
        if self.add_ons.remove(key) {
            false
        } else {
            self.add_ons.insert(key.to_string());
            true
        }
    }

    /// "<date> @ <time>" once both are chosen.
    pub fn time_slot(&self) -> Option<String> {
        match (&self.date, self.time.as_deref().map(str::trim)) {
            (Some(date), Some(time)) if !time.is_empty() => {
                Some(format!("{} @ {}", date.format("%Y-%m-%d"), time))
            }
            _ => None,
        }
    }
}
