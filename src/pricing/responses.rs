//! Quote output handed to the display layer.

use rust_decimal::Decimal;
use serde::Serialize;

/// Full-precision price breakdown for one set of selections.
///
/// Amounts are never rounded here; see [`crate::pricing::round_money`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Catalog key actually priced (differs from the request on fallback)
    pub service_key: String,
    pub service_name: String,
    pub used_fallback: bool,
    pub frequency: String,
    pub frequency_label: String,
    pub time_slot: Option<String>,
    /// After size and room multipliers, before the frequency discount
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub add_on_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub initial_fee: Decimal,
    /// First visit: subtotal + tax + initial fee
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    /// Later visits: subtotal + tax
    #[serde(with = "rust_decimal::serde::str")]
    pub recurring_total: Decimal,
}

impl PriceBreakdown {
    /// Amount taken off the base price by the frequency discount.
    pub fn frequency_savings(&self) -> Decimal {
        self.base_price - self.discounted_base_price
    }
}
