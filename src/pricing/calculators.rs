//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no logging, no rounding.
//! Rounding happens once, when a value is formatted for display.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{
    AddOnCatalog, FrequencyDiscountTable, Selections, ServiceCatalog, UnknownServicePolicy,
    FALLBACK_SERVICE,
};
use super::responses::PriceBreakdown;
use super::services::PricingError;

/// Round to specified decimal places, halves away from zero.
///
/// This is how amounts are shown to customers ("$141.62" for 141.615).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use house_cleaning_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(219.9024), 2), dec!(219.90));
/// assert_eq!(round_money(dec!(141.616), 2), dec!(141.62));
/// assert_eq!(round_money(dec!(0.125), 2), dec!(0.13));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a booking.
///
/// Steps, in order: base price, square-footage multiplier, bedroom
/// multiplier, bathroom multiplier, frequency discount, add-ons, tax,
/// initial fee. Unknown frequencies, add-ons and bands are no-ops.
///
/// # Arguments
/// * `selections` - Snapshot of the form's current choices
/// * `catalog` - Service tiers and base prices
/// * `discounts` - Frequency discount fractions
/// * `add_ons` - Flat add-on surcharges
/// * `tax_rate` - Fraction applied to the subtotal
/// * `initial_fee` - Charged on the first visit only
/// * `policy` - Fallback or reject when the service type is unknown
pub fn compute_price(
    selections: &Selections,
    catalog: &ServiceCatalog,
    discounts: &FrequencyDiscountTable,
    add_ons: &AddOnCatalog,
    tax_rate: Decimal,
    initial_fee: Decimal,
    policy: UnknownServicePolicy,
) -> Result<PriceBreakdown, PricingError> {
    let unknown = || PricingError::UnknownServiceType {
        service_type: selections.service_type.clone(),
    };

    let (service_key, tier, used_fallback) = match catalog.get(&selections.service_type) {
        Some(tier) => (selections.service_type.as_str(), tier, false),
        None => match policy {
            UnknownServicePolicy::Reject => return Err(unknown()),
            UnknownServicePolicy::Fallback => {
                let tier = catalog.get(FALLBACK_SERVICE).ok_or_else(unknown)?;
                (FALLBACK_SERVICE, tier, true)
            }
        },
    };

    // Size and room multipliers compound on the running base price
    let base_price = tier
        .base_price
        .checked_mul(selections.square_footage.multiplier())
        .and_then(|p| p.checked_mul(selections.bedrooms.multiplier()))
        .and_then(|p| p.checked_mul(selections.bathrooms.multiplier()))
        .ok_or_else(|| overflow("base price"))?;

    let discount_rate = discounts.discount(&selections.frequency);
    let discounted_base_price = Decimal::ONE
        .checked_sub(discount_rate)
        .and_then(|keep| base_price.checked_mul(keep))
        .ok_or_else(|| overflow("discounted base price"))?;

    let add_on_total = add_ons
        .total(&selections.add_ons)
        .ok_or_else(|| overflow("add-on total"))?;
    let subtotal = discounted_base_price
        .checked_add(add_on_total)
        .ok_or_else(|| overflow("subtotal"))?;

    let tax = subtotal
        .checked_mul(tax_rate)
        .ok_or_else(|| overflow("tax"))?;
    let recurring_total = subtotal
        .checked_add(tax)
        .ok_or_else(|| overflow("recurring total"))?;
    let total = recurring_total
        .checked_add(initial_fee)
        .ok_or_else(|| overflow("total"))?;

    Ok(PriceBreakdown {
        service_key: service_key.to_string(),
        service_name: tier.display_name.clone(),
        used_fallback,
        frequency: selections.frequency.clone(),
        frequency_label: discounts.label(&selections.frequency),
        time_slot: selections.time_slot(),
        base_price,
        discount_rate,
        discounted_base_price,
        add_on_total,
        subtotal,
        tax_rate,
        tax,
        initial_fee,
        total,
        recurring_total,
    })
}

fn overflow(amount: &str) -> PricingError {
    PricingError::ConfigurationError {
        message: format!("{} is out of range for these pricing tables", amount),
        errors: vec![],
    }
}
