//! Coupon codes for the booking page.
//!
//! A coupon discounts the first visit only. Recurring visits keep the
//! engine's recurring total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::pricing::{round_money, PriceBreakdown};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponError {
    #[error("Please enter a coupon code")]
    Empty,

    #[error("Invalid coupon code")]
    Invalid { code: String },
}

/// How a coupon reduces the subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum CouponDiscount {
    /// Whole-number percentage of the subtotal
    Percentage(Decimal),
    /// Flat dollar amount
    Dollars(Decimal),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coupon {
    pub code: String,
    pub discount: CouponDiscount,
}

impl Coupon {
    /// Look up a code as typed by the customer.
    pub fn lookup(input: &str) -> Result<Self, CouponError> {
        let code = input.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(CouponError::Empty);
        }

        let discount = match code.as_str() {
            "CLEAN10" => CouponDiscount::Percentage(dec!(10)),
            "SPARKLE20" => CouponDiscount::Percentage(dec!(20)),
            "FIRST5" => CouponDiscount::Dollars(dec!(5)),
            "SUMMER15" => CouponDiscount::Percentage(dec!(15)),
            _ => return Err(CouponError::Invalid { code }),
        };

        Ok(Self { code, discount })
    }

    /// Discount on `subtotal`, never more than the subtotal itself.
    pub fn discount_on(&self, subtotal: Decimal) -> Decimal {
        let amount = match self.discount {
            CouponDiscount::Percentage(percent) => subtotal * percent / Decimal::ONE_HUNDRED,
            CouponDiscount::Dollars(amount) => amount,
        };
        amount.min(subtotal).max(Decimal::ZERO)
    }

    /// Customer-facing confirmation.
    pub fn feedback(&self) -> String {
        let amount = match self.discount {
            CouponDiscount::Percentage(percent) => format!("{}%", percent.normalize()),
            CouponDiscount::Dollars(amount) => {
                let mut rounded = round_money(amount, 2);
                rounded.rescale(2);
                format!("${}", rounded)
            }
        };
        format!("Coupon applied successfully! {} discount applied.", amount)
    }

    /// Re-price the first visit with this coupon applied.
    pub fn apply(&self, breakdown: &PriceBreakdown) -> DiscountedQuote {
        let discount = self.discount_on(breakdown.subtotal);
        let subtotal = breakdown.subtotal - discount;
        let tax = subtotal * breakdown.tax_rate;

        DiscountedQuote {
            code: self.code.clone(),
            discount,
            subtotal,
            tax,
            total: subtotal + tax + breakdown.initial_fee,
            recurring_total: breakdown.recurring_total,
        }
    }
}

/// First-visit amounts after a coupon
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountedQuote {
    pub code: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub recurring_total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PricingConfig, Selections};

    fn deep_weekly() -> PriceBreakdown {
        let selections = Selections {
            service_type: "deep".to_string(),
            frequency: "weekly".to_string(),
            ..Default::default()
        };
        PricingConfig::default().quote(&selections).unwrap()
    }

    #[test]
    fn test_lookup_normalizes_input() {
        let coupon = Coupon::lookup("  clean10 ").unwrap();
        assert_eq!(coupon.code, "CLEAN10");
        assert_eq!(coupon.discount, CouponDiscount::Percentage(dec!(10)));
    }

    #[test]
    fn test_lookup_errors() {
        assert_eq!(Coupon::lookup("   "), Err(CouponError::Empty));
        assert_eq!(
            Coupon::lookup("free100"),
            Err(CouponError::Invalid {
                code: "FREE100".to_string()
            })
        );
        assert_eq!(CouponError::Empty.to_string(), "Please enter a coupon code");
    }

    #[test]
    fn test_percentage_coupon_discounts_first_visit_only() {
        let breakdown = deep_weekly();
        let quote = Coupon::lookup("SPARKLE20").unwrap().apply(&breakdown);

        // 103.20 * 20%
        assert_eq!(quote.discount, dec!(20.64));
        assert_eq!(quote.subtotal, dec!(82.56));
        assert_eq!(quote.tax, dec!(10.7328));
        assert_eq!(quote.total, dec!(118.2928));
        assert_eq!(quote.recurring_total, breakdown.recurring_total);
    }

    #[test]
    fn test_flat_coupon() {
        let breakdown = deep_weekly();
        let quote = Coupon::lookup("first5").unwrap().apply(&breakdown);
        assert_eq!(quote.discount, dec!(5));
        assert_eq!(quote.subtotal, dec!(98.20));
        assert_eq!(quote.total, quote.subtotal + quote.tax + breakdown.initial_fee);
    }

    #[test]
    fn test_flat_discount_capped_at_subtotal() {
        let coupon = Coupon::lookup("FIRST5").unwrap();
        assert_eq!(coupon.discount_on(dec!(3.50)), dec!(3.50));
        assert_eq!(coupon.discount_on(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(
            Coupon::lookup("SUMMER15").unwrap().feedback(),
            "Coupon applied successfully! 15% discount applied."
        );
        assert_eq!(
            Coupon::lookup("FIRST5").unwrap().feedback(),
            "Coupon applied successfully! $5.00 discount applied."
        );
    }
}
