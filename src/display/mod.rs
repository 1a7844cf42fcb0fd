//! Rendering of price breakdowns into order summaries.
//!
//! One quote becomes one [`SummaryView`]; the same view is rendered into
//! every target so the desktop and mobile summaries never disagree.

use askama::Template;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::coupons::DiscountedQuote;
use crate::pricing::{round_money, PriceBreakdown};

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Format an amount as dollars with exactly two decimals.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use house_cleaning_booking::display::format_currency;
///
/// assert_eq!(format_currency(dec!(219.9024)), "$219.90");
/// assert_eq!(format_currency(dec!(89)), "$89.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_money(amount, 2);
    rounded.rescale(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", rounded.abs())
    } else {
        format!("${}", rounded.abs())
    }
}

/// Display strings for one order summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub service_name: String,
    pub service_price: String,
    pub frequency: String,
    pub time_slot: Option<String>,
    pub subtotal: String,
    pub tax: String,
    /// First-visit total, fee included
    pub initial_fee: String,
    pub recurring_fee: String,
    pub coupon: Option<CouponLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponLine {
    pub code: String,
    pub discount: String,
}

impl SummaryView {
    pub fn new(breakdown: &PriceBreakdown) -> Self {
        Self {
            service_name: breakdown.service_name.clone(),
            service_price: format_currency(breakdown.base_price),
            frequency: breakdown.frequency_label.clone(),
            time_slot: breakdown.time_slot.clone(),
            subtotal: format_currency(breakdown.subtotal),
            tax: format_currency(breakdown.tax),
            initial_fee: format_currency(breakdown.total),
            recurring_fee: format_currency(breakdown.recurring_total),
            coupon: None,
        }
    }

    /// Summary with a coupon's first-visit amounts in place.
    pub fn with_coupon(breakdown: &PriceBreakdown, discounted: &DiscountedQuote) -> Self {
        Self {
            subtotal: format_currency(discounted.subtotal),
            tax: format_currency(discounted.tax),
            initial_fee: format_currency(discounted.total),
            recurring_fee: format_currency(discounted.recurring_total),
            coupon: Some(CouponLine {
                code: discounted.code.clone(),
                discount: format_currency(discounted.discount),
            }),
            ..Self::new(breakdown)
        }
    }
}

impl From<&PriceBreakdown> for SummaryView {
    fn from(breakdown: &PriceBreakdown) -> Self {
        Self::new(breakdown)
    }
}

/// Anything an order summary can be written into
pub trait SummaryTarget {
    /// Produce this target's output for `view` without showing it.
    fn render(&self, view: &SummaryView) -> Result<String, DisplayError>;

    /// Replace what the target currently shows.
    fn show(&mut self, rendered: String);
}

/// Render one view into every target.
///
/// All targets render before any of them is updated, so on error every
/// target keeps showing the previous summary.
pub fn fan_out(
    view: &SummaryView,
    targets: &mut [Box<dyn SummaryTarget>],
) -> Result<(), DisplayError> {
    let rendered = targets
        .iter()
        .map(|target| target.render(view))
        .collect::<Result<Vec<_>, _>>()?;
    for (target, output) in targets.iter_mut().zip(rendered) {
        target.show(output);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryVariant {
    Desktop,
    Mobile,
}

impl SummaryVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryVariant::Desktop => "desktop",
            SummaryVariant::Mobile => "mobile",
        }
    }
}

/// Order summary template
#[derive(Template)]
#[template(path = "summary.html")]
struct SummaryTemplate<'a> {
    variant: &'a str,
    service_name: &'a str,
    service_price: &'a str,
    frequency: &'a str,
    time_slot: &'a str,
    has_time_slot: bool,
    subtotal: &'a str,
    tax: &'a str,
    coupon_code: &'a str,
    coupon_discount: &'a str,
    has_coupon: bool,
    initial_fee: &'a str,
    recurring_fee: &'a str,
}

/// HTML order summary; keeps the last rendered markup
#[derive(Debug, Clone)]
pub struct HtmlSummary {
    variant: SummaryVariant,
    html: String,
}

impl HtmlSummary {
    pub fn new(variant: SummaryVariant) -> Self {
        Self {
            variant,
            html: String::new(),
        }
    }

    pub fn variant(&self) -> SummaryVariant {
        self.variant
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl SummaryTarget for HtmlSummary {
    fn render(&self, view: &SummaryView) -> Result<String, DisplayError> {
        let (coupon_code, coupon_discount) = view
            .coupon
            .as_ref()
            .map(|c| (c.code.as_str(), c.discount.as_str()))
            .unwrap_or(("", ""));

        let template = SummaryTemplate {
            variant: self.variant.as_str(),
            service_name: &view.service_name,
            service_price: &view.service_price,
            frequency: &view.frequency,
            time_slot: view.time_slot.as_deref().unwrap_or(""),
            has_time_slot: view.time_slot.is_some(),
            subtotal: &view.subtotal,
            tax: &view.tax,
            coupon_code,
            coupon_discount,
            has_coupon: view.coupon.is_some(),
            initial_fee: &view.initial_fee,
            recurring_fee: &view.recurring_fee,
        };

        Ok(template.render()?)
    }

    fn show(&mut self, rendered: String) {
        self.html = rendered;
    }
}
