//! Quote controller for the booking form.
//!
//! Owns the current selections, re-prices once per change and pushes the
//! single resulting summary to every registered target.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::coupons::{Coupon, CouponError};
use crate::display::{fan_out, SummaryTarget, SummaryView};
use crate::error::Result;
use crate::pricing::{
    BathroomBand, BedroomBand, PriceBreakdown, PricingConfig, Selections, SquareFootageBand,
};

/// One edit made on the booking form
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    ServiceType(String),
    Frequency(String),
    SquareFootage(SquareFootageBand),
    Bedrooms(BedroomBand),
    Bathrooms(BathroomBand),
    ToggleAddOn(String),
    Date(Option<NaiveDate>),
    Time(Option<String>),
}

impl SelectionChange {
    fn apply_to(self, selections: &mut Selections) {
        match self {
            SelectionChange::ServiceType(value) => selections.service_type = value,
            SelectionChange::Frequency(value) => selections.frequency = value,
            SelectionChange::SquareFootage(band) => selections.square_footage = band,
            SelectionChange::Bedrooms(band) => selections.bedrooms = band,
            SelectionChange::Bathrooms(band) => selections.bathrooms = band,
            SelectionChange::ToggleAddOn(key) => {
                selections.toggle_add_on(&key);
            }
            SelectionChange::Date(date) => selections.date = date,
            SelectionChange::Time(time) => selections.time = time,
        }
    }
}

/// Latest quote as shown to the customer
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub view: SummaryView,
}

pub struct QuoteController {
    pricing: PricingConfig,
    selections: Selections,
    coupon: Option<Coupon>,
    targets: Vec<Box<dyn SummaryTarget>>,
}

impl QuoteController {
    pub fn new(pricing: PricingConfig, selections: Selections) -> Self {
        Self {
            pricing,
            selections,
            coupon: None,
            targets: Vec::new(),
        }
    }

    /// Register a summary to keep in sync.
    pub fn add_target(&mut self, target: Box<dyn SummaryTarget>) {
        self.targets.push(target);
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Apply one change, then re-quote and render.
    pub fn apply(&mut self, change: SelectionChange) -> Result<Quote> {
        debug!("Selection change: {:?}", change);
        change.apply_to(&mut self.selections);
        self.refresh()
    }

    /// Activate a coupon for every later quote.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Quote> {
        match Coupon::lookup(code) {
            Ok(coupon) => {
                debug!("Coupon accepted: {}", coupon.code);
                self.coupon = Some(coupon);
                self.refresh()
            }
            Err(e @ CouponError::Invalid { .. }) => {
                warn!("Rejected coupon code: {}", code.trim());
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Drop the active coupon and go back to engine prices.
    pub fn clear_coupon(&mut self) -> Result<Quote> {
        self.coupon = None;
        self.refresh()
    }

    /// Price the current selections once and render everywhere.
    pub fn refresh(&mut self) -> Result<Quote> {
        let breakdown = self.pricing.quote(&self.selections)?;
        if breakdown.used_fallback {
            warn!(
                "Unknown service type '{}', priced as '{}'",
                self.selections.service_type, breakdown.service_key
            );
        }

        let view = match &self.coupon {
            Some(coupon) => SummaryView::with_coupon(&breakdown, &coupon.apply(&breakdown)),
            None => SummaryView::new(&breakdown),
        };

        fan_out(&view, &mut self.targets)?;
        debug!(
            "Quoted {} for {} target(s): total {}",
            breakdown.service_key,
            self.targets.len(),
            view.initial_fee
        );

        Ok(Quote { breakdown, view })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayError, HtmlSummary, SummaryVariant};
    use crate::error::AppError;
    use crate::pricing::{PricingError, UnknownServicePolicy};
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<String>>>);

    impl SummaryTarget for Shared {
        fn render(&self, view: &SummaryView) -> std::result::Result<String, DisplayError> {
            Ok(format!("{} {}", view.initial_fee, view.recurring_fee))
        }

        fn show(&mut self, rendered: String) {
            self.0.borrow_mut().push(rendered);
        }
    }

    fn controller_with(targets: &[Shared]) -> QuoteController {
        let mut controller = QuoteController::new(PricingConfig::default(), Selections::initial());
        for target in targets {
            controller.add_target(Box::new(target.clone()));
        }
        controller
    }

    #[test]
    fn test_each_change_renders_once_per_target() {
        let desktop = Shared::default();
        let mobile = Shared::default();
        let mut controller = controller_with(&[desktop.clone(), mobile.clone()]);

        controller
            .apply(SelectionChange::SquareFootage(SquareFootageBand::From1000To1499))
            .unwrap();
        controller.apply(SelectionChange::Bedrooms(BedroomBand::Three)).unwrap();
        controller.apply(SelectionChange::ToggleAddOn("pets".to_string())).unwrap();
        let quote = controller
            .apply(SelectionChange::ToggleAddOn("windows".to_string()))
            .unwrap();

        assert_eq!(quote.breakdown.total, dec!(219.9024));
        assert_eq!(quote.view.initial_fee, "$219.90");
        assert_eq!(desktop.0.borrow().len(), 4);
        assert_eq!(*desktop.0.borrow(), *mobile.0.borrow());
    }

    #[test]
    fn test_toggle_add_on_twice_restores_price() {
        let mut controller = controller_with(&[]);
        let before = controller.refresh().unwrap();
        controller.apply(SelectionChange::ToggleAddOn("oven".to_string())).unwrap();
        let after = controller
            .apply(SelectionChange::ToggleAddOn("oven".to_string()))
            .unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_coupon_persists_across_changes() {
        let mut controller = controller_with(&[]);
        controller.apply_coupon("clean10").unwrap();
        let quote = controller
            .apply(SelectionChange::ServiceType("deep".to_string()))
            .unwrap();
        let line = quote.view.coupon.unwrap();
        assert_eq!(line.code, "CLEAN10");
        assert_eq!(line.discount, "$12.90");

        let cleared = controller.clear_coupon().unwrap();
        assert!(cleared.view.coupon.is_none());
    }

    #[test]
    fn test_invalid_coupon_keeps_previous() {
        let mut controller = controller_with(&[]);
        controller.apply_coupon("FIRST5").unwrap();
        let err = controller.apply_coupon("BOGUS").unwrap_err();
        assert!(matches!(err, AppError::Coupon(CouponError::Invalid { .. })));
        assert_eq!(controller.coupon().map(|c| c.code.as_str()), Some("FIRST5"));
    }

    #[test]
    fn test_rejected_service_leaves_targets_untouched() {
        let target = Shared::default();
        let pricing = PricingConfig::default().with_policy(UnknownServicePolicy::Reject);
        let mut controller = QuoteController::new(pricing, Selections::initial());
        controller.add_target(Box::new(target.clone()));

        let err = controller
            .apply(SelectionChange::ServiceType("airbnb".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Pricing(PricingError::UnknownServiceType { .. })
        ));
        assert!(target.0.borrow().is_empty());
    }

    #[test]
    fn test_html_targets_render_each_change() {
        let mut controller = controller_with(&[]);
        controller.add_target(Box::new(HtmlSummary::new(SummaryVariant::Desktop)));
        controller.add_target(Box::new(HtmlSummary::new(SummaryVariant::Mobile)));
        let quote = controller
            .apply(SelectionChange::Frequency("biweekly".to_string()))
            .unwrap();
        assert_eq!(quote.view.frequency, "Bi-weekly - 15% off");
    }
}
