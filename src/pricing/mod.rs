//! Pricing engine module for cleaning bookings.
//!
//! Turns the booking form's selections into a full-precision price
//! breakdown. Nothing in here touches a display surface.

pub mod calculators;
pub mod models;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{compute_price, round_money};
pub use models::{
    AddOnCatalog, BathroomBand, BedroomBand, FrequencyDiscountTable, Selections, ServiceCatalog,
    SquareFootageBand, UnknownServicePolicy,
};
pub use responses::PriceBreakdown;
pub use services::{PricingConfig, PricingError, MAX_AMOUNT};
