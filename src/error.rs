//! Error handling for the application

use crate::booking::WizardError;
use crate::config::ConfigError;
use crate::coupons::CouponError;
use crate::display::DisplayError;
use crate::pricing::PricingError;
use crate::telemetry::TelemetryError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Coupon error: {0}")]
    Coupon(#[from] CouponError),

    #[error("Booking error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Display error: {0}")]
    Display(#[from] DisplayError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_message() {
        let err: AppError = PricingError::UnknownServiceType {
            service_type: "airbnb".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Pricing error: Unknown service type 'airbnb'"
        );

        let err: AppError = CouponError::Empty.into();
        assert_eq!(err.to_string(), "Coupon error: Please enter a coupon code");
    }
}
