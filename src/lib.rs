//! Quote engine and booking-form logic for a house-cleaning service.
//!
//! - [`pricing`]: selections in, full-precision price breakdown out
//! - [`display`]: currency formatting and summary rendering
//! - [`coupons`]: first-visit coupon codes
//! - [`booking`]: form data, step wizard and the live quote controller

pub mod booking;
pub mod config;
pub mod coupons;
pub mod display;
pub mod error;
pub mod pricing;
pub mod telemetry;

pub use error::{AppError, Result};
