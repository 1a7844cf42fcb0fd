//! Booking form: selections, step navigation and live quoting.

pub mod controller;
pub mod form;
pub mod wizard;

pub use controller::{Quote, QuoteController, SelectionChange};
pub use form::{BookingForm, FormField};
pub use wizard::{validate_step, BookingWizard, Step, WizardError};
