//! Multi-step booking wizard.
//!
//! Moving forward validates the current step; moving back never does.

use chrono::NaiveDate;
use serde::Serialize;

use super::form::{BookingForm, FormField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Service,
    Home,
    Extras,
    Contact,
    Address,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Service,
        Step::Home,
        Step::Extras,
        Step::Contact,
        Step::Address,
        Step::Review,
    ];

    /// Page element id, `step1` through `step6`.
    pub fn id(&self) -> &'static str {
        match self {
            Step::Service => "step1",
            Step::Home => "step2",
            Step::Extras => "step3",
            Step::Contact => "step4",
            Step::Address => "step5",
            Step::Review => "step6",
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::Service => Some(Step::Home),
            Step::Home => Some(Step::Extras),
            Step::Extras => Some(Step::Contact),
            Step::Contact => Some(Step::Address),
            Step::Address => Some(Step::Review),
            Step::Review => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::Service => None,
            Step::Home => Some(Step::Service),
            Step::Extras => Some(Step::Home),
            Step::Contact => Some(Step::Extras),
            Step::Address => Some(Step::Contact),
            Step::Review => Some(Step::Address),
        }
    }

    pub fn required_fields(&self) -> &'static [FormField] {
        match self {
            Step::Service => &[
                FormField::ServiceDate,
                FormField::ServiceTime,
                FormField::Frequency,
                FormField::CleaningLevel,
            ],
            Step::Home => &[
                FormField::SquareFootage,
                FormField::Bedrooms,
                FormField::Bathrooms,
            ],
            Step::Extras => &[],
            Step::Contact => &[
                FormField::FirstName,
                FormField::LastName,
                FormField::Email,
                FormField::Phone,
            ],
            Step::Address => &[
                FormField::Address,
                FormField::City,
                FormField::Province,
                FormField::Postal,
            ],
            // Card details are collected but not checked
            Step::Review => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Please fill in all required fields.")]
    Validation { step: Step, missing: Vec<FormField> },

    #[error("Service date {date} is in the past")]
    DateInPast { date: NaiveDate },

    #[error("Already on the last step")]
    NoNextStep,

    #[error("Booking can only be submitted from the last step, currently on {current:?}")]
    NotOnLastStep { current: Step },
}

/// Check one step's required fields.
///
/// `today` bounds the earliest bookable service date.
pub fn validate_step(step: Step, form: &BookingForm, today: NaiveDate) -> Result<(), WizardError> {
    let missing: Vec<FormField> = step
        .required_fields()
        .iter()
        .copied()
        .filter(|field| !form.is_filled(*field))
        .collect();

    if !missing.is_empty() {
        return Err(WizardError::Validation { step, missing });
    }

    if step == Step::Service {
        if let Some(date) = form.date.filter(|date| *date < today) {
            return Err(WizardError::DateInPast { date });
        }
    }

    Ok(())
}

/// Tracks which step of the booking form is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWizard {
    current: Step,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self {
            current: Step::Service,
        }
    }

    pub fn current(&self) -> Step {
        self.current
    }

    /// Validate the active step and move forward.
    pub fn next(&mut self, form: &BookingForm, today: NaiveDate) -> Result<Step, WizardError> {
        let next = self.current.next().ok_or(WizardError::NoNextStep)?;
        validate_step(self.current, form, today)?;
        self.current = next;
        Ok(next)
    }

    /// Step back; stays put on the first step.
    pub fn previous(&mut self) -> Step {
        if let Some(previous) = self.current.previous() {
            self.current = previous;
        }
        self.current
    }

    /// Hand back the collected form once every step checks out.
    ///
    /// Only allowed from the last step. Earlier steps are checked again in
    /// case the form changed after the customer moved past them.
    pub fn submit(&self, form: &BookingForm, today: NaiveDate) -> Result<BookingForm, WizardError> {
        if self.current != Step::Review {
            return Err(WizardError::NotOnLastStep {
                current: self.current,
            });
        }
        for step in Step::ALL {
            validate_step(step, form, today)?;
        }
        Ok(form.clone())
    }
}
