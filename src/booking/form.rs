//! Booking form data as collected from the page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::pricing::{BathroomBand, BedroomBand, Selections, SquareFootageBand};

/// Every field the booking page collects.
///
/// Card fields are carried through untouched; nothing here reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub address: String,
    pub suite: String,
    pub city: String,
    pub province: String,
    pub postal: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub frequency: Option<String>,
    pub cleaning_type: String,
    pub cleaning_level: String,
    pub square_footage: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub half_baths: String,
    pub basement: String,
    pub cleaning_options: Vec<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub cleaning_instructions: String,
    pub access_info: String,
    pub parking: String,
    pub garbage_location: String,
    pub property_type: String,
    pub time_restriction: String,
    pub coupon_code: String,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub ccv_code: String,
}

/// Form fields that can be marked required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ServiceDate,
    ServiceTime,
    Frequency,
    CleaningLevel,
    SquareFootage,
    Bedrooms,
    Bathrooms,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    Province,
    Postal,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ServiceDate => "service date",
            FormField::ServiceTime => "service time",
            FormField::Frequency => "frequency",
            FormField::CleaningLevel => "cleaning level",
            FormField::SquareFootage => "square footage",
            FormField::Bedrooms => "bedrooms",
            FormField::Bathrooms => "bathrooms",
            FormField::FirstName => "first name",
            FormField::LastName => "last name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::Province => "province",
            FormField::Postal => "postal code",
        }
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl BookingForm {
    /// Whether a required field has a non-blank value.
    pub fn is_filled(&self, field: FormField) -> bool {
        match field {
            FormField::ServiceDate => self.date.is_some(),
            FormField::ServiceTime => filled(&self.time),
            FormField::Frequency => self.frequency.as_deref().is_some_and(filled),
            FormField::CleaningLevel => filled(&self.cleaning_level),
            FormField::SquareFootage => filled(&self.square_footage),
            FormField::Bedrooms => filled(&self.bedrooms),
            FormField::Bathrooms => filled(&self.bathrooms),
            FormField::FirstName => filled(&self.first_name),
            FormField::LastName => filled(&self.last_name),
            FormField::Email => filled(&self.email),
            FormField::Phone => filled(&self.phone),
            FormField::Address => filled(&self.address),
            FormField::City => filled(&self.city),
            FormField::Province => filled(&self.province),
            FormField::Postal => filled(&self.postal),
        }
    }

    /// Pricing inputs derived from the form.
    pub fn selections(&self) -> Selections {
        Selections {
            service_type: self.cleaning_level.trim().to_string(),
            frequency: self.frequency.clone().unwrap_or_default(),
            add_ons: self.cleaning_options.iter().cloned().collect(),
            square_footage: SquareFootageBand::parse(&self.square_footage),
            bedrooms: BedroomBand::parse(&self.bedrooms),
            bathrooms: BathroomBand::parse(&self.bathrooms),
            date: self.date,
            time: filled(&self.time).then(|| self.time.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selections_from_form() {
        let form = BookingForm {
            cleaning_level: "deep".to_string(),
            frequency: Some("monthly".to_string()),
            cleaning_options: vec!["oven".to_string(), "fridge".to_string(), "oven".to_string()],
            square_footage: "1500-1999".to_string(),
            bedrooms: "4+".to_string(),
            bathrooms: "2".to_string(),
            time: "8:00AM - 9:00AM".to_string(),
            ..Default::default()
        };
        let selections = form.selections();
        assert_eq!(selections.service_type, "deep");
        assert_eq!(selections.frequency, "monthly");
        assert_eq!(selections.add_ons.len(), 2);
        assert_eq!(selections.square_footage, SquareFootageBand::From1500To1999);
        assert_eq!(selections.bedrooms, BedroomBand::FourOrMore);
        assert_eq!(selections.bathrooms, BathroomBand::Unspecified);
        assert_eq!(selections.time.as_deref(), Some("8:00AM - 9:00AM"));
    }

    #[test]
    fn test_blank_values_are_not_filled() {
        let form = BookingForm {
            first_name: "   ".to_string(),
            frequency: Some(String::new()),
            ..Default::default()
        };
        assert!(!form.is_filled(FormField::FirstName));
        assert!(!form.is_filled(FormField::Frequency));
        assert!(!form.is_filled(FormField::ServiceDate));
        assert_eq!(form.selections().time, None);
    }

    #[test]
    fn test_form_json_uses_page_field_names() {
        let json = r#"{
            "firstName": "Ada",
            "cleaningLevel": "standard",
            "cleaningOptions": ["pets"],
            "date": "2025-06-11",
            "cardNumber": "4111 1111 1111 1111"
        }"#;
        let form: BookingForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2025, 6, 11));
        assert_eq!(form.card_number, "4111 1111 1111 1111");
        assert!(form.selections().add_ons.contains("pets"));
    }
}
