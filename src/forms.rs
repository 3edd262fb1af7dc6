//! Input forms and presence validation.
//!
//! A field holding only whitespace counts as missing. Validation never talks
//! to the server; it only turns the form into a request body.

use crate::api::types::{HotelId, HotelUpdate, NewHotel};
use crate::consts::cli_consts::MIN_COMPARED_HOTELS;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Le nom de l'hôtel est requis")]
    MissingHotelName,

    #[error("Veuillez remplir tous les champs requis")]
    MissingFields,

    #[error("Veuillez sélectionner un hôtel")]
    NoHotelSelected,

    #[error("Au moins 2 hôtels sont requis pour la comparaison")]
    TooFewHotels,
}

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// The trimmed value, or `None` when it is blank.
    pub fn present(&self) -> Option<String> {
        present(&self.value)
    }
}

fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotelField {
    #[default]
    Name,
    Location,
    TallyUrl,
}

impl HotelField {
    pub fn label(&self) -> &'static str {
        match self {
            HotelField::Name => "Nom de l'hôtel *",
            HotelField::Location => "Localisation",
            HotelField::TallyUrl => "URL du formulaire Tally",
        }
    }

    fn next(&self) -> HotelField {
        match self {
            HotelField::Name => HotelField::Location,
            HotelField::Location => HotelField::TallyUrl,
            HotelField::TallyUrl => HotelField::Name,
        }
    }

    fn previous(&self) -> HotelField {
        match self {
            HotelField::Name => HotelField::TallyUrl,
            HotelField::Location => HotelField::Name,
            HotelField::TallyUrl => HotelField::Location,
        }
    }
}

/// The "add hotel" modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelForm {
    pub name: TextField,
    pub location: TextField,
    pub tally_url: TextField,
    focus: HotelField,
}

impl HotelForm {
    pub fn focus(&self) -> HotelField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn field(&self, field: HotelField) -> &TextField {
        match field {
            HotelField::Name => &self.name,
            HotelField::Location => &self.location,
            HotelField::TallyUrl => &self.tally_url,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            HotelField::Name => &mut self.name,
            HotelField::Location => &mut self.location,
            HotelField::TallyUrl => &mut self.tally_url,
        }
    }

    /// Build the creation body. Only the name is required.
    pub fn validate(&self) -> Result<NewHotel, ValidationError> {
        let name = self.name.present().ok_or(ValidationError::MissingHotelName)?;
        Ok(NewHotel {
            name,
            location: self.location.present(),
            tally_form_url: self.tally_url.present(),
        })
    }

}

/// The automation form: binds a Tally form URL to the selected hotel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationForm {
    pub tally_url: TextField,
}

impl AutomationForm {
    /// Both the hotel and the URL are required.
    pub fn validate(
        &self,
        hotel: Option<HotelId>,
    ) -> Result<(HotelId, HotelUpdate), ValidationError> {
        match (hotel, self.tally_url.present()) {
            (Some(id), Some(url)) => Ok((
                id,
                HotelUpdate {
                    tally_form_url: Some(url),
                    ..Default::default()
                },
            )),
            _ => Err(ValidationError::MissingFields),
        }
    }

    pub fn reset(&mut self) {
        self.tally_url.clear();
    }
}

/// A webhook test only needs a hotel.
pub fn validate_webhook_target(hotel: Option<HotelId>) -> Result<HotelId, ValidationError> {
    hotel.ok_or(ValidationError::NoHotelSelected)
}

/// Distinct hotels to compare, first occurrence order. At least two are needed.
pub fn validate_comparison(ids: &[HotelId]) -> Result<Vec<HotelId>, ValidationError> {
    let mut distinct: Vec<HotelId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !distinct.contains(id) {
            distinct.push(*id);
        }
    }
    if distinct.len() < MIN_COMPARED_HOTELS {
        return Err(ValidationError::TooFewHotels);
    }
    Ok(distinct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: &mut TextField, text: &str) {
        text.chars().for_each(|c| field.push(c));
    }

    #[test]
    fn test_blank_name_is_missing() {
        let mut form = HotelForm::default();
        assert_eq!(form.validate(), Err(ValidationError::MissingHotelName));

        typed(&mut form.name, "   \t ");
        assert_eq!(form.validate(), Err(ValidationError::MissingHotelName));
        assert_eq!(
            ValidationError::MissingHotelName.to_string(),
            "Le nom de l'hôtel est requis"
        );
    }

    #[test]
    // Optional fields left blank are omitted from the body.
    fn test_hotel_form_trims_and_omits_blanks() {
        let mut form = HotelForm::default();
        typed(&mut form.name, "  Le Phare ");
        typed(&mut form.location, " ");

        assert_eq!(
            form.validate().unwrap(),
            NewHotel {
                name: "Le Phare".to_string(),
                location: None,
                tally_form_url: None,
            }
        );
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut form = HotelForm::default();
        form.focus_next();
        typed(form.focused_mut(), "Nice");
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus(), HotelField::Name);
        form.focus_previous();
        assert_eq!(form.focus(), HotelField::TallyUrl);
        assert_eq!(form.location.value(), "Nice");
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        typed(&mut field, "abc\n");
        field.pop();
        assert_eq!(field.value(), "ab");
    }

    #[test]
    fn test_automation_requires_hotel_and_url() {
        let mut form = AutomationForm::default();
        assert_eq!(form.validate(Some(3)), Err(ValidationError::MissingFields));

        typed(&mut form.tally_url, "https://tally.so/r/w7Xb");
        assert_eq!(form.validate(None), Err(ValidationError::MissingFields));

        let (id, update) = form.validate(Some(3)).unwrap();
        assert_eq!(id, 3);
        assert_eq!(update.tally_form_url.as_deref(), Some("https://tally.so/r/w7Xb"));
        assert_eq!(update.name, None);
    }

    #[test]
    fn test_webhook_target_requires_hotel() {
        assert_eq!(validate_webhook_target(Some(2)), Ok(2));
        assert_eq!(
            validate_webhook_target(None),
            Err(ValidationError::NoHotelSelected)
        );
    }

    #[test]
    // The same hotel twice is one hotel.
    fn test_comparison_needs_two_distinct_hotels() {
        assert_eq!(validate_comparison(&[4, 2, 4]), Ok(vec![4, 2]));
        assert_eq!(validate_comparison(&[4, 4]), Err(ValidationError::TooFewHotels));
        assert_eq!(validate_comparison(&[]), Err(ValidationError::TooFewHotels));
    }
}
