//! State behind the equipment request page

use chrono::NaiveDate;
use serde_json::Value;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

use crate::{
    client::{
        autocomplete::NameAutocomplete,
        price::PriceInput,
        relay_client::{RelayClient, SubmitOutcome},
    },
    models::{EquipmentRequest, SubmissionPayload},
};

/// Form inputs addressable by their `name` attribute.
///
/// Full name and price have dedicated setters since they carry
/// autocomplete and formatting behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Branch,
    Department,
    EquipmentName,
    OnlineStoreLink,
    BankName,
    BankAccountNumber,
    BankAccountName,
    DateNeeded,
    Details,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "branch" => FormField::Branch,
            "department" => FormField::Department,
            "equipmentName" => FormField::EquipmentName,
            "onlineStoreLink" => FormField::OnlineStoreLink,
            "bankName" => FormField::BankName,
            "bankAccountNumber" => FormField::BankAccountNumber,
            "bankAccountName" => FormField::BankAccountName,
            "dateNeeded" => FormField::DateNeeded,
            "details" => FormField::Details,
            other => return Err(format!("Unknown form field: {}", other)),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    request: EquipmentRequest,
    price: PriceInput,
    names: NameAutocomplete,
    suggestions: Vec<String>,
    equipment_list: Vec<Value>,
    fetch_error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both page-load fetches concurrently
    pub async fn load(&mut self, client: &RelayClient) {
        let (list, names) = tokio::join!(client.fetch_equipment_list(), client.fetch_known_names());

        self.fetch_error = list.error().map(str::to_string);
        self.equipment_list = list.into_data_or_default();
        self.names = names.into_data_or_default();
    }

    pub fn request(&self) -> &EquipmentRequest {
        &self.request
    }

    pub fn equipment_list(&self) -> &[Value] {
        &self.equipment_list
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn known_names(&self) -> &NameAutocomplete {
        &self.names
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn price_display(&self) -> &str {
        self.price.display()
    }

    /// Update a plain input. Unparseable dates and unknown banks clear the
    /// field, as an empty browser input would.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        let request = &mut self.request;
        match field {
            FormField::Branch => request.branch = value.to_string(),
            FormField::Department => request.department = value.to_string(),
            FormField::EquipmentName => request.equipment_name = value.to_string(),
            FormField::OnlineStoreLink => request.online_store_link = value.to_string(),
            FormField::BankName => request.bank_name = value.parse().ok(),
            FormField::BankAccountNumber => request.bank_account_number = value.to_string(),
            FormField::BankAccountName => request.bank_account_name = value.to_string(),
            FormField::DateNeeded => {
                request.date_needed = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
            }
            FormField::Details => request.details = value.to_string(),
        }
    }

    pub fn type_full_name(&mut self, value: &str) {
        self.request.full_name = value.to_string();
        self.suggestions = self.names.suggestions(value);
    }

    pub fn select_suggestion(&mut self, name: &str) {
        self.request.full_name = name.to_string();
        self.suggestions.clear();
    }

    pub fn set_price(&mut self, typed: &str) {
        self.price = PriceInput::from_typed(typed);
        self.request.price = self.price.amount();
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.request.validate()
    }

    pub fn submission_payload(&self) -> SubmissionPayload {
        SubmissionPayload::from(&self.request)
    }

    /// Clears the identity fields and the price after a successful submit
    pub fn reset(&mut self) {
        self.request.full_name.clear();
        self.request.branch.clear();
        self.request.department.clear();
        self.request.price = None;
        self.price = PriceInput::default();
        self.suggestions.clear();
    }

    /// Post the form. An incomplete form never reaches the relay.
    pub async fn submit(&mut self, client: &RelayClient) -> SubmitOutcome {
        if let Err(errors) = self.validate() {
            return SubmitOutcome::Invalid(errors);
        }

        let outcome = client.submit(&self.submission_payload()).await;

        if outcome.is_success() {
            self.reset();
        }
        outcome
    }
}
