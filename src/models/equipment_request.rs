//! Equipment request model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

/// Banks offered by the request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BankName {
    #[serde(rename = "BCA")]
    Bca,
    Mandiri,
    #[serde(rename = "BRI")]
    Bri,
}

impl BankName {
    pub const ALL: [BankName; 3] = [BankName::Bca, BankName::Mandiri, BankName::Bri];

    /// Option value submitted by the form
    pub fn code(&self) -> &'static str {
        match self {
            BankName::Bca => "BCA",
            BankName::Mandiri => "Mandiri",
            BankName::Bri => "BRI",
        }
    }

    /// Label shown in the bank dropdown
    pub fn label(&self) -> &'static str {
        match self {
            BankName::Bca => "BCA",
            BankName::Mandiri => "Bank Mandiri",
            BankName::Bri => "Bank Rakyat Indonesia",
        }
    }
}

impl fmt::Display for BankName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BankName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BankName::ALL
            .into_iter()
            .find(|bank| bank.code() == s)
            .ok_or_else(|| format!("Unknown bank: {}", s))
    }
}

/// Equipment purchase request as collected by the form.
///
/// The relay never looks inside this: it forwards whatever JSON it gets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Branch is required"))]
    pub branch: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub equipment_name: String,
    #[validate(url(message = "Online store link must be a URL"))]
    pub online_store_link: String,
    #[validate(required(message = "Bank name is required"))]
    pub bank_name: Option<BankName>,
    #[validate(length(min = 1, message = "Bank account number is required"))]
    pub bank_account_number: String,
    #[validate(length(min = 1, message = "Bank account name is required"))]
    pub bank_account_name: String,
    /// Price in rupiah
    #[validate(required(message = "Price is required"))]
    pub price: Option<u64>,
    #[validate(required(message = "Date needed is required"))]
    pub date_needed: Option<NaiveDate>,
    /// Free-text specifications or justification
    #[serde(default)]
    pub details: String,
}

/// Body actually posted to the relay: identity fields only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub full_name: String,
    pub branch: String,
    pub department: String,
}

impl From<&EquipmentRequest> for SubmissionPayload {
    fn from(request: &EquipmentRequest) -> Self {
        Self {
            full_name: request.full_name.clone(),
            branch: request.branch.clone(),
            department: request.department.clone(),
        }
    }
}
