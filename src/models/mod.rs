//! Data models

pub mod equipment_request;

pub use equipment_request::{BankName, EquipmentRequest, SubmissionPayload};
