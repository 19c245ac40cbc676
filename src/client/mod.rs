//! Form client: the page-side half of the equipment request flow

pub mod autocomplete;
pub mod form;
pub mod price;
pub mod relay_client;

pub use autocomplete::NameAutocomplete;
pub use form::{FormField, FormState};
pub use price::{format_idr, PriceInput};
pub use relay_client::{ClientError, FetchOutcome, RelayClient, SubmitOutcome};
