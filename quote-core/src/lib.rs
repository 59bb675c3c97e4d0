//! Project cost estimation for an IT-services consultancy.
//!
//! The crate is split into catalog [`models`], the pricing
//! [`calculations`] and the [`messaging`] handoff that turns an estimate
//! into a pre-filled chat link. Nothing here performs I/O.

pub mod calculations;
pub mod messaging;
pub mod models;

pub use calculations::{
    CurrencyFormat, DigitGrouping, EstimateConfig, EstimateConfigError, EstimateEngine,
    SummaryFormatter, compute_estimate, format_summary,
};
pub use messaging::{
    ChatLinkBuilder, ContactDetails, ContactError, MessagingError, compose_contact_message,
};
pub use models::*;
