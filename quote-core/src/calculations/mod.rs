//! Pricing logic for the project cost calculator.
//!
//! [`estimate`] turns a selection into a bounded total, [`summary`] renders
//! that total as the message handed to the messaging channel, and
//! [`currency`] holds the shared money formatting.

pub mod common;
pub mod currency;
pub mod estimate;
pub mod summary;

pub use currency::{CurrencyFormat, DigitGrouping};
pub use estimate::{EstimateConfig, EstimateConfigError, EstimateEngine, compute_estimate};
pub use summary::{SummaryFormatter, format_summary};
