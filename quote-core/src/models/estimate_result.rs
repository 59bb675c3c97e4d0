use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a single estimate computation.
///
/// Derived on every selection change and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Sum of the selected service and feature prices, before any multiplier.
    pub subtotal: Decimal,

    /// Fully multiplied total rounded to whole currency units, before the cap.
    pub raw_total: Decimal,

    /// `raw_total` clamped to the configured cap. This is the quoted price.
    pub capped_total: Decimal,

    /// Whether the unrounded total exceeded the cap.
    pub was_capped: bool,
}

