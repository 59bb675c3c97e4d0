use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A client industry and the complexity multiplier applied to its subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub id: String,
    pub name: String,
    pub multiplier: Decimal,
    pub description: String,
}
