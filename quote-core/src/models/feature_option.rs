use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An optional add-on priced on top of the selected services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}
