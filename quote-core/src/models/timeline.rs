use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineCode {
    Rush,
    #[default]
    Standard,
    Flexible,
}

impl TimelineCode {
    pub fn all() -> &'static [TimelineCode] {
        &[Self::Rush, Self::Standard, Self::Flexible]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rush => "rush",
            Self::Standard => "standard",
            Self::Flexible => "flexible",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rush" => Some(Self::Rush),
            "standard" => Some(Self::Standard),
            "flexible" => Some(Self::Flexible),
            _ => None,
        }
    }

    /// Price multiplier used when no catalog overrides it.
    pub fn default_multiplier(&self) -> Decimal {
        match self {
            Self::Rush => dec!(1.5),
            Self::Standard => dec!(1.0),
            Self::Flexible => dec!(0.9),
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Rush => "Rush (1-2 months)",
            Self::Standard => "Standard (2-4 months)",
            Self::Flexible => "Flexible (4+ months)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineOption {
    pub code: TimelineCode,
    pub label: String,
    pub multiplier: Decimal,
}

impl TimelineOption {
    /// The option for `code` with its standard label and multiplier.
    pub fn standard(code: TimelineCode) -> Self {
        Self {
            code,
            label: code.default_label().to_string(),
            multiplier: code.default_multiplier(),
        }
    }
}
