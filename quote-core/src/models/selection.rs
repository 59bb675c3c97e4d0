use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::TimelineCode;

/// Industry assumed until the user picks one.
pub const DEFAULT_INDUSTRY_ID: &str = "small-business";

/// Everything the user has chosen in the calculator.
///
/// The selection is a plain value: the UI layer builds a new one on every
/// change and hands it whole to the engine. Ids are not checked against a
/// catalog here; unknown ids are ignored at computation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateSelection {
    pub service_ids: BTreeSet<String>,
    pub industry_id: String,
    pub feature_ids: BTreeSet<String>,
    pub timeline_id: String,
    pub maintenance: bool,
}

impl Default for EstimateSelection {
    fn default() -> Self {
        Self {
            service_ids: BTreeSet::new(),
            industry_id: DEFAULT_INDUSTRY_ID.to_string(),
            feature_ids: BTreeSet::new(),
            timeline_id: TimelineCode::Standard.as_str().to_string(),
            maintenance: false,
        }
    }
}

impl EstimateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.service_ids.insert(id.into());
        self
    }

    pub fn with_feature(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.feature_ids.insert(id.into());
        self
    }

    pub fn with_industry(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.industry_id = id.into();
        self
    }

    pub fn with_timeline(
        mut self,
        id: impl Into<String>,
    ) -> Self {
        self.timeline_id = id.into();
        self
    }

    pub fn with_maintenance(
        mut self,
        maintenance: bool,
    ) -> Self {
        self.maintenance = maintenance;
        self
    }

    /// Returns `true` when no service or feature is selected.
    pub fn is_empty(&self) -> bool {
        self.service_ids.is_empty() && self.feature_ids.is_empty()
    }
}
