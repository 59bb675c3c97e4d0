//! Human-readable quote request built from a selection and its estimate.
//!
//! The text is handed verbatim to the messaging channel, so its layout is
//! part of the contract with whoever reads the chat on the other end.

use crate::calculations::CurrencyFormat;
use crate::{Catalog, EstimateResult, EstimateSelection};

const GREETING: &str = "Hi! I'm interested in getting a quote for my project.";
const CLOSING: &str = "I'd like to discuss this further and get a detailed proposal. \
                       Please contact me to schedule a consultation.";
const SIGN_OFF: &str = "Thank you!";
const NONE_SELECTED: &str = "None";
const NOT_SPECIFIED: &str = "Not specified";

/// Renders quote summaries for a catalog.
///
/// Selected options are listed in catalog order, so two selections made in
/// a different click order produce the same text.
#[derive(Debug, Clone)]
pub struct SummaryFormatter<'a> {
    catalog: &'a Catalog,
    currency: CurrencyFormat,
}

impl<'a> SummaryFormatter<'a> {
    pub fn new(
        catalog: &'a Catalog,
        currency: CurrencyFormat,
    ) -> Self {
        Self { catalog, currency }
    }

    /// Formats the quote request message.
    ///
    /// The estimated cost line always shows `result.capped_total`.
    pub fn format(
        &self,
        selection: &EstimateSelection,
        result: &EstimateResult,
    ) -> String {
        let services = self.service_names(selection);
        let features = self.feature_names(selection);
        let industry = self
            .catalog
            .industry(&selection.industry_id)
            .map_or(NOT_SPECIFIED, |i| i.name.as_str());
        let timeline = self
            .catalog
            .timeline(&selection.timeline_id)
            .map_or(NOT_SPECIFIED, |t| t.label.as_str());
        let maintenance = if selection.maintenance { "Yes" } else { "No" };

        format!(
            "{GREETING}\n\
             \n\
             Project Details:\n\
             • Services Required: {services}\n\
             • Industry: {industry}\n\
             • Additional Features: {features}\n\
             • Timeline: {timeline}\n\
             • Maintenance Required: {maintenance}\n\
             \n\
             Estimated Cost: {cost}\n\
             \n\
             {CLOSING}\n\
             \n\
             {SIGN_OFF}",
            cost = self.currency.format(result.capped_total),
        )
    }

    fn service_names(
        &self,
        selection: &EstimateSelection,
    ) -> String {
        let names: Vec<&str> = self
            .catalog
            .services
            .iter()
            .filter(|s| selection.service_ids.contains(&s.id))
            .map(|s| s.name.as_str())
            .collect();
        join_or_none(&names)
    }

    fn feature_names(
        &self,
        selection: &EstimateSelection,
    ) -> String {
        let names: Vec<&str> = self
            .catalog
            .features
            .iter()
            .filter(|f| selection.feature_ids.contains(&f.id))
            .map(|f| f.name.as_str())
            .collect();
        join_or_none(&names)
    }
}

fn join_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        NONE_SELECTED.to_string()
    } else {
        names.join(", ")
    }
}

/// Formats the quote request message with the default (INR) currency format.
pub fn format_summary(
    catalog: &Catalog,
    selection: &EstimateSelection,
    result: &EstimateResult,
) -> String {
    SummaryFormatter::new(catalog, CurrencyFormat::default()).format(selection, result)
}
