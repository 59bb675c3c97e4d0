//! Command handlers behind the `quote-estimator` binary.
//!
//! Each handler returns the text to print, so `main` stays a thin shell and
//! the output can be asserted on directly.

use std::path::Path;

use anyhow::{Context, Result};
use quote_core::{
    Catalog, ChatLinkBuilder, ContactDetails, EstimateEngine, EstimateResult, EstimateSelection,
    SummaryFormatter, compose_contact_message,
};
use quote_data::CatalogLoader;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{Command, OutputFormat};
use crate::config::{AppConfig, CatalogConfig};

/// Loads the catalog from `dir_override`, then `[catalog] dir`, falling back
/// to the built-in catalog when neither is set.
pub fn load_catalog(
    config: &CatalogConfig,
    dir_override: Option<&Path>,
) -> Result<Catalog> {
    match dir_override.or(config.dir.as_deref()) {
        Some(dir) => CatalogLoader::load_dir(dir)
            .with_context(|| format!("failed to load catalog from '{}'", dir.display())),
        None => {
            info!("using built-in catalog");
            Ok(Catalog::standard())
        }
    }
}

/// Everything an `estimate` run produced, in the shape printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateReport {
    pub selection: EstimateSelection,
    pub result: EstimateResult,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_link: Option<String>,
}

/// A validated contact request and the link that sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReport {
    pub message: String,
    pub chat_link: String,
}

pub struct App {
    config: AppConfig,
    catalog: Catalog,
    chat: ChatLinkBuilder,
}

impl App {
    /// Validates `config` and prepares the chat link builder.
    pub fn new(
        config: AppConfig,
        catalog: Catalog,
    ) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let chat = config
            .messaging
            .chat_link_builder()
            .context("invalid [messaging] settings")?;
        Ok(Self {
            config,
            catalog,
            chat,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Runs `command` and returns its output.
    pub fn run(
        &self,
        command: &Command,
    ) -> Result<String> {
        match command {
            Command::Estimate(args) => {
                let report = self.estimate(&args.selection(), args.link)?;
                match args.format {
                    OutputFormat::Text => Ok(self.render_estimate(&report)),
                    OutputFormat::Json => serde_json::to_string_pretty(&report)
                        .context("failed to serialize estimate"),
                }
            }
            Command::Catalog => Ok(self.render_catalog()),
            Command::Contact(args) => {
                let report = self.contact(args.details())?;
                Ok(format!("{}\n\nChat link: {}", report.message, report.chat_link))
            }
        }
    }

    /// Prices `selection` and builds its quote request.
    pub fn estimate(
        &self,
        selection: &EstimateSelection,
        with_link: bool,
    ) -> Result<EstimateReport> {
        self.warn_unknown_ids(selection);

        let engine = EstimateEngine::new(&self.catalog, self.config.estimate.clone())?;
        let result = engine.calculate(selection);
        let summary = SummaryFormatter::new(&self.catalog, self.config.currency.clone())
            .format(selection, &result);
        let chat_link = with_link.then(|| self.chat.link(&summary).to_string());

        info!(
            services = selection.service_ids.len(),
            features = selection.feature_ids.len(),
            capped_total = %result.capped_total,
            was_capped = result.was_capped,
            "estimate prepared"
        );

        Ok(EstimateReport {
            selection: selection.clone(),
            result,
            summary,
            chat_link,
        })
    }

    /// Validates contact details and builds the chat link that sends them.
    ///
    /// Services given as catalog ids are replaced by their display names.
    pub fn contact(
        &self,
        mut details: ContactDetails,
    ) -> Result<ContactReport> {
        details.validate().context("invalid contact details")?;

        for service in &mut details.services {
            if let Some(option) = self.catalog.service(service) {
                *service = option.name.clone();
            }
        }

        let message = compose_contact_message(&details);
        let chat_link = self.chat.link(&message).to_string();
        info!(services = details.services.len(), "contact request prepared");
        Ok(ContactReport { message, chat_link })
    }

    pub fn render_estimate(
        &self,
        report: &EstimateReport,
    ) -> String {
        let currency = &self.config.currency;
        let mut out = format!(
            "Subtotal:       {}\nEstimated cost: {}\n",
            currency.format(report.result.subtotal),
            currency.format(report.result.capped_total),
        );
        if report.result.was_capped {
            out.push_str(&format!(
                "Maximum cost reached: estimates are capped at {} (uncapped {}).\n",
                currency.format(self.config.estimate.cap),
                currency.format(report.result.raw_total),
            ));
        }
        out.push('\n');
        out.push_str(&report.summary);
        if let Some(link) = &report.chat_link {
            out.push_str(&format!("\n\nChat link: {link}"));
        }
        out
    }

    /// Lists the catalog with formatted prices and multipliers.
    pub fn render_catalog(&self) -> String {
        let currency = &self.config.currency;
        let mut out = String::new();

        out.push_str("Services\n");
        for s in &self.catalog.services {
            out.push_str(&catalog_row(&s.id, &s.name, &currency.format(s.base_price)));
        }

        out.push_str("\nIndustries\n");
        for i in &self.catalog.industries {
            out.push_str(&catalog_row(&i.id, &i.name, &multiplier(i.multiplier)));
        }

        out.push_str("\nFeatures\n");
        for f in &self.catalog.features {
            let price = format!("+{}", currency.format(f.price));
            out.push_str(&catalog_row(&f.id, &f.name, &price));
        }

        out.push_str("\nTimelines\n");
        for t in &self.catalog.timelines {
            out.push_str(&catalog_row(t.code.as_str(), &t.label, &multiplier(t.multiplier)));
        }

        out.push_str(&format!(
            "\nMaintenance adds {}%. Estimates are capped at {}.",
            (self.config.estimate.maintenance_surcharge * Decimal::ONE_HUNDRED).normalize(),
            currency.format(self.config.estimate.cap),
        ));
        out
    }

    fn warn_unknown_ids(
        &self,
        selection: &EstimateSelection,
    ) {
        for id in &selection.service_ids {
            if self.catalog.service(id).is_none() {
                warn!(service_id = %id, "unknown service ignored");
            }
        }
        for id in &selection.feature_ids {
            if self.catalog.feature(id).is_none() {
                warn!(feature_id = %id, "unknown feature ignored");
            }
        }
        if self.catalog.industry(&selection.industry_id).is_none() {
            warn!(industry_id = %selection.industry_id, "unknown industry, no multiplier applied");
        }
        if self.catalog.timeline(&selection.timeline_id).is_none() {
            warn!(timeline_id = %selection.timeline_id, "unknown timeline, no multiplier applied");
        }
    }
}

fn catalog_row(
    id: &str,
    name: &str,
    value: &str,
) -> String {
    format!("  {id:<26}{name:<30}{value}\n")
}

fn multiplier(value: Decimal) -> String {
    format!("×{}", value.normalize())
}
