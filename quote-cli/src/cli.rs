use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quote_core::{ContactDetails, DEFAULT_INDUSTRY_ID, EstimateSelection, TimelineCode};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Project cost estimator for IT consultancy services.
///
/// Prices a selection of services, add-on features, industry and timeline
/// against the service catalog, and builds the chat link that sends the
/// quote request to the consultancy.
#[derive(Debug, Parser)]
#[command(name = "quote-estimator", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog CSV files.
    /// Overrides `[catalog] dir`; the built-in catalog is used when neither is set.
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Log level or filter directive. Overrides `[logging] level`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a selection and print the quote request.
    Estimate(EstimateArgs),

    /// List the services, industries, features and timelines on offer.
    Catalog,

    /// Build a chat link from contact form details.
    Contact(ContactArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Service id; repeat for several services.
    #[arg(short, long = "service", value_name = "ID")]
    pub services: Vec<String>,

    /// Add-on feature id; repeat for several features.
    #[arg(short, long = "feature", value_name = "ID")]
    pub features: Vec<String>,

    #[arg(short, long, value_name = "ID", default_value = DEFAULT_INDUSTRY_ID)]
    pub industry: String,

    /// rush, standard or flexible.
    #[arg(short, long, value_name = "ID", default_value_t = TimelineCode::Standard.as_str().to_string())]
    pub timeline: String,

    /// Include ongoing maintenance.
    #[arg(short, long)]
    pub maintenance: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also print the chat link carrying the quote request.
    #[arg(long)]
    pub link: bool,
}

impl EstimateArgs {
    pub fn selection(&self) -> EstimateSelection {
        let selection = EstimateSelection::new()
            .with_industry(self.industry.clone())
            .with_timeline(self.timeline.clone())
            .with_maintenance(self.maintenance);
        let selection = self
            .services
            .iter()
            .fold(selection, |s, id| s.with_service(id.clone()));
        self.features
            .iter()
            .fold(selection, |s, id| s.with_feature(id.clone()))
    }
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    /// Budget range, free text (e.g. "1-3 lakh").
    #[arg(long)]
    pub budget: Option<String>,

    /// Service of interest; repeat for several. Catalog ids are replaced by the service name.
    #[arg(long = "service", value_name = "SERVICE")]
    pub services: Vec<String>,

    /// Project details.
    #[arg(long)]
    pub message: Option<String>,
}

impl ContactArgs {
    pub fn details(&self) -> ContactDetails {
        ContactDetails {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            budget: self.budget.clone(),
            services: self.services.clone(),
            message: self.message.clone(),
        }
    }
}
