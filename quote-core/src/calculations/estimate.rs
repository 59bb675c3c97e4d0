//! Project cost estimation.
//!
//! This module implements the calculator behind the "Project Cost
//! Calculator": it prices a [`EstimateSelection`] against a [`Catalog`] and
//! clamps the result to a fixed cap.
//!
//! # Calculation Order
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Subtotal: selected service base prices + selected feature prices |
//! | 2    | Step 1 × industry multiplier (1.0 when the industry is unknown) |
//! | 3    | Step 2 × timeline multiplier (1.0 when the timeline is unknown) |
//! | 4    | Step 3 × (1 + maintenance surcharge) when maintenance is selected |
//! | 5    | Raw total: step 4 rounded to whole units |
//! | 6    | Capped total: smaller of step 4 and the cap, rounded to whole units |
//!
//! # Leniency
//!
//! Ids that are not in the catalog are ignored: unknown services and features
//! add nothing, an unknown industry or timeline multiplies by one. Negative
//! prices and multipliers are clamped to zero. A computation never fails.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::{Catalog, EstimateSelection, compute_estimate};
//!
//! let catalog = Catalog::standard();
//! let selection = EstimateSelection::new()
//!     .with_service("web-development")   // 25000
//!     .with_feature("seo-optimization")  //  8000
//!     .with_industry("fintech")          //  × 1.6
//!     .with_maintenance(true);           //  × 1.2
//!
//! let result = compute_estimate(&catalog, &selection);
//!
//! assert_eq!(result.subtotal, dec!(33000));
//! assert_eq!(result.capped_total, dec!(63360));
//! assert!(!result.was_capped);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{non_negative, round_whole_units};
use crate::{Catalog, EstimateResult, EstimateSelection};

/// Highest amount the calculator will quote.
pub const DEFAULT_CAP: Decimal = dec!(300000);

/// Fraction added on top of the multiplied total for ongoing maintenance.
pub const DEFAULT_MAINTENANCE_SURCHARGE: Decimal = dec!(0.20);

/// Errors that can occur when configuring the estimate engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateConfigError {
    /// The cap must be a positive whole number of currency units.
    #[error("estimate cap must be a positive whole amount, got {0}")]
    InvalidCap(Decimal),

    /// The maintenance surcharge must be non-negative.
    #[error("maintenance surcharge must be non-negative, got {0}")]
    InvalidMaintenanceSurcharge(Decimal),
}

/// Business rules applied on top of the catalog prices.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::{EstimateConfig, EstimateConfigError};
///
/// let config = EstimateConfig::default();
/// assert_eq!(config.cap, dec!(300000));
/// assert_eq!(config.maintenance_surcharge, dec!(0.20));
///
/// let invalid = EstimateConfig { cap: dec!(0), ..EstimateConfig::default() };
/// assert_eq!(invalid.validate(), Err(EstimateConfigError::InvalidCap(dec!(0))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimateConfig {
    /// Upper bound for the quoted total.
    pub cap: Decimal,

    /// Fraction added when maintenance is selected (0.20 = 20%).
    pub maintenance_surcharge: Decimal,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            maintenance_surcharge: DEFAULT_MAINTENANCE_SURCHARGE,
        }
    }
}

impl EstimateConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateConfigError`] if:
    /// - `cap` is not positive or has a fractional part
    /// - `maintenance_surcharge` is negative
    pub fn validate(&self) -> Result<(), EstimateConfigError> {
        if self.cap <= Decimal::ZERO || !self.cap.fract().is_zero() {
            return Err(EstimateConfigError::InvalidCap(self.cap));
        }
        if self.maintenance_surcharge < Decimal::ZERO {
            return Err(EstimateConfigError::InvalidMaintenanceSurcharge(
                self.maintenance_surcharge,
            ));
        }
        Ok(())
    }
}

/// Prices selections against a catalog.
///
/// The engine holds no mutable state: every call to
/// [`calculate`](Self::calculate) depends only on the selection passed in,
/// so it can be invoked on every input change.
#[derive(Debug, Clone)]
pub struct EstimateEngine<'a> {
    catalog: &'a Catalog,
    config: EstimateConfig,
}

impl<'a> EstimateEngine<'a> {
    /// Creates an engine with the given business rules.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateConfigError`] if the configuration is invalid.
    pub fn new(
        catalog: &'a Catalog,
        config: EstimateConfig,
    ) -> Result<Self, EstimateConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// Creates an engine with the default cap and maintenance surcharge.
    pub fn with_defaults(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            config: EstimateConfig::default(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &EstimateConfig {
        &self.config
    }

    /// Calculates the estimate for `selection`.
    pub fn calculate(
        &self,
        selection: &EstimateSelection,
    ) -> EstimateResult {
        let subtotal = self.subtotal(selection);
        let with_industry =
            subtotal.saturating_mul(self.industry_multiplier(&selection.industry_id));
        let with_timeline =
            with_industry.saturating_mul(self.timeline_multiplier(&selection.timeline_id));
        let with_maintenance = self.apply_maintenance(with_timeline, selection.maintenance);

        let result = self.clamp(subtotal, with_maintenance);
        debug!(
            subtotal = %result.subtotal,
            raw_total = %result.raw_total,
            capped_total = %result.capped_total,
            was_capped = result.was_capped,
            "estimate calculated"
        );
        result
    }

    /// Sums the prices of every selected service and feature found in the
    /// catalog.
    fn subtotal(
        &self,
        selection: &EstimateSelection,
    ) -> Decimal {
        let services = selection.service_ids.iter().filter_map(|id| {
            let price = self.catalog.service(id).map(|s| s.base_price);
            if price.is_none() {
                debug!(service_id = %id, "ignoring unknown service");
            }
            price
        });
        let features = selection.feature_ids.iter().filter_map(|id| {
            let price = self.catalog.feature(id).map(|f| f.price);
            if price.is_none() {
                debug!(feature_id = %id, "ignoring unknown feature");
            }
            price
        });

        services
            .chain(features)
            .map(non_negative)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn industry_multiplier(
        &self,
        industry_id: &str,
    ) -> Decimal {
        self.catalog
            .industry(industry_id)
            .map(|i| non_negative(i.multiplier))
            .unwrap_or(Decimal::ONE)
    }

    fn timeline_multiplier(
        &self,
        timeline_id: &str,
    ) -> Decimal {
        self.catalog
            .timeline(timeline_id)
            .map(|t| non_negative(t.multiplier))
            .unwrap_or(Decimal::ONE)
    }

    fn apply_maintenance(
        &self,
        total: Decimal,
        maintenance: bool,
    ) -> Decimal {
        if maintenance {
            total.saturating_mul(Decimal::ONE + self.config.maintenance_surcharge)
        } else {
            total
        }
    }

    fn clamp(
        &self,
        subtotal: Decimal,
        total: Decimal,
    ) -> EstimateResult {
        EstimateResult {
            subtotal,
            raw_total: round_whole_units(total),
            capped_total: round_whole_units(total.min(self.config.cap)),
            was_capped: total > self.config.cap,
        }
    }
}

/// Calculates an estimate with the default cap and maintenance surcharge.
pub fn compute_estimate(
    catalog: &Catalog,
    selection: &EstimateSelection,
) -> EstimateResult {
    EstimateEngine::with_defaults(catalog).calculate(selection)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{FeatureOption, IndustryProfile, ServiceOption};

    fn every_service(selection: EstimateSelection) -> EstimateSelection {
        Catalog::standard()
            .services
            .iter()
            .fold(selection, |s, service| s.with_service(service.id.clone()))
    }

    fn every_feature(selection: EstimateSelection) -> EstimateSelection {
        Catalog::standard()
            .features
            .iter()
            .fold(selection, |s, feature| s.with_feature(feature.id.clone()))
    }

    fn web_with_seo() -> EstimateSelection {
        EstimateSelection::new()
            .with_service("web-development")
            .with_feature("seo-optimization")
    }

    // =========================================================================
    // config tests
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EstimateConfig::default().validate(), Ok(()));
    }

    #[test]
    fn config_rejects_negative_cap() {
        let config = EstimateConfig {
            cap: dec!(-1),
            ..EstimateConfig::default()
        };

        assert_eq!(config.validate(), Err(EstimateConfigError::InvalidCap(dec!(-1))));
    }

    #[test]
    fn config_rejects_fractional_cap() {
        let config = EstimateConfig {
            cap: dec!(1000.5),
            ..EstimateConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(EstimateConfigError::InvalidCap(dec!(1000.5)))
        );
    }

    #[test]
    fn config_rejects_negative_surcharge() {
        let config = EstimateConfig {
            maintenance_surcharge: dec!(-0.1),
            ..EstimateConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(EstimateConfigError::InvalidMaintenanceSurcharge(dec!(-0.1)))
        );
    }

    #[test]
    fn engine_new_propagates_config_errors() {
        let catalog = Catalog::standard();
        let config = EstimateConfig {
            cap: dec!(0),
            ..EstimateConfig::default()
        };

        let result = EstimateEngine::new(&catalog, config);

        assert_eq!(result.err(), Some(EstimateConfigError::InvalidCap(dec!(0))));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn empty_selection_costs_nothing() {
        let catalog = Catalog::standard();

        let result = compute_estimate(&catalog, &EstimateSelection::default());

        assert_eq!(result.subtotal, dec!(0));
        assert_eq!(result.raw_total, dec!(0));
        assert_eq!(result.capped_total, dec!(0));
        assert!(!result.was_capped);
    }

    #[test]
    fn empty_selection_with_multipliers_still_costs_nothing() {
        let catalog = Catalog::standard();
        let selection = EstimateSelection::new()
            .with_industry("fintech")
            .with_timeline("rush")
            .with_maintenance(true);

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(0));
    }

    #[test]
    fn small_business_standard_timeline_is_the_plain_subtotal() {
        let catalog = Catalog::standard();

        let result = compute_estimate(&catalog, &web_with_seo());

        // 25000 + 8000 = 33000
        assert_eq!(result.subtotal, dec!(33000));
        assert_eq!(result.raw_total, dec!(33000));
        assert_eq!(result.capped_total, dec!(33000));
        assert!(!result.was_capped);
    }

    #[test]
    fn fintech_with_maintenance_applies_both_multipliers() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_industry("fintech").with_maintenance(true);

        let result = compute_estimate(&catalog, &selection);

        // 33000 × 1.6 = 52800 × 1.2 = 63360
        assert_eq!(result.raw_total, dec!(63360));
        assert_eq!(result.capped_total, dec!(63360));
        assert!(!result.was_capped);
    }

    #[test]
    fn rush_timeline_adds_half() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_timeline("rush");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(49500));
    }

    #[test]
    fn flexible_timeline_discounts_ten_percent() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_timeline("flexible");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(29700));
    }

    #[test]
    fn startup_industry_discounts_twenty_percent() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_industry("startup");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(26400));
    }

    #[test]
    fn industry_timeline_and_maintenance_compound() {
        let catalog = Catalog::standard();
        // (6000 + 5000) × 1.1 × 0.9 × 1.2 = 13068
        let selection = EstimateSelection::new()
            .with_feature("analytics-tracking")
            .with_feature("responsive-design")
            .with_industry("education")
            .with_timeline("flexible")
            .with_maintenance(true);

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.raw_total, dec!(13068));
    }

    #[test]
    fn half_units_round_up() {
        let catalog = Catalog {
            services: vec![ServiceOption {
                id: "odd".to_string(),
                name: "Odd".to_string(),
                base_price: dec!(5),
                description: String::new(),
            }],
            ..Catalog::standard()
        };
        // 5 × 0.9 = 4.5
        let selection = EstimateSelection::new()
            .with_service("odd")
            .with_timeline("flexible");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.raw_total, dec!(5));
        assert_eq!(result.capped_total, dec!(5));
    }

    #[test]
    fn every_service_enterprise_rush_hits_the_cap() {
        let catalog = Catalog::standard();
        let selection = every_service(EstimateSelection::new())
            .with_industry("enterprise")
            .with_timeline("rush");

        let result = compute_estimate(&catalog, &selection);

        // 175000 × 1.5 × 1.5 = 393750
        assert_eq!(result.subtotal, dec!(175000));
        assert_eq!(result.raw_total, dec!(393750));
        assert_eq!(result.capped_total, dec!(300000));
        assert!(result.was_capped);
    }

    #[test]
    fn total_exactly_at_cap_is_not_capped() {
        let catalog = Catalog {
            services: vec![ServiceOption {
                id: "big".to_string(),
                name: "Big".to_string(),
                base_price: dec!(250000),
                description: String::new(),
            }],
            ..Catalog::standard()
        };
        // 250000 × 1.2 = 300000
        let selection = EstimateSelection::new()
            .with_service("big")
            .with_maintenance(true);

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(300000));
        assert_eq!(result.raw_total, dec!(300000));
        assert!(!result.was_capped);
    }

    #[test]
    fn custom_cap_and_surcharge_are_applied() {
        let catalog = Catalog::standard();
        let config = EstimateConfig {
            cap: dec!(50000),
            maintenance_surcharge: dec!(0.5),
        };
        let engine = EstimateEngine::new(&catalog, config).expect("valid config");
        let selection = web_with_seo().with_maintenance(true);

        let result = engine.calculate(&selection);

        // 33000 × 1.5 = 49500
        assert_eq!(result.capped_total, dec!(49500));
        assert!(!result.was_capped);

        let result = engine.calculate(&selection.with_timeline("rush"));

        // 33000 × 1.5 × 1.5 = 74250
        assert_eq!(result.raw_total, dec!(74250));
        assert_eq!(result.capped_total, dec!(50000));
        assert!(result.was_capped);
    }

    // =========================================================================
    // leniency tests
    // =========================================================================

    #[test]
    fn unknown_service_and_feature_ids_add_nothing() {
        let catalog = Catalog::standard();
        let selection = web_with_seo()
            .with_service("quantum-computing")
            .with_feature("web-development"); // a service id, not a feature id

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(33000));
    }

    #[test]
    fn unknown_industry_multiplies_by_one() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_industry("aerospace");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(33000));
    }

    #[test]
    fn unknown_timeline_multiplies_by_one() {
        let catalog = Catalog::standard();
        let selection = web_with_seo().with_timeline("yesterday");

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(33000));
    }

    #[test]
    fn negative_prices_and_multipliers_clamp_to_zero() {
        let catalog = Catalog {
            services: vec![ServiceOption {
                id: "refund".to_string(),
                name: "Refund".to_string(),
                base_price: dec!(-10000),
                description: String::new(),
            }],
            features: vec![FeatureOption {
                id: "seo".to_string(),
                name: "SEO".to_string(),
                price: dec!(8000),
                description: String::new(),
            }],
            industries: vec![IndustryProfile {
                id: "broken".to_string(),
                name: "Broken".to_string(),
                multiplier: dec!(-2),
                description: String::new(),
            }],
            ..Catalog::standard()
        };

        let priced = compute_estimate(
            &catalog,
            &EstimateSelection::new().with_service("refund").with_feature("seo"),
        );
        assert_eq!(priced.subtotal, dec!(8000));

        let zeroed = compute_estimate(
            &catalog,
            &EstimateSelection::new()
                .with_feature("seo")
                .with_industry("broken"),
        );
        assert_eq!(zeroed.capped_total, dec!(0));
    }

    #[test]
    fn huge_prices_saturate_instead_of_overflowing() {
        let catalog = Catalog {
            services: vec![ServiceOption {
                id: "galaxy".to_string(),
                name: "Galaxy".to_string(),
                base_price: Decimal::MAX,
                description: String::new(),
            }],
            ..Catalog::standard()
        };
        let selection = EstimateSelection::new()
            .with_service("galaxy")
            .with_feature("admin-panel")
            .with_industry("fintech")
            .with_timeline("rush")
            .with_maintenance(true);

        let result = compute_estimate(&catalog, &selection);

        assert_eq!(result.capped_total, dec!(300000));
        assert!(result.was_capped);
    }

    // =========================================================================
    // property tests
    // =========================================================================

    /// Every combination of timeline, maintenance and industry over a few
    /// service/feature subsets.
    fn sample_selections() -> Vec<EstimateSelection> {
        let catalog = Catalog::standard();
        let bases = vec![
            EstimateSelection::new(),
            web_with_seo(),
            every_service(EstimateSelection::new()),
            every_feature(EstimateSelection::new()),
            every_feature(every_service(EstimateSelection::new())),
        ];

        let mut selections = Vec::new();
        for base in &bases {
            for industry in &catalog.industries {
                for timeline in ["rush", "standard", "flexible"] {
                    for maintenance in [false, true] {
                        selections.push(
                            base.clone()
                                .with_industry(industry.id.clone())
                                .with_timeline(timeline)
                                .with_maintenance(maintenance),
                        );
                    }
                }
            }
        }
        selections
    }

    #[test]
    fn capped_total_stays_within_bounds() {
        let catalog = Catalog::standard();

        for selection in sample_selections() {
            let result = compute_estimate(&catalog, &selection);

            assert!(result.capped_total >= Decimal::ZERO, "{selection:?}");
            assert!(result.capped_total <= DEFAULT_CAP, "{selection:?}");
        }
    }

    #[test]
    fn capped_total_equals_raw_total_only_below_cap() {
        let catalog = Catalog::standard();

        for selection in sample_selections() {
            let result = compute_estimate(&catalog, &selection);

            assert!(result.capped_total <= result.raw_total, "{selection:?}");
            assert_eq!(
                result.capped_total == result.raw_total,
                result.raw_total <= DEFAULT_CAP,
                "{selection:?}"
            );
        }
    }

    #[test]
    fn adding_an_option_never_lowers_the_raw_total() {
        let catalog = Catalog::standard();

        for selection in sample_selections() {
            let before = compute_estimate(&catalog, &selection).raw_total;

            for service in &catalog.services {
                let after =
                    compute_estimate(&catalog, &selection.clone().with_service(service.id.clone()));
                assert!(after.raw_total >= before, "{selection:?} + {}", service.id);
            }
            for feature in &catalog.features {
                let after =
                    compute_estimate(&catalog, &selection.clone().with_feature(feature.id.clone()));
                assert!(after.raw_total >= before, "{selection:?} + {}", feature.id);
            }
        }
    }

    #[test]
    fn repeated_calculation_is_identical() {
        let catalog = Catalog::standard();
        let engine = EstimateEngine::with_defaults(&catalog);

        for selection in sample_selections() {
            assert_eq!(engine.calculate(&selection), engine.calculate(&selection));
        }
    }
}
