use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{FeatureOption, IndustryProfile, ServiceOption, TimelineCode, TimelineOption};

/// The priced options a selection is evaluated against.
///
/// Catalogs are loaded once at startup and treated as read-only. List order
/// is display order: summaries name selected options in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub services: Vec<ServiceOption>,
    pub industries: Vec<IndustryProfile>,
    pub features: Vec<FeatureOption>,
    pub timelines: Vec<TimelineOption>,
}

impl Catalog {
    pub fn service(
        &self,
        id: &str,
    ) -> Option<&ServiceOption> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn industry(
        &self,
        id: &str,
    ) -> Option<&IndustryProfile> {
        self.industries.iter().find(|i| i.id == id)
    }

    pub fn feature(
        &self,
        id: &str,
    ) -> Option<&FeatureOption> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Looks a timeline up by its textual code (`"rush"`, `"standard"`, ...).
    pub fn timeline(
        &self,
        id: &str,
    ) -> Option<&TimelineOption> {
        let code = TimelineCode::parse(id)?;
        self.timelines.iter().find(|t| t.code == code)
    }

    /// Rush, standard and flexible with their standard multipliers.
    pub fn standard_timelines() -> Vec<TimelineOption> {
        TimelineCode::all()
            .iter()
            .map(|code| TimelineOption::standard(*code))
            .collect()
    }

    /// The consultancy's published price list (INR).
    pub fn standard() -> Self {
        Self {
            services: vec![
                service(
                    "web-development",
                    "Web Development",
                    dec!(25000),
                    "Custom websites and web applications",
                ),
                service(
                    "mobile-development",
                    "Mobile App Development",
                    dec!(35000),
                    "iOS and Android mobile applications",
                ),
                service(
                    "cloud-solutions",
                    "Cloud Solutions",
                    dec!(20000),
                    "Cloud migration and infrastructure",
                ),
                service(
                    "ai-ml",
                    "AI & Machine Learning",
                    dec!(40000),
                    "Artificial intelligence solutions",
                ),
                service(
                    "data-analytics",
                    "Data Analytics",
                    dec!(25000),
                    "Business intelligence and analytics",
                ),
                service(
                    "cybersecurity",
                    "Cybersecurity",
                    dec!(30000),
                    "Security solutions and audits",
                ),
            ],
            industries: vec![
                industry("startup", "Startup", dec!(0.8), "Early-stage companies"),
                industry("small-business", "Small Business", dec!(1.0), "Local businesses"),
                industry("medium-business", "Medium Business", dec!(1.2), "Growing companies"),
                industry("enterprise", "Enterprise", dec!(1.5), "Large organizations"),
                industry("ecommerce", "E-commerce", dec!(1.3), "Online retail"),
                industry("healthcare", "Healthcare", dec!(1.4), "Medical & health"),
                industry("fintech", "Fintech", dec!(1.6), "Financial services"),
                industry("education", "Education", dec!(1.1), "EdTech solutions"),
            ],
            features: vec![
                feature("responsive-design", "Responsive Design", dec!(5000), "Mobile-friendly design"),
                feature("seo-optimization", "SEO Optimization", dec!(8000), "Search engine optimization"),
                feature("payment-integration", "Payment Integration", dec!(12000), "Payment gateway setup"),
                feature("user-authentication", "User Authentication", dec!(10000), "Login/registration system"),
                feature("admin-panel", "Admin Panel", dec!(15000), "Content management system"),
                feature("api-development", "API Development", dec!(20000), "RESTful API services"),
                feature(
                    "third-party-integration",
                    "Third-party Integration",
                    dec!(10000),
                    "External service integration",
                ),
                feature(
                    "performance-optimization",
                    "Performance Optimization",
                    dec!(8000),
                    "Speed and efficiency improvements",
                ),
                feature("security-features", "Advanced Security", dec!(12000), "Enhanced security measures"),
                feature("analytics-tracking", "Analytics & Tracking", dec!(6000), "User behavior tracking"),
            ],
            timelines: Self::standard_timelines(),
        }
    }
}

fn service(
    id: &str,
    name: &str,
    base_price: Decimal,
    description: &str,
) -> ServiceOption {
    ServiceOption {
        id: id.to_string(),
        name: name.to_string(),
        base_price,
        description: description.to_string(),
    }
}

fn industry(
    id: &str,
    name: &str,
    multiplier: Decimal,
    description: &str,
) -> IndustryProfile {
    IndustryProfile {
        id: id.to_string(),
        name: name.to_string(),
        multiplier,
        description: description.to_string(),
    }
}

fn feature(
    id: &str,
    name: &str,
    price: Decimal,
    description: &str,
) -> FeatureOption {
    FeatureOption {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn standard_catalog_has_published_option_counts() {
        let catalog = Catalog::standard();

        assert_eq!(catalog.services.len(), 6);
        assert_eq!(catalog.industries.len(), 8);
        assert_eq!(catalog.features.len(), 10);
        assert_eq!(catalog.timelines.len(), 3);
    }

    #[test]
    fn lookups_find_known_ids() {
        let catalog = Catalog::standard();

        assert_eq!(
            catalog.service("web-development").map(|s| s.base_price),
            Some(dec!(25000))
        );
        assert_eq!(
            catalog.industry("fintech").map(|i| i.multiplier),
            Some(dec!(1.6))
        );
        assert_eq!(
            catalog.feature("seo-optimization").map(|f| f.price),
            Some(dec!(8000))
        );
        assert_eq!(
            catalog.timeline("flexible").map(|t| t.multiplier),
            Some(dec!(0.9))
        );
    }

    #[test]
    fn lookups_return_none_for_unknown_ids() {
        let catalog = Catalog::standard();

        assert!(catalog.service("blockchain").is_none());
        assert!(catalog.industry("").is_none());
        assert!(catalog.feature("web-development").is_none());
        assert!(catalog.timeline("yesterday").is_none());
    }

    #[test]
    fn timeline_lookup_respects_catalog_overrides() {
        let mut catalog = Catalog::standard();
        catalog.timelines = vec![TimelineOption {
            code: TimelineCode::Rush,
            label: "Express".to_string(),
            multiplier: dec!(2.0),
        }];

        assert_eq!(catalog.timeline("rush").map(|t| t.multiplier), Some(dec!(2.0)));
        assert!(catalog.timeline("standard").is_none());
    }
}
