mod catalog;
mod estimate_result;
mod feature_option;
mod industry_profile;
mod selection;
mod service_option;
mod timeline;

pub use catalog::Catalog;
pub use estimate_result::EstimateResult;
pub use feature_option::FeatureOption;
pub use industry_profile::IndustryProfile;
pub use selection::{DEFAULT_INDUSTRY_ID, EstimateSelection};
pub use service_option::ServiceOption;
pub use timeline::{TimelineCode, TimelineOption};
