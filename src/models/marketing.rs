use serde::{Deserialize, Serialize};

/// GTM/GA4 tag identifiers. Both may be empty when tagging is not set up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MarketingConfig {
    pub gtm_id: String,
    pub ga4_id: String,
}
