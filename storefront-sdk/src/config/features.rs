//! Named boolean feature toggles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Toggles the storefront knows about and their values when absent.
pub const KNOWN_FEATURES: [(&str, bool); 4] = [
    ("enablePushNotifications", true),
    ("enableOtp", true),
    ("enableWishlist", true),
    ("enableReviews", true),
];

/// Map of feature name to enabled flag.
///
/// Unknown names are preserved so that a newer document survives a round
/// trip through an older client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureToggles(pub BTreeMap<String, bool>);

impl Default for FeatureToggles {
    fn default() -> Self {
        Self(
            KNOWN_FEATURES
                .iter()
                .map(|(name, enabled)| (name.to_string(), *enabled))
                .collect(),
        )
    }
}

impl FeatureToggles {
    /// Look up a toggle, falling back to its fixed default, or `false` for
    /// names that are neither set nor known.
    pub fn is_enabled(&self, name: &str) -> bool {
        if let Some(enabled) = self.0.get(name) {
            return *enabled;
        }
        KNOWN_FEATURES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, enabled)| *enabled)
            .unwrap_or(false)
    }

    pub fn with(&self, name: &str, enabled: bool) -> FeatureToggles {
        let mut map = self.0.clone();
        map.insert(name.to_string(), enabled);
        FeatureToggles(map)
    }

    /// Fill in every known toggle that is missing.
    pub fn backfilled(&self) -> FeatureToggles {
        let mut map = self.0.clone();
        for (name, enabled) in KNOWN_FEATURES {
            map.entry(name.to_string()).or_insert(enabled);
        }
        FeatureToggles(map)
    }
}
