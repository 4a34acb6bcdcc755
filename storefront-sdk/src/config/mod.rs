//! Configuration schema for the storefront client.
//!
//! These types describe the settings document shared by the client, the
//! config core and the admin service. Loading, merging and persistence live
//! in `storefront-core`.

mod app;
mod features;
mod ids;
mod patch;
mod payment;
mod regional;
mod sms;
mod theme;
pub mod unified;

pub use app::{AppConfig, CURRENT_SCHEMA_VERSION, default_config};
pub use features::{FeatureToggles, KNOWN_FEATURES};
pub use ids::{
    PaymentGatewayId, SmsProviderId, UnknownIdError, dedup_preserving_order, parse_id_list,
};
pub use patch::{AppConfigPatch, SectionUpdate};
pub use payment::{
    GatewayCredentials, MoyasarCredentials, PaymentGateways, PaypalCredentials, PaypalEnvironment,
    StcPayCredentials, StcPayEnvironment, StripeCredentials,
};
pub use regional::{RegionalPatch, RegionalSettings};
pub use sms::{
    AwsSnsConfig, FirebaseConfig, MessageBirdConfig, SmsCredentials, TaqnyatConfig, TwilioConfig,
    VonageConfig,
};
pub use theme::{ThemePatch, ThemeSettings};
pub use unified::UnifiedConfigDocument;
