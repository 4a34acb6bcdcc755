//! SMS provider credential records.

use super::ids::SmsProviderId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageBirdConfig {
    pub api_key: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VonageConfig {
    pub api_key: String,
    pub api_secret: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AwsSnsConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub sender: String,
}

impl Default for AwsSnsConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: "us-east-1".to_string(),
            sender: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaqnyatConfig {
    pub api_key: String,
    pub sender: String,
}

/// Credentials for exactly one SMS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum SmsCredentials {
    #[serde(rename = "twilio")]
    Twilio(TwilioConfig),
    #[serde(rename = "firebase")]
    Firebase(FirebaseConfig),
    #[serde(rename = "messagebird")]
    MessageBird(MessageBirdConfig),
    #[serde(rename = "vonage")]
    Vonage(VonageConfig),
    #[serde(rename = "aws_sns")]
    AwsSns(AwsSnsConfig),
    #[serde(rename = "taqnyat")]
    Taqnyat(TaqnyatConfig),
}

impl SmsCredentials {
    pub fn provider(&self) -> SmsProviderId {
        match self {
            SmsCredentials::Twilio(_) => SmsProviderId::Twilio,
            SmsCredentials::Firebase(_) => SmsProviderId::Firebase,
            SmsCredentials::MessageBird(_) => SmsProviderId::MessageBird,
            SmsCredentials::Vonage(_) => SmsProviderId::Vonage,
            SmsCredentials::AwsSns(_) => SmsProviderId::AwsSns,
            SmsCredentials::Taqnyat(_) => SmsProviderId::Taqnyat,
        }
    }

    /// Whether the provider-specific required fields are present.
    pub fn is_configured(&self) -> bool {
        match self {
            SmsCredentials::Twilio(c) => !c.account_sid.is_empty() && !c.auth_token.is_empty(),
            SmsCredentials::Firebase(c) => !c.api_key.is_empty(),
            SmsCredentials::MessageBird(c) => !c.api_key.is_empty(),
            SmsCredentials::Vonage(c) => !c.api_key.is_empty() && !c.api_secret.is_empty(),
            SmsCredentials::AwsSns(c) => !c.region.is_empty() && !c.access_key_id.is_empty(),
            SmsCredentials::Taqnyat(c) => !c.api_key.is_empty(),
        }
    }
}
