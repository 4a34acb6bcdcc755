//! Closed identifier sets for payment gateways and SMS providers.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a provider identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} identifier: {value}")]
pub struct UnknownIdError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// All payment gateways the storefront can route a checkout through.
#[serde(rename_all = "lowercase")]
pub enum PaymentGatewayId {
    /// Cash on delivery.
    Cod,
    Stripe,
    Paypal,
    Moyasar,
    Stcpay,
}

impl PaymentGatewayId {
    pub const ALL: [PaymentGatewayId; 5] = [
        PaymentGatewayId::Cod,
        PaymentGatewayId::Stripe,
        PaymentGatewayId::Paypal,
        PaymentGatewayId::Moyasar,
        PaymentGatewayId::Stcpay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentGatewayId::Cod => "cod",
            PaymentGatewayId::Stripe => "stripe",
            PaymentGatewayId::Paypal => "paypal",
            PaymentGatewayId::Moyasar => "moyasar",
            PaymentGatewayId::Stcpay => "stcpay",
        }
    }
}

impl fmt::Display for PaymentGatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentGatewayId {
    type Err = UnknownIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentGatewayId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownIdError {
                kind: "payment gateway",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// All SMS/OTP providers the storefront can deliver verification codes through.
pub enum SmsProviderId {
    #[serde(rename = "twilio")]
    Twilio,
    #[serde(rename = "firebase")]
    Firebase,
    #[serde(rename = "messagebird", alias = "messageBird")]
    MessageBird,
    #[serde(rename = "vonage")]
    Vonage,
    #[serde(rename = "aws_sns", alias = "aws")]
    AwsSns,
    #[serde(rename = "taqnyat")]
    Taqnyat,
}

impl SmsProviderId {
    pub const ALL: [SmsProviderId; 6] = [
        SmsProviderId::Twilio,
        SmsProviderId::Firebase,
        SmsProviderId::MessageBird,
        SmsProviderId::Vonage,
        SmsProviderId::AwsSns,
        SmsProviderId::Taqnyat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SmsProviderId::Twilio => "twilio",
            SmsProviderId::Firebase => "firebase",
            SmsProviderId::MessageBird => "messagebird",
            SmsProviderId::Vonage => "vonage",
            SmsProviderId::AwsSns => "aws_sns",
            SmsProviderId::Taqnyat => "taqnyat",
        }
    }
}

impl fmt::Display for SmsProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmsProviderId {
    type Err = UnknownIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "messageBird" => return Ok(SmsProviderId::MessageBird),
            "aws" => return Ok(SmsProviderId::AwsSns),
            _ => {}
        }
        SmsProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownIdError {
                kind: "sms provider",
                value: s.to_string(),
            })
    }
}

/// Deserialize a list of identifiers, dropping (and logging) unknown entries
/// instead of rejecting the whole document.
pub(crate) fn lenient_id_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownIdError>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(parse_id_list(&raw))
}

/// Deserialize an optional identifier; unknown values become `None`.
pub(crate) fn lenient_optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownIdError>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unknown identifier");
            None
        }
    }))
}

/// Parse every recognized identifier in `raw`, preserving order.
pub fn parse_id_list<T>(raw: &[String]) -> Vec<T>
where
    T: FromStr<Err = UnknownIdError>,
{
    raw.iter()
        .filter_map(|value| match value.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unknown identifier");
                None
            }
        })
        .collect()
}

/// Remove duplicates while keeping the first occurrence of each id.
pub fn dedup_preserving_order<T: PartialEq + Copy>(ids: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sms_aliases() {
        assert_eq!("aws".parse::<SmsProviderId>(), Ok(SmsProviderId::AwsSns));
        assert_eq!(
            "messageBird".parse::<SmsProviderId>(),
            Ok(SmsProviderId::MessageBird)
        );
        let parsed: SmsProviderId = serde_json::from_str(r#""aws""#).unwrap();
        assert_eq!(parsed, SmsProviderId::AwsSns);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""aws_sns""#);
    }

    #[test]
    fn test_unknown_ids_are_dropped() {
        let raw = vec!["cod".to_string(), "cash".to_string(), "stripe".to_string()];
        let ids: Vec<PaymentGatewayId> = parse_id_list(&raw);
        assert_eq!(ids, vec![PaymentGatewayId::Cod, PaymentGatewayId::Stripe]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        use PaymentGatewayId::*;
        assert_eq!(
            dedup_preserving_order(&[Stripe, Cod, Stripe, Paypal, Cod]),
            vec![Stripe, Cod, Paypal]
        );
    }
}
