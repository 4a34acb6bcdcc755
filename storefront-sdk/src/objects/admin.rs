use crate::config::SmsProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of importing a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}

impl ImportOutcome {
    pub fn imported() -> Self {
        Self {
            success: true,
            message: "Configuration imported successfully".to_string(),
        }
    }

    pub fn invalid_file() -> Self {
        Self {
            success: false,
            message: "Invalid configuration file".to_string(),
        }
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("Import failed: {reason}"),
        }
    }
}

/// A required setting that is missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingStoreUrl,
    MissingApiUrl,
    MissingConsumerKey,
    MissingConsumerSecret,
    NoPaymentGatewayEnabled,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ValidationIssue::MissingStoreUrl => "Store URL is required",
            ValidationIssue::MissingApiUrl => "API URL is required",
            ValidationIssue::MissingConsumerKey => "Consumer Key is required",
            ValidationIssue::MissingConsumerSecret => "Consumer Secret is required",
            ValidationIssue::NoPaymentGatewayEnabled => {
                "At least one payment gateway must be enabled"
            }
        };
        f.write_str(message)
    }
}

/// A setting that is inconsistent but does not make the config invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    DefaultLanguageNotSupported(String),
    DefaultSmsProviderNotEnabled(SmsProviderId),
    TaxRateOutOfRange(f64),
    InvalidColor { field: &'static str, value: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::DefaultLanguageNotSupported(lang) => {
                write!(f, "Default language '{lang}' is not in the supported languages")
            }
            ValidationWarning::DefaultSmsProviderNotEnabled(provider) => {
                write!(f, "Default SMS provider '{provider}' is not enabled")
            }
            ValidationWarning::TaxRateOutOfRange(rate) => {
                write!(f, "Tax rate {rate} is outside 0.0-1.0")
            }
            ValidationWarning::InvalidColor { field, value } => {
                write!(f, "{field} '{value}' is not a #rrggbb color")
            }
        }
    }
}

/// Outcome of a read-only config check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Wire form of [`ValidationReport`], with messages rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<&ValidationReport> for ValidationResponse {
    fn from(report: &ValidationReport) -> Self {
        Self {
            is_valid: report.is_valid(),
            errors: report.errors.iter().map(ToString::to_string).collect(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Body of the enable/disable endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

/// Body of the default SMS provider endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultProviderRequest {
    pub provider: Option<SmsProviderId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_response_messages() {
        let report = ValidationReport {
            errors: vec![ValidationIssue::NoPaymentGatewayEnabled],
            warnings: vec![],
        };
        let response = ValidationResponse::from(&report);
        assert!(!response.is_valid);
        assert_eq!(
            response.errors,
            vec!["At least one payment gateway must be enabled".to_string()]
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["isValid"], false);
    }

    #[test]
    fn test_import_failure_message() {
        assert_eq!(
            ImportOutcome::failed("expected value at line 1 column 1").message,
            "Import failed: expected value at line 1 column 1"
        );
    }
}
