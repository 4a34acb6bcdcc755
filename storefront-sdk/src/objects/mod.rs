//! Request and response bodies of the admin API.

mod admin;

pub use admin::{
    DefaultProviderRequest, EnabledRequest, ImportOutcome, ValidationIssue, ValidationReport,
    ValidationResponse, ValidationWarning,
};
