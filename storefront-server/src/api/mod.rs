pub mod admin;
pub mod extractors;
