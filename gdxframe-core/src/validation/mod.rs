//! Validation of identifiers and domains
//!
//! Pure checks applied before data is handed to a codec.

pub mod labels;

pub use labels::{validate_dims, validate_domain_name, validate_label, validate_symbol_name};
