//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, AI key, repository, and pull request resolution
//! - `triage_settings`: Threshold, label, content source, and timeout settings
//! - `validation`: Configuration consistency validation tests

mod helpers;
