//! Utility functions for code generation, input validation, and request handling.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation
//! - [`validity`] - Validity period conversion and expiry computation
//! - [`request_info`] - Host, client IP, referrer and scheme extraction
//! - [`db_error`] - PostgreSQL error classification

pub mod code_generator;
pub mod db_error;
pub mod request_info;
pub mod url_validator;
pub mod validity;
