//! Configuration Validation
//!
//! Range checks shared by every configuration struct in the pipeline. Invalid
//! parameters are rejected before any frame is processed.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{Validate, ValidationResult, Validator};
