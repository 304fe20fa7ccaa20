//! Parameter Validator

use crate::error::ValidationError;
use tracing::debug;

/// Allowed range for joint angles (degrees)
pub const ANGLE_RANGE: (f64, f64) = (0.0, 180.0);

/// Implemented by configuration structs that can check their own parameters.
pub trait Validate {
    /// Record every problem with `self` into `validator`.
    fn validate(&self, validator: &mut Validator);

    /// Validate in isolation, failing on the first problem.
    fn validated(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        self.validate(&mut validator);
        validator.finish().into_result()
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// First error, if any
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Accumulates range checks over a configuration tree.
///
/// Field names are prefixed with the current scope so errors identify the
/// exact parameter (`posture.rules.arm_elevation.threshold_degrees`).
#[derive(Debug, Default)]
pub struct Validator {
    scope: Vec<String>,
    errors: Vec<ValidationError>,
    fields_checked: usize,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `name` appended to the field prefix.
    pub fn scoped(&mut self, name: &str, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.scope.push(name.to_string());
        f(self);
        self.scope.pop();
        self
    }

    /// Validate a nested configuration under `name`.
    pub fn nested<T: Validate + ?Sized>(&mut self, name: &str, value: &T) -> &mut Self {
        self.scoped(name, |v| value.validate(v))
    }

    fn field_name(&self, field: &str) -> String {
        if self.scope.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.scope.join("."), field)
        }
    }

    fn record(&mut self, error: ValidationError) {
        debug!("Validation failed: {}", error);
        self.errors.push(error);
    }

    fn check_finite(&mut self, field: &str, value: f64) -> bool {
        self.fields_checked += 1;
        if value.is_finite() {
            true
        } else {
            let field = self.field_name(field);
            self.record(ValidationError::NotFinite { field });
            false
        }
    }

    /// Value must lie within `range` (inclusive)
    pub fn check_range(&mut self, field: &str, value: f64, range: (f64, f64)) -> &mut Self {
        if self.check_finite(field, value) && (value < range.0 || value > range.1) {
            let field = self.field_name(field);
            self.record(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            });
        }
        self
    }

    /// Joint angle threshold within [0, 180]
    pub fn check_angle(&mut self, field: &str, degrees: f64) -> &mut Self {
        self.check_range(field, degrees, ANGLE_RANGE)
    }

    /// Strictly positive value (frame rate, durations used as divisors)
    pub fn check_positive(&mut self, field: &str, value: f64) -> &mut Self {
        if self.check_finite(field, value) && value <= 0.0 {
            let field = self.field_name(field);
            self.record(ValidationError::NotPositive { field, value });
        }
        self
    }

    /// Zero or more
    pub fn check_non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        self.check_range(field, value, (0.0, f64::MAX))
    }

    /// Proportion within (0, 1]
    pub fn check_ratio(&mut self, field: &str, value: f64) -> &mut Self {
        if self.check_finite(field, value) && (value <= 0.0 || value > 1.0) {
            let field = self.field_name(field);
            self.record(ValidationError::OutOfRange {
                field,
                value,
                min: 0.0,
                max: 1.0,
            });
        }
        self
    }

    /// `lower` must not exceed `upper`
    pub fn check_order(
        &mut self,
        lower_field: &str,
        lower: f64,
        upper_field: &str,
        upper: f64,
    ) -> &mut Self {
        self.fields_checked += 1;
        if lower > upper {
            let lower_field = self.field_name(lower_field);
            let upper_field = self.field_name(upper_field);
            self.record(ValidationError::Ordering {
                lower_field,
                lower,
                upper_field,
                upper,
            });
        }
        self
    }

    /// Record a domain-specific rejection of `field` unless `accepted`
    pub fn check(&mut self, field: &str, accepted: bool, reason: &str) -> &mut Self {
        self.fields_checked += 1;
        if !accepted {
            let field = self.field_name(field);
            self.record(ValidationError::Invalid {
                field,
                reason: reason.to_string(),
            });
        }
        self
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
            fields_checked: self.fields_checked,
        }
    }
}
