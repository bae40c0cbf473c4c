//! Task Configuration
//!
//! Dispatch from an options descriptor to an explicit [`TaskMode`]. The mode
//! is decided exactly once, before any session exists; everything downstream
//! matches on the tagged variant instead of re-inspecting descriptor shapes.
//!
//! Two entry points resolve to a mode:
//! - typed constructors ([`TaskMode::classification`],
//!   [`TaskMode::integer_range`], [`TaskMode::real_range`],
//!   [`TaskMode::captioning`]), which validate bounds;
//! - [`TaskMode::from_value`], which dispatches on the shape of a loose JSON
//!   descriptor the way a notebook caller would pass one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::label::{Label, Numeric};

/// Error raised when an options descriptor is rejected at configuration time.
///
/// This is the only failure the system defines. It is raised before any
/// session is constructed or any rendering occurs, and is not recoverable
/// within a session; the caller must reconfigure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The options descriptor matched none of the recognized shapes, or a
    /// range descriptor carried unusable bounds.
    #[error("invalid options descriptor: {0}")]
    InvalidConfiguration(String),
}

/// Numeric bounds for a regression task.
///
/// The numeric type is inferred from the endpoints: integer endpoints give
/// an integer-valued control, anything else a real-valued one. The step
/// defaults to 1 for integer ranges and 0.1 for real ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum NumericRange {
    /// Integer-valued range
    Integer {
        /// Lower bound (inclusive)
        min: i64,
        /// Upper bound (inclusive)
        max: i64,
        /// Increment between selectable values
        step: i64,
    },
    /// Real-valued range
    Real {
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
        /// Increment between selectable values
        step: f64,
    },
}

impl NumericRange {
    /// Build an integer range, validating the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when `min > max` or the
    /// step is not positive.
    pub fn integer(min: i64, max: i64, step: Option<i64>) -> Result<Self, ConfigError> {
        let step = step.unwrap_or(1);
        if min > max {
            return Err(ConfigError::InvalidConfiguration(format!(
                "range minimum {min} exceeds maximum {max}"
            )));
        }
        if step <= 0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "range step must be positive, got {step}"
            )));
        }
        Ok(NumericRange::Integer { min, max, step })
    }

    /// Build a real range, validating the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when any endpoint is
    /// not finite, `min > max`, or the step is not positive.
    pub fn real(min: f64, max: f64, step: Option<f64>) -> Result<Self, ConfigError> {
        let step = step.unwrap_or(0.1);
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(ConfigError::InvalidConfiguration(
                "range bounds must be finite".to_string(),
            ));
        }
        if min > max {
            return Err(ConfigError::InvalidConfiguration(format!(
                "range minimum {min} exceeds maximum {max}"
            )));
        }
        if step <= 0.0 {
            return Err(ConfigError::InvalidConfiguration(format!(
                "range step must be positive, got {step}"
            )));
        }
        Ok(NumericRange::Real { min, max, step })
    }

    /// Lower bound as a float (control starting value).
    #[must_use]
    pub fn min_f64(&self) -> f64 {
        match *self {
            NumericRange::Integer { min, .. } => min as f64,
            NumericRange::Real { min, .. } => min,
        }
    }

    /// Upper bound as a float.
    #[must_use]
    pub fn max_f64(&self) -> f64 {
        match *self {
            NumericRange::Integer { max, .. } => max as f64,
            NumericRange::Real { max, .. } => max,
        }
    }

    /// Increment between selectable values, as a float.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        match *self {
            NumericRange::Integer { step, .. } => step as f64,
            NumericRange::Real { step, .. } => step,
        }
    }

    /// Clamp a candidate value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_f64(), self.max_f64())
    }

    /// Convert a control position into a label of the inferred numeric type.
    ///
    /// The value is clamped into the range first; integer ranges round to
    /// the nearest integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn label_for(&self, value: f64) -> Label {
        let value = self.clamp(value);
        match self {
            NumericRange::Integer { .. } => Label::Number(Numeric::Int(value.round() as i64)),
            NumericRange::Real { .. } => Label::Number(Numeric::Real(value)),
        }
    }
}

/// Task mode, decided once at configuration time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TaskMode {
    /// Pick one label from a fixed discrete set. Always rendered as one
    /// control per label, never a dropdown, regardless of set size.
    Classification(Vec<String>),
    /// Pick a numeric value from a bounded range.
    Regression(NumericRange),
    /// Enter unconstrained text (the empty string is valid).
    Captioning,
}

impl TaskMode {
    /// Classification over a discrete label set.
    ///
    /// An empty set is accepted; the resulting session can then only be
    /// driven by skip.
    pub fn classification<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TaskMode::Classification(labels.into_iter().map(Into::into).collect())
    }

    /// Regression over an integer range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] on unusable bounds.
    pub fn integer_range(min: i64, max: i64, step: Option<i64>) -> Result<Self, ConfigError> {
        NumericRange::integer(min, max, step).map(TaskMode::Regression)
    }

    /// Regression over a real range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] on unusable bounds.
    pub fn real_range(min: f64, max: f64, step: Option<f64>) -> Result<Self, ConfigError> {
        NumericRange::real(min, max, step).map(TaskMode::Regression)
    }

    /// Free-text captioning.
    #[must_use]
    pub fn captioning() -> Self {
        TaskMode::Captioning
    }

    /// Dispatch on the shape of a loose JSON options descriptor.
    ///
    /// - an array of 2 or 3 numbers is a regression range (integer iff
    ///   every element is a JSON integer);
    /// - any other array is a classification label set, elements
    ///   stringified;
    /// - `null` is captioning;
    /// - anything else is rejected.
    ///
    /// JSON has no tuple, so a numeric 2/3-element array always reads as a
    /// range here; callers who want a small numeric label set should use
    /// [`TaskMode::classification`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] for unrecognized
    /// shapes and for ranges with unusable bounds.
    pub fn from_value(options: &Value) -> Result<Self, ConfigError> {
        match options {
            Value::Null => Ok(TaskMode::Captioning),
            Value::Array(entries) => {
                if matches!(entries.len(), 2 | 3) && entries.iter().all(Value::is_number) {
                    return range_from_entries(entries);
                }
                Ok(TaskMode::Classification(
                    entries.iter().map(stringify).collect(),
                ))
            }
            other => Err(ConfigError::InvalidConfiguration(format!(
                "expected a label list, a (min, max[, step]) range, or null, got {other}"
            ))),
        }
    }

    /// Whether a label has the shape this mode's controls emit.
    ///
    /// Surfaces only ever produce in-domain values by construction; this is
    /// a convenience for tests and custom surfaces, not a runtime gate.
    #[must_use]
    pub fn accepts(&self, label: &Label) -> bool {
        match (self, label) {
            (TaskMode::Classification(labels), Label::Choice(value)) => {
                labels.iter().any(|l| l == value)
            }
            (TaskMode::Regression(range), Label::Number(value)) => match (range, value) {
                (NumericRange::Integer { min, max, .. }, Numeric::Int(v)) => {
                    (*min..=*max).contains(v)
                }
                (NumericRange::Real { min, max, .. }, Numeric::Real(v)) => {
                    (*min..=*max).contains(v)
                }
                _ => false,
            },
            (TaskMode::Captioning, Label::Text(_)) => true,
            _ => false,
        }
    }

    /// Short mode name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TaskMode::Classification(_) => "classification",
            TaskMode::Regression(_) => "regression",
            TaskMode::Captioning => "captioning",
        }
    }
}

/// Build a range from 2 or 3 JSON numbers, inferring the numeric type.
fn range_from_entries(entries: &[Value]) -> Result<TaskMode, ConfigError> {
    let all_integers = entries.iter().all(|v| v.as_i64().is_some());
    if all_integers {
        let min = entries[0].as_i64().unwrap_or_default();
        let max = entries[1].as_i64().unwrap_or_default();
        let step = entries.get(2).and_then(Value::as_i64);
        TaskMode::integer_range(min, max, step)
    } else {
        let min = entries[0].as_f64().unwrap_or_default();
        let max = entries[1].as_f64().unwrap_or_default();
        let step = entries.get(2).and_then(Value::as_f64);
        TaskMode::real_range(min, max, step)
    }
}

/// Render a JSON label entry without quoting plain strings.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_null_is_captioning() {
        assert_eq!(TaskMode::from_value(&json!(null)).unwrap(), TaskMode::Captioning);
    }

    #[test]
    fn test_string_array_is_classification() {
        let mode = TaskMode::from_value(&json!(["cat", "dog"])).unwrap();
        assert_eq!(mode, TaskMode::classification(["cat", "dog"]));
    }

    #[test]
    fn test_mixed_array_is_classification_stringified() {
        let mode = TaskMode::from_value(&json!(["low", 1, true])).unwrap();
        assert_eq!(mode, TaskMode::classification(["low", "1", "true"]));
    }

    #[test]
    fn test_integer_pair_is_integer_range() {
        let mode = TaskMode::from_value(&json!([0, 10])).unwrap();
        assert_eq!(
            mode,
            TaskMode::Regression(NumericRange::Integer { min: 0, max: 10, step: 1 })
        );
    }

    #[test]
    fn test_real_triple_is_real_range() {
        let mode = TaskMode::from_value(&json!([0.0, 1.0, 0.25])).unwrap();
        assert_eq!(
            mode,
            TaskMode::Regression(NumericRange::Real { min: 0.0, max: 1.0, step: 0.25 })
        );
    }

    #[test]
    fn test_mixed_numeric_pair_is_real_range() {
        let mode = TaskMode::from_value(&json!([0, 1.5])).unwrap();
        assert_eq!(
            mode,
            TaskMode::Regression(NumericRange::Real { min: 0.0, max: 1.5, step: 0.1 })
        );
    }

    #[test]
    fn test_scalar_descriptor_is_rejected() {
        for bad in [json!(42), json!("labels"), json!({"min": 0}), json!(true)] {
            let err = TaskMode::from_value(&bad).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(TaskMode::integer_range(10, 0, None).is_err());
        assert!(TaskMode::real_range(1.0, 0.0, None).is_err());
    }

    #[test]
    fn test_non_positive_step_is_rejected() {
        assert!(TaskMode::integer_range(0, 10, Some(0)).is_err());
        assert!(TaskMode::real_range(0.0, 1.0, Some(-0.5)).is_err());
    }

    #[test]
    fn test_non_finite_bounds_are_rejected() {
        assert!(NumericRange::real(0.0, f64::INFINITY, None).is_err());
        assert!(NumericRange::real(f64::NAN, 1.0, None).is_err());
    }

    #[test]
    fn test_empty_label_set_is_accepted() {
        let mode = TaskMode::from_value(&json!([])).unwrap();
        assert_eq!(mode, TaskMode::Classification(Vec::new()));
    }

    #[test]
    fn test_label_for_clamps_and_types() {
        let int_range = NumericRange::integer(0, 5, None).unwrap();
        assert_eq!(int_range.label_for(3.4), Label::int(3));
        assert_eq!(int_range.label_for(99.0), Label::int(5));
        assert_eq!(int_range.label_for(-1.0), Label::int(0));

        let real_range = NumericRange::real(0.0, 1.0, None).unwrap();
        assert_eq!(real_range.label_for(0.5), Label::real(0.5));
        assert_eq!(real_range.label_for(2.0), Label::real(1.0));
    }

    #[test]
    fn test_accepts_follows_mode_shape() {
        let mode = TaskMode::classification(["cat", "dog"]);
        assert!(mode.accepts(&Label::choice("cat")));
        assert!(!mode.accepts(&Label::choice("bird")));
        assert!(!mode.accepts(&Label::text("cat")));

        let range = TaskMode::integer_range(1, 10, None).unwrap();
        assert!(range.accepts(&Label::int(10)));
        assert!(!range.accepts(&Label::int(11)));
        assert!(!range.accepts(&Label::real(5.0)));

        assert!(TaskMode::Captioning.accepts(&Label::text("")));
    }
}
