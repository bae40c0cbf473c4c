//! Label Values
//!
//! The value types an input surface can report for an item. The shape of a
//! label follows the session's task mode: classification controls emit
//! [`Label::Choice`], sliders emit [`Label::Number`], and free-text entry
//! emits [`Label::Text`]. The session itself performs no validation beyond
//! this type dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric label value.
///
/// Whether a regression label is integer or real is inferred from the
/// configured range endpoints, not from the submitted value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Integer value (from an integer-typed range)
    Int(i64),
    /// Real value (from a real-typed range)
    Real(f64),
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{v}"),
            Numeric::Real(v) => write!(f, "{v}"),
        }
    }
}

/// A collected label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Label {
    /// One member of a classification task's discrete label set
    Choice(String),
    /// A bounded numeric value from a regression task
    Number(Numeric),
    /// Free text from a captioning task (may be empty)
    Text(String),
}

impl Label {
    /// Create a classification label.
    pub fn choice(value: impl Into<String>) -> Self {
        Label::Choice(value.into())
    }

    /// Create an integer regression label.
    #[must_use]
    pub fn int(value: i64) -> Self {
        Label::Number(Numeric::Int(value))
    }

    /// Create a real regression label.
    #[must_use]
    pub fn real(value: f64) -> Self {
        Label::Number(Numeric::Real(value))
    }

    /// Create a captioning label.
    pub fn text(value: impl Into<String>) -> Self {
        Label::Text(value.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Choice(v) | Label::Text(v) => f.write_str(v),
            Label::Number(v) => write!(f, "{v}"),
        }
    }
}
