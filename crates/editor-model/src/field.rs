//! Numeric input sanitizing for the width/height fields.
//!
//! Invalid input never surfaces as an error: out-of-range values revert to
//! the last valid value and the caller's feedback action fires instead.

use serde::{Deserialize, Serialize};

/// Bounds and fallback for one validation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConstraints {
    /// Value restored when input is rejected.
    pub last_valid: u32,
    /// Whether a cleared field may stay empty (pending) for now.
    pub allow_empty: bool,
    pub min: u32,
    pub max: u32,
}

/// Sanitized field content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Field cleared; not committed yet.
    Pending,
    Value(u32),
}

impl FieldValue {
    pub fn value(&self) -> Option<u32> {
        match self {
            FieldValue::Pending => None,
            FieldValue::Value(v) => Some(*v),
        }
    }

    /// Text shown in the input: empty while pending.
    pub fn text(&self) -> String {
        match self {
            FieldValue::Pending => String::new(),
            FieldValue::Value(v) => v.to_string(),
        }
    }
}

/// Sanitize raw field text.
///
/// Non-digit characters are stripped. An empty result is `Pending` when
/// `allow_empty` is set. A number outside `[min, max]` (including one too
/// large to represent) calls `on_invalid` once and yields `last_valid`.
pub fn validate_numeric(
    raw: &str,
    constraints: &FieldConstraints,
    mut on_invalid: impl FnMut(),
) -> FieldValue {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        if constraints.allow_empty {
            return FieldValue::Pending;
        }
        on_invalid();
        return FieldValue::Value(constraints.last_valid);
    }

    match digits.parse::<u32>() {
        Ok(v) if (constraints.min..=constraints.max).contains(&v) => FieldValue::Value(v),
        _ => {
            on_invalid();
            FieldValue::Value(constraints.last_valid)
        }
    }
}

/// Resolve a field on blur: a pending field reverts to `last_valid` and
/// calls `on_invalid`; a committed value stays.
pub fn commit_on_blur(current: FieldValue, last_valid: u32, mut on_invalid: impl FnMut()) -> u32 {
    match current {
        FieldValue::Value(v) => v,
        FieldValue::Pending => {
            on_invalid();
            last_valid
        }
    }
}

/// A bounded numeric input with its last committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    value: FieldValue,
    last_valid: u32,
    min: u32,
    max: u32,
}

impl NumericField {
    pub fn new(initial: u32, min: u32, max: u32) -> Self {
        Self {
            value: FieldValue::Value(initial),
            last_valid: initial,
            min,
            max,
        }
    }

    pub fn value(&self) -> FieldValue {
        self.value
    }

    pub fn last_valid(&self) -> u32 {
        self.last_valid
    }

    pub fn text(&self) -> String {
        self.value.text()
    }

    /// Feed raw input text. Empty input is allowed to stay pending.
    pub fn input(&mut self, raw: &str, on_invalid: impl FnMut()) -> FieldValue {
        let constraints = FieldConstraints {
            last_valid: self.last_valid,
            allow_empty: true,
            min: self.min,
            max: self.max,
        };
        self.value = validate_numeric(raw, &constraints, on_invalid);
        if let FieldValue::Value(v) = self.value {
            self.last_valid = v;
        }
        self.value
    }

    /// Leave the field; it may never stay empty.
    pub fn blur(&mut self, on_invalid: impl FnMut()) -> u32 {
        let committed = commit_on_blur(self.value, self.last_valid, on_invalid);
        self.value = FieldValue::Value(committed);
        self.last_valid = committed;
        committed
    }

    /// Overwrite with a value solved from the companion field.
    pub fn set_solved(&mut self, value: u32) {
        self.value = FieldValue::Value(value);
        self.last_valid = value;
    }
}
