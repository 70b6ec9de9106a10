//! Schema-driven argument validation.

use std::collections::HashMap;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::catalog::{ParameterKind, ParameterSpec};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("Missing required argument: {field}")]
    Missing { field: String },
    #[error("Invalid argument '{field}': expected {expected}")]
    Invalid { field: String, expected: String },
}

impl ArgumentError {
    fn invalid(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// A type-checked argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    String(String),
    Number(f64),
    Boolean(bool),
    StringList(Vec<String>),
}

/// Arguments that passed validation, with declared defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArguments {
    values: HashMap<String, ArgumentValue>,
}

impl ValidatedArguments {
    pub fn insert(&mut self, field: impl Into<String>, value: ArgumentValue) {
        self.values.insert(field.into(), value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ArgumentValue> {
        self.values.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// # Errors
    /// Returns [`ArgumentError::Invalid`] when the field holds a non-string.
    pub fn string(&self, field: &str) -> Result<Option<&str>, ArgumentError> {
        match self.values.get(field) {
            None => Ok(None),
            Some(ArgumentValue::String(value)) => Ok(Some(value)),
            Some(_) => Err(ArgumentError::invalid(field, "string")),
        }
    }

    /// # Errors
    /// Returns [`ArgumentError::Missing`] when absent, or
    /// [`ArgumentError::Invalid`] when the field holds a non-string.
    pub fn required_string(&self, field: &str) -> Result<String, ArgumentError> {
        self.string(field)?
            .map(str::to_string)
            .ok_or_else(|| ArgumentError::Missing {
                field: field.to_string(),
            })
    }

    /// # Errors
    /// Returns [`ArgumentError::Invalid`] when the field holds a non-number.
    pub fn number(&self, field: &str) -> Result<Option<f64>, ArgumentError> {
        match self.values.get(field) {
            None => Ok(None),
            Some(ArgumentValue::Number(value)) => Ok(Some(*value)),
            Some(_) => Err(ArgumentError::invalid(field, "number")),
        }
    }

    /// # Errors
    /// Returns [`ArgumentError::Invalid`] when the field holds a non-boolean.
    pub fn boolean(&self, field: &str) -> Result<Option<bool>, ArgumentError> {
        match self.values.get(field) {
            None => Ok(None),
            Some(ArgumentValue::Boolean(value)) => Ok(Some(*value)),
            Some(_) => Err(ArgumentError::invalid(field, "boolean")),
        }
    }

    /// # Errors
    /// Returns [`ArgumentError::Invalid`] when the field holds anything but a
    /// list of strings.
    pub fn string_list(&self, field: &str) -> Result<Option<Vec<String>>, ArgumentError> {
        match self.values.get(field) {
            None => Ok(None),
            Some(ArgumentValue::StringList(values)) => Ok(Some(values.clone())),
            Some(_) => Err(ArgumentError::invalid(field, "array of strings")),
        }
    }

    /// # Errors
    /// As [`Self::string_list`], plus [`ArgumentError::Missing`] when absent.
    pub fn required_string_list(&self, field: &str) -> Result<Vec<String>, ArgumentError> {
        self.string_list(field)?.ok_or_else(|| ArgumentError::Missing {
            field: field.to_string(),
        })
    }

    /// Parses a string field into one of the catalog enums.
    ///
    /// # Errors
    /// Returns [`ArgumentError::Invalid`] when the value is not a string or
    /// does not parse as `T`.
    pub fn enumeration<T: FromStr>(&self, field: &str) -> Result<Option<T>, ArgumentError> {
        self.string(field)?
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ArgumentError::invalid(field, "a known value"))
            })
            .transpose()
    }

    /// # Errors
    /// As [`Self::enumeration`], plus [`ArgumentError::Missing`] when absent.
    pub fn required_enumeration<T: FromStr>(&self, field: &str) -> Result<T, ArgumentError> {
        self.enumeration(field)?.ok_or_else(|| ArgumentError::Missing {
            field: field.to_string(),
        })
    }
}

/// Validates `raw` against `parameters`, applying declared defaults.
///
/// Keys in `raw` that are not declared are ignored, and a JSON `null` counts
/// as an omitted field.
///
/// # Errors
/// Returns the first [`ArgumentError`] in declaration order.
pub fn validate_arguments(
    parameters: &[ParameterSpec],
    raw: &Map<String, Value>,
) -> Result<ValidatedArguments, ArgumentError> {
    let mut validated = ValidatedArguments {
        values: HashMap::with_capacity(parameters.len()),
    };
    for parameter in parameters {
        let supplied = raw.get(parameter.name()).filter(|value| !value.is_null());
        let value = match (supplied, parameter.default_value()) {
            (Some(value), _) => coerce(parameter, value)?,
            (None, _) if parameter.is_required() => {
                return Err(ArgumentError::Missing {
                    field: parameter.name().to_string(),
                });
            }
            (None, Some(default)) => coerce(parameter, default)?,
            (None, None) => continue,
        };
        validated.insert(parameter.name(), value);
    }
    Ok(validated)
}

fn coerce(parameter: &ParameterSpec, value: &Value) -> Result<ArgumentValue, ArgumentError> {
    let mismatch = || ArgumentError::invalid(parameter.name(), parameter.kind().expected());
    match (parameter.kind(), value) {
        (ParameterKind::String, Value::String(text)) => Ok(ArgumentValue::String(text.clone())),
        (ParameterKind::Number, Value::Number(number)) => number
            .as_f64()
            .map(ArgumentValue::Number)
            .ok_or_else(mismatch),
        (ParameterKind::Boolean, Value::Bool(flag)) => Ok(ArgumentValue::Boolean(*flag)),
        (ParameterKind::StringArray, Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ArgumentError::invalid(format!("{}[{index}]", parameter.name()), "string")
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ArgumentValue::StringList),
        (ParameterKind::Enum(allowed), Value::String(text))
            if allowed.iter().any(|candidate| candidate == text) =>
        {
            Ok(ArgumentValue::String(text.clone()))
        }
        _ => Err(mismatch()),
    }
}
