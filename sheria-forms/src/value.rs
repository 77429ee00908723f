use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A value held by one field of a document.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Text(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("field {field} expects {expected}, got {got}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        got: String,
    },
}

/// A record whose fields can be read and written by name.
///
/// Writes through [`Document::set`] never raise change events; the caller
/// decides whether a handler runs afterwards.
pub trait Document {
    type Field: Copy + PartialEq + Display + FromStr;

    fn get(&self, field: Self::Field) -> FieldValue;

    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<(), FieldError>;
}

/// Parses a field name for the document type `D`.
pub fn parse_field<D: Document>(name: &str) -> Result<D::Field, FieldError> {
    D::Field::from_str(name).map_err(|_| FieldError::UnknownField(name.to_string()))
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Empty => "empty",
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Date(_) => "date",
            FieldValue::Time(_) => "time",
            FieldValue::Text(_) => "text",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Truthiness as form scripts see it: empty, false, zero and NaN are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Empty => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Date(_) | FieldValue::Time(_) => true,
        }
    }

    fn mismatch(&self, field: impl Display, expected: &'static str) -> FieldError {
        FieldError::TypeMismatch {
            field: field.to_string(),
            expected,
            got: self.kind().to_string(),
        }
    }

    pub fn into_text(self, field: impl Display) -> Result<Option<String>, FieldError> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Text(s) if s.is_empty() => Ok(None),
            FieldValue::Text(s) => Ok(Some(s)),
            other => Err(other.mismatch(field, "text")),
        }
    }

    pub fn into_number(self, field: impl Display) -> Result<Option<f64>, FieldError> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Number(n) => Ok(Some(n)),
            FieldValue::Text(ref s) if s.trim().is_empty() => Ok(None),
            FieldValue::Text(ref s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.mismatch(field, "number")),
            other => Err(other.mismatch(field, "number")),
        }
    }

    /// Check fields arrive as booleans or as 0/1.
    pub fn into_flag(self, field: impl Display) -> Result<bool, FieldError> {
        match self {
            FieldValue::Empty => Ok(false),
            FieldValue::Bool(b) => Ok(b),
            FieldValue::Number(n) => Ok(n != 0.0),
            other => Err(other.mismatch(field, "bool")),
        }
    }

    pub fn into_date(self, field: impl Display) -> Result<Option<NaiveDate>, FieldError> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Date(d) => Ok(Some(d)),
            FieldValue::Text(ref s) if s.is_empty() => Ok(None),
            FieldValue::Text(ref s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| self.mismatch(field, "date")),
            other => Err(other.mismatch(field, "date")),
        }
    }

    pub fn into_time(self, field: impl Display) -> Result<Option<NaiveTime>, FieldError> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Time(t) => Ok(Some(t)),
            FieldValue::Text(ref s) if s.is_empty() => Ok(None),
            FieldValue::Text(ref s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                .map(Some)
                .map_err(|_| self.mismatch(field, "time")),
            other => Err(other.mismatch(field, "time")),
        }
    }

    /// Select fields hold one of a fixed set of labels.
    pub fn into_choice<T: FromStr>(self, field: impl Display) -> Result<Option<T>, FieldError> {
        match self {
            FieldValue::Empty => Ok(None),
            FieldValue::Text(ref s) if s.is_empty() => Ok(None),
            FieldValue::Text(ref s) => s
                .parse::<T>()
                .map(Some)
                .map_err(|_| self.mismatch(field, "choice")),
            other => Err(other.mismatch(field, "choice")),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(value: NaiveTime) -> Self {
        FieldValue::Time(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Select values are written back as their labels.
pub fn choice<T: Display>(value: Option<T>) -> FieldValue {
    value
        .map(|v| FieldValue::Text(v.to_string()))
        .unwrap_or_default()
}
