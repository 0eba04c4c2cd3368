//! Core value types shared across sequences and schemas.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical role of a decoded field.
///
/// Sequences declare which roles they produce; this closed set replaces
/// free-form string keys so a schema cannot misspell a field name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Administrative region code ("wilayah").
    Region,
    /// Date of birth.
    BirthDate,
    /// Civil-service appointment date ("TMT capeg").
    Appointment,
    /// Gender flag.
    Gender,
    /// Registration serial number ("urut").
    Serial,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Region => "region",
            Key::BirthDate => "birth_date",
            Key::Appointment => "appointment",
            Key::Gender => "gender",
            Key::Serial => "serial",
        };
        f.write_str(name)
    }
}

/// Gender as encoded in national identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single-letter code used by NIK: `L` (laki-laki) or `P` (perempuan).
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Gender::Male => 'L',
            Gender::Female => 'P',
        }
    }

    /// Numeric code used by NIP: 1 for male, 2 for female.
    #[must_use]
    pub const fn numeric(&self) -> u32 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    /// Inverse of [`Gender::numeric`].
    #[must_use]
    pub const fn from_numeric(code: u32) -> Option<Self> {
        match code {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A decoded field value.
///
/// One variant per field role shape; heterogeneous values live behind the
/// typed accessors of the concrete schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A calendar date (UTC semantics, no time of day).
    Date(NaiveDate),
    /// An unsigned number, rendered zero-padded to the sequence width.
    Number(u32),
    /// A verbatim digit string; keeps leading zeros.
    Text(String),
    /// A gender flag folded into another field.
    Gender(Gender),
}

impl Value {
    /// The contained date, if any.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// The contained number, if any.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The contained text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The contained gender, if any.
    pub fn as_gender(&self) -> Option<Gender> {
        match self {
            Value::Gender(g) => Some(*g),
            _ => None,
        }
    }
}

impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::Date(date)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Gender> for Value {
    fn from(gender: Gender) -> Self {
        Value::Gender(gender)
    }
}
