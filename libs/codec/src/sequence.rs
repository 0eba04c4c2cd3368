//! Fixed-width field sequences.
//!
//! A sequence owns one slice of an identifier: its width in digits, the
//! logical keys it produces, and the codec behavior mapping between the
//! raw digits and typed values. Behaviors form the closed set
//! [`SequenceKind`], selected when the schema is built.
//!
//! # Invariants
//!
//! - A decode populates every declared key or none of them.
//! - Decoding the same valid input twice yields identical values.
//! - `reset` clears values but keeps the raw slice and width.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::date::DateFormat;
use crate::error::CodecError;
use crate::types::{Gender, Key, Value};

/// Offset added to the day of month to encode a female subject.
pub const GENDER_DIVISOR: u32 = 40;

/// Codec behavior of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceKind {
    /// Stores the raw substring verbatim; keeps leading zeros.
    Text,
    /// Parses a zero-padded unsigned number.
    Serial,
    /// Packs a calendar date using a [`DateFormat`].
    Date(DateFormat),
    /// Packs a date with the gender flag folded into the day field:
    /// a day above [`GENDER_DIVISOR`] means female, minus the offset.
    GenderDate(DateFormat),
}

/// A fixed-width slice of an identifier plus its codec.
#[derive(Debug, Clone)]
pub struct Sequence {
    width: usize,
    keys: Vec<Key>,
    kind: SequenceKind,
    values: BTreeMap<Key, Value>,
    raw: Option<String>,
}

impl Sequence {
    /// A verbatim text sequence.
    pub fn text(width: usize, key: Key) -> Self {
        Self::with_kind(width, vec![key], SequenceKind::Text)
    }

    /// A zero-padded serial number sequence.
    pub fn serial(width: usize, key: Key) -> Self {
        Self::with_kind(width, vec![key], SequenceKind::Serial)
    }

    /// A date sequence; the width is derived from the format.
    pub fn date(key: Key, format: DateFormat) -> Self {
        let width = format.width();
        Self::with_kind(width, vec![key], SequenceKind::Date(format))
    }

    /// A date sequence that also carries the gender flag in its day field.
    pub fn gender_date(date_key: Key, gender_key: Key, format: DateFormat) -> Self {
        let width = format.width();
        Self::with_kind(
            width,
            vec![date_key, gender_key],
            SequenceKind::GenderDate(format),
        )
    }

    fn with_kind(width: usize, keys: Vec<Key>, kind: SequenceKind) -> Self {
        Self {
            width,
            keys,
            kind,
            values: BTreeMap::new(),
            raw: None,
        }
    }

    /// Width in digits of the slice this sequence consumes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The codec behavior of this sequence.
    pub fn kind(&self) -> &SequenceKind {
        &self.kind
    }

    /// Returns true if this sequence declares `key`.
    pub fn has_key(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Returns true once every declared key holds a value.
    pub fn has_values(&self) -> bool {
        self.keys.iter().all(|key| self.values.contains_key(key))
    }

    /// The raw slice last decoded or encoded.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Value for `key`, if declared and set.
    pub fn value(&self, key: Key) -> Option<&Value> {
        if self.has_key(key) {
            self.values.get(&key)
        } else {
            None
        }
    }

    /// Value for the first declared key.
    pub fn primary_value(&self) -> Option<&Value> {
        self.value(self.primary_key())
    }

    /// Sets the value for `key`. Undeclared keys are ignored with a warning.
    pub fn set_value(&mut self, key: Key, value: Value) {
        if self.has_key(key) {
            self.values.insert(key, value);
        } else {
            tracing::warn!(%key, "ignoring value for undeclared sequence key");
        }
    }

    /// Sets the value for the first declared key.
    pub fn set_primary_value(&mut self, value: Value) {
        let key = self.primary_key();
        self.values.insert(key, value);
    }

    /// Clears all values. The raw slice and width are untouched.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Decodes a width-exact raw slice into typed values.
    ///
    /// Only a width mismatch is an error. Parse failures inside the slice
    /// (a non-digit serial, an impossible date) leave the sequence
    /// incomplete, which surfaces through `Identity::is_valid`. `today`
    /// anchors century inference for 2-digit years.
    pub fn decode(&mut self, raw: &str, today: NaiveDate) -> Result<(), CodecError> {
        let actual = raw.chars().count();
        if actual != self.width {
            return Err(CodecError::WidthMismatch {
                expected: self.width,
                actual,
            });
        }
        let decoded = self.decode_slots(raw, today);
        self.raw = Some(raw.to_string());
        self.values.clear();
        self.values.extend(decoded);
        Ok(())
    }

    /// Produces the (key, value) pairs for a width-exact slice, all or none.
    fn decode_slots(&self, raw: &str, today: NaiveDate) -> Vec<(Key, Value)> {
        match &self.kind {
            SequenceKind::Text => {
                vec![(self.primary_key(), Value::Text(raw.to_string()))]
            }
            SequenceKind::Serial => {
                // reject sign characters that u32::parse would accept
                if !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Vec::new();
                }
                match raw.parse::<u32>() {
                    Ok(number) => vec![(self.primary_key(), Value::Number(number))],
                    Err(_) => Vec::new(),
                }
            }
            SequenceKind::Date(format) => match format.decode(raw, today) {
                Some(date) => vec![(self.primary_key(), Value::Date(date))],
                None => Vec::new(),
            },
            SequenceKind::GenderDate(format) => {
                match decode_gender_date(format, raw, today) {
                    Some((date, gender)) => vec![
                        (self.keys[0], Value::Date(date)),
                        (self.keys[1], Value::Gender(gender)),
                    ],
                    None => Vec::new(),
                }
            }
        }
    }

    /// Renders the stored values into a width-exact raw slice and keeps it.
    ///
    /// Fails with [`CodecError::IncompleteValue`] when a declared key has
    /// no value, [`CodecError::ValueMismatch`] when a value's variant does
    /// not fit the slot, and [`CodecError::Overflow`] when a number needs
    /// more digits than the width allows.
    pub fn encode(&mut self) -> Result<&str, CodecError> {
        let rendered = self.render()?;
        Ok(self.raw.insert(rendered).as_str())
    }

    fn render(&self) -> Result<String, CodecError> {
        match &self.kind {
            SequenceKind::Text => {
                let key = self.primary_key();
                let value = self.required(key)?;
                let text = value
                    .as_text()
                    .ok_or(CodecError::ValueMismatch { key })?;
                let actual = text.chars().count();
                if actual != self.width {
                    return Err(CodecError::WidthMismatch {
                        expected: self.width,
                        actual,
                    });
                }
                Ok(text.to_string())
            }
            SequenceKind::Serial => {
                let key = self.primary_key();
                let value = self.required(key)?;
                let number = value
                    .as_number()
                    .ok_or(CodecError::ValueMismatch { key })?;
                let rendered = format!("{:0width$}", number, width = self.width);
                if rendered.len() > self.width {
                    return Err(CodecError::Overflow {
                        key,
                        width: self.width,
                    });
                }
                Ok(rendered)
            }
            SequenceKind::Date(format) => {
                let key = self.primary_key();
                let value = self.required(key)?;
                let date = value
                    .as_date()
                    .ok_or(CodecError::ValueMismatch { key })?;
                Ok(format.encode(date))
            }
            SequenceKind::GenderDate(format) => {
                let date_key = self.keys[0];
                let gender_key = self.keys[1];
                let date = self
                    .required(date_key)?
                    .as_date()
                    .ok_or(CodecError::ValueMismatch { key: date_key })?;
                let gender = self
                    .required(gender_key)?
                    .as_gender()
                    .ok_or(CodecError::ValueMismatch { key: gender_key })?;
                let offset = match gender {
                    Gender::Female => GENDER_DIVISOR,
                    Gender::Male => 0,
                };
                Ok(format.encode_with_day_offset(date, offset))
            }
        }
    }

    fn required(&self, key: Key) -> Result<&Value, CodecError> {
        self.values
            .get(&key)
            .ok_or(CodecError::IncompleteValue { key })
    }

    // Constructors always declare at least one key.
    fn primary_key(&self) -> Key {
        self.keys[0]
    }
}

/// Recovers the true date and the gender flag from a folded day field.
///
/// Returns both or neither: an impossible date after unfolding yields no
/// gender either.
fn decode_gender_date(
    format: &DateFormat,
    raw: &str,
    today: NaiveDate,
) -> Option<(NaiveDate, Gender)> {
    let mut parts = format.extract(raw, today)?;
    let day = parts.day?;
    let gender = if day > GENDER_DIVISOR {
        parts.day = Some(day - GENDER_DIVISOR);
        Gender::Female
    } else {
        Gender::Male
    };
    let date = parts.resolve(today)?;
    Some((date, gender))
}
