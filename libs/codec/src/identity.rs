//! The identity orchestrator: an ordered composition of sequences.

use std::fmt;

use chrono::{NaiveDate, Utc};

use crate::error::CodecError;
use crate::sequence::Sequence;
use crate::types::{Key, Value};

/// An identifier schema: an ordered list of sequences whose widths define
/// the digit layout, plus the last decoded or encoded raw string.
///
/// The sequence list is fixed at construction; only field values change
/// afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    sequences: Vec<Sequence>,
    raw: Option<String>,
}

impl Identity {
    /// Creates an identity from its schema. Order is significant.
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self {
            sequences,
            raw: None,
        }
    }

    /// Total width in digits of a canonical raw identifier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.iter().map(Sequence::width).sum()
    }

    /// True when the schema has no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The sequences in layout order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// The last decoded input or encoded output.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Decodes `raw` against the schema, reading today's date once for
    /// century inference. Returns [`Identity::is_valid`].
    pub fn decode(&mut self, raw: &str) -> bool {
        self.decode_at(raw, Utc::now().date_naive())
    }

    /// Decodes `raw` with an explicit current date.
    ///
    /// The input is sliced in schema order. An input shorter than the
    /// schema leaves the trailing sequences unset and the identity
    /// invalid; it is not an error.
    pub fn decode_at(&mut self, raw: &str, today: NaiveDate) -> bool {
        self.raw = Some(raw.to_string());
        let mut pos = 0;
        for seq in &mut self.sequences {
            seq.reset();
            let end = pos + seq.width();
            match raw.get(pos..end) {
                Some(slice) => {
                    // the slice is width-exact, so only parse failures
                    // remain and those leave the sequence unset
                    let _ = seq.decode(slice, today);
                    pos = end;
                }
                None => {
                    tracing::debug!(
                        needed = end,
                        got = raw.len(),
                        "short input, sequence left unset"
                    );
                }
            }
        }
        self.is_valid()
    }

    /// Encodes every sequence and commits the concatenation to `raw`.
    ///
    /// Transactional: if any sequence cannot encode, its error is returned
    /// and `raw` keeps its previous value.
    pub fn encode(&mut self) -> Result<&str, CodecError> {
        let mut rendered = Vec::with_capacity(self.sequences.len());
        for seq in &mut self.sequences {
            rendered.push(seq.encode()?.to_string());
        }
        Ok(self.raw.insert(rendered.concat()).as_str())
    }

    /// Value for `key` from the first sequence declaring it.
    pub fn value(&self, key: Key) -> Option<&Value> {
        self.sequences
            .iter()
            .find(|seq| seq.has_key(key))
            .and_then(|seq| seq.value(key))
    }

    /// Sets `key` on the first sequence declaring it.
    pub fn set_value(&mut self, key: Key, value: Value) {
        match self.sequences.iter_mut().find(|seq| seq.has_key(key)) {
            Some(seq) => seq.set_value(key, value),
            None => tracing::warn!(%key, "no sequence declares this key"),
        }
    }

    /// True once every sequence holds complete values.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.sequences.iter().all(Sequence::has_values)
    }

    /// True when the stored raw string has the canonical length.
    #[must_use]
    pub fn is_len_valid(&self) -> bool {
        self.raw
            .as_ref()
            .is_some_and(|raw| raw.chars().count() == self.len())
    }

    /// Joins each sequence's raw slice with `separator` for display,
    /// e.g. `"351515 520200 0005"`. Sequences without a raw slice are
    /// skipped.
    pub fn format_raw(&self, separator: &str) -> String {
        self.sequences
            .iter()
            .filter_map(Sequence::raw)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw().unwrap_or_default())
    }
}
