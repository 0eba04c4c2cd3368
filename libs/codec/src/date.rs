//! Packed date formats for date-bearing sequences.
//!
//! Dates inside an identifier are stored as contiguous digit runs with no
//! delimiters. A [`DateFormat`] describes the component order and widths:
//! the NIK birth field is day-month-year with a 2-digit year (`dmy`), the
//! NIP birth field is a full `Ymd`, and the NIP appointment field is `Ym`
//! with the day omitted.
//!
//! Two-digit years are expanded against the current date so they never
//! resolve to a future year (see [`expand_year`]).

use chrono::{Datelike, NaiveDate};

/// One component of a packed date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// 4-digit year.
    YearFull,
    /// 2-digit year, expanded via century inference.
    YearShort,
    /// 2-digit month.
    Month,
    /// 2-digit day of month.
    Day,
}

impl DatePart {
    /// Number of digits this part occupies.
    #[must_use]
    pub const fn width(&self) -> usize {
        match self {
            DatePart::YearFull => 4,
            DatePart::YearShort | DatePart::Month | DatePart::Day => 2,
        }
    }
}

/// An ordered list of date components describing one packed layout.
///
/// A date sequence derives its width from its format, so the component
/// widths always sum to the slice width by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    parts: Vec<DatePart>,
}

impl DateFormat {
    /// Builds a format from its components in layout order.
    pub fn new<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = DatePart>,
    {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    /// Parses a compact pattern such as `"Ymd"` or `"dmy"`.
    ///
    /// `Y` is a 4-digit year, `y` a 2-digit year, `m` and `d` 2-digit
    /// month and day. Returns `None` on any other character or an empty
    /// pattern.
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut parts = Vec::with_capacity(pattern.len());
        for ch in pattern.chars() {
            let part = match ch {
                'Y' => DatePart::YearFull,
                'y' => DatePart::YearShort,
                'm' => DatePart::Month,
                'd' => DatePart::Day,
                _ => return None,
            };
            parts.push(part);
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// Total width in digits.
    #[must_use]
    pub fn width(&self) -> usize {
        self.parts.iter().map(DatePart::width).sum()
    }

    /// The components in layout order.
    pub fn parts(&self) -> &[DatePart] {
        &self.parts
    }

    /// Extracts the numeric components of `raw` according to this format.
    ///
    /// `raw` must be exactly [`DateFormat::width`] digits; `today` anchors
    /// the expansion of 2-digit years. Returns `None` when a chunk is not
    /// an unsigned number.
    pub fn extract(&self, raw: &str, today: NaiveDate) -> Option<DateParts> {
        let mut extracted = DateParts::default();
        let mut pos = 0;
        for part in &self.parts {
            let end = pos + part.width();
            let chunk = raw.get(pos..end)?;
            if !chunk.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let value: u32 = chunk.parse().ok()?;
            pos = end;
            match part {
                DatePart::YearFull => extracted.year = Some(value as i32),
                DatePart::YearShort => extracted.year = Some(expand_year(value, today)),
                DatePart::Month => extracted.month = Some(value),
                DatePart::Day => extracted.day = Some(value),
            }
        }
        Some(extracted)
    }

    /// Decodes `raw` into a calendar date.
    ///
    /// A missing year defaults to the current year and a missing day to
    /// the first of the month. A missing month or an impossible date
    /// yields `None`.
    pub fn decode(&self, raw: &str, today: NaiveDate) -> Option<NaiveDate> {
        self.extract(raw, today)?.resolve(today)
    }

    /// Encodes `date` into this format's digit layout.
    #[must_use]
    pub fn encode(&self, date: NaiveDate) -> String {
        self.encode_with_day_offset(date, 0)
    }

    /// Encodes `date` with `day_offset` added to the day component.
    ///
    /// Used by gender-folding sequences, which add 40 to the day for
    /// female subjects.
    #[must_use]
    pub fn encode_with_day_offset(&self, date: NaiveDate, day_offset: u32) -> String {
        use std::fmt::Write;

        let mut out = String::with_capacity(self.width());
        for part in &self.parts {
            match part {
                DatePart::YearFull => {
                    let _ = write!(out, "{:04}", date.year());
                }
                DatePart::YearShort => {
                    let _ = write!(out, "{:02}", date.year().rem_euclid(100));
                }
                DatePart::Month => {
                    let _ = write!(out, "{:02}", date.month());
                }
                DatePart::Day => {
                    let _ = write!(out, "{:02}", date.day() + day_offset);
                }
            }
        }
        out
    }
}

/// Numeric date components extracted from a digit run, before validation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    /// Full 4-digit year, already century-expanded.
    pub year: Option<i32>,
    /// Month of year, 1-based, unvalidated.
    pub month: Option<u32>,
    /// Day of month, unvalidated.
    pub day: Option<u32>,
}

impl DateParts {
    /// Builds a date, applying the layout defaults: a missing year is the
    /// current year, a missing day is 1. A missing month or an impossible
    /// combination yields `None`.
    pub fn resolve(&self, today: NaiveDate) -> Option<NaiveDate> {
        let year = self.year.unwrap_or_else(|| today.year());
        let month = self.month?;
        let day = self.day.unwrap_or(1);
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Expands a 2-digit year to a full year, biased to never land in the
/// future: decoded in 2024, `99` resolves to 1999 and `05` to 2005.
#[must_use]
pub fn expand_year(value: u32, today: NaiveDate) -> i32 {
    let current = today.year();
    let mut century = current / 100;
    if century * 100 + value as i32 > current {
        century -= 1;
    }
    century * 100 + value as i32
}
