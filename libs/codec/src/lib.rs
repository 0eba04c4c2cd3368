//! # identitas-codec
//!
//! Positional codec for fixed-width Indonesian national identity numbers.
//!
//! An identifier is an ordered list of fixed-width field sequences with no
//! delimiters: each sequence consumes its slice of the digit string and
//! decodes it into typed values — a region code, a calendar date, a gender
//! flag, a serial number — and encodes those values back into the exact
//! positional layout.
//!
//! ## Design principles
//!
//! - Schemas are configuration: the codec behaviors form a closed set
//!   ([`SequenceKind`]) and the field roles a closed enum ([`Key`]).
//! - Decode and encode round-trip digit-exact.
//! - Two-digit years never resolve to a future year ([`expand_year`]).
//! - Bad input decodes to "incomplete", surfaced by [`Identity::is_valid`];
//!   the codec never panics on malformed identifiers.
//! - The current date is injected per call, so century inference is
//!   deterministic and testable.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use identitas_codec::{Gender, Nik};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let nik = Nik::decode_at("3515155202000005", today);
//! assert!(nik.is_valid());
//! assert_eq!(nik.region(), Some("351515"));
//! assert_eq!(nik.birth_date(), NaiveDate::from_ymd_opt(2000, 2, 12));
//! assert_eq!(nik.gender(), Some(Gender::Female));
//! assert_eq!(nik.serial(), Some(5));
//! assert_eq!(nik.format_raw(" "), "351515 520200 0005");
//! ```

mod date;
mod error;
mod identity;
mod ids;
mod macros;
mod sequence;
mod types;

pub use date::{expand_year, DateFormat, DatePart, DateParts};
pub use error::CodecError;
pub use identity::Identity;
pub use ids::{Nik, Nip, Nrp};
pub use sequence::{Sequence, SequenceKind, GENDER_DIVISOR};
pub use types::{Gender, Key, Value};

/// Re-export the date type used throughout the public API.
pub use chrono::NaiveDate;
