//! Claims validation against decoded identity numbers.
//!
//! A validator takes externally supplied claims — a candidate identifier
//! plus the field values a subject asserts — decodes the identifier with
//! the matching schema, and compares claimed against decoded values.
//! Dates are compared by value; a claim set missing a required field
//! never validates.
//!
//! The registry is explicit and caller-owned: build one with
//! [`Registry::with_defaults`] at startup instead of relying on global
//! registration side effects.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use identitas_codec::Gender;
//! use identitas_validate::{Claims, Registry};
//!
//! let registry = Registry::with_defaults();
//! let validator = registry.get("NIK").unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let claims = Claims::new("3515155202000005")
//!     .birth_date(NaiveDate::from_ymd_opt(2000, 2, 12).unwrap())
//!     .gender(Gender::Female);
//! assert!(validator.validate_at(&claims, today));
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use identitas_codec::{Gender, Nik, Nip};

/// Externally supplied values to check against a candidate identifier.
///
/// Which fields are required depends on the validator: NIK needs birth
/// date and gender, NIP additionally needs the appointment date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The candidate identifier string.
    pub id: String,
    /// Claimed date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Claimed civil-service appointment date (NIP only).
    pub appointment: Option<NaiveDate>,
    /// Claimed gender.
    pub gender: Option<Gender>,
}

impl Claims {
    /// Claims for a candidate identifier with no asserted fields yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Asserts a date of birth.
    #[must_use]
    pub fn birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Asserts an appointment date.
    #[must_use]
    pub fn appointment(mut self, date: NaiveDate) -> Self {
        self.appointment = Some(date);
        self
    }

    /// Asserts a gender.
    #[must_use]
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// A schema-specific claims check.
pub trait Validator {
    /// Short scheme identifier used as the registry key, e.g. `"NIK"`.
    fn id(&self) -> &'static str;

    /// Human-readable label of the scheme.
    fn label(&self) -> &'static str;

    /// Validates claims against today's date.
    fn validate(&self, claims: &Claims) -> bool {
        self.validate_at(claims, Utc::now().date_naive())
    }

    /// Validates claims with an explicit current date for century
    /// inference in the decoded identifier.
    fn validate_at(&self, claims: &Claims, today: NaiveDate) -> bool;
}

/// Validates population IDs against claimed birth date and gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct NikValidator;

impl Validator for NikValidator {
    fn id(&self) -> &'static str {
        "NIK"
    }

    fn label(&self) -> &'static str {
        "Nomor Induk Kependudukan (NIK)"
    }

    fn validate_at(&self, claims: &Claims, today: NaiveDate) -> bool {
        let (Some(birth_date), Some(gender)) = (claims.birth_date, claims.gender) else {
            return false;
        };
        let nik = Nik::decode_at(&claims.id, today);
        nik.birth_date() == Some(birth_date) && nik.gender() == Some(gender)
    }
}

/// Validates civil-servant IDs against claimed birth date, appointment
/// date, and gender.
#[derive(Debug, Clone, Copy, Default)]
pub struct NipValidator;

impl Validator for NipValidator {
    fn id(&self) -> &'static str {
        "NIP"
    }

    fn label(&self) -> &'static str {
        "Nomor Induk Pegawai (NIP)"
    }

    fn validate_at(&self, claims: &Claims, today: NaiveDate) -> bool {
        let (Some(birth_date), Some(appointment), Some(gender)) =
            (claims.birth_date, claims.appointment, claims.gender)
        else {
            return false;
        };
        let nip = Nip::decode_at(&claims.id, today);
        nip.birth_date() == Some(birth_date)
            && nip.appointment() == Some(appointment)
            && nip.gender() == Some(gender)
    }
}

/// A caller-owned validator registry keyed by scheme id.
///
/// Registration is explicit; the first validator registered for an id
/// wins and later registrations for the same id are rejected.
#[derive(Default)]
pub struct Registry {
    validators: BTreeMap<&'static str, Box<dyn Validator + Send + Sync>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the known schemes registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NikValidator));
        registry.register(Box::new(NipValidator));
        registry
    }

    /// Registers a validator under its scheme id. Returns false when the
    /// id is already taken, keeping the existing validator.
    pub fn register(&mut self, validator: Box<dyn Validator + Send + Sync>) -> bool {
        let id = validator.id();
        if self.validators.contains_key(id) {
            return false;
        }
        self.validators.insert(id, validator);
        true
    }

    /// Looks up a validator by scheme id.
    pub fn get(&self, id: &str) -> Option<&(dyn Validator + Send + Sync)> {
        self.validators.get(id).map(Box::as_ref)
    }

    /// Registered scheme ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.validators.keys().copied()
    }

    /// Number of registered validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True when no validator is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nik_claims_match() {
        let claims = Claims::new("3515155202000005")
            .birth_date(date(2000, 2, 12))
            .gender(Gender::Female);
        assert!(NikValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nik_claims_wrong_birth_date() {
        // the candidate id itself is valid, but the claim is not
        let claims = Claims::new("3515155202000005")
            .birth_date(date(2000, 2, 13))
            .gender(Gender::Female);
        assert!(!NikValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nik_claims_wrong_gender() {
        let claims = Claims::new("3515155202000005")
            .birth_date(date(2000, 2, 12))
            .gender(Gender::Male);
        assert!(!NikValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nik_claims_missing_field() {
        let claims = Claims::new("3515155202000005").birth_date(date(2000, 2, 12));
        assert!(!NikValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nik_invalid_candidate() {
        let claims = Claims::new("3515")
            .birth_date(date(2000, 2, 12))
            .gender(Gender::Female);
        assert!(!NikValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nip_claims_match() {
        let claims = Claims::new("196407101989031001")
            .birth_date(date(1964, 7, 10))
            .appointment(date(1989, 3, 1))
            .gender(Gender::Male);
        assert!(NipValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_nip_claims_wrong_appointment() {
        let claims = Claims::new("196407101989031001")
            .birth_date(date(1964, 7, 10))
            .appointment(date(1989, 4, 1))
            .gender(Gender::Male);
        assert!(!NipValidator.validate_at(&claims, today()));
    }

    #[test]
    fn test_registry_defaults() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("NIK").is_some());
        assert!(registry.get("NIP").is_some());
        assert!(registry.get("NRP").is_none());
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["NIK", "NIP"]);
    }

    #[test]
    fn test_registry_first_registration_wins() {
        let mut registry = Registry::with_defaults();
        assert!(!registry.register(Box::new(NikValidator)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registry_dispatch() {
        let registry = Registry::with_defaults();
        let claims = Claims::new("3515155202000005")
            .birth_date(date(2000, 2, 12))
            .gender(Gender::Female);
        let validator = registry.get("NIK").unwrap();
        assert_eq!(validator.label(), "Nomor Induk Kependudukan (NIK)");
        assert!(validator.validate_at(&claims, today()));
    }

    #[test]
    fn test_claims_json_roundtrip() {
        let claims = Claims::new("3515155202000005")
            .birth_date(date(2000, 2, 12))
            .gender(Gender::Female);
        let json = serde_json::to_string(&claims).unwrap();
        let parsed: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, claims);
    }
}
