//! Concrete Indonesian identifier schemas.
//!
//! These are thin configuration over [`Identity`]: each type fixes an
//! ordered list of sequences and exposes typed getters and setters for
//! its fields.
//!
//! - [`Nik`] — Nomor Induk Kependudukan, the 16-digit population ID.
//! - [`Nip`] — Nomor Induk Pegawai, the 18-digit civil-servant ID.
//! - [`Nrp`] — Nomor Registrasi Pokok, the 8-digit service-member ID.

use chrono::NaiveDate;

use crate::date::{DateFormat, DatePart};
use crate::identity::Identity;
use crate::identity_schema;
use crate::sequence::Sequence;
use crate::types::{Gender, Key, Value};

/// The 16-digit population identifier.
///
/// Layout: 6-digit region code ("wilayah"), 6-digit birth date in
/// day-month-year order with the gender flag folded into the day,
/// 4-digit registration serial.
///
/// ```
/// use chrono::NaiveDate;
/// use identitas_codec::{Gender, Nik};
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let nik = Nik::decode_at("3515155202000005", today);
/// assert!(nik.is_valid());
/// assert_eq!(nik.region(), Some("351515"));
/// assert_eq!(nik.gender(), Some(Gender::Female));
/// ```
#[derive(Debug, Clone)]
pub struct Nik {
    identity: Identity,
}

impl Nik {
    /// Builds the empty schema.
    pub fn new() -> Self {
        let identity = Identity::new(vec![
            Sequence::text(6, Key::Region),
            Sequence::gender_date(
                Key::BirthDate,
                Key::Gender,
                DateFormat::new([DatePart::Day, DatePart::Month, DatePart::YearShort]),
            ),
            Sequence::serial(4, Key::Serial),
        ]);
        Self { identity }
    }

    /// Region code ("wilayah"): province, regency, and district digits.
    pub fn region(&self) -> Option<&str> {
        self.identity.value(Key::Region).and_then(Value::as_text)
    }

    /// Date of birth, recovered from the folded day field.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.identity.value(Key::BirthDate).and_then(Value::as_date)
    }

    /// Gender, recovered from the folded day field.
    pub fn gender(&self) -> Option<Gender> {
        self.identity.value(Key::Gender).and_then(Value::as_gender)
    }

    /// Registration serial within the region and birth date group.
    pub fn serial(&self) -> Option<u32> {
        self.identity.value(Key::Serial).and_then(Value::as_number)
    }

    /// Sets the region code. Must be exactly 6 digits to encode.
    pub fn set_region(&mut self, region: &str) {
        self.identity.set_value(Key::Region, Value::from(region));
    }

    /// Sets the date of birth.
    pub fn set_birth_date(&mut self, date: NaiveDate) {
        self.identity.set_value(Key::BirthDate, Value::Date(date));
    }

    /// Sets the gender flag folded into the day field.
    pub fn set_gender(&mut self, gender: Gender) {
        self.identity.set_value(Key::Gender, Value::Gender(gender));
    }

    /// Sets the registration serial.
    pub fn set_serial(&mut self, serial: u32) {
        self.identity.set_value(Key::Serial, Value::Number(serial));
    }
}

identity_schema!(Nik);

/// The 18-digit civil-servant identifier.
///
/// Layout: 8-digit birth date (`Ymd`), 6-digit civil-service appointment
/// month ("TMT capeg", `Ym`), 1-digit numeric gender code, 3-digit serial.
#[derive(Debug, Clone)]
pub struct Nip {
    identity: Identity,
}

impl Nip {
    /// Builds the empty schema.
    pub fn new() -> Self {
        let identity = Identity::new(vec![
            Sequence::date(
                Key::BirthDate,
                DateFormat::new([DatePart::YearFull, DatePart::Month, DatePart::Day]),
            ),
            Sequence::date(
                Key::Appointment,
                DateFormat::new([DatePart::YearFull, DatePart::Month]),
            ),
            Sequence::serial(1, Key::Gender),
            Sequence::serial(3, Key::Serial),
        ]);
        Self { identity }
    }

    /// Date of birth.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.identity.value(Key::BirthDate).and_then(Value::as_date)
    }

    /// Civil-service appointment date; the day is always the first of
    /// the month since the layout only stores year and month.
    pub fn appointment(&self) -> Option<NaiveDate> {
        self.identity
            .value(Key::Appointment)
            .and_then(Value::as_date)
    }

    /// Raw numeric gender code: 1 for male, 2 for female.
    pub fn gender_code(&self) -> Option<u32> {
        self.identity.value(Key::Gender).and_then(Value::as_number)
    }

    /// Gender decoded from the numeric code; `None` for any other digit.
    pub fn gender(&self) -> Option<Gender> {
        self.gender_code().and_then(Gender::from_numeric)
    }

    /// Registration serial.
    pub fn serial(&self) -> Option<u32> {
        self.identity.value(Key::Serial).and_then(Value::as_number)
    }

    /// Sets the date of birth.
    pub fn set_birth_date(&mut self, date: NaiveDate) {
        self.identity.set_value(Key::BirthDate, Value::Date(date));
    }

    /// Sets the appointment date; only year and month are encoded.
    pub fn set_appointment(&mut self, date: NaiveDate) {
        self.identity.set_value(Key::Appointment, Value::Date(date));
    }

    /// Sets the gender via its numeric code.
    pub fn set_gender(&mut self, gender: Gender) {
        self.identity
            .set_value(Key::Gender, Value::Number(gender.numeric()));
    }

    /// Sets the registration serial.
    pub fn set_serial(&mut self, serial: u32) {
        self.identity.set_value(Key::Serial, Value::Number(serial));
    }
}

identity_schema!(Nip);

/// The 8-digit service-member identifier.
///
/// Layout: 4-digit birth month (`ym`, day implied as the first), 4-digit
/// serial.
#[derive(Debug, Clone)]
pub struct Nrp {
    identity: Identity,
}

impl Nrp {
    /// Builds the empty schema.
    pub fn new() -> Self {
        let identity = Identity::new(vec![
            Sequence::date(
                Key::BirthDate,
                DateFormat::new([DatePart::YearShort, DatePart::Month]),
            ),
            Sequence::serial(4, Key::Serial),
        ]);
        Self { identity }
    }

    /// Birth month; the day is always the first since only year and
    /// month are stored.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.identity.value(Key::BirthDate).and_then(Value::as_date)
    }

    /// Registration serial.
    pub fn serial(&self) -> Option<u32> {
        self.identity.value(Key::Serial).and_then(Value::as_number)
    }

    /// Sets the date of birth; only year and month are encoded.
    pub fn set_birth_date(&mut self, date: NaiveDate) {
        self.identity.set_value(Key::BirthDate, Value::Date(date));
    }

    /// Sets the registration serial.
    pub fn set_serial(&mut self, serial: u32) {
        self.identity.set_value(Key::Serial, Value::Number(serial));
    }
}

identity_schema!(Nrp);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_nik_decode() {
        let nik = Nik::decode_at("3515155202000005", today());
        assert!(nik.is_valid());
        assert!(nik.is_len_valid());
        assert_eq!(nik.len(), 16);
        assert_eq!(nik.region(), Some("351515"));
        assert_eq!(nik.birth_date(), Some(date(2000, 2, 12)));
        assert_eq!(nik.gender(), Some(Gender::Female));
        assert_eq!(nik.serial(), Some(5));
        assert_eq!(nik.format_raw(" "), "351515 520200 0005");
        assert_eq!(nik.to_string(), "3515155202000005");
    }

    #[test]
    fn test_nik_decode_male() {
        let nik = Nik::decode_at("3515151202000005", today());
        assert_eq!(nik.birth_date(), Some(date(2000, 2, 12)));
        assert_eq!(nik.gender(), Some(Gender::Male));
    }

    #[test]
    fn test_nik_encode_from_parts() {
        let mut nik = Nik::new();
        nik.set_region("351515");
        nik.set_birth_date(date(2000, 2, 12));
        nik.set_gender(Gender::Female);
        nik.set_serial(5);
        assert_eq!(nik.encode().unwrap(), "3515155202000005");
        assert!(nik.is_len_valid());
    }

    #[test]
    fn test_nik_invalid_date() {
        // day 32 after unfolding (72 - 40), not a real date
        let nik = Nik::decode_at("3515157202000005", today());
        assert!(!nik.is_valid());
        assert_eq!(nik.birth_date(), None);
        assert_eq!(nik.gender(), None);
        // the other fields still decoded
        assert_eq!(nik.region(), Some("351515"));
        assert_eq!(nik.serial(), Some(5));
    }

    #[test]
    fn test_nip_decode() {
        let nip = Nip::decode_at("196407101989031001", today());
        assert!(nip.is_valid());
        assert_eq!(nip.len(), 18);
        assert_eq!(nip.birth_date(), Some(date(1964, 7, 10)));
        assert_eq!(nip.appointment(), Some(date(1989, 3, 1)));
        assert_eq!(nip.gender_code(), Some(1));
        assert_eq!(nip.gender(), Some(Gender::Male));
        assert_eq!(nip.serial(), Some(1));
        assert_eq!(nip.format_raw(" "), "19640710 198903 1 001");
    }

    #[test]
    fn test_nip_short_input_leaves_trailing_unset() {
        let nip = Nip::decode_at("19640710198903", today());
        assert!(!nip.is_valid());
        assert!(!nip.is_len_valid());
        assert_eq!(nip.birth_date(), Some(date(1964, 7, 10)));
        assert_eq!(nip.appointment(), Some(date(1989, 3, 1)));
        assert_eq!(nip.gender_code(), None);
        assert_eq!(nip.serial(), None);
    }

    #[test]
    fn test_nip_encode_from_parts() {
        let mut nip = Nip::new();
        nip.set_birth_date(date(1964, 7, 10));
        nip.set_appointment(date(1989, 3, 1));
        nip.set_gender(Gender::Female);
        nip.set_serial(1);
        assert_eq!(nip.encode().unwrap(), "196407101989032001");
    }

    #[test]
    fn test_nrp_decode() {
        let nrp = Nrp::decode_at("99020123", today());
        assert!(nrp.is_valid());
        assert_eq!(nrp.len(), 8);
        assert_eq!(nrp.birth_date(), Some(date(1999, 2, 1)));
        assert_eq!(nrp.serial(), Some(123));
    }

    #[test]
    fn test_nrp_roundtrip() {
        let mut nrp = Nrp::new();
        nrp.set_birth_date(date(1999, 2, 17));
        nrp.set_serial(123);
        // only year and month survive the layout
        assert_eq!(nrp.encode().unwrap(), "99020123");
        let decoded = Nrp::decode_at("99020123", today());
        assert_eq!(decoded.birth_date(), Some(date(1999, 2, 1)));
    }

    #[test]
    fn test_empty_schema_is_invalid() {
        assert!(!Nik::new().is_valid());
        assert!(!Nip::new().is_valid());
        assert!(!Nrp::new().is_valid());
    }

    proptest! {
        #[test]
        fn test_nik_roundtrip(
            region in "[0-9]{6}",
            year in 1940i32..=2020,
            month in 1u32..=12,
            day in 1u32..=28,
            female in proptest::bool::ANY,
            serial in 0u32..=9999,
        ) {
            let birth = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let gender = if female { Gender::Female } else { Gender::Male };

            let mut nik = Nik::new();
            nik.set_region(&region);
            nik.set_birth_date(birth);
            nik.set_gender(gender);
            nik.set_serial(serial);
            let raw = nik.encode().unwrap().to_string();
            prop_assert_eq!(raw.len(), 16);

            let decoded = Nik::decode_at(&raw, today());
            prop_assert!(decoded.is_valid());
            prop_assert!(decoded.is_len_valid());
            prop_assert_eq!(decoded.region(), Some(region.as_str()));
            prop_assert_eq!(decoded.birth_date(), Some(birth));
            prop_assert_eq!(decoded.gender(), Some(gender));
            prop_assert_eq!(decoded.serial(), Some(serial));
        }

        #[test]
        fn test_nip_roundtrip(
            birth_year in 1940i32..=2005,
            appt_year in 1960i32..=2024,
            month in 1u32..=12,
            day in 1u32..=28,
            female in proptest::bool::ANY,
            serial in 0u32..=999,
        ) {
            let birth = NaiveDate::from_ymd_opt(birth_year, month, day).unwrap();
            let appointment = NaiveDate::from_ymd_opt(appt_year, month, 1).unwrap();
            let gender = if female { Gender::Female } else { Gender::Male };

            let mut nip = Nip::new();
            nip.set_birth_date(birth);
            nip.set_appointment(appointment);
            nip.set_gender(gender);
            nip.set_serial(serial);
            let raw = nip.encode().unwrap().to_string();
            prop_assert_eq!(raw.len(), 18);

            let decoded = Nip::decode_at(&raw, today());
            prop_assert!(decoded.is_valid());
            prop_assert_eq!(decoded.birth_date(), Some(birth));
            prop_assert_eq!(decoded.appointment(), Some(appointment));
            prop_assert_eq!(decoded.gender(), Some(gender));
            prop_assert_eq!(decoded.serial(), Some(serial));
        }
    }
}
