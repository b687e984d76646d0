use std::borrow::Cow;
use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Africa's Talking API key, sent in the `apiKey` header.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiKey(String);

impl ApiKey {
    /// Header name used by Africa's Talking (`apiKey`).
    pub const FIELD: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Africa's Talking application username (`username`).
///
/// Invariant: non-empty after trimming. Use `sandbox` for the sandbox environment.
pub struct Username(String);

impl Username {
    /// Form/JSON field name used by Africa's Talking (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number exactly as forwarded to Africa's Talking.
///
/// Only surrounding whitespace is trimmed; the aggregator validates the format. For E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(value.trim().to_owned())
    }

    /// Raw (trimmed) value as sent to Africa's Talking.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawPhoneNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawPhoneNumber {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "phoneNumber";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix,
    /// e.g. `Some(country::Id::KE)` for local Kenyan numbers such as `0711 082 300`.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// ISO 4217 currency code as used in Africa's Talking amount strings.
///
/// Unknown codes are preserved as-is; the constants cover the markets the aggregator serves.
pub struct CurrencyCode(Cow<'static, str>);

impl CurrencyCode {
    /// Kenya.
    pub const KES: Self = Self(Cow::Borrowed("KES"));
    /// Uganda.
    pub const UGX: Self = Self(Cow::Borrowed("UGX"));
    /// Tanzania.
    pub const TZS: Self = Self(Cow::Borrowed("TZS"));
    /// Nigeria.
    pub const NGN: Self = Self(Cow::Borrowed("NGN"));
    /// Ethiopia.
    pub const ETB: Self = Self(Cow::Borrowed("ETB"));
    /// Malawi.
    pub const MWK: Self = Self(Cow::Borrowed("MWK"));
    /// South Africa.
    pub const ZAR: Self = Self(Cow::Borrowed("ZAR"));
    /// Zambia.
    pub const ZMW: Self = Self(Cow::Borrowed("ZMW"));
    /// Rwanda.
    pub const RWF: Self = Self(Cow::Borrowed("RWF"));
    /// Ghana.
    pub const GHS: Self = Self(Cow::Borrowed("GHS"));
    /// Senegal, Ivory Coast and Cameroon.
    pub const XOF: Self = Self(Cow::Borrowed("XOF"));

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Monetary value split out of an amount string such as `"KES 10.0000"`.
pub struct Money {
    pub currency: CurrencyCode,
    pub amount: f64,
}

impl Money {
    pub fn new(currency: CurrencyCode, amount: f64) -> Self {
        Self { currency, amount }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::new(String::new()),
            amount: 0.0,
        }
    }
}

impl fmt::Display for Money {
    /// Wire format: `"<CURRENCY> <amount>"` with two decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Unit of a mobile data bundle.
pub enum DataUnit {
    #[default]
    Mb,
    Gb,
}

impl DataUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Validity period of a mobile data bundle.
pub enum DataValidity {
    #[default]
    Day,
    Week,
    BiWeek,
    Month,
    Quarterly,
}

impl DataValidity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::BiWeek => "BiWeek",
            Self::Month => "Month",
            Self::Quarterly => "Quarterly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Leg of an active voice session to transfer (`callLeg`).
pub enum CallLeg {
    #[default]
    Callee,
    Caller,
}

impl CallLeg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Callee => "callee",
            Self::Caller => "caller",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-recipient SMS status code (`statusCode`).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct SmsStatusCode(u16);

impl SmsStatusCode {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownSmsStatusCode> {
        KnownSmsStatusCode::from_code(self.0)
    }

    /// Returns `true` for codes the aggregator accepted for delivery (`100..=102`).
    pub fn is_accepted(self) -> bool {
        matches!(
            self.known(),
            Some(
                KnownSmsStatusCode::Processed
                    | KnownSmsStatusCode::Sent
                    | KnownSmsStatusCode::Queued
            )
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known Africa's Talking messaging status codes.
pub enum KnownSmsStatusCode {
    Processed,
    Sent,
    Queued,
    RiskHold,
    InvalidSenderId,
    InvalidPhoneNumber,
    UnsupportedNumberType,
    InsufficientBalance,
    UserInBlacklist,
    CouldNotRoute,
    DoNotDisturbRejection,
    InternalServerError,
    GatewayError,
    RejectedByGateway,
}

impl KnownSmsStatusCode {
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            100 => Self::Processed,
            101 => Self::Sent,
            102 => Self::Queued,
            401 => Self::RiskHold,
            402 => Self::InvalidSenderId,
            403 => Self::InvalidPhoneNumber,
            404 => Self::UnsupportedNumberType,
            405 => Self::InsufficientBalance,
            406 => Self::UserInBlacklist,
            407 => Self::CouldNotRoute,
            409 => Self::DoNotDisturbRejection,
            500 => Self::InternalServerError,
            501 => Self::GatewayError,
            502 => Self::RejectedByGateway,
            _ => return None,
        })
    }
}
