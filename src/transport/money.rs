use serde::Deserialize;
use serde::de::Error as DeError;

use crate::domain::{CurrencyCode, Money};

/// Amount field returned by Africa's Talking, normally `"<CURRENCY> <amount>"`.
///
/// Bare JSON numbers are accepted too and carry no currency.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportAmount {
    Composite(String),
    Number(f64),
}

impl TransportAmount {
    pub fn into_money(self) -> Money {
        match self {
            Self::Composite(value) => split_amount(&value),
            Self::Number(amount) => Money::new(CurrencyCode::new(String::new()), amount),
        }
    }
}

impl<'de> Deserialize<'de> for TransportAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self::Composite(parsed))
            }
            Some(b'-' | b'0'..=b'9') => {
                let parsed = token.parse::<f64>().map_err(D::Error::custom)?;
                Ok(Self::Number(parsed))
            }
            _ => Err(D::Error::custom(
                "expected amount field to be JSON string or number",
            )),
        }
    }
}

/// Split an amount string on its first whitespace into currency and numeric parts.
///
/// A string without whitespace is taken as a bare currency with a zero amount, and an
/// unparsable numeric part yields zero.
pub fn split_amount(value: &str) -> Money {
    let value = value.trim();
    let (currency, amount) = match value.split_once(char::is_whitespace) {
        Some((currency, amount)) => (currency, amount.trim().parse::<f64>().unwrap_or(0.0)),
        None => (value, 0.0),
    };
    Money::new(CurrencyCode::new(currency), amount)
}
