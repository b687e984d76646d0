//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod airtime;
mod mobile_data;
mod money;
mod sms;
mod voice;

use serde::Deserialize;

pub use airtime::{decode_airtime_json_response, encode_airtime_form};
pub use mobile_data::{decode_mobile_data_json_response, encode_mobile_data_json};
pub use sms::{decode_sms_json_response, encode_bulk_sms_form, encode_premium_sms_form};
pub use voice::{
    decode_call_json_response, decode_transfer_call_json_response, encode_call_form,
    encode_transfer_call_form,
};

/// Errors produced while mapping a response body onto the typed responses.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("response field `{field}` is not a valid number: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField { field })
}

/// Count-like value sent as either a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCount {
    Int(u64),
    String(String),
}

impl TransportCount {
    fn into_u64(self, field: &'static str) -> Result<u64, DecodeError> {
        match self {
            Self::Int(value) => Ok(value),
            Self::String(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| DecodeError::InvalidNumber { field, value }),
        }
    }
}

/// The aggregator reports "no error" as the literal string `None`.
fn error_message(value: Option<String>) -> Option<String> {
    value.filter(|message| {
        let trimmed = message.trim();
        !trimmed.is_empty() && trimmed != "None"
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.trim().is_empty())
}

fn push_flag(params: &mut Vec<(String, String)>, key: &str, enabled: bool) {
    let value = if enabled { "1" } else { "0" };
    params.push((key.to_owned(), value.to_owned()));
}

fn push_optional(params: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value.to_owned()));
    }
}
