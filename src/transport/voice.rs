use serde::Deserialize;

use super::{DecodeError, error_message, non_empty, push_optional, required};
use crate::domain::{
    CallEntry, CallResponse, PlaceCall, RawPhoneNumber, TransferCall, TransferCallResponse,
    Username,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallJsonResponse {
    #[serde(default)]
    entries: Option<Vec<CallJsonEntry>>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallJsonEntry {
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TransferCallJsonResponse {
    status: Option<String>,
    error_message: Option<String>,
}

pub fn encode_call_form(username: &Username, request: &PlaceCall) -> Vec<(String, String)> {
    let to = request
        .to
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    let mut params = vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        ("from".to_owned(), request.from.raw().to_owned()),
        ("to".to_owned(), to),
    ];
    push_optional(
        &mut params,
        "clientRequestId",
        request.client_request_id.as_deref(),
    );
    params
}

pub fn encode_transfer_call_form(request: &TransferCall) -> Vec<(String, String)> {
    let mut params = vec![
        ("sessionId".to_owned(), request.session_id.clone()),
        (
            "phoneNumber".to_owned(),
            request.phone_number.raw().to_owned(),
        ),
        ("callLeg".to_owned(), request.call_leg.as_str().to_owned()),
    ];
    push_optional(
        &mut params,
        "holdMusicUrl",
        request.hold_music_url.as_ref().map(url::Url::as_str),
    );
    params
}

pub fn decode_call_json_response(json: &str) -> Result<CallResponse, DecodeError> {
    let parsed: CallJsonResponse = serde_json::from_str(json)?;

    let entries = required(parsed.entries, "entries")?
        .into_iter()
        .map(|entry| {
            Ok(CallEntry {
                phone_number: RawPhoneNumber::new(required(entry.phone_number, "phoneNumber")?),
                status: required(entry.status, "status")?,
                session_id: non_empty(entry.session_id).filter(|id| id != "None"),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(CallResponse {
        entries,
        error_message: error_message(parsed.error_message),
    })
}

/// Transfer responses are a bare summary; every field defaults when absent.
pub fn decode_transfer_call_json_response(
    json: &str,
) -> Result<TransferCallResponse, DecodeError> {
    let parsed: TransferCallJsonResponse = serde_json::from_str(json)?;
    Ok(TransferCallResponse {
        status: parsed.status.unwrap_or_default(),
        error_message: error_message(parsed.error_message),
    })
}
