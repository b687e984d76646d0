use serde::Deserialize;
use serde_json::json;

use super::money::TransportAmount;
use super::{DecodeError, TransportCount, error_message, non_empty, required};
use crate::domain::{
    AirtimeResponse, AirtimeTransaction, Money, RawPhoneNumber, SendAirtime, Username,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AirtimeJsonResponse {
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    num_sent: Option<TransportCount>,
    #[serde(default)]
    total_amount: Option<TransportAmount>,
    #[serde(default)]
    total_discount: Option<TransportAmount>,
    #[serde(default)]
    responses: Option<Vec<AirtimeJsonTransaction>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AirtimeJsonTransaction {
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    amount: Option<TransportAmount>,
    #[serde(default)]
    discount: Option<TransportAmount>,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// `recipients` is a JSON array literal embedded in a single form field.
pub fn encode_airtime_form(username: &Username, request: &SendAirtime) -> Vec<(String, String)> {
    let recipients = request
        .recipients
        .iter()
        .map(|recipient| {
            json!({
                "phoneNumber": recipient.phone_number.raw(),
                "amount": recipient.amount.to_string(),
            })
        })
        .collect::<Vec<_>>();

    let mut params = vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        (
            "recipients".to_owned(),
            serde_json::Value::Array(recipients).to_string(),
        ),
    ];
    if let Some(max_num_retry) = request.max_num_retry {
        params.push(("maxNumRetry".to_owned(), max_num_retry.to_string()));
    }
    params
}

pub fn decode_airtime_json_response(json: &str) -> Result<AirtimeResponse, DecodeError> {
    let parsed: AirtimeJsonResponse = serde_json::from_str(json)?;

    let responses = required(parsed.responses, "responses")?
        .into_iter()
        .map(|entry| {
            Ok(AirtimeTransaction {
                phone_number: RawPhoneNumber::new(required(entry.phone_number, "phoneNumber")?),
                status: required(entry.status, "status")?,
                amount: money_or_default(entry.amount),
                discount: money_or_default(entry.discount),
                request_id: non_empty(entry.request_id).filter(|id| id != "None"),
                error_message: error_message(entry.error_message),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    let num_sent = match parsed.num_sent {
        Some(count) => count.into_u64("numSent")?,
        None => 0,
    };

    Ok(AirtimeResponse {
        num_sent: u32::try_from(num_sent).unwrap_or(u32::MAX),
        total_amount: money_or_default(parsed.total_amount),
        total_discount: money_or_default(parsed.total_discount),
        error_message: error_message(parsed.error_message),
        responses,
    })
}

fn money_or_default(amount: Option<TransportAmount>) -> Money {
    amount.map(TransportAmount::into_money).unwrap_or_default()
}
