use std::time::Duration;

use serde::Deserialize;

use super::money::TransportAmount;
use super::{DecodeError, TransportCount, non_empty, push_flag, push_optional, required};
use crate::domain::{
    RawPhoneNumber, SendBulkSms, SendPremiumSms, SmsRecipient, SmsResponse, SmsStatusCode,
    Username,
};

#[derive(Debug, Clone, Deserialize)]
struct SmsJsonResponse {
    #[serde(default, rename = "SMSMessageData")]
    sms_message_data: Option<SmsMessageData>,
}

#[derive(Debug, Clone, Deserialize)]
struct SmsMessageData {
    #[serde(default, rename = "Message")]
    message: Option<String>,
    #[serde(default, rename = "Recipients")]
    recipients: Option<Vec<SmsJsonRecipient>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SmsJsonRecipient {
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    status_code: Option<TransportCount>,
    #[serde(default)]
    cost: Option<TransportAmount>,
    #[serde(default)]
    message_id: Option<String>,
}

pub fn encode_bulk_sms_form(username: &Username, request: &SendBulkSms) -> Vec<(String, String)> {
    let options = &request.options;
    let mut params = base_params(username, &request.to, &request.message);
    push_optional(&mut params, "from", options.from.as_deref());
    push_flag(&mut params, "enqueue", options.enqueue);
    push_flag(&mut params, "bulkSMSMode", options.bulk_sms_mode);
    push_retry(&mut params, options.retry_duration);
    params
}

/// Premium messages are billed to the subscriber, so `bulkSMSMode` is always `0`.
pub fn encode_premium_sms_form(
    username: &Username,
    request: &SendPremiumSms,
) -> Vec<(String, String)> {
    let options = &request.options;
    let mut params = base_params(username, &request.to, &request.message);
    push_optional(&mut params, "from", options.from.as_deref());
    push_optional(&mut params, "keyword", options.keyword.as_deref());
    push_flag(&mut params, "enqueue", options.enqueue);
    push_flag(&mut params, "bulkSMSMode", false);
    push_optional(&mut params, "linkId", options.link_id.as_deref());
    push_retry(&mut params, options.retry_duration);
    push_optional(&mut params, "requestId", options.request_id.as_deref());
    params
}

fn base_params(username: &Username, to: &[RawPhoneNumber], message: &str) -> Vec<(String, String)> {
    let to = to
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        ("to".to_owned(), to),
        ("message".to_owned(), message.to_owned()),
    ]
}

fn push_retry(params: &mut Vec<(String, String)>, retry: Duration) {
    let hours = (retry.as_secs_f64() / 3600.0).round();
    params.push(("retryDurationInHours".to_owned(), format!("{hours:.0}")));
}

pub fn decode_sms_json_response(json: &str) -> Result<SmsResponse, DecodeError> {
    let parsed: SmsJsonResponse = serde_json::from_str(json)?;
    let data = required(parsed.sms_message_data, "SMSMessageData")?;

    let recipients = required(data.recipients, "SMSMessageData.Recipients")?
        .into_iter()
        .map(|recipient| {
            let code = required(recipient.status_code, "statusCode")?.into_u64("statusCode")?;
            let code = u16::try_from(code).map_err(|_| DecodeError::InvalidNumber {
                field: "statusCode",
                value: code.to_string(),
            })?;
            Ok(SmsRecipient {
                number: RawPhoneNumber::new(required(recipient.number, "number")?),
                status: required(recipient.status, "status")?,
                status_code: SmsStatusCode::new(code),
                cost: recipient
                    .cost
                    .map(TransportAmount::into_money)
                    .unwrap_or_default(),
                message_id: non_empty(recipient.message_id).filter(|id| id != "None"),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(SmsResponse {
        message: data.message.unwrap_or_default(),
        recipients,
    })
}
