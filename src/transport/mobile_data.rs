use serde::Deserialize;
use serde_json::json;

use super::money::TransportAmount;
use super::{DecodeError, non_empty, required};
use crate::domain::{DataEntry, MobileDataResponse, RawPhoneNumber, SendMobileData, Username};

#[derive(Debug, Clone, Deserialize)]
struct MobileDataJsonResponse {
    #[serde(default)]
    entries: Option<Vec<DataJsonEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataJsonEntry {
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    provider: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    value: Option<TransportAmount>,
}

/// Mobile data is the only service with a JSON request body.
pub fn encode_mobile_data_json(username: &Username, request: &SendMobileData) -> serde_json::Value {
    let recipients = request
        .recipients
        .iter()
        .map(|recipient| {
            let mut entry = json!({
                "phoneNumber": recipient.phone_number.raw(),
                "quantity": recipient.quantity,
                "unit": recipient.unit.as_str(),
                "validity": recipient.validity.as_str(),
                "isPromoBundle": recipient.is_promo_bundle,
            });
            if !recipient.metadata.is_empty() {
                entry["metadata"] = json!(recipient.metadata);
            }
            entry
        })
        .collect::<Vec<_>>();

    json!({
        "username": username.as_str(),
        "productName": request.product_name,
        "recipients": recipients,
    })
}

pub fn decode_mobile_data_json_response(json: &str) -> Result<MobileDataResponse, DecodeError> {
    let parsed: MobileDataJsonResponse = serde_json::from_str(json)?;

    let entries = required(parsed.entries, "entries")?
        .into_iter()
        .map(|entry| {
            Ok(DataEntry {
                phone_number: RawPhoneNumber::new(required(entry.phone_number, "phoneNumber")?),
                status: required(entry.status, "status")?,
                provider: entry.provider.unwrap_or_default(),
                transaction_id: non_empty(entry.transaction_id),
                value: entry
                    .value
                    .map(TransportAmount::into_money)
                    .unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(MobileDataResponse { entries })
}
