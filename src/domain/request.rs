use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::domain::value::{CallLeg, CurrencyCode, DataUnit, DataValidity, Money, RawPhoneNumber};

#[derive(Debug, Clone, PartialEq)]
/// One airtime top-up target.
pub struct AirtimeRecipient {
    pub phone_number: RawPhoneNumber,
    pub amount: Money,
}

impl AirtimeRecipient {
    pub fn new(
        phone_number: impl Into<RawPhoneNumber>,
        currency: CurrencyCode,
        amount: f64,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            amount: Money::new(currency, amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Request for `version1/airtime/send`.
pub struct SendAirtime {
    pub recipients: Vec<AirtimeRecipient>,
    /// How many times the aggregator retries a failed top-up (`maxNumRetry`).
    pub max_num_retry: Option<u32>,
}

impl SendAirtime {
    pub fn new(recipients: Vec<AirtimeRecipient>) -> Self {
        Self {
            recipients,
            max_num_retry: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One mobile data bundle target.
pub struct DataRecipient {
    pub phone_number: RawPhoneNumber,
    pub quantity: u32,
    pub unit: DataUnit,
    pub validity: DataValidity,
    pub is_promo_bundle: bool,
    /// Free-form key/value pairs echoed back in delivery notifications.
    pub metadata: BTreeMap<String, String>,
}

impl DataRecipient {
    pub fn new(
        phone_number: impl Into<RawPhoneNumber>,
        quantity: u32,
        unit: DataUnit,
        validity: DataValidity,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            quantity,
            unit,
            validity,
            is_promo_bundle: false,
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for `mobile/data/request`. The username is taken from the client credentials.
pub struct SendMobileData {
    pub product_name: String,
    pub recipients: Vec<DataRecipient>,
}

impl SendMobileData {
    pub fn new(product_name: impl Into<String>, recipients: Vec<DataRecipient>) -> Self {
        Self {
            product_name: product_name.into(),
            recipients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSmsOptions {
    /// Registered short code or alphanumeric sender id. The aggregator default is used when `None`.
    pub from: Option<String>,
    /// Bill the sender (`bulkSMSMode=1`). Must stay enabled for bulk messages.
    pub bulk_sms_mode: bool,
    /// Queue the messages and send them after responding (`enqueue=1`).
    pub enqueue: bool,
    /// Sent as whole hours (`retryDurationInHours`).
    pub retry_duration: Duration,
}

impl Default for BulkSmsOptions {
    fn default() -> Self {
        Self {
            from: None,
            bulk_sms_mode: true,
            enqueue: false,
            retry_duration: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for `version1/messaging` in bulk mode.
pub struct SendBulkSms {
    pub to: Vec<RawPhoneNumber>,
    pub message: String,
    pub options: BulkSmsOptions,
}

impl SendBulkSms {
    pub fn new(
        to: Vec<RawPhoneNumber>,
        message: impl Into<String>,
        options: BulkSmsOptions,
    ) -> Self {
        Self {
            to,
            message: message.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PremiumSmsOptions {
    pub from: Option<String>,
    /// Keyword of the premium subscription service.
    pub keyword: Option<String>,
    pub enqueue: bool,
    /// Forwarded to the application with on-demand messages; required to reply to them.
    pub link_id: Option<String>,
    pub retry_duration: Duration,
    /// Client-side request identifier echoed in delivery reports.
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for `version1/messaging` as a premium (subscriber-billed) message.
pub struct SendPremiumSms {
    pub to: Vec<RawPhoneNumber>,
    pub message: String,
    pub options: PremiumSmsOptions,
}

impl SendPremiumSms {
    pub fn new(
        to: Vec<RawPhoneNumber>,
        message: impl Into<String>,
        options: PremiumSmsOptions,
    ) -> Self {
        Self {
            to,
            message: message.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for the voice `call` endpoint.
pub struct PlaceCall {
    /// Africa's Talking virtual number used as caller id.
    pub from: RawPhoneNumber,
    pub to: Vec<RawPhoneNumber>,
    pub client_request_id: Option<String>,
}

impl PlaceCall {
    pub fn new(from: impl Into<RawPhoneNumber>, to: Vec<RawPhoneNumber>) -> Self {
        Self {
            from: from.into(),
            to,
            client_request_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request for the voice `callTransfer` endpoint.
pub struct TransferCall {
    pub session_id: String,
    pub phone_number: RawPhoneNumber,
    pub call_leg: CallLeg,
    pub hold_music_url: Option<Url>,
}

impl TransferCall {
    pub fn new(session_id: impl Into<String>, phone_number: impl Into<RawPhoneNumber>) -> Self {
        Self {
            session_id: session_id.into(),
            phone_number: phone_number.into(),
            call_leg: CallLeg::default(),
            hold_music_url: None,
        }
    }
}
