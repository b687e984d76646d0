use crate::domain::value::{Money, RawPhoneNumber, SmsStatusCode};

#[derive(Debug, Clone, PartialEq)]
pub struct AirtimeResponse {
    pub num_sent: u32,
    pub total_amount: Money,
    pub total_discount: Money,
    /// Set when the aggregator rejected the whole request.
    pub error_message: Option<String>,
    pub responses: Vec<AirtimeTransaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirtimeTransaction {
    pub phone_number: RawPhoneNumber,
    pub amount: Money,
    pub discount: Money,
    /// e.g. `Sent`, `Failed`.
    pub status: String,
    /// Only generated when the status is `Sent`.
    pub request_id: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MobileDataResponse {
    pub entries: Vec<DataEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataEntry {
    pub phone_number: RawPhoneNumber,
    pub provider: String,
    pub status: String,
    pub transaction_id: Option<String>,
    pub value: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmsResponse {
    /// Summary such as `Sent to 1/1 Total Cost: KES 0.8000`.
    pub message: String,
    pub recipients: Vec<SmsRecipient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmsRecipient {
    pub number: RawPhoneNumber,
    pub status: String,
    pub status_code: SmsStatusCode,
    pub cost: Money,
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResponse {
    pub entries: Vec<CallEntry>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEntry {
    pub phone_number: RawPhoneNumber,
    /// e.g. `Queued`, `InvalidPhoneNumber`, `DestinationNotSupported`, `InsufficientCredit`.
    pub status: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferCallResponse {
    pub status: String,
    pub error_message: Option<String>,
}
