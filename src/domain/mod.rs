//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    AirtimeRecipient, BulkSmsOptions, DataRecipient, PlaceCall, PremiumSmsOptions, SendAirtime,
    SendBulkSms, SendMobileData, SendPremiumSms, TransferCall,
};
pub use response::{
    AirtimeResponse, AirtimeTransaction, CallEntry, CallResponse, DataEntry, MobileDataResponse,
    SmsRecipient, SmsResponse, TransferCallResponse,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CallLeg, CurrencyCode, DataUnit, DataValidity, KnownSmsStatusCode, Money, PhoneNumber,
    RawPhoneNumber, SmsStatusCode, Username,
};
