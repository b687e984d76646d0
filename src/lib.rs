//! Typed Rust client for the Africa's Talking airtime, mobile data, SMS and voice APIs.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! aggregator's wire-format quirks (form fields, embedded JSON arrays, `"KES 10.00"` amount
//! strings), and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use africastalking::{
//!     AfricasTalkingClient, BulkSmsOptions, Credentials, Environment, SendBulkSms,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), africastalking::AfricasTalkingError> {
//!     let credentials = Credentials::new("sandbox", "...")?;
//!     let client = AfricasTalkingClient::new(credentials, Environment::Sandbox);
//!     let request = SendBulkSms::new(
//!         vec!["+254711082300".into()],
//!         "Hello",
//!         BulkSmsOptions::default(),
//!     );
//!     let response = client.send_bulk_sms(request).await?;
//!     println!("{}", response.message);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AfricasTalkingClient, AfricasTalkingClientBuilder, AfricasTalkingError, Credentials,
    Endpoints, Environment,
};
pub use domain::{
    AirtimeRecipient, AirtimeResponse, AirtimeTransaction, ApiKey, BulkSmsOptions, CallEntry,
    CallLeg, CallResponse, CurrencyCode, DataEntry, DataRecipient, DataUnit, DataValidity,
    KnownSmsStatusCode, MobileDataResponse, Money, PhoneNumber, PlaceCall, PremiumSmsOptions,
    RawPhoneNumber, SendAirtime, SendBulkSms, SendMobileData, SendPremiumSms, SmsRecipient,
    SmsResponse, SmsStatusCode, TransferCall, TransferCallResponse, Username, ValidationError,
};
pub use transport::DecodeError;
