//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::domain::{
    AirtimeResponse, ApiKey, CallResponse, MobileDataResponse, PlaceCall, SendAirtime,
    SendBulkSms, SendMobileData, SendPremiumSms, SmsResponse, TransferCall, TransferCallResponse,
    Username, ValidationError,
};
use crate::transport::DecodeError;

const SANDBOX_AIRTIME_ENDPOINT: &str =
    "https://api.sandbox.africastalking.com/version1/airtime/send";
const LIVE_AIRTIME_ENDPOINT: &str = "https://api.africastalking.com/version1/airtime/send";
const SANDBOX_MOBILE_DATA_ENDPOINT: &str =
    "https://payments.sandbox.africastalking.com/mobile/data/request";
const LIVE_MOBILE_DATA_ENDPOINT: &str = "https://payments.africastalking.com/mobile/data/request";
const SANDBOX_MESSAGING_ENDPOINT: &str =
    "https://api.sandbox.africastalking.com/version1/messaging";
const LIVE_MESSAGING_ENDPOINT: &str = "https://api.africastalking.com/version1/messaging";
const SANDBOX_VOICE_CALL_ENDPOINT: &str = "https://voice.sandbox.africastalking.com/call";
const LIVE_VOICE_CALL_ENDPOINT: &str = "https://voice.africastalking.com/call";
const SANDBOX_VOICE_TRANSFER_ENDPOINT: &str =
    "https://voice.sandbox.africastalking.com/callTransfer";
const LIVE_VOICE_TRANSFER_ENDPOINT: &str = "https://voice.africastalking.com/callTransfer";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq)]
enum HttpBody {
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

impl HttpBody {
    fn content_type(&self) -> &'static str {
        match self {
            Self::Form(_) => FORM_CONTENT_TYPE,
            Self::Json(_) => JSON_CONTENT_TYPE,
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Form(params) => url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish()
                .into_bytes(),
            Self::Json(value) => value.to_string().into_bytes(),
        }
    }
}

#[derive(Debug, Clone)]
struct HttpRequest<'a> {
    url: &'a str,
    api_key: &'a str,
    body: HttpBody,
    timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let content_type = request.body.content_type();
            let mut builder = self
                .client
                .post(request.url)
                .header(ApiKey::FIELD, request.api_key)
                .header(ACCEPT, JSON_CONTENT_TYPE)
                .header(CONTENT_TYPE, content_type)
                .body(request.body.into_bytes());
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Africa's Talking deployment to talk to.
pub enum Environment {
    /// `*.sandbox.africastalking.com`; pair with the `sandbox` username.
    Sandbox,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Endpoint URLs for every service the client calls.
pub struct Endpoints {
    pub airtime: String,
    pub mobile_data: String,
    pub messaging: String,
    pub voice_call: String,
    pub voice_transfer: String,
}

impl Endpoints {
    /// Default endpoints for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Sandbox => Self {
                airtime: SANDBOX_AIRTIME_ENDPOINT.to_owned(),
                mobile_data: SANDBOX_MOBILE_DATA_ENDPOINT.to_owned(),
                messaging: SANDBOX_MESSAGING_ENDPOINT.to_owned(),
                voice_call: SANDBOX_VOICE_CALL_ENDPOINT.to_owned(),
                voice_transfer: SANDBOX_VOICE_TRANSFER_ENDPOINT.to_owned(),
            },
            Environment::Live => Self {
                airtime: LIVE_AIRTIME_ENDPOINT.to_owned(),
                mobile_data: LIVE_MOBILE_DATA_ENDPOINT.to_owned(),
                messaging: LIVE_MESSAGING_ENDPOINT.to_owned(),
                voice_call: LIVE_VOICE_CALL_ENDPOINT.to_owned(),
                voice_transfer: LIVE_VOICE_TRANSFER_ENDPOINT.to_owned(),
            },
        }
    }
}

#[derive(Debug, Clone)]
/// Application credentials for Africa's Talking API calls.
pub struct Credentials {
    username: Username,
    api_key: ApiKey,
}

impl Credentials {
    /// Validate that both the username and API key are non-empty after trimming.
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            api_key: ApiKey::new(api_key)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AfricasTalkingClient`].
///
/// Nothing is retried; every failure is handed back to the caller as-is.
pub enum AfricasTalkingError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// HTTP status `>= 400`; `message` is the raw response body.
    #[error("API rejected request ({status}): {message}")]
    ApiRejected { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// One of the credential constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`AfricasTalkingClient`].
///
/// Use this when you need to customize endpoints, timeout, or user-agent.
pub struct AfricasTalkingClientBuilder {
    credentials: Credentials,
    endpoints: Endpoints,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AfricasTalkingClientBuilder {
    /// Create a builder targeting the live environment with no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::for_environment(Environment::Live),
            timeout: None,
            user_agent: None,
        }
    }

    /// Select the environment. This resets every endpoint to that environment's default.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.endpoints = Endpoints::for_environment(environment);
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn airtime_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.airtime = endpoint.into();
        self
    }

    pub fn mobile_data_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.mobile_data = endpoint.into();
        self
    }

    pub fn messaging_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.messaging = endpoint.into();
        self
    }

    pub fn voice_call_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.voice_call = endpoint.into();
        self
    }

    pub fn voice_transfer_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.voice_transfer = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AfricasTalkingClient`].
    pub fn build(self) -> Result<AfricasTalkingClient, AfricasTalkingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| AfricasTalkingError::Transport(Box::new(err)))?;

        Ok(AfricasTalkingClient {
            credentials: self.credentials,
            endpoints: Arc::new(self.endpoints),
            call_timeout: None,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Africa's Talking client for airtime, mobile data, SMS and voice.
///
/// Cloning is cheap and clones share one connection pool. Every operation issues exactly
/// one POST; dropping the returned future cancels the call.
pub struct AfricasTalkingClient {
    credentials: Credentials,
    endpoints: Arc<Endpoints>,
    call_timeout: Option<Duration>,
    http: Arc<dyn HttpTransport>,
}

impl AfricasTalkingClient {
    /// Create a client with default settings for `environment`.
    ///
    /// For more customization, use [`AfricasTalkingClient::builder`].
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            endpoints: Arc::new(Endpoints::for_environment(environment)),
            call_timeout: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> AfricasTalkingClientBuilder {
        AfricasTalkingClientBuilder::new(credentials)
    }

    /// Return a clone whose calls time out after `timeout`, overriding the client-wide value.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            call_timeout: Some(timeout),
            ..self.clone()
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Top up airtime for every recipient in the request.
    ///
    /// Errors:
    /// - [`AfricasTalkingError::ApiRejected`] for HTTP status `>= 400`,
    /// - [`AfricasTalkingError::Decode`] when the `responses` list or a required entry field
    ///   is absent.
    pub async fn send_airtime(
        &self,
        request: SendAirtime,
    ) -> Result<AirtimeResponse, AfricasTalkingError> {
        let params = crate::transport::encode_airtime_form(self.credentials.username(), &request);
        self.execute(
            "airtime",
            &self.endpoints.airtime,
            HttpBody::Form(params),
            crate::transport::decode_airtime_json_response,
        )
        .await
    }

    /// Send mobile data bundles. This is the only call with a JSON request body.
    pub async fn send_mobile_data(
        &self,
        request: SendMobileData,
    ) -> Result<MobileDataResponse, AfricasTalkingError> {
        let body = crate::transport::encode_mobile_data_json(self.credentials.username(), &request);
        self.execute(
            "mobile_data",
            &self.endpoints.mobile_data,
            HttpBody::Json(body),
            crate::transport::decode_mobile_data_json_response,
        )
        .await
    }

    /// Send a sender-billed bulk SMS.
    pub async fn send_bulk_sms(
        &self,
        request: SendBulkSms,
    ) -> Result<SmsResponse, AfricasTalkingError> {
        let params = crate::transport::encode_bulk_sms_form(self.credentials.username(), &request);
        self.execute(
            "bulk_sms",
            &self.endpoints.messaging,
            HttpBody::Form(params),
            crate::transport::decode_sms_json_response,
        )
        .await
    }

    /// Send a subscriber-billed premium SMS.
    pub async fn send_premium_sms(
        &self,
        request: SendPremiumSms,
    ) -> Result<SmsResponse, AfricasTalkingError> {
        let params =
            crate::transport::encode_premium_sms_form(self.credentials.username(), &request);
        self.execute(
            "premium_sms",
            &self.endpoints.messaging,
            HttpBody::Form(params),
            crate::transport::decode_sms_json_response,
        )
        .await
    }

    /// Place an outbound call to every number in `request.to`.
    pub async fn place_call(
        &self,
        request: PlaceCall,
    ) -> Result<CallResponse, AfricasTalkingError> {
        let params = crate::transport::encode_call_form(self.credentials.username(), &request);
        self.execute(
            "voice_call",
            &self.endpoints.voice_call,
            HttpBody::Form(params),
            crate::transport::decode_call_json_response,
        )
        .await
    }

    /// Transfer a leg of an active voice session to another number.
    pub async fn transfer_call(
        &self,
        request: TransferCall,
    ) -> Result<TransferCallResponse, AfricasTalkingError> {
        let params = crate::transport::encode_transfer_call_form(&request);
        self.execute(
            "voice_transfer",
            &self.endpoints.voice_transfer,
            HttpBody::Form(params),
            crate::transport::decode_transfer_call_json_response,
        )
        .await
    }

    async fn execute<T>(
        &self,
        service: &'static str,
        url: &str,
        body: HttpBody,
        decode: fn(&str) -> Result<T, DecodeError>,
    ) -> Result<T, AfricasTalkingError> {
        tracing::debug!(service, url, content_type = body.content_type(), "sending request");

        let response = self
            .http
            .post(HttpRequest {
                url,
                api_key: self.credentials.api_key().as_str(),
                body,
                timeout: self.call_timeout,
            })
            .await
            .map_err(AfricasTalkingError::Transport)?;

        tracing::debug!(
            service,
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        if response.status >= 400 {
            tracing::warn!(service, status = response.status, "request rejected by API");
            return Err(AfricasTalkingError::ApiRejected {
                status: response.status,
                message: response.body,
            });
        }

        Ok(decode(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{
        AirtimeRecipient, BulkSmsOptions, CurrencyCode, DataRecipient, DataUnit, DataValidity,
        Money, PremiumSmsOptions, RawPhoneNumber,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct RecordedRequest {
        url: String,
        api_key: String,
        body: HttpBody,
        timeout: Option<Duration>,
    }

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_request: Option<RecordedRequest>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_request: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> RecordedRequest {
            let state = self.state.lock().unwrap();
            state.last_request.clone().unwrap()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post<'a>(
            &'a self,
            request: HttpRequest<'a>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_request = Some(RecordedRequest {
                        url: request.url.to_owned(),
                        api_key: request.api_key.to_owned(),
                        body: request.body,
                        timeout: request.timeout,
                    });
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    #[derive(Debug)]
    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn post<'a>(
            &'a self,
            _request: HttpRequest<'a>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let err: Box<dyn StdError + Send + Sync> = Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ));
                Err::<HttpResponse, _>(err)
            })
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("sandbox", "test_key").unwrap()
    }

    fn make_client(transport: impl HttpTransport + 'static) -> AfricasTalkingClient {
        AfricasTalkingClient {
            credentials: credentials(),
            endpoints: Arc::new(Endpoints {
                airtime: "https://example.invalid/airtime".to_owned(),
                mobile_data: "https://example.invalid/data".to_owned(),
                messaging: "https://example.invalid/messaging".to_owned(),
                voice_call: "https://example.invalid/call".to_owned(),
                voice_transfer: "https://example.invalid/transfer".to_owned(),
            }),
            call_timeout: None,
            http: Arc::new(transport),
        }
    }

    fn form_params(request: &RecordedRequest) -> &[(String, String)] {
        match &request.body {
            HttpBody::Form(params) => params,
            HttpBody::Json(_) => panic!("expected form body, got JSON"),
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn airtime_request(phones: &[&str]) -> SendAirtime {
        SendAirtime::new(
            phones
                .iter()
                .map(|phone| AirtimeRecipient::new(*phone, CurrencyCode::KES, 10.0))
                .collect(),
        )
    }

    #[tokio::test]
    async fn send_airtime_posts_form_and_parses_response() {
        let json = r#"
        {
          "errorMessage": "None",
          "numSent": 1,
          "totalAmount": "KES 10.0000",
          "totalDiscount": "KES 0.4000",
          "responses": [
            {
              "phoneNumber": "+254711082300",
              "errorMessage": "None",
              "amount": "KES 10.0000",
              "status": "Sent",
              "requestId": "ATQid_1",
              "discount": "KES 0.4000"
            }
          ]
        }
        "#;
        let transport = FakeTransport::new(201, json);
        let client = make_client(transport.clone());

        let response = client
            .send_airtime(airtime_request(&["+254711082300"]))
            .await
            .unwrap();
        assert_eq!(response.num_sent, 1);
        assert_eq!(response.total_amount, Money::new(CurrencyCode::KES, 10.0));
        assert_eq!(response.responses[0].status, "Sent");

        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/airtime");
        assert_eq!(request.api_key, "test_key");
        assert_eq!(request.body.content_type(), FORM_CONTENT_TYPE);
        assert_param(form_params(&request), "username", "sandbox");
    }

    #[tokio::test]
    async fn send_airtime_round_trip_preserves_recipient_order() {
        let phones = ["+254711082300", "+254722000000", "+254733000000"];
        let entries = phones
            .iter()
            .map(|phone| {
                serde_json::json!({
                    "phoneNumber": phone,
                    "amount": "KES 10.0000",
                    "discount": "KES 0.4000",
                    "status": "Sent",
                    "requestId": format!("ATQid_{phone}"),
                    "errorMessage": "None",
                })
            })
            .collect::<Vec<_>>();
        let body = serde_json::json!({
            "errorMessage": "None",
            "numSent": phones.len(),
            "totalAmount": "KES 30.0000",
            "totalDiscount": "KES 1.2000",
            "responses": entries,
        });
        let transport = FakeTransport::new(201, body.to_string());
        let client = make_client(transport.clone());

        let response = client.send_airtime(airtime_request(&phones)).await.unwrap();
        let decoded = response
            .responses
            .iter()
            .map(|tx| tx.phone_number.raw())
            .collect::<Vec<_>>();
        assert_eq!(decoded, phones);

        let request = transport.last_request();
        let recipients = form_params(&request)
            .iter()
            .find(|(k, _)| k == "recipients")
            .map(|(_, v)| serde_json::from_str::<serde_json::Value>(v).unwrap())
            .unwrap();
        let encoded = recipients
            .as_array()
            .unwrap()
            .iter()
            .map(|it| it["phoneNumber"].as_str().unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(encoded, phones);
    }

    #[tokio::test]
    async fn rejected_request_carries_raw_body() {
        let transport = FakeTransport::new(400, "Invalid phone number");
        let client = make_client(transport);

        let err = client
            .send_airtime(airtime_request(&["0711"]))
            .await
            .unwrap_err();
        match err {
            AfricasTalkingError::ApiRejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid phone number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_request_skips_json_decoding() {
        let transport = FakeTransport::new(500, r#"{ "responses": [] }"#);
        let client = make_client(transport);

        let err = client
            .send_airtime(airtime_request(&["+254711082300"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AfricasTalkingError::ApiRejected { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn missing_list_field_is_decode_error() {
        let transport = FakeTransport::new(200, r#"{ "errorMessage": "None" }"#);
        let client = make_client(transport);

        let err = client
            .send_airtime(airtime_request(&["+254711082300"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AfricasTalkingError::Decode(DecodeError::MissingField { field: "responses" })
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client
            .place_call(PlaceCall::new("+254711082300", vec!["+254722000000".into()]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AfricasTalkingError::Decode(DecodeError::Json(_))
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced() {
        let client = make_client(FailingTransport);

        let err = client
            .send_bulk_sms(SendBulkSms::new(
                vec!["+254711082300".into()],
                "Hello AT",
                BulkSmsOptions::default(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, AfricasTalkingError::Transport(_)));
    }

    #[tokio::test]
    async fn send_mobile_data_posts_json_body() {
        let json = r#"
        {
          "entries": [
            {
              "phoneNumber": "+254711082300",
              "provider": "Safaricom",
              "status": "Queued",
              "transactionId": "ATPid_1",
              "value": "KES 100.0000"
            }
          ]
        }
        "#;
        let transport = FakeTransport::new(201, json);
        let client = make_client(transport.clone());

        let request = SendMobileData::new(
            "Mobile Data",
            vec![DataRecipient::new(
                "+254711082300",
                50,
                DataUnit::Mb,
                DataValidity::Day,
            )],
        );
        let response = client.send_mobile_data(request).await.unwrap();
        assert_eq!(response.entries[0].provider, "Safaricom");

        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/data");
        assert_eq!(request.body.content_type(), JSON_CONTENT_TYPE);
        match &request.body {
            HttpBody::Json(value) => {
                assert_eq!(value["username"], "sandbox");
                assert_eq!(value["productName"], "Mobile Data");
                assert_eq!(value["recipients"][0]["phoneNumber"], "+254711082300");
            }
            HttpBody::Form(params) => panic!("expected JSON body, got form {params:?}"),
        }
    }

    #[tokio::test]
    async fn sms_operations_share_messaging_endpoint() {
        let json = r#"
        {
          "SMSMessageData": {
            "Message": "Sent to 1/1 Total Cost: KES 0.8000",
            "Recipients": [
              { "statusCode": 101, "number": "+254711082300", "status": "Success", "cost": "KES 0.8000", "messageId": "ATPid_1" }
            ]
          }
        }
        "#;
        let transport = FakeTransport::new(201, json);
        let client = make_client(transport.clone());
        let to: Vec<RawPhoneNumber> = vec!["+254711082300".into()];

        let response = client
            .send_bulk_sms(SendBulkSms::new(
                to.clone(),
                "Hello AT",
                BulkSmsOptions::default(),
            ))
            .await
            .unwrap();
        assert_eq!(response.recipients[0].number, to[0]);
        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/messaging");
        assert_param(form_params(&request), "bulkSMSMode", "1");

        let options = PremiumSmsOptions {
            keyword: Some("news".to_owned()),
            ..Default::default()
        };
        client
            .send_premium_sms(SendPremiumSms::new(to, "Hello AT", options))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/messaging");
        assert_param(form_params(&request), "bulkSMSMode", "0");
        assert_param(form_params(&request), "keyword", "news");
    }

    #[tokio::test]
    async fn voice_operations_use_their_endpoints() {
        let transport = FakeTransport::new(
            200,
            r#"{ "entries": [ { "phoneNumber": "+254722000000", "status": "Queued", "sessionId": "ATVId_1" } ], "errorMessage": "None" }"#,
        );
        let client = make_client(transport.clone());

        let response = client
            .place_call(PlaceCall::new("+254711082300", vec!["+254722000000".into()]))
            .await
            .unwrap();
        assert_eq!(response.entries[0].session_id.as_deref(), Some("ATVId_1"));
        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/call");
        assert_param(form_params(&request), "from", "+254711082300");

        let transport = FakeTransport::new(200, r#"{ "status": "Success", "errorMessage": "None" }"#);
        let client = make_client(transport.clone());
        let response = client
            .transfer_call(TransferCall::new("ATVId_1", "+254733000000"))
            .await
            .unwrap();
        assert_eq!(response.status, "Success");
        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/transfer");
        assert_param(form_params(&request), "sessionId", "ATVId_1");
        assert!(!form_params(&request).iter().any(|(k, _)| k == "username"));
    }

    #[tokio::test]
    async fn with_timeout_applies_per_call() {
        let transport = FakeTransport::new(200, r#"{ "status": "Success" }"#);
        let client = make_client(transport.clone());

        client
            .transfer_call(TransferCall::new("ATVId_1", "+254733000000"))
            .await
            .unwrap();
        assert_eq!(transport.last_request().timeout, None);

        client
            .with_timeout(Duration::from_secs(3))
            .transfer_call(TransferCall::new("ATVId_1", "+254733000000"))
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().timeout,
            Some(Duration::from_secs(3))
        );
    }

    #[test]
    fn environment_selects_endpoint_family() {
        let sandbox = Endpoints::for_environment(Environment::Sandbox);
        let live = Endpoints::for_environment(Environment::Live);

        for url in [
            &sandbox.airtime,
            &sandbox.mobile_data,
            &sandbox.messaging,
            &sandbox.voice_call,
            &sandbox.voice_transfer,
        ] {
            assert!(url.contains(".sandbox.africastalking.com/"), "{url}");
        }
        for url in [
            &live.airtime,
            &live.mobile_data,
            &live.messaging,
            &live.voice_call,
            &live.voice_transfer,
        ] {
            assert!(!url.contains("sandbox"), "{url}");
        }

        assert_eq!(
            sandbox.airtime,
            "https://api.sandbox.africastalking.com/version1/airtime/send"
        );
        assert_eq!(live.messaging, "https://api.africastalking.com/version1/messaging");
        assert_eq!(
            live.mobile_data,
            "https://payments.africastalking.com/mobile/data/request"
        );
        assert_eq!(sandbox.voice_call, "https://voice.sandbox.africastalking.com/call");
        assert_eq!(
            live.voice_transfer,
            "https://voice.africastalking.com/callTransfer"
        );
    }

    #[test]
    fn client_new_uses_environment_endpoints() {
        let client = AfricasTalkingClient::new(credentials(), Environment::Sandbox);
        assert_eq!(
            client.endpoints(),
            &Endpoints::for_environment(Environment::Sandbox)
        );
    }

    #[test]
    fn builder_endpoint_overrides_are_applied() {
        let client = AfricasTalkingClient::builder(credentials())
            .environment(Environment::Sandbox)
            .airtime_endpoint("https://example.invalid/airtime")
            .voice_transfer_endpoint("https://example.invalid/transfer")
            .build()
            .unwrap();
        assert_eq!(client.endpoints().airtime, "https://example.invalid/airtime");
        assert_eq!(
            client.endpoints().voice_transfer,
            "https://example.invalid/transfer"
        );
        assert_eq!(client.endpoints().messaging, SANDBOX_MESSAGING_ENDPOINT);
    }

    #[test]
    fn form_body_is_url_encoded() {
        let body = HttpBody::Form(vec![
            ("to".to_owned(), "+254711082300,+254722000000".to_owned()),
            ("message".to_owned(), "Hello AT & co".to_owned()),
        ]);
        assert_eq!(
            String::from_utf8(body.into_bytes()).unwrap(),
            "to=%2B254711082300%2C%2B254722000000&message=Hello+AT+%26+co"
        );
    }

    #[test]
    fn credentials_validate_inputs() {
        assert!(Credentials::new("", "key").is_err());
        assert!(Credentials::new("sandbox", "  ").is_err());
        let creds = credentials();
        assert_eq!(creds.username().as_str(), "sandbox");
        assert_eq!(creds.api_key().as_str(), "test_key");
    }
}
