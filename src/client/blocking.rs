//! Synchronous client: each call blocks the calling thread for one round trip.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::{ApiKey, Balance, SendMessage};

use super::{
    ClockworkClientBuilder, ClockworkError, HttpResponse, Settings, finish_balance, finish_send,
};

trait BlockingHttpTransport: Send + Sync {
    fn get_query(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        timeout: Duration,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>>;
}

#[derive(Debug, Clone)]
struct ReqwestBlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport for ReqwestBlockingTransport {
    fn get_query(
        &self,
        url: &str,
        query: Vec<(String, String)>,
        timeout: Duration,
    ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
        let response = self
            .client
            .get(url)
            .query(&query)
            .timeout(timeout)
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Clone)]
/// Blocking twin of [`ClockworkClient`](super::ClockworkClient).
///
/// Must not be created or used from within an async runtime; use the async
/// client there instead.
///
/// ```rust,no_run
/// use clockwork::SendMessage;
/// use clockwork::blocking::ClockworkClient;
///
/// let client = ClockworkClient::new("...");
/// client.send(SendMessage::new("447123456789", "hello"))?;
/// println!("balance: {}", client.check_balance()?);
/// # Ok::<(), clockwork::ClockworkError>(())
/// ```
pub struct ClockworkClient {
    settings: Settings,
    http: Arc<dyn BlockingHttpTransport>,
}

impl ClockworkClient {
    /// Create a client with the production endpoints and a 1 second timeout.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            settings: Settings::new(api_key.into()),
            http: Arc::new(ReqwestBlockingTransport {
                client: reqwest::blocking::Client::new(),
            }),
        }
    }

    /// Start building a client; finish with [`ClockworkClientBuilder::build_blocking`].
    pub fn builder(api_key: impl Into<ApiKey>) -> ClockworkClientBuilder {
        ClockworkClientBuilder::new(api_key)
    }

    pub(super) fn from_settings(
        settings: Settings,
        user_agent: Option<String>,
    ) -> Result<Self, ClockworkError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| ClockworkError::Transport(Box::new(err)))?;

        Ok(Self {
            settings,
            http: Arc::new(ReqwestBlockingTransport { client }),
        })
    }

    /// Timeout applied to each request.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Send a message to one or more recipients.
    ///
    /// See [`ClockworkClient::send`](super::ClockworkClient::send) for the error mapping.
    pub fn send(&self, request: SendMessage) -> Result<(), ClockworkError> {
        let url = &self.settings.send_endpoint;
        let query = self
            .settings
            .query(crate::transport::encode_send_query(&request));
        debug!(
            endpoint = url.as_str(),
            recipients = request.recipients().len(),
            long = request.is_long(),
            "sending message"
        );

        let response = self
            .http
            .get_query(url, query, self.settings.timeout)
            .map_err(ClockworkError::Transport)?;

        finish_send(url, response)
    }

    /// Fetch the account balance.
    pub fn check_balance(&self) -> Result<Balance, ClockworkError> {
        let url = &self.settings.balance_endpoint;
        let query = self.settings.query(Vec::new());
        debug!(endpoint = url.as_str(), "checking balance");

        let response = self
            .http
            .get_query(url, query, self.settings.timeout)
            .map_err(ClockworkError::Transport)?;

        finish_balance(url, response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal_macros::dec;

    use super::super::DEFAULT_TIMEOUT;
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct FakeTransport {
        responses: Arc<Mutex<Vec<(u16, String)>>>,
        requests: Arc<Mutex<Vec<(String, Vec<(String, String)>, Duration)>>>,
    }

    impl FakeTransport {
        fn replying(responses: &[(u16, &str)]) -> Self {
            let transport = Self::default();
            *transport.responses.lock().unwrap() = responses
                .iter()
                .rev()
                .map(|(status, body)| (*status, (*body).to_owned()))
                .collect();
            transport
        }

        fn requests(&self) -> Vec<(String, Vec<(String, String)>, Duration)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl BlockingHttpTransport for FakeTransport {
        fn get_query(
            &self,
            url: &str,
            query: Vec<(String, String)>,
            timeout: Duration,
        ) -> Result<HttpResponse, Box<dyn StdError + Send + Sync>> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_owned(), query, timeout));
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .ok_or("no canned response left")?;
            Ok(HttpResponse { status, body })
        }
    }

    fn make_client(transport: FakeTransport, timeout: Duration) -> ClockworkClient {
        ClockworkClient {
            settings: Settings {
                api_key: ApiKey::new("test_key"),
                send_endpoint: "https://example.invalid/http/send.aspx".to_owned(),
                balance_endpoint: "https://example.invalid/http/balance".to_owned(),
                timeout,
            },
            http: Arc::new(transport),
        }
    }

    #[test]
    fn send_then_balance_each_make_one_request() {
        let transport = FakeTransport::replying(&[
            (200, "To: 447123456789 ID: VE_1"),
            (200, "Balance 3.07 (EUR)"),
        ]);
        let client = make_client(transport.clone(), Duration::from_secs(3));

        client
            .send(SendMessage::new("447123456789", "hello"))
            .unwrap();
        let balance = client.check_balance().unwrap();
        assert_eq!(balance.amount, dec!(3.07));
        assert_eq!(balance.currency, "EUR");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, "https://example.invalid/http/send.aspx");
        assert_eq!(requests[0].2, Duration::from_secs(3));
        assert_eq!(requests[1].0, "https://example.invalid/http/balance");
        assert_eq!(
            requests[1].1,
            vec![("key".to_owned(), "test_key".to_owned())]
        );
    }

    #[test]
    fn send_maps_recipient_error() {
        let transport = FakeTransport::replying(&[(
            200,
            "To: 447123456789 Error 15: Invalid destination",
        )]);
        let client = make_client(transport, DEFAULT_TIMEOUT);

        let err = client
            .send(SendMessage::new("447123456789", "hello"))
            .unwrap_err();
        let ClockworkError::MessageSend(inner) = &err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(inner.recipient(), "447123456789");
        assert_eq!(inner.errno(), "15");
    }

    #[test]
    fn check_balance_maps_api_error() {
        let transport = FakeTransport::replying(&[(200, "Error 1: Invalid API key")]);
        let client = make_client(transport, DEFAULT_TIMEOUT);

        let err = client.check_balance().unwrap_err();
        assert_eq!(err.api_error().map(|e| e.msg()), Some("Invalid API key"));
    }

    #[test]
    fn transport_failure_is_reported() {
        let transport = FakeTransport::replying(&[]);
        let client = make_client(transport, DEFAULT_TIMEOUT);

        let err = client.check_balance().unwrap_err();
        assert!(matches!(err, ClockworkError::Transport(_)));
    }

    #[test]
    fn builder_produces_blocking_client() {
        let client = ClockworkClient::builder("key")
            .timeout(Duration::from_millis(2500))
            .build_blocking()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_millis(2500));
        assert_eq!(ClockworkClient::new("key").timeout(), DEFAULT_TIMEOUT);
    }
}
