//! Client layer: orchestrates transport calls and maps replies to errors.

pub mod blocking;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{ApiError, ApiKey, Balance, MessageSendError, SendMessage, ValidationError};
use crate::transport::{BalanceReply, ParseError, SendRejection, SendReply};

const DEFAULT_SEND_ENDPOINT: &str = "https://api.clockworksms.com/http/send.aspx";
const DEFAULT_BALANCE_ENDPOINT: &str = "https://api.clockworksms.com/http/balance";

/// Request timeout used when none (or zero) is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get_query<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get_query<'a>(
        &'a self,
        url: &'a str,
        query: Vec<(String, String)>,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .query(&query)
                .timeout(timeout)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`ClockworkClient`] and [`blocking::ClockworkClient`].
///
/// Callers branch on the variant to tell a rejected recipient
/// ([`ClockworkError::MessageSend`]) from an account or request level failure
/// ([`ClockworkError::Api`]) from a connectivity problem
/// ([`ClockworkError::is_transport`]).
pub enum ClockworkError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The service reported an error for the request as a whole.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service rejected delivery to a specific recipient.
    #[error(transparent)]
    MessageSend(#[from] MessageSendError),

    /// Response body did not follow the expected plain-text format.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The builder rejected a configuration value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl ClockworkError {
    /// `true` for network failures and non-2xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// The service error behind [`ClockworkError::Api`] or
    /// [`ClockworkError::MessageSend`].
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::MessageSend(err) => Some(err.as_api_error()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Settings {
    api_key: ApiKey,
    send_endpoint: String,
    balance_endpoint: String,
    timeout: Duration,
}

impl Settings {
    fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            balance_endpoint: DEFAULT_BALANCE_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn query(&self, params: Vec<(String, String)>) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push((ApiKey::FIELD.to_owned(), self.api_key.as_str().to_owned()));
        query.extend(params);
        query
    }
}

fn ensure_success(url: &str, response: HttpResponse) -> Result<String, ClockworkError> {
    debug!(endpoint = url, status = response.status, "clockwork response");
    if !(200..=299).contains(&response.status) {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(ClockworkError::HttpStatus {
            status: response.status,
            body,
        });
    }
    Ok(response.body)
}

fn finish_send(url: &str, response: HttpResponse) -> Result<(), ClockworkError> {
    let body = ensure_success(url, response)?;
    match crate::transport::decode_send_response(&body)? {
        SendReply::Accepted => Ok(()),
        SendReply::Rejected(SendRejection::Api(err)) => {
            warn!(errno = err.errno(), msg = err.msg(), "send rejected");
            Err(ClockworkError::Api(err))
        }
        SendReply::Rejected(SendRejection::Recipient(err)) => {
            warn!(
                recipient = err.recipient(),
                errno = err.errno(),
                msg = err.msg(),
                "send rejected for recipient"
            );
            Err(ClockworkError::MessageSend(err))
        }
    }
}

fn finish_balance(url: &str, response: HttpResponse) -> Result<Balance, ClockworkError> {
    let body = ensure_success(url, response)?;
    match crate::transport::decode_balance_response(&body)? {
        BalanceReply::Balance(balance) => Ok(balance),
        BalanceReply::Rejected(err) => {
            warn!(errno = err.errno(), msg = err.msg(), "balance check rejected");
            Err(ClockworkError::Api(err))
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`ClockworkClient`] and [`blocking::ClockworkClient`].
///
/// Use this when you need to customize the endpoints, timeout, or user-agent.
pub struct ClockworkClientBuilder {
    api_key: ApiKey,
    send_endpoint: String,
    balance_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClockworkClientBuilder {
    /// Create a builder with the production endpoints and the default timeout.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            send_endpoint: DEFAULT_SEND_ENDPOINT.to_owned(),
            balance_endpoint: DEFAULT_BALANCE_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the endpoint URL for `http/send.aspx`.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Override the endpoint URL for `http/balance`.
    pub fn balance_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.balance_endpoint = endpoint.into();
        self
    }

    /// Set the per-request timeout. A zero duration means [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an async [`ClockworkClient`].
    pub fn build(self) -> Result<ClockworkClient, ClockworkError> {
        let user_agent = self.user_agent.clone();
        let settings = self.into_settings()?;

        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| ClockworkError::Transport(Box::new(err)))?;

        Ok(ClockworkClient {
            settings,
            http: Arc::new(ReqwestTransport { client }),
        })
    }

    /// Build a [`blocking::ClockworkClient`].
    ///
    /// Must not be called from within an async runtime.
    pub fn build_blocking(self) -> Result<blocking::ClockworkClient, ClockworkError> {
        let user_agent = self.user_agent.clone();
        let settings = self.into_settings()?;
        blocking::ClockworkClient::from_settings(settings, user_agent)
    }

    fn into_settings(self) -> Result<Settings, ClockworkError> {
        for endpoint in [&self.send_endpoint, &self.balance_endpoint] {
            url::Url::parse(endpoint).map_err(|_| ValidationError::InvalidEndpoint {
                value: endpoint.clone(),
            })?;
        }

        Ok(Settings {
            api_key: self.api_key,
            send_endpoint: self.send_endpoint,
            balance_endpoint: self.balance_endpoint,
            timeout: self
                .timeout
                .filter(|timeout| !timeout.is_zero())
                .unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[derive(Clone)]
/// Async Clockwork SMS client.
///
/// Every call performs exactly one GET request against:
/// - `https://api.clockworksms.com/http/send.aspx` for sending messages
/// - `https://api.clockworksms.com/http/balance` for the account balance
///
/// The client keeps no per-call state, so it can be cloned and reused freely.
pub struct ClockworkClient {
    settings: Settings,
    http: Arc<dyn HttpTransport>,
}

impl ClockworkClient {
    /// Create a client with the production endpoints and a 1 second timeout.
    ///
    /// For more customization, use [`ClockworkClient::builder`].
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            settings: Settings::new(api_key.into()),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: impl Into<ApiKey>) -> ClockworkClientBuilder {
        ClockworkClientBuilder::new(api_key)
    }

    /// Timeout applied to each request.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Send a message to one or more recipients.
    ///
    /// Errors:
    /// - [`ClockworkError::Transport`] / [`ClockworkError::HttpStatus`] when the request fails,
    /// - [`ClockworkError::MessageSend`] when the service rejects a recipient,
    /// - [`ClockworkError::Api`] for any other error line in the response.
    pub async fn send(&self, request: SendMessage) -> Result<(), ClockworkError> {
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
            .await
            .map_err(ClockworkError::Transport)?;

        finish_send(url, response)
    }

    /// Fetch the account balance.
    ///
    /// Errors:
    /// - [`ClockworkError::Transport`] / [`ClockworkError::HttpStatus`] when the request fails,
    /// - [`ClockworkError::Api`] when the service reports an error,
    /// - [`ClockworkError::Parse`] when the body is not `<label> <amount> (<currency>)`.
    pub async fn check_balance(&self) -> Result<Balance, ClockworkError> {
        let url = &self.settings.balance_endpoint;
        let query = self.settings.query(Vec::new());
        debug!(endpoint = url.as_str(), "checking balance");

        let response = self
            .http
            .get_query(url, query, self.settings.timeout)
            .await
            .map_err(ClockworkError::Transport)?;

        finish_balance(url, response)
    }
}
