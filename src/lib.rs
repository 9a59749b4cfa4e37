//! Typed Rust client for the Clockwork SMS HTTP API.
//!
//! The crate is split into a domain layer of plain types, a transport layer for
//! the service's plain-text wire format, and a small client layer issuing one GET
//! request per call. [`ClockworkClient`] is async; [`blocking::ClockworkClient`]
//! offers the same operations for synchronous callers.
//!
//! ```rust,no_run
//! use clockwork::{ClockworkClient, ClockworkError, SendMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ClockworkError> {
//!     let client = ClockworkClient::new("...");
//!     let request = SendMessage::new(["447700900001", "447700900002"], "hello").from("Shop");
//!     match client.send(request).await {
//!         Ok(()) => {}
//!         Err(ClockworkError::MessageSend(err)) => {
//!             eprintln!("{} was rejected: {}", err.recipient(), err.msg());
//!         }
//!         Err(err) => return Err(err),
//!     }
//!     println!("balance: {}", client.check_balance().await?);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClockworkClient, ClockworkClientBuilder, ClockworkError, DEFAULT_TIMEOUT, blocking,
};
pub use domain::{
    ApiError, ApiKey, Balance, MessageSendError, MessageText, PhoneNumber, Recipients,
    SendMessage, SenderId, ValidationError,
};
pub use transport::ParseError;
