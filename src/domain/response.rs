use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Account balance returned by `check_balance`.
pub struct Balance {
    /// Exact balance amount.
    pub amount: Decimal,
    /// Three-letter currency code, e.g. `GBP`.
    pub currency: String,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{errstring}")]
/// Error reported by the Clockwork service.
///
/// `Display` yields the line the service sent, without trailing whitespace.
pub struct ApiError {
    errstring: String,
    errno: String,
    msg: String,
}

impl ApiError {
    pub(crate) fn new(
        errstring: impl Into<String>,
        errno: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            errstring: errstring.into(),
            errno: errno.into(),
            msg: msg.into(),
        }
    }

    /// Service error number, kept as text.
    pub fn errno(&self) -> &str {
        &self.errno
    }

    /// Human-readable message following the colon.
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Full error text as returned by the service.
    pub fn errstring(&self) -> &str {
        &self.errstring
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .error.errstring)]
/// Delivery to one recipient was rejected (`To: <number> Error <n>: <msg>`).
///
/// `errno` and `msg` come from the `Error ...` part of the line; `Display`
/// yields the whole line, recipient included.
pub struct MessageSendError {
    recipient: String,
    error: ApiError,
}

impl MessageSendError {
    pub(crate) fn new(recipient: impl Into<String>, error: ApiError) -> Self {
        Self {
            recipient: recipient.into(),
            error,
        }
    }

    /// Number the message could not be delivered to.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn errno(&self) -> &str {
        self.error.errno()
    }

    pub fn msg(&self) -> &str {
        self.error.msg()
    }

    /// The full response line.
    pub fn errstring(&self) -> &str {
        self.error.errstring()
    }

    /// View this failure as a generic service error.
    pub fn as_api_error(&self) -> &ApiError {
        &self.error
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn balance_display_and_serde_keep_exact_amount() {
        let balance = Balance {
            amount: dec!(12.50),
            currency: "GBP".to_owned(),
        };
        assert_eq!(balance.to_string(), "12.50 GBP");

        let json = serde_json::to_string(&balance).unwrap();
        assert_eq!(json, r#"{"amount":"12.50","currency":"GBP"}"#);
        let back: Balance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, balance);
    }

    #[test]
    fn message_send_error_displays_whole_line() {
        let line = "To: 447123456789 Error 15: Invalid destination";
        let err = MessageSendError::new(
            "447123456789",
            ApiError::new(line, "15", "Invalid destination"),
        );
        assert_eq!(err.to_string(), line);
        assert_eq!(err.recipient(), "447123456789");
        assert_eq!(err.errno(), "15");
        assert_eq!(err.msg(), "Invalid destination");
        assert_eq!(err.as_api_error().errstring(), line);
    }
}
