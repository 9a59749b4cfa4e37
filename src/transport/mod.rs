//! Transport layer: query encoding and the plain-text response grammar.

mod balance;
mod error_line;
mod send;

pub use balance::{BalanceReply, decode_balance_response};
pub use send::{SendRejection, SendReply, decode_send_response, encode_send_query};

/// A response body that does not follow the service's plain-text grammar.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed error line: {line:?}")]
    MalformedErrorLine { line: String },

    #[error("no recipient number in error line: {line:?}")]
    MissingRecipient { line: String },

    #[error("expected 3 tokens in balance response, got {tokens}: {body:?}")]
    UnexpectedBalanceShape { body: String, tokens: usize },

    #[error("invalid balance amount {token:?}: {source}")]
    InvalidAmount {
        token: String,
        #[source]
        source: rust_decimal::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_messages_name_the_offending_input() {
        let err = ParseError::UnexpectedBalanceShape {
            body: "Balance".to_owned(),
            tokens: 1,
        };
        assert_eq!(
            err.to_string(),
            "expected 3 tokens in balance response, got 1: \"Balance\""
        );

        let err = ParseError::MalformedErrorLine {
            line: "Error".to_owned(),
        };
        assert_eq!(err.to_string(), "malformed error line: \"Error\"");
    }
}
