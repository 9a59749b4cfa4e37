use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{ApiError, Balance};

use super::ParseError;
use super::error_line::parse_api_error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceReply {
    Balance(Balance),
    Rejected(ApiError),
}

/// Decode a `<label> <amount> (<currency>)` body.
///
/// A body mentioning `Error` anywhere is parsed as a single error line.
pub fn decode_balance_response(body: &str) -> Result<BalanceReply, ParseError> {
    if body.contains("Error") {
        return Ok(BalanceReply::Rejected(parse_api_error(body)?));
    }

    let tokens = body.split_whitespace().collect::<Vec<_>>();
    let &[_label, amount, currency] = tokens.as_slice() else {
        return Err(ParseError::UnexpectedBalanceShape {
            body: body.to_owned(),
            tokens: tokens.len(),
        });
    };

    let amount = Decimal::from_str(amount).map_err(|source| ParseError::InvalidAmount {
        token: amount.to_owned(),
        source,
    })?;

    Ok(BalanceReply::Balance(Balance {
        amount,
        currency: currency.trim_matches(['(', ')']).to_owned(),
    }))
}
