use crate::domain::{
    ApiError, LONG_FIELD, MessageSendError, MessageText, Recipients, SendMessage, SenderId,
};

use super::ParseError;
use super::error_line::{parse_api_error, parse_message_send_error};

/// Outcome of a send request as reported in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendReply {
    Accepted,
    Rejected(SendRejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendRejection {
    Api(ApiError),
    Recipient(MessageSendError),
}

pub fn encode_send_query(request: &SendMessage) -> Vec<(String, String)> {
    let mut params = vec![
        (Recipients::FIELD.to_owned(), request.recipients().joined()),
        (
            MessageText::FIELD.to_owned(),
            request.content().as_str().to_owned(),
        ),
        (
            LONG_FIELD.to_owned(),
            if request.is_long() { "1" } else { "0" }.to_owned(),
        ),
    ];
    if let Some(from) = request.sender() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    params
}

/// Scan the body for the first line mentioning `Error`.
///
/// Bodies without such a line are accepted whatever else they contain.
pub fn decode_send_response(body: &str) -> Result<SendReply, ParseError> {
    let Some(line) = body.lines().find(|line| line.contains("Error")) else {
        return Ok(SendReply::Accepted);
    };

    let rejection = if line.contains("To:") {
        SendRejection::Recipient(parse_message_send_error(line)?)
    } else {
        SendRejection::Api(parse_api_error(line)?)
    };
    Ok(SendReply::Rejected(rejection))
}
