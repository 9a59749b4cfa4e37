use crate::domain::{ApiError, MessageSendError};

use super::ParseError;

/// Parse a service error line of the form `Error <errno>: <msg>`.
///
/// Only the first colon splits the line; `errno` is the second token before it.
pub fn parse_api_error(line: &str) -> Result<ApiError, ParseError> {
    let errstring = line.trim_end();
    let (head, tail) = errstring
        .split_once(':')
        .ok_or_else(|| malformed(errstring))?;
    let errno = head
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| malformed(errstring))?;

    Ok(ApiError::new(errstring, errno, tail.trim_start()))
}

/// Parse a per-recipient failure of the form `To: <number> Error <errno>: <msg>`.
///
/// The recipient is the first token after the first colon. Everything from the
/// first literal `Error` onwards is parsed with [`parse_api_error`], but the
/// resulting error keeps the whole line as its display text.
pub fn parse_message_send_error(line: &str) -> Result<MessageSendError, ParseError> {
    let recipient = line
        .split(':')
        .nth(1)
        .and_then(|segment| segment.split_whitespace().next())
        .ok_or_else(|| ParseError::MissingRecipient {
            line: line.to_owned(),
        })?;

    let start = line.find("Error").ok_or_else(|| malformed(line))?;
    let detail = parse_api_error(&line[start..])?;

    Ok(MessageSendError::new(
        recipient,
        ApiError::new(line, detail.errno(), detail.msg()),
    ))
}

fn malformed(line: &str) -> ParseError {
    ParseError::MalformedErrorLine {
        line: line.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_error_line_splits_errno_and_msg() {
        let err = parse_api_error("Error 23: Invalid login credentials\n").unwrap();
        assert_eq!(err.errno(), "23");
        assert_eq!(err.msg(), "Invalid login credentials");
        assert_eq!(err.to_string(), "Error 23: Invalid login credentials");
    }

    #[test]
    fn only_the_first_colon_splits() {
        let err = parse_api_error("Error 10: Bad value: from").unwrap();
        assert_eq!(err.errno(), "10");
        assert_eq!(err.msg(), "Bad value: from");
    }

    #[test]
    fn errno_is_kept_as_text() {
        let err = parse_api_error("Error 007: Odd code").unwrap();
        assert_eq!(err.errno(), "007");

        let err = parse_api_error("Error E12:Missing space").unwrap();
        assert_eq!(err.errno(), "E12");
        assert_eq!(err.msg(), "Missing space");
    }

    #[test]
    fn undecomposable_lines_are_parse_errors() {
        assert!(matches!(
            parse_api_error("Error without colon"),
            Err(ParseError::MalformedErrorLine { .. })
        ));
        assert!(matches!(
            parse_api_error("Error: no number"),
            Err(ParseError::MalformedErrorLine { .. })
        ));
    }

    #[test]
    fn recipient_error_keeps_whole_line() {
        let line = "To: 447123456789 Error 15: Invalid destination";
        let err = parse_message_send_error(line).unwrap();
        assert_eq!(err.recipient(), "447123456789");
        assert_eq!(err.errno(), "15");
        assert_eq!(err.msg(), "Invalid destination");
        assert_eq!(err.to_string(), line);
    }

    #[test]
    fn recipient_error_uses_first_literal_error() {
        let line = "To: Error1 Error 15: Invalid destination";
        let err = parse_message_send_error(line).unwrap();
        assert_eq!(err.recipient(), "Error1");
        // "Error1 Error 15" -> second token before the colon.
        assert_eq!(err.errno(), "Error");
        assert_eq!(err.msg(), "Invalid destination");
    }

    #[test]
    fn recipient_error_without_number_is_parse_error() {
        assert!(matches!(
            parse_message_send_error("To: Error"),
            Err(ParseError::MalformedErrorLine { .. })
        ));
        assert!(matches!(
            parse_message_send_error("To:   "),
            Err(ParseError::MissingRecipient { .. })
        ));
    }
}
