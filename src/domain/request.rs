use crate::domain::value::{MessageText, Recipients, SenderId};

/// Query field carrying the long-message flag.
pub const LONG_FIELD: &str = "long";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A message to send to one or more recipients.
///
/// ```
/// use clockwork::SendMessage;
///
/// let request = SendMessage::new(["447700900001", "447700900002"], "hello")
///     .from("Shop")
///     .long(true);
/// assert_eq!(request.recipients().joined(), "447700900001,447700900002");
/// ```
pub struct SendMessage {
    to: Recipients,
    content: MessageText,
    from: Option<SenderId>,
    long: bool,
}

impl SendMessage {
    pub fn new(to: impl Into<Recipients>, content: impl Into<MessageText>) -> Self {
        Self {
            to: to.into(),
            content: content.into(),
            from: None,
            long: false,
        }
    }

    /// Set the sender id shown on the handset.
    pub fn from(mut self, sender: impl Into<SenderId>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Allow the service to send a message longer than one segment.
    pub fn long(mut self, long: bool) -> Self {
        self.long = long;
        self
    }

    pub fn recipients(&self) -> &Recipients {
        &self.to
    }

    pub fn content(&self) -> &MessageText {
        &self.content
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }

    pub fn is_long(&self) -> bool {
        self.long
    }
}
