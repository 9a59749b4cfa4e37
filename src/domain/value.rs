use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Clockwork API key (`key`).
///
/// The value is opaque: it is stored and transmitted exactly as given.
pub struct ApiKey(String);

impl ApiKey {
    /// Query field name used by Clockwork (`key`).
    pub const FIELD: &'static str = "key";

    /// Wrap an API key.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`content`).
///
/// Length limits are enforced by the service, not by this crate.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by Clockwork (`content`).
    pub const FIELD: &'static str = "content";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id shown on the handset (`from`).
pub struct SenderId(String);

impl SenderId {
    /// Query field name used by Clockwork (`from`).
    pub const FIELD: &'static str = "from";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SenderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SenderId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ordered set of recipient numbers (`to`).
///
/// Numbers are kept verbatim; invalid ones are rejected by the service and come
/// back as [`MessageSendError`](crate::MessageSendError)s. Use [`PhoneNumber`] if
/// you want numbers normalized before sending.
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Query field name used by Clockwork (`to`).
    pub const FIELD: &'static str = "to";

    /// A single recipient.
    pub fn one(number: impl Into<String>) -> Self {
        Self(vec![number.into()])
    }

    /// Several recipients, in order.
    pub fn many<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        numbers.into_iter().collect()
    }

    /// Numbers in the order they will be sent.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire form: numbers joined with commas.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl<S: Into<String>> FromIterator<S> for Recipients {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Recipients {
    fn from(value: &str) -> Self {
        Self::one(value)
    }
}

impl From<String> for Recipients {
    fn from(value: String) -> Self {
        Self::one(value)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(value: Vec<&str>) -> Self {
        Self::many(value)
    }
}

impl From<&[&str]> for Recipients {
    fn from(value: &[&str]) -> Self {
        Self::many(value.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Recipients {
    fn from(value: [&str; N]) -> Self {
        Self::many(value)
    }
}

impl From<PhoneNumber> for Recipients {
    fn from(value: PhoneNumber) -> Self {
        Self::one(value.international)
    }
}

impl From<Vec<PhoneNumber>> for Recipients {
    fn from(value: Vec<PhoneNumber>) -> Self {
        value.into_iter().map(|number| number.international).collect()
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number in the international digits form Clockwork expects
/// (E.164 without the leading `+`, e.g. `447123456789`).
///
/// Equality and hashing are based on the international form.
pub struct PhoneNumber {
    raw: String,
    international: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipients::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let international = e164.strip_prefix('+').unwrap_or(&e164).to_owned();

        Ok(Self {
            raw,
            international,
            parsed,
        })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// International digits, as sent in `to`.
    pub fn international(&self) -> &str {
        &self.international
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.international == other.international
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.international.hash(state);
    }
}
