//! Domain layer: request and response types (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{LONG_FIELD, SendMessage};
pub use response::{ApiError, Balance, MessageSendError};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, PhoneNumber, Recipients, SenderId};
