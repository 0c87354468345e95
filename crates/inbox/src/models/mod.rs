//! Domain models for inbox entities

mod account;
mod message;

pub use account::EmailAccount;
pub use message::{Attachment, EmailAddress, Message, MessageId, ThreadEntry};
