pub mod email;

pub use email::{EmailMessage, MessageHeader, MessageId, RawMessage, TriageAction};
