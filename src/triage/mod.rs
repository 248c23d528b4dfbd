pub mod actions;
pub mod display;
pub mod prompt;
pub mod session;

use thiserror::Error;

use crate::mail::mailbox::MailboxError;

pub use actions::{perform_action, perform_action_code};
pub use prompt::{Command, parse_command};
pub use session::{Session, SessionSummary};

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("invalid action: {0}")]
    InvalidAction(u8),

    #[error(transparent)]
    Mailbox(#[from] MailboxError),

    #[error("input closed before a command was entered")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
