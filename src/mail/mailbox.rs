use thiserror::Error;

use crate::domain::email::{MessageId, RawMessage};

#[derive(Debug, Error)]
pub enum MailboxError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("message {0} not found")]
    NotFound(MessageId),

    #[error("invalid message id: {0:?}")]
    InvalidId(String),
}

/// Remote mailbox operations the triage tool needs.
///
/// Calls are made strictly one at a time from a single thread.
pub trait Mailbox {
    /// Ids of messages matching `query`, first page only, at most `max_results`.
    fn list_unread(&self, query: &str, max_results: u32) -> Result<Vec<MessageId>, MailboxError>;

    fn get_message(&self, id: &str) -> Result<RawMessage, MailboxError>;

    fn modify(
        &self,
        id: &str,
        add_labels: &[&str],
        remove_labels: &[&str],
    ) -> Result<(), MailboxError>;

    fn trash(&self, id: &str) -> Result<(), MailboxError>;
}
