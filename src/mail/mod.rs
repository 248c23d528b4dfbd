pub mod decoders;
pub mod fetch;
pub mod gmail_client;
pub mod mailbox;

pub use fetch::{FetchOptions, build_query, fetch_unread};
pub use gmail_client::{AccessTokenProvider, GmailClient};
pub use mailbox::{Mailbox, MailboxError};
