use std::fmt;

use crate::triage::TriageError;

/// Opaque identifier assigned by the mailbox service.
pub type MessageId = String;

/// A fetched unread message, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub id: MessageId,
    pub from: String,
    pub subject: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// Message record as returned by the provider, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    pub id: MessageId,
    pub snippet: String,
    pub headers: Vec<MessageHeader>,
}

impl RawMessage {
    /// Value of the named header (exact name match). A repeated header
    /// resolves to its last occurrence.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rfind(|h| h.name == name)
            .map(|h| h.value.as_str())
    }
}

/// The decision an operator applies to one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriageAction {
    Pass,
    MarkRead,
    Trash,
    Spam,
}

impl TriageAction {
    pub const ALL: [TriageAction; 4] = [
        TriageAction::Pass,
        TriageAction::MarkRead,
        TriageAction::Trash,
        TriageAction::Spam,
    ];

    pub fn code(self) -> u8 {
        match self {
            TriageAction::Pass => 0,
            TriageAction::MarkRead => 1,
            TriageAction::Trash => 2,
            TriageAction::Spam => 3,
        }
    }

    /// Confirmation shown after the action succeeds.
    pub fn description(self) -> &'static str {
        match self {
            TriageAction::Pass => "Passed",
            TriageAction::MarkRead => "Marked as read",
            TriageAction::Trash => "Moved to trash",
            TriageAction::Spam => "Marked as spam",
        }
    }
}

impl TryFrom<u8> for TriageAction {
    type Error = TriageError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TriageAction::Pass),
            1 => Ok(TriageAction::MarkRead),
            2 => Ok(TriageAction::Trash),
            3 => Ok(TriageAction::Spam),
            other => Err(TriageError::InvalidAction(other)),
        }
    }
}

impl fmt::Display for TriageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriageAction::Pass => "pass",
            TriageAction::MarkRead => "read",
            TriageAction::Trash => "trash",
            TriageAction::Spam => "spam",
        };
        f.write_str(name)
    }
}
