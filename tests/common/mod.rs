#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;

use gmail_triage::domain::{MessageHeader, MessageId, RawMessage};
use gmail_triage::mail::{Mailbox, MailboxError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String, u32),
    Get(String),
    Modify(String, Vec<String>, Vec<String>),
    Trash(String),
}

/// In-memory mailbox that records every call.
#[derive(Default)]
pub struct FakeMailbox {
    pub messages: Vec<RawMessage>,
    pub fail_list: bool,
    pub fail_get: HashSet<String>,
    pub fail_mutations: HashSet<String>,
    pub calls: RefCell<Vec<Call>>,
}

pub fn raw(id: &str, from: &str, subject: &str, snippet: &str) -> RawMessage {
    let mut headers = Vec::new();
    if !from.is_empty() {
        headers.push(MessageHeader {
            name: "From".into(),
            value: from.into(),
        });
    }
    if !subject.is_empty() {
        headers.push(MessageHeader {
            name: "Subject".into(),
            value: subject.into(),
        });
    }
    RawMessage {
        id: id.into(),
        snippet: snippet.into(),
        headers,
    }
}

impl FakeMailbox {
    pub fn with_messages(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Modify(..) | Call::Trash(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Mailbox for FakeMailbox {
    fn list_unread(&self, query: &str, max_results: u32) -> Result<Vec<MessageId>, MailboxError> {
        self.record(Call::List(query.into(), max_results));
        if self.fail_list {
            return Err(MailboxError::Api {
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(self
            .messages
            .iter()
            .take(max_results as usize)
            .map(|m| m.id.clone())
            .collect())
    }

    fn get_message(&self, id: &str) -> Result<RawMessage, MailboxError> {
        self.record(Call::Get(id.into()));
        if self.fail_get.contains(id) {
            return Err(MailboxError::NotFound(id.into()));
        }
        self.messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MailboxError::NotFound(id.into()))
    }

    fn modify(&self, id: &str, add: &[&str], remove: &[&str]) -> Result<(), MailboxError> {
        self.record(Call::Modify(
            id.into(),
            add.iter().map(|s| s.to_string()).collect(),
            remove.iter().map(|s| s.to_string()).collect(),
        ));
        if self.fail_mutations.contains(id) {
            return Err(MailboxError::Api {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }

    fn trash(&self, id: &str) -> Result<(), MailboxError> {
        self.record(Call::Trash(id.into()));
        if self.fail_mutations.contains(id) {
            return Err(MailboxError::Api {
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}
