use std::time::Duration;

use log::{debug, info};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::domain::email::{MessageHeader, MessageId, RawMessage};
use crate::mail::mailbox::{Mailbox, MailboxError};

pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Source of bearer tokens for API calls.
pub trait AccessTokenProvider {
    fn access_token(&self) -> anyhow::Result<String>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    messages: Vec<MessageRef>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: String,
    #[serde(default)]
    snippet: String,
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    headers: Vec<Header>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifyRequest<'a> {
    add_label_ids: &'a [&'a str],
    remove_label_ids: &'a [&'a str],
}

impl From<MessageResponse> for RawMessage {
    fn from(m: MessageResponse) -> Self {
        let headers = m
            .payload
            .map(|p| p.headers)
            .unwrap_or_default()
            .into_iter()
            .map(|h| MessageHeader {
                name: h.name,
                value: h.value,
            })
            .collect();
        RawMessage {
            id: m.id,
            snippet: m.snippet,
            headers,
        }
    }
}

fn validate_id(id: &str) -> Result<(), MailboxError> {
    if id.is_empty() || id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(MailboxError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Gmail REST API over blocking HTTP.
pub struct GmailClient<T> {
    http: Client,
    base_url: String,
    tokens: T,
}

impl<T: AccessTokenProvider> GmailClient<T> {
    pub fn new(tokens: T) -> Result<Self, MailboxError> {
        Self::with_base_url(GMAIL_API_BASE, tokens)
    }

    pub fn with_base_url(base_url: &str, tokens: T) -> Result<Self, MailboxError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder, MailboxError> {
        let token = self
            .tokens
            .access_token()
            .map_err(|e| MailboxError::Auth(format!("{e:#}")))?;
        Ok(req.bearer_auth(token))
    }

    fn send(&self, req: RequestBuilder, id: Option<&str>) -> Result<Response, MailboxError> {
        let resp = self.authed(req)?.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(MailboxError::NotFound(id.to_string()));
        }
        let body = resp.text().unwrap_or_default();
        Err(MailboxError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

impl<T: AccessTokenProvider> Mailbox for GmailClient<T> {
    fn list_unread(&self, query: &str, max_results: u32) -> Result<Vec<MessageId>, MailboxError> {
        let url = format!("{}/messages", self.base_url);
        let max_results = max_results.to_string();
        let req = self
            .http
            .get(&url)
            .query(&[("q", query), ("maxResults", max_results.as_str())]);
        let list: ListResponse = self.send(req, None)?.json()?;

        if list.next_page_token.is_some() {
            info!(
                "more than {max_results} messages match {query:?}; only the first page is triaged"
            );
        }
        Ok(list.messages.into_iter().map(|m| m.id).collect())
    }

    fn get_message(&self, id: &str) -> Result<RawMessage, MailboxError> {
        validate_id(id)?;
        let url = format!("{}/messages/{}", self.base_url, id);
        let req = self.http.get(&url).query(&[
            ("format", "metadata"),
            ("metadataHeaders", "From"),
            ("metadataHeaders", "Subject"),
        ]);
        let msg: MessageResponse = self.send(req, Some(id))?.json()?;
        Ok(msg.into())
    }

    fn modify(
        &self,
        id: &str,
        add_labels: &[&str],
        remove_labels: &[&str],
    ) -> Result<(), MailboxError> {
        validate_id(id)?;
        debug!("modify {id}: +{add_labels:?} -{remove_labels:?}");
        let url = format!("{}/messages/{}/modify", self.base_url, id);
        let body = ModifyRequest {
            add_label_ids: add_labels,
            remove_label_ids: remove_labels,
        };
        self.send(self.http.post(&url).json(&body), Some(id))?;
        Ok(())
    }

    fn trash(&self, id: &str) -> Result<(), MailboxError> {
        validate_id(id)?;
        debug!("trash {id}");
        let url = format!("{}/messages/{}/trash", self.base_url, id);
        // empty body so the request carries Content-Length: 0
        self.send(self.http.post(&url).body(""), Some(id))?;
        Ok(())
    }
}
