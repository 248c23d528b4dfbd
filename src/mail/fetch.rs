use log::{debug, info, warn};

use crate::domain::email::{EmailMessage, RawMessage};
use crate::mail::decoders::sanitize_snippet;
use crate::mail::mailbox::{Mailbox, MailboxError};

pub const DEFAULT_MAX_RESULTS: u32 = 50;
pub const MAX_RESULTS_LIMIT: u32 = 100;
pub const MAX_AGE_LIMIT_DAYS: u32 = 365;

/// Filter for one triage run. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub search: Option<String>,
    pub max_age_days: Option<u32>,
    pub max_results: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            search: None,
            max_age_days: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl FetchOptions {
    /// Normalizes the inputs: blank search text is dropped, the page size is
    /// clamped to 1..=100, and ages beyond a year are ignored.
    pub fn new(search: Option<String>, max_age_days: Option<u32>, max_results: u32) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            search,
            max_age_days: max_age_days.filter(|d| *d <= MAX_AGE_LIMIT_DAYS),
            max_results: max_results.clamp(1, MAX_RESULTS_LIMIT),
        }
    }
}

/// Provider search query: `is:unread`, then the age and text filters.
pub fn build_query(opts: &FetchOptions) -> String {
    let mut query = String::from("is:unread");
    if let Some(days) = opts.max_age_days {
        query.push_str(&format!(" newer_than:{days}d"));
    }
    if let Some(search) = opts.search.as_deref().map(str::trim)
        && !search.is_empty()
    {
        query.push(' ');
        query.push_str(search);
    }
    query
}

fn to_email(raw: RawMessage) -> EmailMessage {
    EmailMessage {
        from: raw.header("From").unwrap_or_default().to_string(),
        subject: raw.header("Subject").unwrap_or_default().to_string(),
        snippet: sanitize_snippet(&raw.snippet),
        id: raw.id,
    }
}

/// Fetch the first page of unread messages matching `opts`.
///
/// A failing list request fails the whole call. A message that cannot be
/// hydrated afterwards is logged and left out; the rest keep provider order.
/// Messages beyond the first page are not fetched.
pub fn fetch_unread(
    mailbox: &dyn Mailbox,
    opts: &FetchOptions,
) -> Result<Vec<EmailMessage>, MailboxError> {
    let query = build_query(opts);
    debug!("listing messages with query {query:?}");

    let ids = mailbox.list_unread(&query, opts.max_results)?;
    info!("{} message(s) match {query:?}", ids.len());

    let mut messages = Vec::with_capacity(ids.len());
    for id in ids {
        match mailbox.get_message(&id) {
            Ok(raw) => messages.push(to_email(raw)),
            Err(e) => warn!("skipping message {id}: {e}"),
        }
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_unread() {
        assert_eq!(build_query(&FetchOptions::default()), "is:unread");
        let blank = FetchOptions {
            search: Some("   ".into()),
            ..FetchOptions::default()
        };
        assert_eq!(build_query(&blank), "is:unread");
    }

    #[test]
    fn query_appends_trimmed_search() {
        let opts = FetchOptions {
            search: Some("  invoice ".into()),
            ..FetchOptions::default()
        };
        assert_eq!(build_query(&opts), "is:unread invoice");
    }

    #[test]
    fn query_includes_age_before_search() {
        let opts = FetchOptions::new(Some("from:bank".into()), Some(7), 10);
        assert_eq!(build_query(&opts), "is:unread newer_than:7d from:bank");
    }

    #[test]
    fn options_are_normalized() {
        let opts = FetchOptions::new(Some(" \t ".into()), Some(400), 0);
        assert_eq!(opts.search, None);
        assert_eq!(opts.max_age_days, None);
        assert_eq!(opts.max_results, 1);

        let opts = FetchOptions::new(None, Some(0), 500);
        assert_eq!(opts.max_age_days, Some(0));
        assert_eq!(opts.max_results, MAX_RESULTS_LIMIT);
    }
}
