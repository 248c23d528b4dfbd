use anyhow::{Result, anyhow};
use keyring::{Entry, Error as KeyringError};

use crate::config::APP_NAME;

/// Keyring account names are namespaced so a client id can never collide
/// with a mailbox address.
fn entry(kind: &str, key: &str) -> Result<Entry> {
    Entry::new(APP_NAME, &format!("{kind}:{key}")).map_err(|e| anyhow!(e.to_string()))
}

fn load(kind: &str, key: &str) -> Result<Option<String>> {
    match entry(kind, key)?.get_password() {
        Ok(v) => Ok(Some(v)),
        Err(KeyringError::NoEntry) => Ok(None),
        Err(e) => Err(anyhow!(e.to_string())),
    }
}

fn save(kind: &str, key: &str, secret: &str) -> Result<()> {
    entry(kind, key)?
        .set_password(secret)
        .map_err(|e| anyhow!(e.to_string()))
}

/// Refresh token for the given mailbox address.
pub fn save_refresh_token(user_email: &str, refresh_token: &str) -> Result<()> {
    save("refresh", user_email, refresh_token)
}

pub fn load_refresh_token(user_email: &str) -> Result<Option<String>> {
    load("refresh", user_email)
}

/// OAuth client secret, keyed by client id.
pub fn save_client_secret(client_id: &str, client_secret: &str) -> Result<()> {
    save("client", client_id, client_secret)
}

pub fn load_client_secret(client_id: &str) -> Result<Option<String>> {
    load("client", client_id)
}
