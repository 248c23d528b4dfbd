use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::config_dir;

/// Seconds shaved off the provider's lifetime so a token is never used
/// right as it expires.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Cached access token, stored next to the config as tokens.json.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokensFile {
    pub access_token: Option<String>,
    pub expires_at_epoch: Option<i64>, // epoch seconds
}

impl TokensFile {
    pub fn new(access_token: &str, now: i64, expires_in: Option<u64>) -> Self {
        let lifetime = expires_in.map(|s| s as i64).unwrap_or(3600);
        Self {
            access_token: Some(access_token.to_string()),
            expires_at_epoch: Some(now + lifetime - EXPIRY_MARGIN_SECS),
        }
    }

    /// The cached token, if it is still valid at `now`.
    pub fn valid_token(&self, now: i64) -> Option<&str> {
        match (&self.access_token, self.expires_at_epoch) {
            (Some(at), Some(exp)) if now < exp => Some(at),
            _ => None,
        }
    }
}

fn tokens_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("tokens.json"))
}

pub fn save_tokens(tf: &TokensFile) -> Result<()> {
    save_tokens_to(&tokens_path()?, tf)
}

pub fn load_tokens() -> Result<Option<TokensFile>> {
    load_tokens_from(&tokens_path()?)
}

pub fn save_tokens_to(path: &Path, tf: &TokensFile) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(tf)?)?;
    Ok(())
}

pub fn load_tokens_from(path: &Path) -> Result<Option<TokensFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&s)?))
}
