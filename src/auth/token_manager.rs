use anyhow::Result;
use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::tokens_file::TokensFile;
use crate::auth::{oauth, token_store, tokens_file};
use crate::config::Config;
use crate::mail::gmail_client::AccessTokenProvider;

/// Hands out Gmail access tokens: cached, refreshed, or freshly authorized.
#[derive(Clone)]
pub struct TokenManager {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub user_email: String,
}

fn now_epoch() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}

impl TokenManager {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let client_id = cfg.client_id.clone();
        let client_secret = token_store::load_client_secret(&client_id)?
            .or_else(|| std::env::var("OAUTH_CLIENT_SECRET").ok());

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: cfg.redirect_uri().to_string(),
            user_email: cfg.user_email()?.to_string(),
        })
    }

    fn store(&self, tokens: &oauth::Tokens, now: i64) {
        if let Some(rt) = &tokens.refresh_token
            && let Err(e) = token_store::save_refresh_token(&self.user_email, rt)
        {
            warn!("couldn't save refresh token to keyring: {e}");
        }
        let tf = TokensFile::new(&tokens.access_token, now, tokens.expires_in);
        if let Err(e) = tokens_file::save_tokens(&tf) {
            warn!("couldn't cache access token: {e}");
        }
    }

    /// Returns a valid access token; refreshes or runs the browser flow if needed.
    pub fn get_access_token(&self) -> Result<String> {
        let now = now_epoch()?;

        if let Some(tf) = tokens_file::load_tokens()?
            && let Some(at) = tf.valid_token(now)
        {
            return Ok(at.to_string());
        }

        if let Some(rt) = token_store::load_refresh_token(&self.user_email)? {
            info!("refreshing access token for {}", self.user_email);
            match oauth::refresh_access_token(&self.client_id, self.client_secret.as_deref(), &rt) {
                Ok(t) => {
                    self.store(&t, now);
                    return Ok(t.access_token);
                }
                Err(e) => warn!("refresh failed, falling back to interactive auth: {e}"),
            }
        }

        info!("running interactive authorization for {}", self.user_email);
        let t = oauth::perform_pkce_flow(
            &self.client_id,
            self.client_secret.as_deref(),
            &self.redirect_uri,
        )?;
        self.store(&t, now);
        Ok(t.access_token)
    }
}

impl AccessTokenProvider for TokenManager {
    fn access_token(&self) -> Result<String> {
        self.get_access_token()
    }
}
