//! Credential acquisition for the Fantasy Sports API.
//!
//! [`TokenStore`] owns the OAuth2 credential for the duration of a run. It
//! loads the persisted credential lazily, refreshes it when it is about to
//! expire, and writes every newly obtained credential back to disk before
//! handing it out. API clients depend only on the [`TokenProvider`] trait.

pub mod oauth;
pub mod storage;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::user_prompts::prompt_for_verifier_code;
use crate::constants::auth::EXPIRY_LEEWAY_SECONDS;
use crate::error::AppError;

pub use oauth::OAuthClient;
pub use storage::CredentialFile;

fn default_token_type() -> String {
    "bearer".to_string()
}

/// OAuth2 bearer credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// A credential within the expiry leeway of `now` counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_LEEWAY_SECONDS) >= self.expires_at
    }
}

/// Capability to hand out a usable bearer credential.
#[allow(async_fn_in_trait)]
pub trait TokenProvider {
    /// Returns a credential that is valid for at least the expiry leeway.
    async fn acquire(&mut self) -> Result<Credential, AppError>;

    /// Forces a refresh regardless of the current expiry.
    async fn refresh(&mut self) -> Result<Credential, AppError>;
}

/// Whether the store may fall back to asking the user for a verifier code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationMode {
    Interactive,
    NonInteractive,
}

#[derive(Debug)]
pub struct TokenStore {
    file: CredentialFile,
    oauth: OAuthClient,
    mode: AuthorizationMode,
    credential: Option<Credential>,
    loaded: bool,
}

impl TokenStore {
    pub fn new(file: CredentialFile, oauth: OAuthClient, mode: AuthorizationMode) -> Self {
        Self {
            file,
            oauth,
            mode,
            credential: None,
            loaded: false,
        }
    }

    async fn ensure_loaded(&mut self) -> Result<(), AppError> {
        if !self.loaded {
            self.credential = self.file.read().await?;
            self.loaded = true;
        }
        Ok(())
    }

    async fn persist(&mut self, credential: Credential) -> Result<Credential, AppError> {
        self.file.write(&credential).await?;
        self.credential = Some(credential.clone());
        Ok(credential)
    }

    async fn authorize(&mut self) -> Result<Credential, AppError> {
        if self.mode == AuthorizationMode::NonInteractive {
            return Err(AppError::auth_missing(format!(
                "no credential at {} and prompting is disabled",
                self.file.path().display()
            )));
        }

        let url = self.oauth.authorization_url()?;
        let code = prompt_for_verifier_code(&url).await?;
        if code.is_empty() {
            return Err(AppError::auth_missing("no verifier code entered"));
        }

        let credential = self.oauth.exchange_code(&code).await?;
        info!("Authorization completed");
        self.persist(credential).await
    }
}

impl TokenProvider for TokenStore {
    #[instrument(skip(self))]
    async fn acquire(&mut self) -> Result<Credential, AppError> {
        self.ensure_loaded().await?;

        if let Some(credential) = &self.credential
            && !credential.is_expired_at(Utc::now())
        {
            return Ok(credential.clone());
        }

        if self.credential.is_some() {
            info!("Stored access token expired");
            self.refresh().await
        } else {
            warn!("No stored credential, starting authorization");
            self.authorize().await
        }
    }

    async fn refresh(&mut self) -> Result<Credential, AppError> {
        self.ensure_loaded().await?;

        let Some(refresh_token) = self.credential.as_ref().map(|c| c.refresh_token.clone())
        else {
            return self.authorize().await;
        };

        let refreshed = self.oauth.refresh(&refresh_token).await?;
        self.persist(refreshed).await
    }
}
