//! OAuth2 token endpoint exchanges (authorization code and refresh token).

use chrono::{Duration, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use super::Credential;
use crate::config::Config;
use crate::constants::{auth::DEFAULT_TOKEN_LIFETIME_SECONDS, yahoo::REDIRECT_URI_OOB};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Client for the authorization server of the registered application.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    auth_url: String,
    token_url: String,
}

impl OAuthClient {
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.consumer_key.clone(),
            client_secret: config.consumer_secret.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// URL the user opens to grant access; the verifier code is shown
    /// out-of-band after approval.
    pub fn authorization_url(&self) -> Result<String, AppError> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", REDIRECT_URI_OOB),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| AppError::config_error(format!("Invalid authorization URL: {e}")))?;
        Ok(url.to_string())
    }

    /// Exchanges a verifier code for a fresh credential.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, AppError> {
        info!("Exchanging authorization code for a token");
        self.request_token(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", REDIRECT_URI_OOB),
            ],
            None,
        )
        .await
    }

    /// Obtains a new access token with a refresh token. When the server does
    /// not rotate the refresh token, the previous one is kept.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential, AppError> {
        info!("Refreshing access token");
        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("redirect_uri", REDIRECT_URI_OOB),
            ],
            Some(refresh_token),
        )
        .await
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh_token: Option<&str>,
    ) -> Result<Credential, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!("Token request to {} failed: {}", self.token_url, e);
                if e.is_timeout() {
                    AppError::network_timeout(&self.token_url)
                } else if e.is_connect() {
                    AppError::network_connection(&self.token_url, e.to_string())
                } else {
                    AppError::ApiFetch(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<TokenErrorResponse>(&body)
                .map(|err| match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                })
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            error!("Token endpoint returned {}: {}", status, message);
            return Err(AppError::auth_rejected(status.as_u16(), message));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::auth_malformed(e.to_string()))?;

        let refresh_token = token
            .refresh_token
            .or_else(|| previous_refresh_token.map(str::to_string))
            .ok_or_else(|| AppError::auth_malformed("token response has no refresh_token"))?;

        let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECONDS);
        debug!("Received token valid for {lifetime} seconds");

        Ok(Credential {
            access_token: token.access_token,
            refresh_token,
            token_type: token.token_type.unwrap_or_else(|| "bearer".to_string()),
            expires_at: Utc::now() + Duration::seconds(lifetime),
        })
    }
}
