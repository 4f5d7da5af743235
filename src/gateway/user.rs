use async_trait::async_trait;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::UserServiceConfig;

use super::error::{GatewayError, classify_response};
use super::retry::{RetryPolicy, with_retry};
use super::{UserDetails, UserGateway, render_path};

/// reqwest-backed client for the user-validation service. The configured
/// bearer token is forwarded on every call.
pub struct HttpUserGateway {
    client: reqwest::Client,
    config: UserServiceConfig,
    retry: RetryPolicy,
}

impl HttpUserGateway {
    pub fn new(client: reqwest::Client, config: UserServiceConfig, retry: RetryPolicy) -> Self {
        Self {
            client,
            config,
            retry,
        }
    }

    async fn fetch_exists(&self, user_id: &Uuid) -> Result<bool, GatewayError> {
        let url = format!(
            "{}{}",
            self.config.base_url,
            render_path(&self.config.validate_path, user_id)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(classify_response("user validation", response).await);
        }
        Ok(response.json::<bool>().await?)
    }

    async fn fetch_details(&self, user_id: &Uuid) -> Result<UserDetails, GatewayError> {
        let url = format!(
            "{}{}",
            self.config.base_url,
            render_path(&self.config.details_path, user_id)
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.bearer_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(classify_response("user details", response).await);
        }
        Ok(response.json::<UserDetails>().await?)
    }
}

#[async_trait]
impl UserGateway for HttpUserGateway {
    // Any failure left after the retry budget, 404 included, degrades to
    // `false` instead of propagating.
    async fn exists(&self, user_id: Uuid) -> bool {
        debug!(%user_id, "validating user existence");
        match with_retry(&self.retry, "validate_user", || self.fetch_exists(&user_id)).await {
            Ok(exists) => exists,
            Err(err) => {
                error!(%user_id, error = %err, "user validation failed, treating user as absent");
                false
            }
        }
    }

    async fn details(&self, user_id: Uuid) -> Option<UserDetails> {
        debug!(%user_id, "fetching user details");
        match with_retry(&self.retry, "user_details", || self.fetch_details(&user_id)).await {
            Ok(details) => Some(details),
            Err(err) => {
                warn!(%user_id, error = %err, "user details unavailable");
                None
            }
        }
    }
}
