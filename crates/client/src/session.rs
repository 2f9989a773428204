use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use rucsearch_core::{config::RegistryConfig, LookupError};

/// One registry session: its own cookie store and bounded-timeout client.
/// Created per operation, never shared or reused.
pub struct Session {
    client: Client,
    config: RegistryConfig,
}

impl Session {
    /// Builds the client and performs the cookie handshake the registry
    /// requires before it will accept a form submission. Failure here is
    /// fatal to the operation; there is no retry.
    pub async fn establish(config: &RegistryConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;

        client
            .head(&config.search_url)
            .send()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;
        debug!("session established");

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Fetches the rotating numeric token the form expects alongside the
    /// captcha code.
    pub async fn fetch_token(&self) -> Result<String, LookupError> {
        let body = self
            .client
            .post(&self.config.captcha_url)
            .form(&[("accion", "random")])
            .send()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?
            .text()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;
        Ok(body.trim().to_string())
    }

    /// Fetches the captcha image bytes over this session so the cookies
    /// tie the image to the later submission.
    pub async fn fetch_captcha_image(&self) -> Result<Vec<u8>, LookupError> {
        let url = format!("{}?accion=image", self.config.captcha_url);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
