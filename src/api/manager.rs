use super::auth::{AuthManager, HttpTokenIssuer};
use super::client::SurveyClient;
use super::transport::ReqwestTransport;
use crate::auth::{Credentials, FileTokenStore};
use crate::config::Config;
use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Wires configuration, token storage and transport into a ready client
pub struct ClientManager {
    auth: Arc<AuthManager>,
    client: SurveyClient,
}

impl ClientManager {
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.backend.timeout_secs);
        let connect_timeout = Duration::from_secs(config.backend.connect_timeout_secs);

        let token_path = config.token_path()?;
        debug!("Token storage at {:?}", token_path);
        let store = Arc::new(FileTokenStore::new(token_path));

        let issuer = HttpTokenIssuer::new(
            &config.backend.base_url,
            Credentials::from_config(config),
            timeout,
        )
        .context("Failed to build token client")?;

        let auth = Arc::new(AuthManager::new(Arc::new(issuer), store));

        let transport = ReqwestTransport::new(&config.backend.base_url, timeout, connect_timeout)
            .context("Failed to build HTTP client")?;

        let client = SurveyClient::new(Arc::new(transport), auth.clone());

        Ok(Self { auth, client })
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn client(&self) -> &SurveyClient {
        &self.client
    }
}
