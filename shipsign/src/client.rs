use std::sync::Arc;

use log::debug;
use shipsign_core::{Context, Error, ProvideCredential, Result, SigningCredential};

use crate::{Config, Credential, DefaultCredentialProvider, SignedRequest};

/// Client holds everything a [`SignedRequest`] needs beyond its own content:
/// the runtime [`Context`], the [`Config`] and the credential provider.
///
/// Cloning a client is cheap, all parts are shared.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    loader: Arc<dyn ProvideCredential<Credential = Credential>>,
}

impl Client {
    /// Create a new client.
    ///
    /// Credentials are resolved by [`DefaultCredentialProvider`]: the config
    /// first, then the environment.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            ctx,
            loader: Arc::new(DefaultCredentialProvider::new(config.clone())),
            config,
        }
    }

    /// Replace the credential provider.
    pub fn with_credential_provider(
        mut self,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Get the context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get the config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a new unsigned request.
    pub fn request(&self, method: &str, path: &str) -> Result<SignedRequest> {
        SignedRequest::new(self, method, path)
    }

    /// Resolve the credential from the provider.
    ///
    /// The provider is asked every time, nothing is cached here.
    pub async fn credential(&self) -> Result<Credential> {
        let cred = self
            .loader
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| {
                Error::config_invalid("api_key and api_secret must be configured before signing")
            })?;

        if !cred.is_valid() {
            return Err(Error::config_invalid(
                "api_key and api_secret must not be empty",
            ));
        }

        debug!("resolved credential: {:?}", cred);
        Ok(cred)
    }
}
