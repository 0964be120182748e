use crate::{Context, Result};
use std::fmt::Debug;

/// SigningCredential is the trait used by signed requests as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is usable for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential is the trait used to resolve the credential from the environment.
///
/// It is called every time a request is signed. Implementations should not cache
/// stale values: a rotated key must be visible to the next signing.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Resolve the credential from the current context.
    ///
    /// Returns `Ok(None)` when this provider has nothing to offer, so that
    /// a chain can fall through to the next provider.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}
