//! Page token resolver backed by a single configured token.

use application::{error::ApplicationError, ports::PageTokenPort};
use async_trait::async_trait;
use domain::PageId;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Resolves every page to the same configured access token
///
/// Suits deployments that serve one page. Without a token every lookup fails
/// with a configuration error, which makes the dispatcher answer `not ok`.
#[derive(Clone, Default)]
pub struct StaticPageTokenResolver {
    token: Option<SecretString>,
}

impl StaticPageTokenResolver {
    pub const fn new(token: Option<SecretString>) -> Self {
        Self { token }
    }

    /// Whether a token is configured
    pub const fn is_configured(&self) -> bool {
        self.token.is_some()
    }
}

impl std::fmt::Debug for StaticPageTokenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticPageTokenResolver")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait]
impl PageTokenPort for StaticPageTokenResolver {
    #[instrument(skip(self))]
    async fn page_token(&self, page_id: PageId) -> Result<String, ApplicationError> {
        match &self.token {
            Some(token) => {
                debug!("Resolved page token");
                Ok(token.expose_secret().to_string())
            },
            None => Err(ApplicationError::Configuration(format!(
                "No page token configured for page {page_id}"
            ))),
        }
    }
}
