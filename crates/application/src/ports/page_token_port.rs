//! Page token port
//!
//! Resolves the credential needed to act on behalf of a page. Called once per
//! dispatched event; implementations that talk to a remote store should cache.

use async_trait::async_trait;
use domain::PageId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Resolves page access tokens
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageTokenPort: Send + Sync {
    /// Return the access token for `page_id`, or fail if none is available
    async fn page_token(&self, page_id: PageId) -> Result<String, ApplicationError>;
}
