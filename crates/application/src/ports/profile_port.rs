//! Profile lookup port

use async_trait::async_trait;
use domain::{Participant, Profile};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Looks up the public profile of a page-scoped user
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfilePort: Send + Sync {
    /// Fetch the profile of `user`, authenticated with `page_token`
    async fn profile(
        &self,
        page_token: &str,
        user: Participant,
    ) -> Result<Profile, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_port_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ProfilePort>();
    }
}
