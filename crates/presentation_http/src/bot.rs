//! Sample greeting bot
//!
//! Greets every sender by first name and logs delivery receipts.

use std::sync::Arc;

use application::{DeliveryHandler, MessageHandler, Response, ports::ProfilePort};
use async_trait::async_trait;
use domain::{Delivery, Message, Profile};
use tracing::{debug, info, instrument, warn};

/// Bot that answers every text message with `Hello, <first name>!`
pub struct GreetingBot {
    profiles: Arc<dyn ProfilePort>,
}

impl GreetingBot {
    pub fn new(profiles: Arc<dyn ProfilePort>) -> Self {
        Self { profiles }
    }

    /// Reply text for a profile
    pub fn greeting(profile: &Profile) -> String {
        format!("Hello, {}!", profile.first_name)
    }
}

impl std::fmt::Debug for GreetingBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingBot").finish_non_exhaustive()
    }
}

#[async_trait]
impl MessageHandler for GreetingBot {
    #[instrument(skip(self, message, response), fields(sender = %message.sender))]
    async fn on_message(&self, message: Message, response: Response) {
        info!(time = %message.time, text = %message.text, "Received message");

        // A failed lookup still gets a reply, just without a name.
        let profile = match self.profiles.profile(&message.page_token, message.sender).await {
            Ok(profile) => {
                debug!(name = %profile.full_name(), "Resolved sender profile");
                profile
            },
            Err(e) => {
                warn!(error = %e, "Profile lookup failed");
                Profile::default()
            },
        };

        match response.text(Self::greeting(&profile)).await {
            Ok(message_id) => info!(message_id = %message_id, "Greeting sent"),
            Err(e) => warn!(error = %e, "Failed to send greeting"),
        }
    }
}

#[async_trait]
impl DeliveryHandler for GreetingBot {
    async fn on_delivery(&self, delivery: Delivery, response: Response) {
        info!(
            recipient = %response.recipient(),
            watermark = %delivery.watermark(),
            mids = delivery.mids.len(),
            "Messages delivered"
        );
    }
}
