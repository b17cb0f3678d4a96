//! Webhook event dispatcher
//!
//! Decodes a webhook body, walks its entries and messaging events in order,
//! and hands every recognised event to the registered handler together with a
//! [`Response`] bound to the event's sender.
//!
//! Registration takes `&mut self`, so all handlers are in place before the
//! dispatcher is shared behind an `Arc` and starts serving requests.

use std::{fmt, sync::Arc};

use application::{
    ApplicationError, DeliveryHandler, MessageHandler, PageTokenPort, ReplyPort, Response,
};
use domain::PageId;
use serde_json::json;
use tracing::{debug, error, instrument, warn};

use crate::webhook::{ClassifiedEvent, MessagingEvent, WebhookPayload, classify};

/// Acknowledgment returned to the platform for a webhook delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    Ok,
    NotOk,
}

impl Acknowledgment {
    pub const fn status(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NotOk => "not ok",
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// JSON body written back to the platform
    pub fn body(self) -> serde_json::Value {
        json!({ "status": self.status() })
    }
}

/// What happened while dispatching one webhook delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub acknowledgment: Acknowledgment,
    /// Events that resolved a page token and reached handler dispatch
    pub dispatched: usize,
    /// Events skipped as unknown
    pub skipped: usize,
}

impl DispatchOutcome {
    const fn rejected(dispatched: usize, skipped: usize) -> Self {
        Self {
            acknowledgment: Acknowledgment::NotOk,
            dispatched,
            skipped,
        }
    }
}

/// Routes webhook events to registered handlers
#[derive(Clone)]
pub struct WebhookDispatcher {
    reply: Arc<dyn ReplyPort>,
    page_tokens: Option<Arc<dyn PageTokenPort>>,
    on_message: Option<Arc<dyn MessageHandler>>,
    on_delivery: Option<Arc<dyn DeliveryHandler>>,
}

impl WebhookDispatcher {
    /// Create a dispatcher whose reply handles send through `reply`
    pub fn new(reply: Arc<dyn ReplyPort>) -> Self {
        Self {
            reply,
            page_tokens: None,
            on_message: None,
            on_delivery: None,
        }
    }

    /// Set the page token resolver, replacing any previous one
    pub fn on_page_token(&mut self, resolver: Arc<dyn PageTokenPort>) -> &mut Self {
        self.page_tokens = Some(resolver);
        self
    }

    /// Set the text message handler, replacing any previous one
    pub fn on_message(&mut self, handler: Arc<dyn MessageHandler>) -> &mut Self {
        self.on_message = Some(handler);
        self
    }

    /// Set the delivery receipt handler, replacing any previous one
    pub fn on_delivery(&mut self, handler: Arc<dyn DeliveryHandler>) -> &mut Self {
        self.on_delivery = Some(handler);
        self
    }

    /// Decode a raw webhook body and dispatch its events
    ///
    /// A body that is not valid JSON is rejected without dispatching anything.
    pub async fn dispatch_body(&self, body: &[u8]) -> DispatchOutcome {
        let payload = match WebhookPayload::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to decode webhook payload");
                return DispatchOutcome::rejected(0, 0);
            },
        };

        self.dispatch(&payload).await
    }

    /// Dispatch every event of an already decoded payload
    ///
    /// Events are handled strictly in order. The first page token that cannot
    /// be resolved aborts the whole payload: later events are not looked at,
    /// earlier handler calls stand.
    #[instrument(skip_all, fields(object = %payload.object, entries = payload.entry.len()))]
    pub async fn dispatch(&self, payload: &WebhookPayload) -> DispatchOutcome {
        if !payload.is_page() {
            warn!(object = %payload.object, "Webhook object is not 'page', processing anyway");
        }

        let mut dispatched = 0;
        let mut skipped = 0;

        for entry in &payload.entry {
            let page_id = entry.page_id();

            for event in &entry.messaging {
                let classified = classify(event);
                if let ClassifiedEvent::Unknown = classified {
                    warn!(
                        page_id = %page_id,
                        sender = %event.sender,
                        timestamp = event.timestamp,
                        "Unknown messaging event, skipping"
                    );
                    skipped += 1;
                    continue;
                }

                let token = match self.resolve_page_token(page_id).await {
                    Ok(token) => token,
                    Err(e) => {
                        error!(
                            error = %e,
                            page_id = %page_id,
                            "Failed to resolve page token, aborting webhook"
                        );
                        return DispatchOutcome::rejected(dispatched, skipped);
                    },
                };

                self.deliver(classified, event, token).await;
                dispatched += 1;
            }
        }

        debug!(dispatched, skipped, "Webhook dispatched");
        DispatchOutcome {
            acknowledgment: Acknowledgment::Ok,
            dispatched,
            skipped,
        }
    }

    async fn resolve_page_token(&self, page_id: PageId) -> Result<String, ApplicationError> {
        let Some(resolver) = &self.page_tokens else {
            return Err(ApplicationError::Configuration(
                "no page token resolver registered".to_string(),
            ));
        };
        resolver.page_token(page_id).await
    }

    async fn deliver(&self, classified: ClassifiedEvent<'_>, event: &MessagingEvent, token: String) {
        let response = Response::new(event.sender, token, Arc::clone(&self.reply));

        match classified {
            ClassifiedEvent::Text(incoming) => {
                if let Some(handler) = &self.on_message {
                    let message = incoming.to_message(event, response.page_token());
                    debug!(sender = %event.sender, mid = ?message.mid, "Dispatching message");
                    handler.on_message(message, response).await;
                }
            },
            ClassifiedEvent::Delivery(delivery) => {
                if let Some(handler) = &self.on_delivery {
                    debug!(sender = %event.sender, watermark = delivery.raw_watermark, "Dispatching delivery");
                    handler.on_delivery(delivery.clone(), response).await;
                }
            },
            ClassifiedEvent::Unknown => {},
        }
    }
}

impl fmt::Debug for WebhookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookDispatcher")
            .field("page_tokens", &self.page_tokens.is_some())
            .field("on_message", &self.on_message.is_some())
            .field("on_delivery", &self.on_delivery.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use domain::{Delivery, Message};

    use super::*;
    use application::OutgoingTextMessage;

    #[derive(Default)]
    struct NoopReply;

    #[async_trait]
    impl ReplyPort for NoopReply {
        async fn send_text(
            &self,
            _page_token: &str,
            _message: OutgoingTextMessage,
        ) -> Result<String, ApplicationError> {
            Ok("mid".to_string())
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MessageHandler for Recorder {
        async fn on_message(&self, message: Message, response: Response) {
            self.events.lock().unwrap().push(format!(
                "message:{}:{}:{}",
                message.text,
                response.recipient().id,
                message.page_token
            ));
        }
    }

    #[async_trait]
    impl DeliveryHandler for Recorder {
        async fn on_delivery(&self, delivery: Delivery, response: Response) {
            self.events
                .lock()
                .unwrap()
                .push(format!("delivery:{}:{}", delivery.raw_watermark, response.recipient().id));
        }
    }

    struct FixedToken(&'static str);

    #[async_trait]
    impl PageTokenPort for FixedToken {
        async fn page_token(&self, _page_id: PageId) -> Result<String, ApplicationError> {
            Ok(self.0.to_string())
        }
    }

    fn dispatcher(recorder: &Arc<Recorder>) -> WebhookDispatcher {
        let mut dispatcher = WebhookDispatcher::new(Arc::new(NoopReply));
        dispatcher
            .on_page_token(Arc::new(FixedToken("TOK")))
            .on_message(Arc::clone(recorder) as Arc<dyn MessageHandler>)
            .on_delivery(Arc::clone(recorder) as Arc<dyn DeliveryHandler>);
        dispatcher
    }

    #[test]
    fn acknowledgment_bodies() {
        assert_eq!(Acknowledgment::Ok.body(), json!({"status": "ok"}));
        assert_eq!(Acknowledgment::NotOk.body(), json!({"status": "not ok"}));
        assert!(Acknowledgment::Ok.is_ok());
        assert!(!Acknowledgment::NotOk.is_ok());
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let outcome = dispatcher(&recorder).dispatch_body(b"not json").await;
        assert_eq!(outcome.acknowledgment, Acknowledgment::NotOk);
        assert_eq!(outcome.dispatched, 0);
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn array_body_is_rejected() {
        let recorder = Arc::new(Recorder::default());
        let outcome = dispatcher(&recorder).dispatch_body(b"[]").await;
        assert_eq!(outcome.acknowledgment, Acknowledgment::NotOk);
        assert_eq!(outcome.dispatched, 0);
    }

    #[tokio::test]
    async fn non_page_object_is_still_processed() {
        let recorder = Arc::new(Recorder::default());
        let body = br#"{"object":"instagram","entry":[{"id":1,"messaging":[{"sender":{"id":7},"recipient":{"id":9},"timestamp":1,"message":{"text":"hi"}}]}]}"#;
        let outcome = dispatcher(&recorder).dispatch_body(body).await;
        assert!(outcome.acknowledgment.is_ok());
        assert_eq!(recorder.events.lock().unwrap().as_slice(), ["message:hi:7:TOK"]);
    }

    #[tokio::test]
    async fn missing_resolver_aborts() {
        let recorder = Arc::new(Recorder::default());
        let mut dispatcher = WebhookDispatcher::new(Arc::new(NoopReply));
        dispatcher.on_message(Arc::clone(&recorder) as Arc<dyn MessageHandler>);

        let body = br#"{"object":"page","entry":[{"id":1,"messaging":[{"sender":{"id":7},"recipient":{"id":9},"timestamp":1,"message":{"text":"hi"}}]}]}"#;
        let outcome = dispatcher.dispatch_body(body).await;
        assert_eq!(outcome.acknowledgment, Acknowledgment::NotOk);
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unregistered_handlers_are_noops() {
        let mut dispatcher = WebhookDispatcher::new(Arc::new(NoopReply));
        dispatcher.on_page_token(Arc::new(FixedToken("TOK")));

        let body = br#"{"object":"page","entry":[{"id":1,"messaging":[
            {"sender":{"id":7},"recipient":{"id":9},"timestamp":1,"message":{"text":"hi"}},
            {"sender":{"id":7},"recipient":{"id":9},"timestamp":2,"delivery":{"watermark":5}}
        ]}]}"#;
        let outcome = dispatcher.dispatch_body(body).await;
        assert!(outcome.acknowledgment.is_ok());
        assert_eq!(outcome.dispatched, 2);
    }

    #[tokio::test]
    async fn later_registration_wins() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let mut dispatcher = dispatcher(&first);
        dispatcher.on_message(Arc::clone(&second) as Arc<dyn MessageHandler>);

        let body = br#"{"object":"page","entry":[{"id":1,"messaging":[{"sender":{"id":7},"recipient":{"id":9},"timestamp":1,"message":{"text":"hi"}}]}]}"#;
        dispatcher.dispatch_body(body).await;

        assert!(first.events.lock().unwrap().is_empty());
        assert_eq!(second.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_payload_is_acknowledged() {
        let recorder = Arc::new(Recorder::default());
        let outcome = dispatcher(&recorder).dispatch_body(br#"{"object":"page","entry":[]}"#).await;
        assert_eq!(
            outcome,
            DispatchOutcome {
                acknowledgment: Acknowledgment::Ok,
                dispatched: 0,
                skipped: 0,
            }
        );
    }

    #[test]
    fn debug_shows_registration_state() {
        let recorder = Arc::new(Recorder::default());
        let debug = format!("{:?}", dispatcher(&recorder));
        assert!(debug.contains("on_message: true"));
    }
}
