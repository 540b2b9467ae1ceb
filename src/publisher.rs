//! Domain event publication over NATS.

use crate::domain::events::DomainEvent;

/// Publishes events when a NATS client is configured; otherwise only logs them.
#[derive(Clone, Default)]
pub struct EventPublisher { nats: Option<async_nats::Client> }

impl EventPublisher {
    pub fn disabled() -> Self { Self::default() }

    pub fn nats(client: async_nats::Client) -> Self { Self { nats: Some(client) } }

    pub async fn connect(url: &str) -> Result<Self, async_nats::ConnectError> {
        let client = async_nats::connect(url).await?;
        tracing::info!(url, "Connected to NATS");
        Ok(Self::nats(client))
    }

    pub fn is_enabled(&self) -> bool { self.nats.is_some() }

    /// Publication failures are logged and never reach the caller.
    pub async fn publish(&self, event: DomainEvent) {
        let subject = event.subject();
        let Some(client) = &self.nats else {
            tracing::debug!(subject, ?event, "Event (no publisher)");
            return;
        };
        let payload = match serde_json::to_vec(&event) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(subject, error = %e, "Failed to encode event");
                return;
            }
        };
        if let Err(e) = client.publish(subject.to_string(), payload.into()).await {
            tracing::warn!(subject, error = %e, "Failed to publish event");
        }
    }
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher").field("enabled", &self.is_enabled()).finish()
    }
}
