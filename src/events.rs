//! Domain events published by engine mutations.
//!
//! Read paths that care about freshness subscribe to the bus instead of the
//! engine knowing which caches to invalidate.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    TaskUpdated { task_id: Uuid },
    AssignmentChanged { task_id: Uuid, assignment_id: Uuid },
    ProposalConverted { proposal_id: Uuid, project_id: Uuid },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        EventBus { tx }
    }

    /// Publish an event. A bus with no subscribers drops events silently;
    /// publication must never fail a mutation that has already committed.
    pub fn publish(&self, event: DomainEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        EventBus::new(64)
    }
}

/// Trace every event; the default subscriber spawned at startup.
pub fn spawn_logger(mut rx: broadcast::Receiver<DomainEvent>) {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => tracing::debug!(event = ?event, "domain event"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("event logger lagged, skipped {skipped} events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}
