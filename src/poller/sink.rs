use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{PollerError, Result};
use crate::types::Event;

/// Downstream consumer of new events ("enqueue one event").
///
/// Implementations may apply backpressure but must not block indefinitely.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn enqueue(&self, event: Event) -> Result<()>;
}

#[async_trait]
impl EventSink for mpsc::Sender<Event> {
    async fn enqueue(&self, event: Event) -> Result<()> {
        self.send(event).await.map_err(|_| PollerError::SinkClosed)
    }
}

#[async_trait]
impl EventSink for mpsc::UnboundedSender<Event> {
    async fn enqueue(&self, event: Event) -> Result<()> {
        self.send(event).map_err(|_| PollerError::SinkClosed)
    }
}

#[async_trait]
impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    async fn enqueue(&self, event: Event) -> Result<()> {
        (**self).enqueue(event).await
    }
}
