//! Handle for communicating with the tiling actor.
//!
//! The `TilingHandle` provides a cheap, cloneable interface for sending
//! messages to the tiling actor from the platform layer and the UI.

use tokio::sync::{mpsc, oneshot};

use super::messages::{QueryResult, TilingMessage, TilingQuery, WindowEvent};
use crate::modules::switcher::{KeyDisposition, KeyEvent};
use crate::modules::tiling::state::WindowHandle;

/// Error types for actor communication.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// Failed to send message to actor.
    #[error("Failed to send message to actor: channel closed")]
    SendFailed,

    /// Failed to receive response from actor.
    #[error("Failed to receive response from actor: channel closed")]
    ReceiveFailed,
}

/// Handle for communicating with the tiling actor.
#[derive(Clone)]
pub struct TilingHandle {
    sender: mpsc::Sender<TilingMessage>,
}

impl TilingHandle {
    pub(crate) const fn new(sender: mpsc::Sender<TilingMessage>) -> Self { Self { sender } }

    /// Send a message without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed or full.
    pub fn send(&self, msg: TilingMessage) -> Result<(), ActorError> {
        self.sender.try_send(msg).map_err(|_| ActorError::SendFailed)
    }

    /// Send a message, waiting for room in the channel.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed.
    pub async fn send_async(&self, msg: TilingMessage) -> Result<(), ActorError> {
        self.sender.send(msg).await.map_err(|_| ActorError::SendFailed)
    }

    /// Forward a window-system event.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed or full.
    pub fn window_event(&self, event: WindowEvent) -> Result<(), ActorError> {
        self.send(TilingMessage::Window(event))
    }

    /// Feed a keystroke and wait for the switcher's verdict.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the actor fails.
    pub async fn key(&self, event: KeyEvent) -> Result<KeyDisposition, ActorError> {
        let (tx, rx) = oneshot::channel();
        self.send_async(TilingMessage::Key {
            event,
            respond_to: Some(tx),
        })
        .await?;
        rx.await.map_err(|_| ActorError::ReceiveFailed)
    }

    /// Tile windows side by side.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed or full.
    pub fn split(&self, windows: Vec<WindowHandle>) -> Result<(), ActorError> {
        self.send(TilingMessage::Split(windows))
    }

    /// Execute a query and wait for the result.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the channel is closed, or
    /// [`ActorError::ReceiveFailed`] if the response channel is closed.
    pub async fn query(&self, query: TilingQuery) -> Result<QueryResult, ActorError> {
        let (tx, rx) = oneshot::channel();
        self.send_async(TilingMessage::Query { query, respond_to: tx }).await?;
        rx.await.map_err(|_| ActorError::ReceiveFailed)
    }

    /// Ask the actor to stop.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::SendFailed`] if the actor is already gone.
    pub fn shutdown(&self) -> Result<(), ActorError> { self.send(TilingMessage::Shutdown) }

    /// Returns `true` while the actor is running.
    #[must_use]
    pub fn is_alive(&self) -> bool { !self.sender.is_closed() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let (tx, rx) = mpsc::channel(4);
        let handle = TilingHandle::new(tx);
        assert!(handle.is_alive());

        drop(rx);
        assert!(!handle.is_alive());
        assert!(matches!(handle.send(TilingMessage::Rebalance), Err(ActorError::SendFailed)));
        assert!(matches!(
            handle.query(TilingQuery::Groups).await,
            Err(ActorError::SendFailed)
        ));
    }

    #[tokio::test]
    async fn test_query_without_answer_is_receive_failure() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = TilingHandle::new(tx);

        let responder = tokio::spawn(async move {
            // Drop the responder without answering
            if let Some(TilingMessage::Query { respond_to, .. }) = rx.recv().await {
                drop(respond_to);
            }
        });

        assert!(matches!(
            handle.query(TilingQuery::Groups).await,
            Err(ActorError::ReceiveFailed)
        ));
        responder.await.unwrap();
    }
}
