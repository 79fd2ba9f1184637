//! Overlay side of the settings channel

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::messages::{Envelope, Request, Response};

/// Default queue depth between overlay and host
pub const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
pub struct SettingsClient {
    tx: mpsc::Sender<Envelope>,
}

impl SettingsClient {
    pub fn new(tx: mpsc::Sender<Envelope>) -> Self {
        Self { tx }
    }

    /// Create a client and the receiver a [`super::SettingsHost`] should serve
    pub fn channel() -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self::new(tx), rx)
    }

    /// Fire-and-forget; never blocks the caller
    pub fn send(&self, request: Request) {
        self.enqueue(Envelope {
            request,
            reply: None,
        });
    }

    /// Send a request whose reply will be polled later
    ///
    /// Returns `None` if the request could not be queued.
    pub fn request(&self, request: Request) -> Option<PendingReply> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let sent = self.enqueue(Envelope {
            request: request.clone(),
            reply: Some(reply_tx),
        });
        sent.then_some(PendingReply {
            request,
            rx: reply_rx,
        })
    }

    /// Send a request and wait for its reply
    #[cfg(test)]
    pub async fn call(&self, request: Request) -> anyhow::Result<Response> {
        use anyhow::Context;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                request,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| anyhow::anyhow!("Settings host is gone"))?;
        reply_rx.await.context("Settings host dropped the reply")
    }

    fn enqueue(&self, envelope: Envelope) -> bool {
        match self.tx.try_send(envelope) {
            Ok(()) => true,
            Err(TrySendError::Full(envelope)) => {
                log::warn!("Settings queue full, dropping {:?}", envelope.request);
                false
            }
            Err(TrySendError::Closed(envelope)) => {
                log::warn!("Settings host closed, dropping {:?}", envelope.request);
                false
            }
        }
    }
}

/// Outcome of polling a pending reply
#[derive(Debug, PartialEq, Eq)]
pub enum ReplyState {
    Pending,
    Ready(Response),
    /// The host dropped the request without answering
    Lost,
}

/// A reply the overlay is still waiting for
#[derive(Debug)]
pub struct PendingReply {
    request: Request,
    rx: oneshot::Receiver<Response>,
}

impl PendingReply {
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Check for the reply without blocking
    pub fn poll(&mut self) -> ReplyState {
        match self.rx.try_recv() {
            Ok(response) => ReplyState::Ready(response),
            Err(TryRecvError::Empty) => ReplyState::Pending,
            Err(TryRecvError::Closed) => ReplyState::Lost,
        }
    }
}
