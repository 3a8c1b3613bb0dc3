use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tracing::trace;

use crate::error::{ChannelError, Result};
use crate::server::Server;

/// Carries one encoded request frame out and brings one response frame back.
pub trait Channel: Send + Sync {
    fn round_trip(&self, frame: Bytes) -> Result<Bytes>;
}

impl<C: Channel + ?Sized> Channel for Arc<C> {
    fn round_trip(&self, frame: Bytes) -> Result<Bytes> {
        (**self).round_trip(frame)
    }
}

impl<C: Channel + ?Sized> Channel for &C {
    fn round_trip(&self, frame: Bytes) -> Result<Bytes> {
        (**self).round_trip(frame)
    }
}

/// In-process channel handing frames straight to a [`Server`].
///
/// Closing it makes every later round trip fail with
/// [`ChannelError::Closed`].
#[derive(Debug)]
pub struct LoopbackChannel {
    server: Arc<Server>,
    closed: AtomicBool,
}

impl LoopbackChannel {
    pub fn new(server: Arc<Server>) -> Self {
        Self {
            server,
            closed: AtomicBool::new(false),
        }
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }
}

impl Channel for LoopbackChannel {
    fn round_trip(&self, frame: Bytes) -> Result<Bytes> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        trace!(len = frame.len(), "loopback frame");
        Ok(self.server.handle_frame(&frame))
    }
}
