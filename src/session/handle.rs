//! Session handle and connection lifecycle.

use std::fmt;
use std::io;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, warn};

use super::{SessionId, SessionState, Status};
use crate::engine::Runtime;
use crate::error::{EngineError, SessionError};
use crate::network::reader::ReaderTask;
use crate::network::{FloodControl, ServerAddr, writer};
use crate::telemetry::spans;

/// Live half of a connected session.
struct Link {
    outbound: UnboundedSender<String>,
    cancel: CancellationToken,
}

struct Inner {
    id: SessionId,
    addr: ServerAddr,
    runtime: Weak<Runtime>,
    status: Mutex<Status>,
    link: Mutex<Option<Link>>,
    /// Reader task of the current or most recent connection.
    reader: Mutex<Option<JoinHandle<()>>>,
    /// Model kept between connections.
    parked: Mutex<Option<SessionState>>,
    /// Serializes connect and disconnect.
    lifecycle: tokio::sync::Mutex<()>,
}

/// Handle to one server connection. Clones share the same session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    pub(crate) fn new(id: SessionId, addr: ServerAddr, runtime: Weak<Runtime>) -> Self {
        let state = SessionState::new(id, addr.host());
        Self {
            inner: Arc::new(Inner {
                id,
                addr,
                runtime,
                status: Mutex::new(Status::Disconnected),
                link: Mutex::new(None),
                reader: Mutex::new(None),
                parked: Mutex::new(Some(state)),
                lifecycle: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// A session with no engine behind it.
    #[cfg(test)]
    pub(crate) fn detached(id: SessionId, host: &str) -> Self {
        Self::new(id, ServerAddr::new(host, 6667), Weak::new())
    }

    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    pub fn server(&self) -> &ServerAddr {
        &self.inner.addr
    }

    pub fn status(&self) -> Status {
        *self.inner.status.lock()
    }

    pub fn is_connected(&self) -> bool {
        self.status() == Status::Connected
    }

    /// Copy of the session model while disconnected.
    ///
    /// While connected the model lives in the reader task and this returns
    /// `None`; listeners see it through [`Context::state`](crate::bus::Context::state).
    pub fn parked_state(&self) -> Option<SessionState> {
        self.inner.parked.lock().clone()
    }

    /// Open the transport and start the reader and writer tasks.
    ///
    /// Does nothing if already connected. A model left by an earlier
    /// connection (own nick, channels) is picked up again.
    pub async fn connect(&self) -> Result<(), EngineError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        if self.is_connected() {
            return Ok(());
        }
        self.join_reader().await;

        let runtime = self.inner.runtime.upgrade().ok_or(EngineError::EngineGone)?;
        let addr = &self.inner.addr;
        let (input, output) = runtime
            .connector
            .connect(addr)
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::TimedOut => EngineError::ConnectTimeout(addr.to_string()),
                _ => EngineError::Connect {
                    addr: addr.to_string(),
                    source,
                },
            })?;

        let mut state = self
            .inner
            .parked
            .lock()
            .take()
            .unwrap_or_else(|| SessionState::new(self.id(), addr.host()));
        state.set_status(Status::Connected);

        let (outbound, queue) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let flood = FloodControl::new(&runtime.config.flood);
        let writer = tokio::spawn(
            writer::run(output, queue, flood, cancel.clone()).instrument(spans::writer(self.id())),
        );

        *self.inner.link.lock() = Some(Link {
            outbound,
            cancel: cancel.clone(),
        });
        *self.inner.status.lock() = Status::Connected;
        runtime.sessions.insert(self.clone());

        let span = spans::session(self.id(), addr.host());
        let task = ReaderTask {
            runtime: runtime.clone(),
            session: self.clone(),
            state,
            input,
            writer,
            cancel,
        };
        let reader = tokio::spawn(task.run().instrument(span));
        *self.inner.reader.lock() = Some(reader);
        Ok(())
    }

    /// Tear the connection down and wait until the `Disconnect` event has
    /// been delivered. Does nothing if not connected.
    ///
    /// Listener callbacks must use [`request_disconnect`](Self::request_disconnect)
    /// instead: awaiting this from the reader task would wait on itself.
    pub async fn disconnect(&self) {
        let _lifecycle = self.inner.lifecycle.lock().await;
        self.request_disconnect();
        self.join_reader().await;
    }

    /// Ask the session to disconnect without waiting for teardown.
    pub fn request_disconnect(&self) {
        if let Some(link) = self.inner.link.lock().as_ref() {
            link.cancel.cancel();
        }
    }

    /// Queue a raw line (without terminator) for the writer.
    pub fn send(&self, line: impl Into<String>) -> Result<(), SessionError> {
        let not_connected = || SessionError::NotConnected(self.id());
        let link = self.inner.link.lock();
        let link = link.as_ref().ok_or_else(not_connected)?;
        link.outbound.send(line.into()).map_err(|_| not_connected())
    }

    async fn join_reader(&self) {
        let reader = self.inner.reader.lock().take();
        if let Some(reader) = reader {
            if let Err(err) = reader.await {
                warn!(session = %self.id(), error = %err, "Reader task ended abnormally");
            }
        }
    }

    /// Called by the reader during teardown, once both tasks have stopped.
    pub(crate) fn mark_disconnected(&self) {
        self.inner.link.lock().take();
        *self.inner.status.lock() = Status::Disconnected;
    }

    pub(crate) fn park(&self, state: SessionState) {
        info!(session = %self.id(), channels = state.channels().count(), "Session state parked");
        *self.inner.parked.lock() = Some(state);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.inner.id)
            .field("server", &self.inner.addr)
            .field("status", &self.status())
            .finish()
    }
}
