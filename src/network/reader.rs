//! Reader task: decode, reconcile, dispatch, then tear down.
//!
//! Everything for one session happens here in arrival order. The task owns
//! the [`SessionState`] while connected, so reconciliation needs no locks; a
//! slow listener holds up this session and nothing else.

use std::sync::Arc;

use bytes::BytesMut;
use futures_util::StreamExt;
use slirc_wire::{CodecError, LineCodec};
use tokio::task::JoinHandle;
use tokio_util::codec::{Decoder, FramedRead};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::BoxRead;
use crate::bus::Context;
use crate::engine::Runtime;
use crate::event::{Event, Payload};
use crate::session::{Reconciled, Session, SessionState, Status};

pub(crate) struct ReaderTask {
    pub(crate) runtime: Arc<Runtime>,
    pub(crate) session: Session,
    pub(crate) state: SessionState,
    pub(crate) input: BoxRead,
    pub(crate) writer: JoinHandle<()>,
    pub(crate) cancel: CancellationToken,
}

impl ReaderTask {
    pub(crate) async fn run(self) {
        let ReaderTask {
            runtime,
            session,
            mut state,
            input,
            writer,
            cancel,
        } = self;

        let max_len = runtime.config.connection.max_line_length;
        let mut lines = FramedRead::new(input, InboundCodec(LineCodec::with_max_len(max_len)));

        info!("Session connected");
        let connected = Event::lifecycle(session.id(), session.server().host(), Payload::Connect);
        dispatch(&runtime, &session, &state, &connected);

        loop {
            let frame = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Reader cancelled");
                    break;
                }
                frame = lines.next() => frame,
            };

            match frame {
                Some(Ok(Inbound::Line(line))) => process_line(&runtime, &session, &mut state, &line),
                Some(Ok(Inbound::Oversized { actual, limit })) => {
                    warn!(actual, limit, "Dropped over-long line");
                }
                Some(Err(err)) => {
                    warn!(error = %err, "Read failed");
                    break;
                }
                None => {
                    info!("Server closed the connection");
                    break;
                }
            }
        }

        cancel.cancel();
        if let Err(err) = writer.await {
            warn!(error = %err, "Writer task ended abnormally");
        }
        drop(lines);

        session.mark_disconnected();
        runtime.sessions.remove(session.id());
        state.set_status(Status::Disconnected);
        info!("Session disconnected");

        let disconnected =
            Event::lifecycle(session.id(), session.server().host(), Payload::Disconnect);
        dispatch(&runtime, &session, &state, &disconnected);
        session.park(state);
    }
}

enum Inbound {
    Line(String),
    Oversized { actual: usize, limit: usize },
}

/// Turns over-long lines into items. `FramedRead` stops decoding buffered
/// input after any decoder error, which would stall the lines behind it.
struct InboundCodec(LineCodec);

impl InboundCodec {
    fn map(result: Result<Option<String>, CodecError>) -> Result<Option<Inbound>, CodecError> {
        match result {
            Ok(line) => Ok(line.map(Inbound::Line)),
            Err(CodecError::LineTooLong { actual, limit }) => {
                Ok(Some(Inbound::Oversized { actual, limit }))
            }
            Err(err) => Err(err),
        }
    }
}

impl Decoder for InboundCodec {
    type Item = Inbound;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Inbound>, CodecError> {
        Self::map(self.0.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Inbound>, CodecError> {
        Self::map(self.0.decode_eof(src))
    }
}

fn process_line(runtime: &Runtime, session: &Session, state: &mut SessionState, line: &str) {
    let event = runtime.parsers.parse(state, line);
    trace!(raw = %line, kind = %event.kind(), "Received line");

    if state.apply(&event) == Reconciled::Disconnect {
        info!("Own QUIT echoed by server");
        session.request_disconnect();
    }
    dispatch(runtime, session, state, &event);
}

fn dispatch(runtime: &Runtime, session: &Session, state: &SessionState, event: &Event) {
    runtime.bus.dispatch(&Context::new(state, session), event);
}
