//! Built-in PING responder.

use std::sync::Arc;

use crate::bus::{Handler, Listener};
use crate::event::{EventKind, Payload};

/// Answers every server PING with `PONG :<token>`.
pub(crate) struct AutoPong;

impl Listener for AutoPong {
    fn name(&self) -> &str {
        "auto-pong"
    }

    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        vec![Handler::new(EventKind::Ping, |ctx, event| {
            if let Payload::Ping { token } = &event.payload {
                ctx.send(format!("PONG :{token}"))?;
            }
            Ok(())
        })]
    }
}
