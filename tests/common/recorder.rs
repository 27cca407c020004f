//! Listener that copies every event, with a view of the session at that
//! moment, into a channel the test can await.

use std::sync::Arc;
use std::time::Duration;

use slirc_engine::bus::{Listener, Subscriber};
use slirc_engine::event::{Event, EventKind};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// What a listener saw for one event.
#[derive(Clone, Debug)]
pub struct Seen {
    pub event: Event,
    /// `Session::is_connected` during the callback.
    pub connected: bool,
    /// Own nick according to the session model.
    pub nick: Option<String>,
    /// Tracked channel names, sorted.
    pub channels: Vec<String>,
}

pub struct Recorder {
    seen: mpsc::UnboundedReceiver<Seen>,
}

impl Recorder {
    /// Build the recorder and the listener feeding it.
    pub fn new() -> (Arc<dyn Listener>, Self) {
        let (tx, seen) = mpsc::unbounded_channel();
        let listener = Subscriber::new("recorder").on(EventKind::Any, move |ctx, event| {
            let mut channels: Vec<String> =
                ctx.state().channels().map(|c| c.name().to_owned()).collect();
            channels.sort();
            let _ = tx.send(Seen {
                event: event.clone(),
                connected: ctx.session().is_connected(),
                nick: ctx.state().nick().map(str::to_owned),
                channels,
            });
            Ok(())
        });
        (Arc::new(listener), Self { seen })
    }

    /// Next recorded event.
    pub async fn next(&mut self) -> Seen {
        timeout(Duration::from_secs(5), self.seen.recv())
            .await
            .expect("timed out waiting for an event")
            .expect("recorder dropped")
    }

    /// Skip events until one of `kind` arrives.
    pub async fn next_of(&mut self, kind: EventKind) -> Seen {
        loop {
            let seen = self.next().await;
            if seen.event.kind().is_a(kind) {
                return seen;
            }
        }
    }

    /// Events already delivered, without waiting.
    pub fn drain(&mut self) -> Vec<Seen> {
        let mut out = Vec::new();
        while let Ok(seen) = self.seen.try_recv() {
            out.push(seen);
        }
        out
    }
}
