//! Listener and handler definitions.

use std::fmt;
use std::sync::Arc;

use super::{Context, Filter};
use crate::event::{Event, EventKind};

/// Callback invoked for a matching event.
pub type Callback = Arc<dyn Fn(&Context<'_>, &Event) -> anyhow::Result<()> + Send + Sync>;

/// One subscription: an event kind, its filters and the callback.
#[derive(Clone)]
pub struct Handler {
    pub(crate) kind: EventKind,
    pub(crate) filters: Vec<Filter>,
    pub(crate) callback: Callback,
}

impl Handler {
    pub fn new<F>(kind: EventKind, callback: F) -> Self
    where
        F: Fn(&Context<'_>, &Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            kind,
            filters: Vec::new(),
            callback: Arc::new(callback),
        }
    }

    /// Add a filter; all filters must accept an event for the callback to run.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Something that wants events.
///
/// `handlers` is called once at registration; the handlers it returns usually
/// capture a clone of the `Arc` so they can reach the listener's own state.
pub trait Listener: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn handlers(self: Arc<Self>) -> Vec<Handler>;
}

/// A listener assembled from closures.
///
/// ```
/// use slirc_engine::bus::Subscriber;
/// use slirc_engine::event::EventKind;
///
/// let logger = Subscriber::new("logger").on(EventKind::Message, |_ctx, event| {
///     println!("{}", event.raw);
///     Ok(())
/// });
/// ```
#[derive(Debug)]
pub struct Subscriber {
    name: String,
    handlers: Vec<Handler>,
}

impl Subscriber {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    pub fn on<F>(self, kind: EventKind, callback: F) -> Self
    where
        F: Fn(&Context<'_>, &Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler(Handler::new(kind, callback))
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }
}

impl Listener for Subscriber {
    fn name(&self) -> &str {
        &self.name
    }

    fn handlers(self: Arc<Self>) -> Vec<Handler> {
        self.handlers.clone()
    }
}
