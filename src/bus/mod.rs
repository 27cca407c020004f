//! Event bus.
//!
//! Listeners register handlers per [`EventKind`]. Dispatching an event walks
//! its concrete kind and then each ancestor kind, so a handler for
//! [`EventKind::Message`] sees both PRIVMSGs and NOTICEs. Within one kind,
//! handlers run in registration order.
//!
//! Dispatch is best-effort and isolated per handler: an `Err` or a panic
//! from one callback is logged and delivery continues with the next.
//!
//! The handler table is copy-on-write. Dispatch clones an `Arc` to the list
//! for each kind and releases the lock before calling anything, so callbacks
//! may register or unregister listeners without deadlocking; such changes
//! take effect from the next event.

mod context;
mod filter;
mod listener;

pub use context::Context;
pub use filter::Filter;
pub use listener::{Callback, Handler, Listener, Subscriber};

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, warn};

use crate::error::RegistrationError;
use crate::event::{Event, EventKind};
use crate::telemetry::spans;

/// Identity of a registered listener: the address of its `Arc` allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    pub fn of(listener: &Arc<dyn Listener>) -> Self {
        Self(Arc::as_ptr(listener) as *const () as usize)
    }
}

#[derive(Clone)]
struct Registration {
    listener: ListenerId,
    name: Arc<str>,
    filters: Arc<[Filter]>,
    callback: Callback,
}

#[derive(Default)]
struct Table {
    by_kind: HashMap<EventKind, Arc<Vec<Registration>>>,
    /// Keeps registered listeners alive so their ids stay unique.
    listeners: HashMap<ListenerId, Arc<dyn Listener>>,
}

/// Typed publish/subscribe hub shared by every session of an engine.
#[derive(Default)]
pub struct EventBus {
    table: RwLock<Table>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every valid handler of `listener`.
    ///
    /// Handlers with unusable filters are skipped with a warning. Registering
    /// the same listener twice, or one with no usable handler, is refused.
    pub fn register(&self, listener: Arc<dyn Listener>) -> Result<ListenerId, RegistrationError> {
        let id = ListenerId::of(&listener);
        let name: Arc<str> = Arc::from(listener.name());

        if self.table.read().listeners.contains_key(&id) {
            warn!(listener = %name, "Listener already registered");
            return Err(RegistrationError::Duplicate(name.to_string()));
        }

        let mut accepted = Vec::new();
        for handler in listener.clone().handlers() {
            if let Some(reason) = handler
                .filters
                .iter()
                .find_map(|filter| filter.check(handler.kind).err())
            {
                warn!(listener = %name, kind = %handler.kind, reason, "Rejected handler");
                continue;
            }
            if handler.kind.is_deprecated() {
                warn!(listener = %name, kind = %handler.kind, "Handler registered for deprecated event kind");
            }
            accepted.push(handler);
        }

        if accepted.is_empty() {
            warn!(listener = %name, "Listener has no valid handlers");
            return Err(RegistrationError::NoHandlers(name.to_string()));
        }

        let mut table = self.table.write();
        if table.listeners.contains_key(&id) {
            warn!(listener = %name, "Listener already registered");
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        for handler in accepted {
            let list = table.by_kind.entry(handler.kind).or_default();
            Arc::make_mut(list).push(Registration {
                listener: id,
                name: name.clone(),
                filters: handler.filters.into(),
                callback: handler.callback,
            });
        }
        table.listeners.insert(id, listener);
        Ok(id)
    }

    /// Remove every handler of `listener`. Returns whether it was registered.
    pub fn unregister(&self, listener: &Arc<dyn Listener>) -> bool {
        self.unregister_id(ListenerId::of(listener))
    }

    pub fn unregister_id(&self, id: ListenerId) -> bool {
        let mut table = self.table.write();
        if table.listeners.remove(&id).is_none() {
            return false;
        }
        table.by_kind.retain(|_, list| {
            if list.iter().any(|r| r.listener == id) {
                Arc::make_mut(list).retain(|r| r.listener != id);
            }
            !list.is_empty()
        });
        true
    }

    pub fn is_registered(&self, listener: &Arc<dyn Listener>) -> bool {
        self.table.read().listeners.contains_key(&ListenerId::of(listener))
    }

    /// Number of handlers registered directly on `kind` (ancestors excluded).
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.table.read().by_kind.get(&kind).map_or(0, |list| list.len())
    }

    /// Deliver `event` to every matching handler of its kind and ancestors.
    pub fn dispatch(&self, ctx: &Context<'_>, event: &Event) {
        let kind = event.kind();
        let _span = spans::dispatch(kind).entered();

        for level in kind.lineage() {
            let Some(list) = self.snapshot(level) else {
                continue;
            };
            for registration in list.iter() {
                if registration.filters.iter().all(|filter| filter.accepts(event)) {
                    invoke(registration, ctx, event);
                }
            }
        }
    }

    fn snapshot(&self, kind: EventKind) -> Option<Arc<Vec<Registration>>> {
        self.table.read().by_kind.get(&kind).cloned()
    }
}

fn invoke(registration: &Registration, ctx: &Context<'_>, event: &Event) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| (registration.callback)(ctx, event)));
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            error!(
                listener = %registration.name,
                kind = %event.kind(),
                error = %err,
                "Listener failed to handle event"
            );
        }
        Err(payload) => {
            error!(
                listener = %registration.name,
                kind = %event.kind(),
                panic = panic_message(payload.as_ref()),
                "Listener panicked while handling event"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
