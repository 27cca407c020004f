//! Per-handler event filters.

use slirc_wire::irc_eq;

use crate::event::{Event, EventKind};

/// Predicate attached to a handler. A handler runs only if every one of its
/// filters accepts the event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Accept events whose source matches any of these wildcard masks.
    SourceMask(Vec<String>),
    /// Accept events addressed to any of these names (case-insensitive).
    /// Events that carry no target at all pass.
    Target(Vec<String>),
}

impl Filter {
    pub fn source<I, S>(masks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::SourceMask(masks.into_iter().map(Into::into).collect())
    }

    pub fn target<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Target(names.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, event: &Event) -> bool {
        match self {
            Filter::SourceMask(masks) => masks.iter().any(|mask| event.source.matches(mask)),
            Filter::Target(names) => match event.target() {
                Some(target) => names.iter().any(|name| irc_eq(name, target)),
                None => true,
            },
        }
    }

    /// Reason this filter can never be meaningful for `kind`, if any.
    pub(crate) fn check(&self, kind: EventKind) -> Result<(), &'static str> {
        let values = match self {
            Filter::SourceMask(masks) => masks,
            Filter::Target(names) => names,
        };
        if values.is_empty() || values.iter().any(String::is_empty) {
            return Err("filter has an empty pattern");
        }
        if matches!(self, Filter::Target(_)) && !kind.may_carry_target() {
            return Err("target filter on an event kind without a target");
        }
        Ok(())
    }
}
