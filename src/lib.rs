//! slirc-engine - Straylight IRC client engine.
//!
//! Turns a server connection into a stream of typed events and keeps a
//! model of the session (own nick, channels, members, topics) in step with
//! it.
//!
//! ```text
//! socket ─▶ LineCodec ─▶ tokenize ─▶ ParserRegistry ─▶ SessionState::apply ─▶ EventBus
//!                                                                                │
//! socket ◀─ LineCodec ◀─ FloodControl ◀─ outbound queue ◀─── Session::send ◀─────┘
//! ```
//!
//! Each connected session runs one reader task, which owns the session
//! model and delivers events strictly in arrival order, and one writer task,
//! which paces outbound lines without dropping or reordering them.

pub mod bus;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod network;
pub mod protocol;
pub mod session;
pub mod telemetry;

pub use bus::{Context, EventBus, Filter, Handler, Listener, Subscriber};
pub use engine::Engine;
pub use error::{EngineError, RegistrationError, SessionError};
pub use event::{Event, EventKind, Payload};
pub use session::{Session, SessionId, SessionState};
pub use slirc_wire::Source;
