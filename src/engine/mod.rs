//! Engine: owns the parser registry, the event bus and every session.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use slirc_engine::bus::Subscriber;
//! use slirc_engine::config::EngineConfig;
//! use slirc_engine::event::{EventKind, Payload};
//! use slirc_engine::Engine;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let engine = Engine::new(EngineConfig::default());
//! engine.register(Arc::new(
//!     Subscriber::new("greeter").on(EventKind::Join, |ctx, event| {
//!         if let Payload::Join { channel } = &event.payload {
//!             if !ctx.state().is_self(event.nick().unwrap_or_default()) {
//!                 ctx.send(format!("PRIVMSG {channel} :welcome"))?;
//!             }
//!         }
//!         Ok(())
//!     }),
//! ))?;
//!
//! let session = engine.connect("irc.example.com").await?;
//! session.send("NICK greeter")?;
//! session.send("USER greeter 0 * :Greeter")?;
//! # Ok(())
//! # }
//! ```

mod autopong;
mod registry;

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::bus::{EventBus, Listener, ListenerId};
use crate::config::EngineConfig;
use crate::error::{EngineError, RegistrationError};
use crate::network::{Connector, ServerAddr, TcpConnector};
use crate::protocol::ParserRegistry;
use crate::session::{Session, SessionId};
use autopong::AutoPong;
use registry::SessionRegistry;

/// Shared by the engine handle, its sessions and their tasks.
pub(crate) struct Runtime {
    pub(crate) config: EngineConfig,
    pub(crate) parsers: ParserRegistry,
    pub(crate) bus: EventBus,
    pub(crate) sessions: SessionRegistry,
    pub(crate) connector: Arc<dyn Connector>,
}

/// Entry point: build one per process (or per independent bot) and open
/// sessions from it.
pub struct Engine {
    runtime: Arc<Runtime>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine connecting over plain TCP.
    pub fn new(config: EngineConfig) -> Self {
        let connector = Arc::new(TcpConnector::new(config.connection.connect_timeout()));
        Self::with_connector(config, connector)
    }

    /// Engine over plain TCP, configured from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let config = EngineConfig::load(&path)?;
        info!(path = %path.as_ref().display(), "Loaded engine configuration");
        Ok(Self::new(config))
    }

    /// Engine using a custom transport.
    pub fn with_connector(config: EngineConfig, connector: Arc<dyn Connector>) -> Self {
        let auto_pong = config.connection.auto_pong;
        let runtime = Arc::new(Runtime {
            config,
            parsers: ParserRegistry::new(),
            bus: EventBus::new(),
            sessions: SessionRegistry::default(),
            connector,
        });

        if auto_pong {
            if let Err(err) = runtime.bus.register(Arc::new(AutoPong)) {
                warn!(error = %err, "Failed to register built-in PING responder");
            }
        }

        Self { runtime }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.runtime.config
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.runtime.parsers
    }

    pub fn bus(&self) -> &EventBus {
        &self.runtime.bus
    }

    /// Create a session for `addr` (`host[:port]`) without connecting it.
    pub fn open(&self, addr: &str) -> Result<Session, EngineError> {
        let addr = ServerAddr::parse(addr, self.runtime.config.connection.default_port)?;
        let session = Session::new(SessionId::next(), addr, Arc::downgrade(&self.runtime));
        self.runtime.sessions.insert(session.clone());
        info!(session = %session.id(), server = %session.server(), "Session opened");
        Ok(session)
    }

    /// Open a session and connect it.
    pub async fn connect(&self, addr: &str) -> Result<Session, EngineError> {
        let session = self.open(addr)?;
        if let Err(err) = session.connect().await {
            self.runtime.sessions.remove(session.id());
            warn!(
                session = %session.id(),
                error = %err,
                code = err.error_code(),
                "Connect failed"
            );
            return Err(err);
        }
        Ok(session)
    }

    /// Snapshot of the open sessions, ordered by id.
    pub fn sessions(&self) -> Vec<Session> {
        self.runtime.sessions.snapshot()
    }

    pub fn session(&self, id: SessionId) -> Option<Session> {
        self.runtime.sessions.get(id)
    }

    /// Disconnect every session and wait for all teardowns.
    pub async fn disconnect_all(&self) {
        let sessions = self.sessions();
        futures_util::future::join_all(sessions.iter().map(|session| session.disconnect())).await;
    }

    pub fn register(&self, listener: Arc<dyn Listener>) -> Result<ListenerId, RegistrationError> {
        self.runtime.bus.register(listener)
    }

    pub fn unregister(&self, listener: &Arc<dyn Listener>) -> bool {
        self.runtime.bus.unregister(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::event::EventKind;
    use std::io::Write;

    #[test]
    fn auto_pong_follows_config() {
        let engine = Engine::new(EngineConfig::default());
        assert_eq!(engine.bus().handler_count(EventKind::Ping), 1);

        let mut config = EngineConfig::default();
        config.connection.auto_pong = false;
        let engine = Engine::new(config);
        assert_eq!(engine.bus().handler_count(EventKind::Ping), 0);
    }

    #[test]
    fn from_path_loads_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[connection]\ndefault_port = 6697\nauto_pong = false").unwrap();
        let engine = Engine::from_path(file.path()).unwrap();
        assert_eq!(engine.config().connection.default_port, 6697);
        assert_eq!(engine.bus().handler_count(EventKind::Ping), 0);
    }

    #[test]
    fn from_path_reports_config_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[flood]\nmax_lines_per_second = 0").unwrap();
        let err = Engine::from_path(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "config");
        assert!(matches!(err, EngineError::Config(ConfigError::Invalid(_))));

        let err = Engine::from_path("/nonexistent/slirc-engine.toml").unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::Io(_))));
    }

    #[test]
    fn open_registers_without_connecting() {
        let engine = Engine::new(EngineConfig::default());
        let session = engine.open("irc.example.com:7000").unwrap();
        assert!(!session.is_connected());
        assert_eq!(session.server().port(), 7000);
        assert_eq!(engine.sessions().len(), 1);
        assert!(engine.session(session.id()).is_some());
    }

    #[test]
    fn open_uses_configured_default_port() {
        let mut config = EngineConfig::default();
        config.connection.default_port = 6697;
        let engine = Engine::new(config);
        let session = engine.open("irc.example.com").unwrap();
        assert_eq!(session.server().port(), 6697);
    }

    #[test]
    fn open_rejects_bad_address() {
        let engine = Engine::new(EngineConfig::default());
        let err = engine.open("irc.example.com:notaport").unwrap_err();
        assert_eq!(err.error_code(), "invalid_address");
        assert!(engine.sessions().is_empty());
    }
}
