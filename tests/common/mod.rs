//! Integration test common infrastructure.
//!
//! Provides an in-memory transport for playing the server side of a
//! session, and a recording listener for asserting on event flows.

pub mod harness;
pub mod recorder;

#[allow(unused_imports)]
pub use harness::{MemoryConnector, MemoryNetwork, TestServer};
#[allow(unused_imports)]
pub use recorder::{Recorder, Seen};

use slirc_engine::Engine;
use slirc_engine::config::EngineConfig;

/// Route engine logs to the test output. Safe to call from every test.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Engine on the in-memory transport with a recorder attached.
#[allow(dead_code)]
pub fn engine_with(config: EngineConfig) -> (Engine, std::sync::Arc<MemoryConnector>, MemoryNetwork, Recorder) {
    init_tracing();
    let (connector, network) = MemoryConnector::new();
    let engine = Engine::with_connector(config, connector.clone());
    let (listener, recorder) = Recorder::new();
    engine.register(listener).expect("recorder registration");
    (engine, connector, network, recorder)
}

#[allow(dead_code)]
pub fn engine() -> (Engine, std::sync::Arc<MemoryConnector>, MemoryNetwork, Recorder) {
    engine_with(EngineConfig::default())
}
