//! Transport plumbing.
//!
//! - [`Connector`]: where byte streams come from ([`TcpConnector`] by default)
//! - [`ServerAddr`]: `host[:port]` parsing
//! - [`flood`]: outbound pacing
//! - `reader` / `writer`: the two tasks every connected session runs

pub mod flood;
pub(crate) mod reader;
pub(crate) mod writer;

pub use flood::FloodControl;

use std::fmt;
use std::io;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::EngineError;

/// Read half handed to a session's reader task.
pub type BoxRead = Pin<Box<dyn AsyncRead + Send>>;
/// Write half handed to a session's writer task.
pub type BoxWrite = Pin<Box<dyn AsyncWrite + Send>>;

/// Supplies byte streams for a server address.
///
/// The engine neither encrypts nor configures sockets; a connector that
/// needs TLS or a proxy wraps its stream before returning it.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, addr: &ServerAddr) -> io::Result<(BoxRead, BoxWrite)>;
}

/// Plain TCP with a connect timeout.
#[derive(Clone, Debug)]
pub struct TcpConnector {
    timeout: Duration,
}

impl TcpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: &ServerAddr) -> io::Result<(BoxRead, BoxWrite)> {
        let connect = TcpStream::connect((addr.host(), addr.port()));
        let stream = tokio::time::timeout(self.timeout, connect)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;
        if let Err(err) = stream.set_nodelay(true) {
            debug!(error = %err, "Failed to set TCP_NODELAY");
        }
        let (read, write) = stream.into_split();
        Ok((Box::pin(read), Box::pin(write)))
    }
}

/// A server endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServerAddr {
    host: String,
    port: u16,
}

impl ServerAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `host`, `host:port`, `[v6]:port` or a bare IPv6 address.
    pub fn parse(text: &str, default_port: u16) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidAddress(text.to_owned());
        let text = text.trim();

        let (host, port) = if let Some(rest) = text.strip_prefix('[') {
            let (host, after) = rest.split_once(']').ok_or_else(invalid)?;
            match after {
                "" => (host, None),
                _ => (host, Some(after.strip_prefix(':').ok_or_else(invalid)?)),
            }
        } else if text.matches(':').count() > 1 {
            (text, None)
        } else {
            match text.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (text, None),
            }
        };

        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(invalid());
        }
        let port = match port {
            Some(port) => port.parse::<u16>().ok().filter(|p| *p != 0).ok_or_else(invalid)?,
            None => default_port,
        };
        Ok(Self::new(host, port))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
