//! In-memory transport.
//!
//! [`MemoryConnector`] hands the engine one end of a `tokio::io::duplex`
//! pipe per connect and passes the other end to the test as a
//! [`TestServer`], so a test plays the IRC server line by line.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use slirc_engine::network::{BoxRead, BoxWrite, Connector, ServerAddr};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::sync::{Mutex, mpsc};
use tokio::time::timeout;

const PIPE_CAPACITY: usize = 64 * 1024;

/// Connector backed by in-memory pipes.
pub struct MemoryConnector {
    accepted: mpsc::UnboundedSender<TestServer>,
    refuse: AtomicBool,
}

/// Test side of [`MemoryConnector`]: yields one server per connect.
pub struct MemoryNetwork {
    accepted: Mutex<mpsc::UnboundedReceiver<TestServer>>,
}

impl MemoryConnector {
    pub fn new() -> (std::sync::Arc<Self>, MemoryNetwork) {
        let (accepted, queue) = mpsc::unbounded_channel();
        let connector = std::sync::Arc::new(Self {
            accepted,
            refuse: AtomicBool::new(false),
        });
        let network = MemoryNetwork {
            accepted: Mutex::new(queue),
        };
        (connector, network)
    }

    /// Make later connects fail with `ConnectionRefused`.
    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, addr: &ServerAddr) -> io::Result<(BoxRead, BoxWrite)> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }
        let (client, server) = tokio::io::duplex(PIPE_CAPACITY);
        let (read, write) = tokio::io::split(client);
        self.accepted
            .send(TestServer::new(addr.clone(), server))
            .map_err(|_| io::Error::new(io::ErrorKind::ConnectionRefused, "network closed"))?;
        Ok((Box::pin(read), Box::pin(write)))
    }
}

impl MemoryNetwork {
    /// Wait for the next connection.
    pub async fn accept(&self) -> TestServer {
        let mut accepted = self.accepted.lock().await;
        timeout(Duration::from_secs(5), accepted.recv())
            .await
            .expect("timed out waiting for a connection")
            .expect("connector dropped")
    }
}

/// Server end of one connection.
pub struct TestServer {
    pub addr: ServerAddr,
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

impl TestServer {
    fn new(addr: ServerAddr, stream: DuplexStream) -> Self {
        let (read, writer) = tokio::io::split(stream);
        Self {
            addr,
            reader: BufReader::new(read),
            writer,
        }
    }

    /// Send one line; the terminator is added here.
    pub async fn send(&mut self, line: &str) {
        self.writer
            .write_all(format!("{line}\r\n").as_bytes())
            .await
            .expect("client hung up");
        self.writer.flush().await.expect("flush failed");
    }

    /// Send raw bytes as-is.
    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.expect("client hung up");
        self.writer.flush().await.expect("flush failed");
    }

    /// Next line written by the client, without terminator. `None` on EOF.
    pub async fn recv(&mut self) -> Option<String> {
        let mut line = String::new();
        let read = timeout(Duration::from_secs(5), self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for a line")
            .expect("read failed");
        if read == 0 {
            return None;
        }
        assert!(line.ends_with("\r\n"), "line without CRLF: {line:?}");
        line.truncate(line.len() - 2);
        Some(line)
    }

    /// Assert the next client line equals `expected`.
    pub async fn expect(&mut self, expected: &str) {
        assert_eq!(self.recv().await.as_deref(), Some(expected));
    }

    /// Assert the client closed its side.
    pub async fn expect_closed(&mut self) {
        assert_eq!(self.recv().await, None);
    }
}
