use std::io::{Cursor, ErrorKind};
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use tracing::debug;

use crate::{DnsError, Message, Name, Networkable, Question, RecordType};

/// Largest response a plain UDP exchange can carry.
pub const MAX_RESPONSE_SIZE: usize = 512;

/// A stub resolver: one blocking query/response exchange with a fixed
/// upstream server.
#[derive(Debug)]
pub struct Resolver {
    server: SocketAddr,
    timeout: Duration,
}

impl Resolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    /// Sends one query and decodes its one response. No retries: a
    /// timeout or parse failure ends the exchange.
    pub fn lookup(&self, hostname: &str, type_: RecordType) -> Result<Message, DnsError> {
        let name = Name::new(hostname)?;
        let query = Message::query(rand::random(), Question::new(name, type_));

        let sock = UdpSocket::bind(("0.0.0.0", 0))?;
        sock.set_read_timeout(Some(self.timeout))?;
        sock.send_to(&query.to_bytes(), self.server)?;

        let mut buf = [0; MAX_RESPONSE_SIZE];
        let len = sock.recv(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::WouldBlock | ErrorKind::TimedOut => DnsError::Timeout,
            _ => DnsError::Io(e),
        })?;
        debug!(len, "received response from {}", self.server);

        Message::from_bytes(&mut Cursor::new(&buf[..len]))
    }
}
