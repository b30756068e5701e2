use std::io::{self, ErrorKind, Read, Write};
use std::time::Instant;

use serde_json::Value;

use super::transport::{Connection, Connector};
use super::wire::{Method, Tag, encode_request};

const READ_CHUNK: usize = 8192;

/// Where a request is in its single round trip.
enum InFlight<C> {
    Idle,
    Awaiting { conn: C, buffer: Vec<u8> },
}

/// One RPC call that can be dispatched repeatedly, each time over a
/// fresh connection.
pub struct PendingRequest<C> {
    pub method: Method,
    pub tag: Tag,
    pub arguments: Option<Value>,
    /// When the request was last polled or dispatched
    pub last_dispatch: Option<Instant>,
    state: InFlight<C>,
}

impl<C: Connection> PendingRequest<C> {
    pub fn new(method: Method, tag: Tag, arguments: Option<Value>) -> Self {
        PendingRequest {
            method,
            tag,
            arguments,
            last_dispatch: None,
            state: InFlight::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InFlight::Idle)
    }

    /// Open a connection, write the whole request, then switch the socket
    /// to non-blocking so later polls never stall the UI.
    pub fn dispatch<K>(
        &mut self,
        connector: &mut K,
        path: &str,
        session_id: Option<&str>,
    ) -> io::Result<()>
    where
        K: Connector<Conn = C>,
    {
        let payload = encode_request(
            path,
            session_id,
            self.method,
            self.tag,
            self.arguments.as_ref(),
        );
        let mut conn = connector.connect()?;
        conn.write_all(&payload)?;
        conn.flush()?;
        conn.set_nonblocking(true)?;
        self.state = InFlight::Awaiting {
            conn,
            buffer: Vec::new(),
        };
        Ok(())
    }

    /// Drain whatever the socket has. Returns the complete raw reply once
    /// the peer has closed the stream; `None` while more is still coming.
    pub fn poll(&mut self) -> io::Result<Option<Vec<u8>>> {
        let InFlight::Awaiting { conn, buffer } = &mut self.state else {
            return Ok(None);
        };
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match conn.read(&mut chunk) {
                Ok(0) => {
                    let reply = std::mem::take(buffer);
                    self.state = InFlight::Idle;
                    return Ok(Some(reply));
                }
                Ok(n) => buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = InFlight::Idle;
                    return Err(e);
                }
            }
        }
    }
}
