use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;

use crate::handler::{self, HandlerContext};
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Fixed read chunk size; the buffer accumulates across reads.
const READ_CHUNK: usize = 1024;

/// One client connection and its session state.
///
/// Generic over the byte stream so plain TCP and TLS-wrapped connections
/// run the same state machine. The connection, its buffer and its state are
/// exclusively owned by one worker task for the connection's whole life;
/// nothing here is shared.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    ctx: Arc<HandlerContext>,
    read_timeout: Duration,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

/// Failure modes while assembling a request off the wire.
enum ReadError {
    /// Structurally invalid request; answered with 400, then close
    Malformed(ParseError),
    /// No complete request within the read timeout
    TimedOut,
    /// Transport failure; surfaced to the listener boundary
    Io(std::io::Error),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: SocketAddr, ctx: Arc<HandlerContext>, read_timeout: Duration) -> Self {
        Self {
            stream,
            peer,
            ctx,
            read_timeout,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
        }
    }

    /// Drives the session state machine until the connection closes.
    ///
    /// At most one request is in flight at a time; after a response the
    /// connection either loops back to `Reading` (explicit keep-alive) or
    /// closes. Per-request errors become 400 responses here; only transport
    /// failures propagate, and the listener logs those per connection.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await {
                    Ok(Some(req)) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    Ok(None) => {
                        // Client closed connection
                        self.state = ConnectionState::Closed;
                    }
                    Err(ReadError::Malformed(err)) => {
                        self.state = self.fail_request(err.describe()).await;
                    }
                    Err(ReadError::TimedOut) => {
                        if self.buffer.is_empty() {
                            // Idle connection, nothing to answer
                            tracing::debug!("Idle timeout from {}", self.peer);
                            self.state = ConnectionState::Closed;
                        } else {
                            // Request stalled partway through
                            self.state = self.fail_request("read timeout").await;
                        }
                    }
                    Err(ReadError::Io(e)) => return Err(e.into()),
                },

                ConnectionState::Processing(req) => {
                    // Decide reuse off the request, before the handler runs
                    let keep_alive = req.keep_alive();
                    let response = handler::dispatch(&req, self.peer, &self.ctx).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(mut writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the buffer holds one complete request, the peer closes,
    /// or the read timeout elapses. Consumes exactly the bytes of the
    /// request it returns; anything after them stays buffered for the next
    /// iteration.
    async fn read_request(&mut self) -> Result<Option<Request>, ReadError> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(Some(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => return Err(ReadError::Malformed(e)),
            }

            // Read more data, bounded by the idle/read timeout
            let mut temp = [0u8; READ_CHUNK];
            let n = match timeout(self.read_timeout, self.stream.read(&mut temp)).await {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => return Err(ReadError::Io(e)),
                Err(_) => return Err(ReadError::TimedOut),
            };

            if n == 0 {
                // Peer closed; a partial request in the buffer is abandoned
                return Ok(None);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    /// Answers an unusable request with 400 and logs what little of it can
    /// be salvaged for the access record.
    async fn fail_request(&self, annotation: &str) -> ConnectionState {
        let request_line = self.peek_request_line();
        let response = Response::bad_request();

        self.ctx
            .logs
            .record_access(self.peer, &request_line, response.status, annotation)
            .await;

        ConnectionState::Writing(ResponseWriter::new(&response), false)
    }

    /// Best-effort first line of the raw buffer, for logging requests that
    /// never parsed.
    fn peek_request_line(&self) -> String {
        let end = self
            .buffer
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
            .unwrap_or(self.buffer.len())
            .min(256);

        String::from_utf8_lossy(&self.buffer[..end]).into_owned()
    }
}
