pub use crate::protocol_handler::FrameError;
use crate::{deserialize_buffer, serialize_reply, Reply};
use async_trait::async_trait;
use mockall::automock;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// The record transport seen by a `ConnectionHandler`.
///
/// The mock is generated in normal builds too, since the tests/ crates link
/// against the non-test build of this library.
/// See https://github.com/rust-lang/cargo/issues/2911
#[automock]
#[async_trait]
pub trait ConnectionBase: Send + Sync {
    async fn read_line(&mut self) -> Result<Option<String>, FrameError>;

    async fn write_reply(&mut self, reply: &Reply) -> tokio::io::Result<()>;
}

/// The purpose of `Connection` is to read and write records on the
/// underlying `TcpStream`, which is established between the client
/// and the server.
///
/// When reading, the `Connection` uses an internal buffer which is
/// filled up until it holds a complete `\t\n`-terminated record, which is
/// then split off and returned to the caller.
///
/// When writing, the reply is framed with the terminator and all of it
/// is written into the TCP Stream
#[derive(Debug)]
pub struct Connection {
    // The TCP Stream for reading and writing to the client
    stream: TcpStream,

    // The buffer for reading records.
    buffer: Vec<u8>,
}

impl Connection {
    pub fn new(socket: TcpStream) -> Connection {
        Connection {
            stream: socket,
            // Commands are short text lines, 4KB covers nearly all of them.
            // The buffer grows if a longer record arrives.
            buffer: Vec::with_capacity(4 * 1024),
        }
    }

    /// Write a raw line followed by the terminator.
    ///
    /// Used by the client side, where the payload is a command rather
    /// than a `Reply`.
    pub async fn write_line(&mut self, line: &str) -> tokio::io::Result<()> {
        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(crate::LINE_SUFFIX.as_bytes()).await?;
        self.stream.flush().await
    }
}

#[async_trait]
impl ConnectionBase for Connection {
    async fn read_line(&mut self) -> Result<Option<String>, FrameError> {
        loop {
            // Attempt to take a complete record from the data in the buffer.
            // If a partial record is in the buffer, this returns `None`
            // and we keep reading.
            let (line, frame_size) = deserialize_buffer(self.buffer.as_slice())?;
            if line.is_some() {
                self.buffer.drain(0..frame_size);
                return Ok(line);
            }

            // `0` indicates the end of the stream
            if self.stream.read_buf(&mut self.buffer).await? == 0 {
                // A clean shutdown leaves nothing behind in the buffer
                if self.buffer.is_empty() {
                    return Ok(None);
                } else {
                    // Remote peer closed socket while sending data
                    return Err(FrameError::ConnectionReset);
                }
            }
        }
    }

    /// Serializes the reply and attempt to
    /// write the whole buffer to the TCPStream
    async fn write_reply(&mut self, reply: &Reply) -> tokio::io::Result<()> {
        let data = serialize_reply(reply);

        self.stream.write_all(&data).await?;

        // Make sure that any buffered contents are written.
        self.stream.flush().await
    }
}
