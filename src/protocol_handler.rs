// Framing for the tab-newline line protocol, shared by the server and the client.
use crate::LINE_SUFFIX;
use std::fmt;

const MSG_SEPERATOR: &[u8; 2] = b"\t\n";
const MSG_SEPERATOR_SIZE: usize = MSG_SEPERATOR.len();

/// Prefix which marks a failure reply on the wire
pub const ERROR_PREFIX: &str = "Error: ";

/// A single reply record, before framing
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Error(String),
}

#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("connection reset by peer")]
    ConnectionReset,
}

impl Reply {
    pub fn ok() -> Reply {
        Reply::Text("OK".to_string())
    }

    /// Classify a line received from the server, with its terminator
    /// already removed
    pub fn parse(line: &str) -> Reply {
        match line.strip_prefix(ERROR_PREFIX) {
            Some(msg) => Reply::Error(msg.to_string()),
            None => Reply::Text(line.to_string()),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reply::Text(text) => text.fmt(fmt),
            Reply::Error(msg) => write!(fmt, "{}{}", ERROR_PREFIX, msg),
        }
    }
}

/// Serialize a reply into its wire form, terminator included
pub fn serialize_reply(reply: &Reply) -> Vec<u8> {
    format!("{}{}", reply, LINE_SUFFIX).into_bytes()
}

/// Attempt to take one record off the front of `buffer`.
///
/// Returns the record without its terminator, and the number of bytes it
/// occupied in the buffer (terminator included). If the buffer does not yet
/// hold a complete record, `(None, 0)` is returned and the caller should
/// read more data.
pub fn deserialize_buffer(buffer: &[u8]) -> Result<(Option<String>, usize), FrameError> {
    let separator: Option<usize> = buffer
        .windows(MSG_SEPERATOR_SIZE)
        .position(|window: &[u8]| window == MSG_SEPERATOR);

    match separator {
        Some(pos) => {
            let line = std::str::from_utf8(&buffer[..pos])?;
            Ok((Some(line.to_string()), pos + MSG_SEPERATOR_SIZE))
        }
        None => Ok((None, 0)),
    }
}
