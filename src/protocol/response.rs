//! Response definitions
//!
//! Represents replies to the compiler.

use super::{Message, Word};

/// Protocol version announced in the handshake reply
pub const PROTOCOL_VERSION: u32 = 1;

/// Builder identity announced in the handshake reply
pub const BUILDER_NAME: &str = "gcc-module-cmi-builder";

/// Handshake flags (none supported)
pub const HANDSHAKE_FLAGS: u32 = 0;

/// A reply to a single request message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Handshake acknowledgment
    Hello {
        version: u32,
        builder: String,
        flags: u32,
    },

    /// A path answering a repository or module request
    PathName(Word),

    /// A message-local failure
    Error(String),
}

impl Response {
    /// Create the handshake acknowledgment this mapper always sends
    pub fn hello_ack() -> Self {
        Self::Hello {
            version: PROTOCOL_VERSION,
            builder: BUILDER_NAME.to_string(),
            flags: HANDSHAKE_FLAGS,
        }
    }

    /// Create a PATHNAME response
    pub fn pathname(path: impl Into<Word>) -> Self {
        Self::PathName(path.into())
    }

    /// Create an ERROR response
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Render as wire words
    pub fn into_message(self) -> Message {
        match self {
            Response::Hello {
                version,
                builder,
                flags,
            } => Message::new(vec![
                Word::from("HELLO"),
                Word::from(version.to_string()),
                Word::from(builder),
                Word::from(flags.to_string()),
            ]),
            Response::PathName(path) => Message::new(vec![Word::from("PATHNAME"), path]),
            Response::Error(text) => Message::new(vec![Word::from("ERROR"), Word::from(text)]),
        }
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        response.into_message()
    }
}
