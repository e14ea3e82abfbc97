//! Request definitions
//!
//! Typed view of the messages a compiler sends.

use crate::error::{MapperError, Result};
use super::{Message, Word};

/// Request types understood by this mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Hello,
    ModuleRepo,
    ModuleExport,
    ModuleImport,
}

impl RequestType {
    /// Look up a request type by its wire tag
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"HELLO" => Some(RequestType::Hello),
            b"MODULE-REPO" => Some(RequestType::ModuleRepo),
            b"MODULE-EXPORT" => Some(RequestType::ModuleExport),
            b"MODULE-IMPORT" => Some(RequestType::ModuleImport),
            _ => None,
        }
    }

    /// The wire tag for this request type
    pub fn tag(&self) -> &'static str {
        match self {
            RequestType::Hello => "HELLO",
            RequestType::ModuleRepo => "MODULE-REPO",
            RequestType::ModuleExport => "MODULE-EXPORT",
            RequestType::ModuleImport => "MODULE-IMPORT",
        }
    }

    /// Minimum number of words (including the tag)
    fn min_words(&self) -> usize {
        match self {
            RequestType::Hello => 4,
            RequestType::ModuleRepo => 1,
            RequestType::ModuleExport | RequestType::ModuleImport => 2,
        }
    }
}

/// A parsed request, borrowing its words from the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    /// Handshake: protocol version, compiler identity, build identity
    Hello {
        version: &'a Word,
        compiler: &'a Word,
        build_identity: &'a Word,
    },

    /// Ask for the repository root
    ModuleRepo,

    /// Ask where a module's interface will be written
    ModuleExport { name: &'a Word },

    /// Ask for a module's interface, building it if needed
    ModuleImport { name: &'a Word },

    /// A known tag with too few words
    Malformed(RequestType),

    /// A tag this mapper does not implement
    Unknown { tag: &'a Word },
}

impl<'a> Request<'a> {
    /// Classify a message.
    ///
    /// Fails only for a message with no words at all, which is a protocol
    /// violation for the whole session.
    pub fn parse(message: &'a Message) -> Result<Self> {
        let tag = message.tag().ok_or(MapperError::EmptyMessage)?;

        let Some(kind) = RequestType::from_tag(tag.as_bytes()) else {
            return Ok(Request::Unknown { tag });
        };
        if message.len() < kind.min_words() {
            return Ok(Request::Malformed(kind));
        }

        Ok(match kind {
            RequestType::Hello => Request::Hello {
                version: &message[1],
                compiler: &message[2],
                build_identity: &message[3],
            },
            RequestType::ModuleRepo => Request::ModuleRepo,
            RequestType::ModuleExport => Request::ModuleExport { name: &message[1] },
            RequestType::ModuleImport => Request::ModuleImport { name: &message[1] },
        })
    }

    /// The request type, if the tag is one we implement
    pub fn request_type(&self) -> Option<RequestType> {
        match self {
            Request::Hello { .. } => Some(RequestType::Hello),
            Request::ModuleRepo => Some(RequestType::ModuleRepo),
            Request::ModuleExport { .. } => Some(RequestType::ModuleExport),
            Request::ModuleImport { .. } => Some(RequestType::ModuleImport),
            Request::Malformed(kind) => Some(*kind),
            Request::Unknown { .. } => None,
        }
    }
}
