//! Conversation Module
//!
//! Holds one mapper conversation with a compiler over a reader/writer pair.
//!
//! ## Lifecycle
//! ```text
//!  AwaitingHandshake ──HELLO──► Ready
//!          │                      │
//!          └──────┬───────────────┘
//!                 ├── end of stream ──► Closed
//!                 └── fatal error ────► Failed
//! ```
//!
//! Every request block gets exactly one reply block with the same number of
//! messages in the same order. The reply is written only after every message
//! in the request has been handled.

use std::io::{BufRead, Write};

use crate::build::{BuildDispatcher, Compiler, ProcessCompiler};
use crate::cache::ClientIdentity;
use crate::error::Result;
use crate::protocol::{
    write_block, Block, BlockReader, Message, Request, RequestType, Response, Word,
};

/// Where a conversation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only HELLO is accepted
    AwaitingHandshake,

    /// Handshake done; all requests are served
    Ready,

    /// The compiler closed the stream
    Closed,

    /// An I/O or protocol error ended the conversation
    Failed,
}

/// Per-session state, changed only by a successful HELLO
#[derive(Debug, Clone)]
struct SessionState {
    phase: Phase,
    client: ClientIdentity,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::AwaitingHandshake,
            client: ClientIdentity::default(),
        }
    }
}

impl SessionState {
    fn is_handshaken(&self) -> bool {
        self.phase == Phase::Ready
    }

    fn handshake(&mut self, compiler: &Word, build_identity: &Word) {
        self.client = ClientIdentity::new(compiler.clone(), build_identity.clone());
        self.phase = Phase::Ready;
    }
}

/// A single conversation with a compiler
pub struct Conversation<R, W, C = ProcessCompiler> {
    /// Request stream
    reader: BlockReader<R>,

    /// Reply stream
    writer: W,

    /// Resolves repository, export, and import requests
    dispatcher: BuildDispatcher<C>,

    /// Handshake state
    state: SessionState,
}

impl<R: BufRead, W: Write, C: Compiler> Conversation<R, W, C> {
    pub fn new(reader: R, writer: W, dispatcher: BuildDispatcher<C>) -> Self {
        Self {
            reader: BlockReader::new(reader),
            writer,
            dispatcher,
            state: SessionState::default(),
        }
    }

    /// Serve blocks until the compiler closes the stream.
    ///
    /// Returns an error only for session-fatal conditions: a read or write
    /// failure, a syntax error, or an empty message.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.serve_block() {
                Ok(true) => continue,
                Ok(false) => {
                    tracing::debug!("request stream closed");
                    self.state.phase = Phase::Closed;
                    return Ok(());
                }
                Err(e) => {
                    self.state.phase = Phase::Failed;
                    return Err(e);
                }
            }
        }
    }

    /// Read one request block and write its reply.
    ///
    /// Returns `false` on a clean end of stream.
    pub fn serve_block(&mut self) -> Result<bool> {
        let request = self.reader.next_block()?;
        if request.is_empty() {
            return Ok(false);
        }
        tracing::trace!("request {:?}", request);

        let reply = self.respond(&request)?;
        tracing::trace!("reply {:?}", reply);

        write_block(&mut self.writer, &reply)?;
        Ok(true)
    }

    /// Build the reply block for a request block
    pub fn respond(&mut self, request: &Block) -> Result<Block> {
        let mut reply = Block::with_capacity(request.len());
        for message in request {
            reply.push(self.handle_message(message)?);
        }
        Ok(reply)
    }

    fn handle_message(&mut self, message: &Message) -> Result<Response> {
        let request = Request::parse(message)?;

        let response = match request {
            Request::Hello {
                version,
                compiler,
                build_identity,
            } => {
                tracing::debug!(%version, %compiler, %build_identity, "handshake");
                self.state.handshake(compiler, build_identity);
                Response::hello_ack()
            }
            Request::Malformed(RequestType::Hello) => {
                Response::error("unsupported handshake format")
            }
            _ if !self.state.is_handshaken() => {
                Response::error("message before valid handshake")
            }
            Request::ModuleRepo => match self.dispatcher.repository_root() {
                Ok(root) => Response::pathname(root),
                Err(e) => local_error(e)?,
            },
            Request::ModuleExport { name } => {
                match self.dispatcher.export_path(name, &self.state.client) {
                    Ok(path) => Response::pathname(path),
                    Err(e) => local_error(e)?,
                }
            }
            Request::ModuleImport { name } => {
                match self.dispatcher.import(name, &self.state.client) {
                    Ok(path) => Response::pathname(path),
                    Err(e) => local_error(e)?,
                }
            }
            Request::Malformed(kind) => {
                Response::error(format!("invalid {} message", kind.tag()))
            }
            Request::Unknown { tag } => {
                Response::error(format!("unsupported message type {:?}", tag))
            }
        };

        if let Response::Error(text) = &response {
            let tag = message.tag().map(Word::to_string_lossy).unwrap_or_default();
            tracing::warn!(request = %tag, "{}", text);
        }
        Ok(response)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn dispatcher(&self) -> &BuildDispatcher<C> {
        &self.dispatcher
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the conversation, returning the reply stream
    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Turn a message-local failure into an ERROR reply; pass fatal ones on
fn local_error(error: crate::error::MapperError) -> Result<Response> {
    if error.is_session_fatal() {
        return Err(error);
    }
    Ok(Response::error(error.to_string()))
}
