//! Protocol Module
//!
//! Defines the module mapper wire protocol spoken with the compiler.
//!
//! ## Structure
//! - **Word**: an opaque byte string
//! - **Message**: one line of words; the first word is the type tag
//! - **Block**: messages joined with a trailing ` ;`, answered as a unit
//!
//! ### Requests
//! - `HELLO <version> <compiler> <build-identity>`
//! - `MODULE-REPO`
//! - `MODULE-EXPORT <module>`
//! - `MODULE-IMPORT <module>`
//!
//! ### Replies
//! - `HELLO <version> <builder> <flags>`
//! - `PATHNAME <path>`
//! - `ERROR <text>`

mod message;
mod request;
mod response;
pub mod codec;
mod reader;
mod writer;

pub use message::{Block, Message, Word};
pub use request::{Request, RequestType};
pub use response::{Response, BUILDER_NAME, HANDSHAKE_FLAGS, PROTOCOL_VERSION};
pub use codec::{decode_word, encode_block, encode_word, is_bareword};
pub use reader::BlockReader;
pub use writer::write_block;
