//! Protocol codec
//!
//! Tokenizing and serializing for the line-oriented wire format.
//!
//! ## Wire Format
//!
//! ```text
//! HELLO 1 gcc mybuild ;          <- message 1 of a block, more follow
//! MODULE-IMPORT 'my header.h'    <- last message, ends the block
//! ```
//!
//! ### Tokens
//! Leading spaces and tabs are ignored. A token is then one of:
//! - a newline
//! - a bare `;` (continuation marker)
//! - a single-quoted word; inside it `\\`, `\'`, `\n` and `\t` are
//!   escapes and any other escaped byte stands for itself; the decoded
//!   word may hold any byte
//! - a bareword made of `[-+_/%.A-Za-z0-9]`
//!
//! Anything else is a syntax error.
//!
//! ### Framing
//! A newline ends a message. If the last token before it was a bare `;`
//! the block continues with the next message, otherwise the block ends.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MapperError, Result};
use super::{Block, Word};

/// Marker that keeps a block open across a newline
pub const CONTINUATION: &str = ";";

// =============================================================================
// Tokens
// =============================================================================

/// A lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Newline,
    Continuation,
    Word(Word),
}

/// Outcome of scanning the front of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A complete token and the number of bytes it used (whitespace included)
    Token(Token, usize),

    /// Only whitespace left
    Empty,

    /// A quoted word started but its closing quote is not buffered yet
    Incomplete,
}

/// Whether `byte` may appear in an unquoted word
pub fn is_bareword_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'+' | b'_' | b'/' | b'%' | b'.')
}

/// Whether `word` can be written without quotes
pub fn is_bareword(word: impl AsRef<[u8]>) -> bool {
    let word = word.as_ref();
    !word.is_empty() && word.iter().copied().all(is_bareword_byte)
}

/// Scan one token from the front of `buf`
pub fn scan_token(buf: &[u8]) -> Result<Scan> {
    let Some(start) = buf.iter().position(|&b| b != b' ' && b != b'\t') else {
        return Ok(Scan::Empty);
    };

    match buf[start] {
        b'\n' => Ok(Scan::Token(Token::Newline, start + 1)),
        b';' => Ok(Scan::Token(Token::Continuation, start + 1)),
        b'\'' => {
            let mut i = start + 1;
            while i < buf.len() {
                match buf[i] {
                    b'\\' => i += 2,
                    b'\'' => {
                        let word = unescape(&buf[start + 1..i]);
                        return Ok(Scan::Token(Token::Word(word), i + 1));
                    }
                    _ => i += 1,
                }
            }
            Ok(Scan::Incomplete)
        }
        b if is_bareword_byte(b) => {
            let len = buf[start..]
                .iter()
                .take_while(|&&b| is_bareword_byte(b))
                .count();
            let word = Word::from(&buf[start..start + len]);
            Ok(Scan::Token(Token::Word(word), start + len))
        }
        _ => {
            let rest = &buf[start..];
            let line_end = rest.iter().position(|&b| b == b'\n').map_or(rest.len(), |i| i + 1);
            Err(MapperError::Syntax(
                String::from_utf8_lossy(&rest[..line_end]).into_owned(),
            ))
        }
    }
}

// =============================================================================
// Word Encoding/Decoding
// =============================================================================

/// Decode the inside of a quoted word
fn unescape(raw: &[u8]) -> Word {
    let mut out = Vec::with_capacity(raw.len());
    let mut escaped = false;
    for &b in raw {
        if escaped {
            out.push(match b {
                b'n' => b'\n',
                b't' => b'\t',
                other => other,
            });
            escaped = false;
        } else if b == b'\\' {
            escaped = true;
        } else {
            out.push(b);
        }
    }

    Word::from(out)
}

/// Decode one raw token (quoted or bare) into its word
pub fn decode_word(raw: &[u8]) -> Result<Word> {
    match scan_token(raw)? {
        Scan::Token(Token::Word(word), used) if used == raw.len() => Ok(word),
        _ => Err(MapperError::Syntax(String::from_utf8_lossy(raw).into_owned())),
    }
}

/// Append the wire form of `word` to `out`
pub fn encode_word(word: impl AsRef<[u8]>, out: &mut BytesMut) {
    let word = word.as_ref();
    if is_bareword(word) {
        out.put_slice(word);
        return;
    }

    out.reserve(word.len() + 2);
    out.put_u8(b'\'');
    for &b in word {
        match b {
            b'\\' => out.put_slice(b"\\\\"),
            b'\'' => out.put_slice(b"\\'"),
            b'\n' => out.put_slice(b"\\n"),
            b'\t' => out.put_slice(b"\\t"),
            other => out.put_u8(other),
        }
    }
    out.put_u8(b'\'');
}

// =============================================================================
// Block Encoding
// =============================================================================

/// Encode a block to bytes
///
/// Every message but the last ends in ` ;` before its newline.
pub fn encode_block(block: &Block) -> Bytes {
    let mut out = BytesMut::with_capacity(64 * block.len().max(1));
    let last = block.len().saturating_sub(1);

    for (index, message) in block.iter().enumerate() {
        for (position, word) in message.words().iter().enumerate() {
            if position != 0 {
                out.put_u8(b' ');
            }
            encode_word(word, &mut out);
        }
        if index != last {
            out.put_slice(b" ;");
        }
        out.put_u8(b'\n');
    }

    out.freeze()
}
