//! Block Reader
//!
//! Pulls tokens from a byte stream and assembles them into blocks.

use std::io::BufRead;

use crate::error::{MapperError, Result};
use super::codec::{scan_token, Scan, Token, CONTINUATION};
use super::{Block, Message, Word};

/// Reads blocks from a buffered byte stream
///
/// Input is pulled one line at a time, so a call never waits for more
/// than the block it is assembling.
pub struct BlockReader<R> {
    /// Underlying stream
    inner: R,

    /// Bytes read but not yet tokenized
    buf: Vec<u8>,

    /// Offset of the first unscanned byte in `buf`
    pos: usize,

    /// Set once the stream reported end of file
    eof: bool,

    /// Set once iteration has finished (end of stream or error)
    done: bool,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            eof: false,
            done: false,
        }
    }

    /// Read the next block.
    ///
    /// Returns an empty block on a clean end of stream. A stream that ends
    /// in the middle of a block is an error.
    pub fn next_block(&mut self) -> Result<Block> {
        let mut messages = Vec::new();
        let mut words = Vec::new();
        // a bare `;` was the last token; it only counts as the marker if the
        // newline comes right after it
        let mut pending_marker = false;

        loop {
            let Some(token) = self.next_token()? else {
                if messages.is_empty() && words.is_empty() && !pending_marker {
                    return Ok(Block::default());
                }
                return Err(MapperError::UnexpectedEof);
            };

            match token {
                Token::Newline => {
                    messages.push(Message::new(std::mem::take(&mut words)));
                    if !pending_marker {
                        return Ok(Block::new(messages));
                    }
                    pending_marker = false;
                }
                Token::Continuation => {
                    if pending_marker {
                        words.push(Word::from(CONTINUATION));
                    }
                    pending_marker = true;
                }
                Token::Word(word) => {
                    if pending_marker {
                        words.push(Word::from(CONTINUATION));
                        pending_marker = false;
                    }
                    words.push(word);
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            match scan_token(&self.buf[self.pos..])? {
                Scan::Token(token, used) => {
                    self.pos += used;
                    return Ok(Some(token));
                }
                Scan::Empty => {
                    self.buf.clear();
                    self.pos = 0;
                    if !self.fill()? {
                        return Ok(None);
                    }
                }
                Scan::Incomplete => {
                    if !self.fill()? {
                        return Err(MapperError::UnexpectedEof);
                    }
                }
            }
        }
    }

    /// Append the next line of input to the buffer
    fn fill(&mut self) -> Result<bool> {
        if self.eof {
            return Ok(false);
        }
        let read = self.inner.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            self.eof = true;
        }
        Ok(read > 0)
    }
}

impl<R: BufRead> Iterator for BlockReader<R> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_block() {
            Ok(block) if block.is_empty() => {
                self.done = true;
                None
            }
            Ok(block) => Some(Ok(block)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
