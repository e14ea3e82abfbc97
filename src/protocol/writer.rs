//! Block Writer
//!
//! Writes whole blocks to a byte stream.

use std::io::Write;

use crate::error::Result;
use super::codec::encode_block;
use super::Block;

/// Write a block to a stream and flush it
///
/// The block is encoded up front and written in one call, so a reply is
/// never interleaved with anything else. Bytes written before an error are
/// not taken back.
pub fn write_block<W: Write>(writer: &mut W, block: &Block) -> Result<()> {
    let bytes = encode_block(block);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
