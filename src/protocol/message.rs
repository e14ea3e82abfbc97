//! Message and block definitions
//!
//! The structural units of the wire format, independent of what any
//! particular message means.

use std::borrow::Cow;
use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// A single decoded word
///
/// Words are byte strings: a quoted word may carry any byte, so file names
/// that are not valid UTF-8 pass through untouched.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Word(Vec<u8>);

impl Word {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text form for logs and error messages; invalid UTF-8 is replaced
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Interpret the word as a file system path
    #[cfg(unix)]
    pub fn to_path_buf(&self) -> PathBuf {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        PathBuf::from(OsStr::from_bytes(&self.0))
    }

    #[cfg(not(unix))]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.to_string_lossy().into_owned())
    }
}

impl AsRef<[u8]> for Word {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Word {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Word {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for Word {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<&Path> for Word {
    #[cfg(unix)]
    fn from(path: &Path) -> Self {
        use std::os::unix::ffi::OsStrExt;

        Self(path.as_os_str().as_bytes().to_vec())
    }

    #[cfg(not(unix))]
    fn from(path: &Path) -> Self {
        Self::from(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Word {
    fn from(path: PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(text) => fmt::Debug::fmt(text, f),
            Err(_) => write!(f, "\"{}\"", self.0.escape_ascii()),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// An ordered sequence of words; the first word is the type tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(Vec<Word>);

impl Message {
    /// Create a message from its words
    pub fn new(words: Vec<Word>) -> Self {
        Self(words)
    }

    /// The type tag (first word), if any
    pub fn tag(&self) -> Option<&Word> {
        self.0.first()
    }

    pub fn words(&self) -> &[Word] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Word>> for Message {
    fn from(words: Vec<Word>) -> Self {
        Self(words)
    }
}

impl<S: Into<Word>> FromIterator<S> for Message {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Index<usize> for Message {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.0[index]
    }
}

/// One request or response unit: an ordered sequence of messages
///
/// A block with zero messages is never sent on the wire; the reader uses
/// it to signal a clean end of stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block(Vec<Message>);

impl Block {
    pub fn new(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, message: impl Into<Message>) {
        self.0.push(message.into());
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Message>> for Block {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

impl FromIterator<Message> for Block {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Block {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
