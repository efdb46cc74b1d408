//! Splits one input line into words and the single-character operators
//! `|`, `<` and `>`. There is no quoting or escaping: operator characters
//! always stand on their own, even inside what looks like a word.
//!
//! Lines are handled as raw bytes so words that are not valid UTF-8 reach
//! programs unchanged.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};

use serde::Serialize;

use crate::error::{Result, ShellError};

pub const PIPE: &[u8] = b"|";
pub const REDIRECT_IN: &[u8] = b"<";
pub const REDIRECT_OUT: &[u8] = b">";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    #[serde(serialize_with = "crate::trace::lossy_seq")]
    pub tokens: Vec<OsString>,
    /// Index of the first `|` token; later pipes are never split on.
    pub pipe: Option<usize>,
    /// Ascending indices of tokens containing `*`.
    pub wildcards: Vec<usize>,
}

/// A borrowed run of tokens with wildcard indices relative to its start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSlice<'a> {
    pub tokens: &'a [OsString],
    pub wildcards: Vec<usize>,
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_operator(b: u8) -> bool {
    matches!(b, b'|' | b'<' | b'>')
}

/// `max_line` counts the newline that terminated `line`, so at most
/// `max_line - 1` bytes of content are accepted.
pub fn tokenize(line: impl AsRef<[u8]>, max_line: usize) -> Result<TokenStream> {
    let line = line.as_ref();
    if line.len() >= max_line { return Err(ShellError::LineTooLong { max: max_line }); }
    let mut stream = TokenStream::default();
    let mut i = 0;
    while i < line.len() {
        let b = line[i];
        if is_blank(b) { i += 1; continue; }
        if is_operator(b) {
            let op = &line[i..i + 1];
            if op == PIPE && stream.pipe.is_none() { stream.pipe = Some(stream.tokens.len()); }
            stream.tokens.push(OsStr::from_bytes(op).to_os_string());
            i += 1;
            continue;
        }
        let start = i;
        while i < line.len() && !is_blank(line[i]) && !is_operator(line[i]) { i += 1; }
        let word = &line[start..i];
        if word.contains(&b'*') { stream.wildcards.push(stream.tokens.len()); }
        stream.tokens.push(OsString::from_vec(word.to_vec()));
    }
    Ok(stream)
}

impl TokenStream {
    pub fn first(&self) -> Option<&[u8]> { self.tokens.first().map(|t| t.as_bytes()) }

    pub fn as_slice(&self) -> TokenSlice<'_> {
        TokenSlice { tokens: &self.tokens, wildcards: self.wildcards.clone() }
    }

    /// Left and right sides of the pipe, neither containing the pipe token.
    pub fn split_at_pipe(&self) -> Option<(TokenSlice<'_>, TokenSlice<'_>)> {
        let at = self.pipe?;
        let left = TokenSlice {
            tokens: &self.tokens[..at],
            wildcards: self.wildcards.iter().copied().filter(|&i| i < at).collect(),
        };
        let right = TokenSlice {
            tokens: &self.tokens[at + 1..],
            wildcards: self.wildcards.iter().filter(|&&i| i > at).map(|&i| i - at - 1).collect(),
        };
        Some((left, right))
    }
}
