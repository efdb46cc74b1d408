use std::ffi::OsString;

use serde::Serializer;
use serde_json::Value;

use crate::config::Config;

/// Debug line on stderr, enabled by `MYSH_DEBUG`.
pub fn event(config: &Config, tag: &str, payload: Value) {
    if config.debug { eprintln!("[mysh] {tag} {payload}"); }
}

/// Serializes raw words as (lossy) strings for trace output.
pub fn lossy_seq<S: Serializer>(words: &[OsString], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(words.iter().map(|w| w.to_string_lossy()))
}

pub fn lossy_opt<S: Serializer>(word: &Option<OsString>, s: S) -> Result<S::Ok, S::Error> {
    match word {
        Some(w) => s.serialize_some(&w.to_string_lossy()),
        None => s.serialize_none(),
    }
}
