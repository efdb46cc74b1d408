use std::ffi::{OsStr, OsString};
use std::iter::Peekable;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;
use std::slice::Iter;

use nix::dir::Dir;
use nix::fcntl::OFlag;
use nix::sys::stat::Mode;
use serde::Serialize;

use crate::glob;
use crate::token::{TokenSlice, REDIRECT_IN, REDIRECT_OUT};

/// Leading markers that gate a line on the previous status.
pub const CONDITIONAL_MARKERS: &[&[u8]] = &[b"then", b"else"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Command {
    #[serde(serialize_with = "crate::trace::lossy_seq")]
    pub args: Vec<OsString>,
    #[serde(serialize_with = "crate::trace::lossy_opt")]
    pub input: Option<OsString>,
    #[serde(serialize_with = "crate::trace::lossy_opt")]
    pub output: Option<OsString>,
}

impl Command {
    pub fn name(&self) -> Option<&OsStr> { self.args.first().map(OsString::as_os_str) }

    pub fn is_named(&self, name: &str) -> bool {
        self.name().map(OsStr::as_bytes) == Some(name.as_bytes())
    }
}

pub fn build(slice: &TokenSlice<'_>) -> Command {
    let mut cmd = Command::default();
    let mut pending: Peekable<Iter<'_, usize>> = slice.wildcards.iter().peekable();
    let toks = slice.tokens;
    let mut i = 0;
    while i < toks.len() {
        let t = toks[i].as_bytes();
        let has_next = i + 1 < toks.len();
        // wildcard indices behind us were consumed as redirect targets
        while pending.next_if(|&&w| w < i).is_some() {}
        if i == 0 && CONDITIONAL_MARKERS.contains(&t) {
            i += 1;
        } else if t == REDIRECT_IN && has_next {
            cmd.input = Some(toks[i + 1].clone());
            i += 2;
        } else if t == REDIRECT_OUT && has_next {
            cmd.output = Some(toks[i + 1].clone());
            i += 2;
        } else if t == REDIRECT_IN || t == REDIRECT_OUT {
            // dangling operator at end of line
            i += 1;
        } else if pending.next_if(|&&w| w == i).is_some() {
            expand_wildcard(&toks[i], &mut cmd.args);
            i += 1;
        } else {
            cmd.args.push(toks[i].clone());
            i += 1;
        }
    }
    cmd
}

/// Appends every directory entry matching `pattern`, in readdir order.
/// An unmatched pattern is kept as a literal word; an unreadable directory
/// contributes nothing.
pub fn expand_wildcard(pattern: &OsStr, args: &mut Vec<OsString>) {
    let bytes = pattern.as_bytes();
    let (dir, file_pattern): (&[u8], &[u8]) = match bytes.iter().rposition(|&b| b == b'/') {
        Some(i) => (&bytes[..i], &bytes[i + 1..]),
        None => (&b"."[..], bytes),
    };
    let open_path = Path::new(OsStr::from_bytes(if dir.is_empty() { &b"/"[..] } else { dir }));
    let mut handle = match Dir::open(open_path, OFlag::O_RDONLY | OFlag::O_DIRECTORY | OFlag::O_CLOEXEC, Mode::empty()) {
        Ok(d) => d,
        Err(e) => { eprintln!("mysh: opendir {}: {e}", open_path.display()); return; }
    };
    let show_hidden = file_pattern.starts_with(b".");
    let before = args.len();
    for entry in handle.iter() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => { eprintln!("mysh: readdir {}: {e}", open_path.display()); break; }
        };
        let name = entry.file_name().to_bytes();
        if name.starts_with(b".") && !show_hidden { continue; }
        if !glob::matches(file_pattern, name) { continue; }
        let word = if dir == b"." { name.to_vec() } else { [dir, &b"/"[..], name].concat() };
        args.push(OsString::from_vec(word));
    }
    if args.len() == before { args.push(pattern.to_os_string()); }
}
