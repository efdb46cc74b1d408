//! Runs one structured command: redirections, built-in dispatch, or an
//! external program in a forked child.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};

use nix::fcntl::{fcntl, open, FcntlArg, OFlag};
use nix::sys::stat::Mode;
use nix::unistd::{access, close, dup2, AccessFlags};
use serde_json::json;

use crate::builtin::{self, BuiltinKind};
use crate::command::Command;
use crate::config::Config;
use crate::error::{report, Context, Result, ShellError};
use crate::process;
use crate::trace;

/// Descriptor replaced for the duration of one command, put back on drop.
struct SavedFd { target: RawFd, saved: RawFd }

impl Drop for SavedFd {
    fn drop(&mut self) {
        if self.target == libc::STDOUT_FILENO { let _ = io::stdout().flush(); }
        let _ = dup2(self.saved, self.target);
        let _ = close(self.saved);
    }
}

/// Scoped stdin/stdout redirection for a single command. Restoration
/// happens in reverse order of application when this is dropped.
pub struct Redirections { saved: Vec<SavedFd> }

impl Redirections {
    pub fn apply(cmd: &Command) -> Result<Self> {
        let mut this = Redirections { saved: Vec::new() };
        if let Some(path) = &cmd.input {
            let path = Path::new(path);
            let fd = open(path, OFlag::O_RDONLY | OFlag::O_CLOEXEC, Mode::empty())
                .context(format!("open input file {}", path.display()))?;
            this.replace(fd, libc::STDIN_FILENO)?;
        }
        if let Some(path) = &cmd.output {
            let path = Path::new(path);
            let mode = Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP;
            let fd = open(path, OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC | OFlag::O_CLOEXEC, mode)
                .context(format!("open output file {}", path.display()))?;
            let _ = io::stdout().flush();
            this.replace(fd, libc::STDOUT_FILENO)?;
        }
        Ok(this)
    }

    fn replace(&mut self, fd: RawFd, target: RawFd) -> Result<()> {
        let saved = match fcntl(target, FcntlArg::F_DUPFD_CLOEXEC(0)) {
            Ok(s) => s,
            Err(e) => { let _ = close(fd); return Err(ShellError::os("dup", e)); }
        };
        let moved = dup2(fd, target);
        let _ = close(fd);
        if let Err(e) = moved { let _ = close(saved); return Err(ShellError::os("dup2", e)); }
        self.saved.push(SavedFd { target, saved });
        Ok(())
    }
}

impl Drop for Redirections {
    fn drop(&mut self) {
        while let Some(s) = self.saved.pop() { drop(s); }
    }
}

/// Executes `cmd` and returns its status. Failures local to the
/// interpreter are reported on stderr and yield 1.
pub fn execute(config: &Config, cmd: &Command) -> i32 {
    match try_execute(config, cmd) {
        Ok(status) => status,
        Err(e) => { report(&e); 1 }
    }
}

fn try_execute(config: &Config, cmd: &Command) -> Result<i32> {
    trace::event(config, "exec", json!(cmd));
    let _redirect = Redirections::apply(cmd)?;
    let Some(name) = cmd.name() else { return Ok(0) };
    if let Some(kind) = BuiltinKind::lookup(name) {
        return builtin::run(kind, config, cmd);
    }
    let program = resolve_program(&config.search_dirs, name).ok_or_else(|| ShellError::CommandNotFound(name.to_string_lossy().into_owned()))?;
    let child = process::spawn_program(&program, &cmd.args)?;
    trace::event(config, "spawn", json!({"program": program, "pid": child.pid().as_raw()}));
    let status = child.wait()?;
    trace::event(config, "status", json!({"program": program, "status": status}));
    Ok(status)
}

/// A name starting with `/` loses that slash and is taken relative to the
/// working directory; any other name is looked up in `dirs`.
pub fn resolve_program(dirs: &[PathBuf], name: &OsStr) -> Option<PathBuf> {
    match name.as_bytes().strip_prefix(b"/") {
        Some(rest) => Some(PathBuf::from(OsStr::from_bytes(rest))),
        None => search_executable(dirs, name),
    }
}

/// First `dir/name` in `dirs` that the caller may execute.
pub fn search_executable(dirs: &[PathBuf], name: &OsStr) -> Option<PathBuf> {
    dirs.iter().map(|d| d.join(name)).find(|p| is_executable(p))
}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}
