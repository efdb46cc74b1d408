use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::command::Command;
use crate::config::Config;
use crate::error::{Context, Result, ShellError};
use crate::exec::search_executable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind { Cd, Pwd, Which, Exit }

impl BuiltinKind {
    pub fn lookup(name: &OsStr) -> Option<Self> {
        match name.as_bytes() {
            b"cd" => Some(BuiltinKind::Cd),
            b"pwd" => Some(BuiltinKind::Pwd),
            b"which" => Some(BuiltinKind::Which),
            b"exit" => Some(BuiltinKind::Exit),
            _ => None,
        }
    }
}

pub fn run(kind: BuiltinKind, config: &Config, cmd: &Command) -> Result<i32> {
    match kind {
        BuiltinKind::Cd => builtin_cd(&cmd.args),
        BuiltinKind::Pwd => builtin_pwd(),
        BuiltinKind::Which => builtin_which(config, &cmd.args),
        BuiltinKind::Exit => exit_shell(config, cmd),
    }
}

fn builtin_cd(args: &[OsString]) -> Result<i32> {
    let dir = Path::new(args.get(1).ok_or(ShellError::MissingOperand("cd"))?);
    env::set_current_dir(dir).context(format!("cd: {}", dir.display()))?;
    Ok(0)
}

fn builtin_pwd() -> Result<i32> {
    let cwd = env::current_dir().context("pwd")?;
    let mut out = io::stdout();
    writeln!(out, "{}", cwd.display()).and_then(|_| out.flush()).context("pwd")?;
    Ok(0)
}

fn builtin_which(config: &Config, args: &[OsString]) -> Result<i32> {
    let name = args.get(1).ok_or(ShellError::MissingOperand("which"))?;
    let path = search_executable(&config.search_dirs, name)
        .ok_or_else(|| ShellError::NotInSearchPath(name.to_string_lossy().into_owned()))?;
    let mut out = io::stdout();
    writeln!(out, "{}", path.display()).and_then(|_| out.flush()).context("which")?;
    Ok(0)
}

/// What `exit` prints before terminating: its operands joined by spaces,
/// newline-terminated, or nothing at all without operands.
pub fn exit_message(args: &[OsString]) -> Option<Vec<u8>> {
    match args.get(1..) {
        Some(rest) if !rest.is_empty() => {
            let mut msg = rest.iter().map(|a| a.as_bytes()).collect::<Vec<_>>().join(&b' ');
            msg.push(b'\n');
            Some(msg)
        }
        _ => None,
    }
}

/// Terminates the interpreter with status 0 regardless of operands.
pub fn exit_shell(config: &Config, cmd: &Command) -> ! {
    let mut out = io::stdout();
    if let Some(msg) = exit_message(&cmd.args) { let _ = out.write_all(&msg); }
    if config.interactive { let _ = out.write_all(b"mysh: exiting\n"); }
    let _ = out.flush();
    std::process::exit(0)
}
