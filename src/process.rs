use std::ffi::{CString, OsString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execv, fork, ForkResult, Pid};

use crate::error::{Context, Result, ShellError};

/// A forked child that has not been reaped yet.
#[derive(Debug)]
pub struct Child { pid: Pid }

impl Child {
    pub fn pid(&self) -> Pid { self.pid }

    /// Blocks until the child terminates. A normal exit yields its code,
    /// death by signal yields 1.
    pub fn wait(self) -> Result<i32> {
        loop {
            match waitpid(self.pid, None) {
                Ok(WaitStatus::Exited(_, code)) => return Ok(code),
                Ok(WaitStatus::Signaled(..)) => return Ok(1),
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(e) => return Err(ShellError::os("waitpid", e)),
            }
        }
    }
}

/// Runs `body` in a forked child and exits the child with its status.
/// The parent's buffered output is flushed first so it is not written twice.
/// The child gets the default SIGPIPE action back, since the Rust runtime
/// ignores it and an ignored disposition survives `execv`.
pub fn fork_child<F: FnOnce() -> i32>(body: F) -> Result<Child> {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    match unsafe { fork() }.context("fork")? {
        ForkResult::Parent { child } => Ok(Child { pid: child }),
        ForkResult::Child => {
            let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };
            let code = body();
            let _ = io::stdout().flush();
            let _ = io::stderr().flush();
            unsafe { libc::_exit(code) }
        }
    }
}

/// Forks and replaces the child's image with `program`, passing `args`
/// (including argv[0]) unchanged.
pub fn spawn_program(program: &Path, args: &[OsString]) -> Result<Child> {
    let prog = CString::new(program.as_os_str().as_bytes())?;
    let argv = args.iter().map(|a| CString::new(a.as_bytes())).collect::<std::result::Result<Vec<_>, _>>()?;
    fork_child(move || {
        if let Err(e) = execv(&prog, &argv) {
            eprintln!("mysh: execv {}: {e}", prog.to_string_lossy());
        }
        1
    })
}
