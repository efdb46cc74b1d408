use std::os::unix::io::AsRawFd;

use nix::unistd::{close, dup2, pipe};
use serde_json::json;

use crate::builtin::exit_shell;
use crate::command::{build, Command};
use crate::config::Config;
use crate::error::{report, Context, Result, ShellError};
use crate::exec::execute;
use crate::process::{self, Child};
use crate::token::TokenStream;
use crate::trace;

/// Runs a two-sided pipeline and returns the right side's status. A line
/// without a pipe runs as a single command.
pub fn run_pipeline(config: &Config, stream: &TokenStream) -> i32 {
    let Some((left, right)) = stream.split_at_pipe() else {
        return execute(config, &build(&stream.as_slice()));
    };
    let left = build(&left);
    let right = build(&right);
    trace::event(config, "pipeline", json!({"left": left, "right": right}));
    if left.is_named("exit") { exit_shell(config, &left); }
    if left.args.is_empty() || right.args.is_empty() {
        report(&ShellError::EmptyPipelineSide);
        return 1;
    }
    match connect(config, &left, &right) {
        Ok(status) => status,
        Err(e) => { report(&e); 1 }
    }
}

fn connect(config: &Config, left: &Command, right: &Command) -> Result<i32> {
    let (read_end, write_end) = pipe().context("pipe")?;
    let (r, w) = (read_end.as_raw_fd(), write_end.as_raw_fd());

    let producer = process::fork_child(|| {
        let _ = close(r);
        if let Err(e) = dup2(w, libc::STDOUT_FILENO) { eprintln!("mysh: dup2: {e}"); return 1; }
        let _ = close(w);
        execute(config, left)
    })?;

    if right.is_named("exit") {
        // Closing our ends first lets a producer blocked on a full pipe see it break.
        drop(read_end);
        drop(write_end);
        let _ = producer.wait();
        exit_shell(config, right);
    }

    let consumer = process::fork_child(|| {
        let _ = close(w);
        if let Err(e) = dup2(r, libc::STDIN_FILENO) { eprintln!("mysh: dup2: {e}"); return 1; }
        let _ = close(r);
        execute(config, right)
    });

    drop(read_end);
    drop(write_end);
    let left_status = producer.wait();
    let right_status = consumer.and_then(Child::wait);
    trace::event(config, "pipeline-status", json!({
        "left": left_status.as_ref().ok(), "right": right_status.as_ref().ok(),
    }));
    right_status
}
