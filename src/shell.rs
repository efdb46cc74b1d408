use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};

use serde_json::json;

use crate::config::{Config, Source};
use crate::error::{Context, Result, ShellError};
use crate::pipeline::run_pipeline;
use crate::token::tokenize;
use crate::trace;

pub const PROMPT: &[u8] = b"mysh> ";
pub const BANNER: &str = "Welcome to my shell!";
pub const FAREWELL: &str = "mysh: exiting";

/// The read-eval loop and the status it carries between lines.
pub struct Shell {
    config: Config,
    last_status: i32,
}

impl Shell {
    pub fn new(config: Config) -> Self { Shell { config, last_status: 0 } }

    pub fn last_status(&self) -> i32 { self.last_status }

    /// Runs the configured source to completion and returns the process
    /// exit code. Only fatal conditions come back as errors.
    pub fn start(&mut self) -> Result<i32> {
        match self.config.source.clone() {
            Source::Line(line) => {
                self.run_line(line.as_bytes())?;
                Ok(self.last_status)
            }
            Source::Script(path) => {
                let file = File::open(&path).context(format!("open {}", path.display()))?;
                self.run(BufReader::new(file))?;
                Ok(0)
            }
            Source::Stdin => {
                let stdin = io::stdin();
                self.run(stdin.lock())?;
                Ok(0)
            }
        }
    }

    /// Reads at most `max_line` bytes per line; a longer line is fatal as
    /// soon as the limit is reached.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        let limit = self.config.max_line as u64;
        let mut out = io::stdout();
        if self.config.interactive { let _ = writeln!(out, "{BANNER}"); }
        let mut buf: Vec<u8> = Vec::new();
        loop {
            if self.config.interactive {
                let _ = out.write_all(PROMPT);
                let _ = out.flush();
            }
            buf.clear();
            let n = input.by_ref().take(limit).read_until(b'\n', &mut buf).context("read input")?;
            if n == 0 { break; }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            } else if n as u64 == limit {
                return Err(ShellError::LineTooLong { max: self.config.max_line });
            }
            self.run_line(&buf)?;
        }
        if self.config.interactive { let _ = writeln!(out, "{FAREWELL}"); }
        let _ = out.flush();
        Ok(())
    }

    /// Evaluates one line. Returns the new status, or `None` when the line
    /// was blank or skipped by a `then`/`else` marker.
    pub fn run_line(&mut self, line: &[u8]) -> Result<Option<i32>> {
        let stream = tokenize(line, self.config.max_line)?;
        trace::event(&self.config, "tokens", json!(stream));
        let run = match stream.first() {
            None => false,
            Some(b"then") => self.last_status == 0,
            Some(b"else") => self.last_status != 0,
            Some(_) => true,
        };
        if !run { return Ok(None); }
        self.last_status = run_pipeline(&self.config, &stream);
        Ok(Some(self.last_status))
    }
}
