use std::ffi::NulError;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Fatal: the interpreter cannot resume in the middle of a line.
    #[error("input line exceeds maximum length of {max} bytes")]
    LineTooLong { max: usize },
    #[error("{context}: {source}")]
    Os { context: String, #[source] source: nix::Error },
    #[error("{context}: {source}")]
    Io { context: String, #[source] source: io::Error },
    #[error("argument contains a NUL byte")]
    Nul(#[from] NulError),
    #[error("{0}: missing argument")]
    MissingOperand(&'static str),
    #[error("Command not found: {0}")]
    CommandNotFound(String),
    #[error("{0} not found")]
    NotInSearchPath(String),
    #[error("syntax error: missing command around `|'")]
    EmptyPipelineSide,
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    pub fn os(context: impl Into<String>, source: nix::Error) -> Self {
        ShellError::Os { context: context.into(), source }
    }
}

/// Attach a short description of the failing operation to an OS error.
pub trait Context<T> {
    fn context(self, what: impl Into<String>) -> Result<T>;
}

impl<T> Context<T> for nix::Result<T> {
    fn context(self, what: impl Into<String>) -> Result<T> {
        self.map_err(|source| ShellError::os(what, source))
    }
}

impl<T> Context<T> for io::Result<T> {
    fn context(self, what: impl Into<String>) -> Result<T> {
        self.map_err(|source| ShellError::Io { context: what.into(), source })
    }
}

pub fn report(err: &ShellError) {
    eprintln!("mysh: {err}");
}
