//! `mysh`: a small line-oriented command interpreter with wildcard
//! expansion, `<`/`>` redirection and a single two-process pipeline.

pub mod builtin;
pub mod command;
pub mod config;
pub mod error;
pub mod exec;
pub mod glob;
pub mod pipeline;
pub mod process;
pub mod shell;
pub mod token;
pub mod trace;

pub use command::{build, Command};
pub use config::{Config, Invocation, Source};
pub use error::{Result, ShellError};
pub use exec::execute;
pub use glob::matches;
pub use pipeline::run_pipeline;
pub use shell::Shell;
pub use token::{tokenize, TokenSlice, TokenStream};
