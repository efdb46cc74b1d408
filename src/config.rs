use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};

/// Longest accepted line, counting the terminating newline.
pub const DEFAULT_MAX_LINE: usize = 1024;
pub const DEFAULT_SEARCH_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/bin"];

pub const USAGE: &str = "usage: mysh [--max-line <n>] [-c <line> | <script>]\n       \
MYSH_PATH overrides the executable search directories, MYSH_DEBUG enables trace output.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source { Stdin, Script(PathBuf), Line(String) }

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    /// Prompt, banner and exit message are only printed in interactive mode.
    pub interactive: bool,
    pub max_line: usize,
    pub search_dirs: Vec<PathBuf>,
    pub debug: bool,
}

#[derive(Debug)]
pub enum Invocation { Help, Run(Config) }

impl Default for Config {
    fn default() -> Self {
        Config {
            source: Source::Stdin,
            interactive: false,
            max_line: DEFAULT_MAX_LINE,
            search_dirs: default_search_dirs(),
            debug: false,
        }
    }
}

pub fn default_search_dirs() -> Vec<PathBuf> {
    DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect()
}

impl Config {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
        let mut args = args.into_iter();
        let mut source: Option<Source> = None;
        let mut max_line = DEFAULT_MAX_LINE;
        while let Some(a) = args.next() {
            match a.as_str() {
                "-c" => {
                    let v = args.next().ok_or_else(|| anyhow!("missing line after -c"))?;
                    if source.is_some() { bail!("-c cannot be combined with a script"); }
                    source = Some(Source::Line(v));
                }
                "--max-line" => {
                    let v = args.next().ok_or_else(|| anyhow!("missing value after --max-line"))?;
                    max_line = v.parse().map_err(|_| anyhow!("invalid line length: {v}"))?;
                    if max_line < 2 { bail!("line length must be at least 2"); }
                }
                "-h" | "--help" => return Ok(Invocation::Help),
                other if other.starts_with('-') && other.len() > 1 => bail!("unknown arg: {other}"),
                path => {
                    if source.is_some() { bail!("unexpected argument: {path}"); }
                    source = Some(Source::Script(PathBuf::from(path)));
                }
            }
        }
        let source = source.unwrap_or(Source::Stdin);
        let interactive = source == Source::Stdin && atty::is(atty::Stream::Stdin);
        let search_dirs = match env::var_os("MYSH_PATH") {
            Some(p) if !p.is_empty() => env::split_paths(&p).collect(),
            _ => default_search_dirs(),
        };
        let debug = env::var_os("MYSH_DEBUG").is_some();
        Ok(Invocation::Run(Config { source, interactive, max_line, search_dirs, debug }))
    }
}
