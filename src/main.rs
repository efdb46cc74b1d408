use std::env;

use anyhow::Result;
use mysh::config::USAGE;
use mysh::{Config, Invocation, Shell};

fn main() -> Result<()> {
    let config = match Config::from_args(env::args().skip(1))? {
        Invocation::Help => { eprintln!("{USAGE}"); return Ok(()); }
        Invocation::Run(c) => c,
    };
    let mut shell = Shell::new(config);
    let code = shell.start()?;
    std::process::exit(code);
}
