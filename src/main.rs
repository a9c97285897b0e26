use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use log::debug;

use larch::emit::emit_module;
use larch::lexer::Token;
use larch::parser::{parse, ParseState};
use larch::types::check_module;

#[derive(Parser)]
#[command(name = "larch")]
#[command(about = "Compiles Tree source files to WebAssembly text")]
#[command(version)]
struct Cli {
    /// The .tree source file to compile
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("could not read {}", cli.file.display()))?;

    let tokens = Token::lex(&source)?;
    debug!("lexed {} tokens", tokens.len());

    let mut state = ParseState::new(tokens);
    let module = match parse(&mut state) {
        Ok(module) => module,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };
    debug!("parsed {} top-level items", module.top_levels.len());

    match check_module(&module) {
        Ok(typed) => {
            print!("{}", emit_module(&typed));
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            process::exit(1);
        }
    }
}
