//! CLI tool to print the tokens or commands found in text.

use std::fs;
use std::io;
use std::process::ExitCode;
use std::sync::Once;

use setget_dsl::{Command, Item, TokenKind};

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber, only when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn usage() -> ExitCode {
    eprintln!("Usage: setget [--parse] [files...]");
    eprintln!();
    eprintln!("Reads each file (or stdin when none is given, or for '-')");
    eprintln!("and prints its tokens, one per line.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --parse   Print parsed commands instead of tokens");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  setget notes.txt");
    eprintln!("  echo 'set x 5' | setget --parse");
    ExitCode::from(2)
}

/// Print every token; returns whether the input lexed cleanly.
fn print_tokens(content: String) -> bool {
    let mut ok = true;
    for token in setget_dsl::spawn(content) {
        if matches!(token.kind, TokenKind::Error(_)) {
            ok = false;
        }
        println!("{token}");
    }
    println!();
    ok
}

fn print_script(path: &str, content: &str) -> bool {
    match setget_dsl::parse_str(content) {
        Ok(script) => {
            for item in &script.items {
                match item {
                    Item::Text(_) => {}
                    Item::Command(Command::Set { name, value }) => {
                        println!("set {name} = {value}");
                    }
                    Item::Command(Command::Get { name, value: None }) => {
                        println!("get {name}");
                    }
                    Item::Command(Command::Get {
                        name,
                        value: Some(value),
                    }) => {
                        println!("get {name} ({value})");
                    }
                }
            }
            true
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            false
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let mut parse_mode = false;
    let mut files = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return usage(),
            "--parse" => parse_mode = true,
            flag if flag.starts_with("--") => {
                eprintln!("Unknown option: {flag}");
                return usage();
            }
            _ => files.push(arg),
        }
    }
    if files.is_empty() {
        files.push("-".to_string());
    }

    let mut had_error = false;

    for path in &files {
        let read = if path == "-" {
            io::read_to_string(io::stdin())
        } else {
            fs::read_to_string(path)
        };
        let content = match read {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let ok = if parse_mode {
            print_script(path, &content)
        } else {
            print_tokens(content)
        };
        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
