//! Shiba Compiler CLI

use std::io::IsTerminal;

use shiba_diagnostic::ColorMode;
use shibac::commands::{check_files, lex_file, mangle_file, CheckOptions};

fn main() {
    shibac::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let is_tty = std::io::stderr().is_terminal();
    let command = &args[1];
    let ok = match command.as_str() {
        "check" => {
            let mut options = CheckOptions {
                is_tty,
                ..CheckOptions::default()
            };
            let mut paths = Vec::new();
            for arg in args.iter().skip(2) {
                if let Some(value) = arg.strip_prefix("--color=") {
                    options.color = parse_color(value);
                } else if arg == "--timings" {
                    options.timings = true;
                } else if arg.starts_with('-') {
                    eprintln!("error: unknown option '{arg}'");
                    std::process::exit(2);
                } else {
                    paths.push(arg.clone());
                }
            }
            if paths.is_empty() {
                eprintln!("Usage: shibac check <file>... [--color=auto|always|never] [--timings]");
                std::process::exit(2);
            }
            check_files(&paths, &options)
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: shibac lex <file>");
                std::process::exit(2);
            }
            lex_file(&args[2], ColorMode::Auto, is_tty)
        }
        "mangle" => {
            if args.len() < 3 {
                eprintln!("Usage: shibac mangle <file>");
                std::process::exit(2);
            }
            mangle_file(&args[2], ColorMode::Auto, is_tty)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("shibac {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn parse_color(value: &str) -> ColorMode {
    ColorMode::from_flag(value).unwrap_or_else(|| {
        eprintln!("error: invalid color mode '{value}' (expected auto, always or never)");
        std::process::exit(2);
    })
}

fn print_usage() {
    println!("Shiba Compiler");
    println!();
    println!("Usage: shibac <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file>...    Parse and type check source files");
    println!("  lex <file>         Tokenize and display tokens");
    println!("  mangle <file>      Print the mangled name of every function");
    println!("  help               Show this help message");
    println!("  version            Show version information");
    println!();
    println!("Check options:");
    println!("  --color=<mode>     Colored diagnostics: auto (default), always, never");
    println!("  --timings          Print the time spent in each pass");
    println!();
    println!("Environment:");
    println!("  RUST_LOG           Enable debug logging (e.g. RUST_LOG=shiba_sema=debug)");
    println!("  SHIBA_LOG_TREE     With RUST_LOG, print logs as a span tree");
    println!();
    println!("Examples:");
    println!("  shibac check main.sh");
    println!("  shibac check a.sh b.sh --timings");
    println!("  shibac mangle main.sh");
}
