//! Sideload CLI
//!
//! Loads a side script unit from a directory and prints the unit or one of
//! its members. `--json` / `--json-file` speak the JSON contract instead.

use std::io::Read;
use std::ops::Range;
use std::path::Path;

use ariadne::{Label, Report, ReportKind, Source};
use serde_json::Value as JsonValue;
use side_ir::Span;
use sideload::{json, LoadError, ScriptError, SideloadError, Sideloaded};

/// Environment variable holding the tracing filter (`EnvFilter` syntax).
const LOG_ENV: &str = "SIDELOAD_LOG";

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("sideload {}", env!("CARGO_PKG_VERSION"));
        }
        "--json" => run_json(None),
        "--json-file" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: sideload --json-file <path>");
                std::process::exit(1);
            };
            run_json(Some(path));
        }
        flag if flag.starts_with('-') => {
            eprintln!("error: unknown option '{flag}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
        _ => run_direct(&args[1..]),
    }
}

fn print_usage() {
    println!("Sideload - load side script units at runtime");
    println!();
    println!("Usage:");
    println!("  sideload <base_path> <module> [member]");
    println!("  sideload --json                 Read a JSON request from stdin");
    println!("  sideload --json-file <path>     Read a JSON request from a file");
    println!("  sideload help | version");
    println!();
    println!("Module forms:");
    println!("  name          <base>/name.side, then <base>/name/__entry__.side");
    println!("  pkg.name      <base>/pkg/name.side");
    println!("  file.side     <base>/file.side");
    println!("  /abs/path     used as-is when it is a file");
    println!();
    println!("Set {LOG_ENV}=debug to trace resolution and loading.");
}

/// Install a hierarchical tracing subscriber when `SIDELOAD_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if let Ok(directives) = std::env::var(LOG_ENV) {
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(EnvFilter::new(directives))
            .init();
    }
}

fn run_direct(args: &[String]) {
    let (base_path, module, member) = match args {
        [base, module] => (base, module, None),
        [base, module, member] => (base, module, Some(member.as_str())),
        _ => {
            eprintln!("Usage: sideload <base_path> <module> [member]");
            std::process::exit(1);
        }
    };

    match sideload::run(base_path, module, member) {
        Ok(Sideloaded::Unit(loaded)) => {
            println!("{loaded}");
            let unit = loaded.unit();
            for name in unit.member_names() {
                if let Some(value) = unit.member(&name) {
                    println!("  {name} = {}", value.repr());
                }
            }
        }
        Ok(result) => println!("{result}"),
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }
}

fn run_json(file: Option<&str>) {
    let input = match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    let input = input.unwrap_or_else(|e| {
        eprintln!("error: failed to read JSON input: {e}");
        std::process::exit(1);
    });
    let payload: JsonValue = serde_json::from_str(&input).unwrap_or_else(|e| {
        eprintln!("error: invalid JSON input: {e}");
        std::process::exit(1);
    });

    let response = json::main_json(&payload);
    match serde_json::to_string_pretty(&response) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to encode response: {e}");
            std::process::exit(1);
        }
    }
    if !response.is_success() {
        std::process::exit(1);
    }
}

/// Print `err`, with source context when it points into the loaded file.
fn report_error(err: &SideloadError) {
    if let SideloadError::Load { path, source } = err {
        let located = match source {
            LoadError::Script(ScriptError::Syntax(e)) => Some((e.message.as_str(), e.span)),
            LoadError::Script(ScriptError::Raised(e)) => e.span.map(|span| (e.message.as_str(), span)),
            LoadError::Io(_) => None,
        };
        if let Some((message, span)) = located {
            eprintln!("error[{}]: failed to load {}", err.kind(), path.display());
            if render_source_error(path, message, span) {
                return;
            }
            eprintln!("  {message}");
            return;
        }
    }
    eprintln!("error[{}]: {err}", err.kind());
}

/// Render a labelled excerpt of `path`; `false` if the file is unreadable.
fn render_source_error(path: &Path, message: &str, span: Span) -> bool {
    let Ok(source) = std::fs::read_to_string(path) else {
        return false;
    };
    let id = path.display().to_string();
    let range = clamp(span.to_range(), source.len());
    Report::build(ReportKind::Error, id.as_str(), range.start)
        .with_message(message)
        .with_label(Label::new((id.as_str(), range)).with_message(message))
        .finish()
        .eprint((id.as_str(), Source::from(source.as_str())))
        .is_ok()
}

fn clamp(range: Range<usize>, len: usize) -> Range<usize> {
    let end = range.end.min(len);
    range.start.min(end)..end
}
