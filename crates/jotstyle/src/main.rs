//! Jotstyle - atomic CSS class names from style props
//!
//! Usage: jotstyle [OPTIONS] [FILE]

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::Value;

use jotstyle_style::{CacheSnapshot, ClassNameRegistry, Mode, RegistryConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for a generation run
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// JSON input file; stdin when absent
    input: Option<PathBuf>,
    /// Force compact CSS output
    production: bool,
    /// Snapshot file to restore from and save to
    cache: Option<PathBuf>,
    /// Write CSS here instead of stdout
    css_out: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Run(Options),
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("jotstyle");

    match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(Command::Help) => {
            print_usage(program);
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("Jotstyle {}", VERSION);
            ExitCode::SUCCESS
        }
        Ok(Command::Run(options)) => {
            if let Err(e) = run(&options) {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try '{} --help' for more information.", program);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--production" => options.production = true,
            "--cache" => {
                let path = iter.next().ok_or("--cache requires a path")?;
                options.cache = Some(PathBuf::from(path));
            }
            "--css" => {
                let path = iter.next().ok_or("--css requires a path")?;
                options.css_out = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("Unknown option '{}'", flag));
            }
            path => {
                if options.input.is_some() {
                    return Err(format!("Unexpected argument '{}'", path));
                }
                if path != "-" {
                    options.input = Some(PathBuf::from(path));
                }
            }
        }
    }

    Ok(Command::Run(options))
}

fn print_usage(program: &str) {
    println!(
        r#"Jotstyle {} - atomic CSS class names from style props

USAGE:
    {} [OPTIONS] [FILE]

Reads a JSON style object, or an array of them, from FILE (or stdin) and
prints one class name per line followed by the generated CSS.

OPTIONS:
    -h, --help        Print this help message
    -V, --version     Print version information
    --production      Emit compact CSS (also JOTSTYLE_ENV=production)
    --cache <PATH>    Restore caches from PATH and save them back afterwards;
                      styles already recorded there are not emitted again
    --css <PATH>      Write CSS to PATH instead of stdout

EXAMPLES:
    echo '{{"color": "red", "hoverColor": "blue"}}' | {}
    {} --production --css styles.css props.json

"#,
        VERSION, program, program, program
    );
}

/// Result of one generation pass
#[derive(Debug)]
struct Output {
    /// One class name per request; empty when a request yields none
    lines: Vec<String>,
    /// CSS for classes not already in the restored snapshot
    css: String,
    /// Caches after the pass
    snapshot: CacheSnapshot,
}

/// Generate class names and CSS for a JSON object or array of objects
fn generate(
    source: &str,
    config: RegistryConfig,
    snapshot: Option<CacheSnapshot>,
) -> Result<Output, String> {
    let value: Value =
        serde_json::from_str(source).map_err(|e| format!("Invalid JSON input: {}", e))?;

    let mut registry = ClassNameRegistry::new(config);
    if let Some(snapshot) = snapshot {
        registry.restore(snapshot);
    }

    let requests: Vec<&Value> = match &value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut lines = Vec::with_capacity(requests.len());
    for request in requests {
        let class_name = registry
            .class_name_for_value(request)
            .map_err(|e| e.to_string())?;
        lines.push(class_name.unwrap_or_default());
    }

    log::info!("{} class names, {} rules", registry.len(), registry.injector().len());

    Ok(Output {
        lines,
        css: registry.injector().to_css(),
        snapshot: registry.snapshot(),
    })
}

fn run(options: &Options) -> Result<(), String> {
    let source = read_input(options.input.as_deref())?;

    let mut config = RegistryConfig::from_env();
    if options.production {
        config = config.with_mode(Mode::Production);
    }

    let snapshot = match &options.cache {
        Some(path) if path.exists() => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read cache {}: {}", path.display(), e))?;
            Some(CacheSnapshot::from_json(&json).map_err(|e| e.to_string())?)
        }
        _ => None,
    };

    let output = generate(&source, config, snapshot)?;
    for line in &output.lines {
        println!("{}", line);
    }

    if let Some(path) = &options.cache {
        let json = output.snapshot.to_json().map_err(|e| e.to_string())?;
        fs::write(path, json)
            .map_err(|e| format!("Failed to write cache {}: {}", path.display(), e))?;
    }

    match &options.css_out {
        Some(path) => fs::write(path, &output.css)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?,
        None => print!("{}", output.css),
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(source)
        }
    }
}
