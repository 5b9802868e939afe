//! Command-line interface for odl
//! Converts ODL files into JSON (or another registered format).
//!
//! Usage:
//!   odl convert `<path>` [--format `<format>`] [--terminator `<t>`] [--trailing ignore|reject]
//!               [--max-depth `<n>`] [--indent `<n>`] [--config `<file>`] [--output `<file>`] [--verbose]
//!   odl list-formats                                    - List available output formats
//!
//! `<path>` may be `-` to read from stdin. Logging goes to stderr and is controlled by
//! `ODL_LOG` (e.g. `ODL_LOG=odl=trace`).

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use odl::odl::config::{ConfigLoader, OdlConfig};
use odl::odl::formats::{FormatRegistry, DEFAULT_JSON_INDENT};
use odl::odl::processor::{process_file, process_source, ProcessingError};
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// User configuration picked up from the working directory when present
const LOCAL_CONFIG_FILE: &str = "odl.toml";

fn main() {
    let matches = Command::new("odl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Object Description Language (ODL) files to JSON")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert an ODL file")
                .arg(
                    Arg::new("path")
                        .help("Path to the ODL file, or '-' for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)"),
                )
                .arg(
                    Arg::new("terminator")
                        .long("terminator")
                        .short('t')
                        .help("Statement terminator ('\\n' by default; ';' always separates)"),
                )
                .arg(
                    Arg::new("trailing")
                        .long("trailing")
                        .help("Statements after END: 'ignore' or 'reject'")
                        .value_parser(["ignore", "reject"]),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .help("Deepest allowed group nesting (512 by default)")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .help("Spaces per indentation level for json output")
                        .value_parser(value_parser!(u8)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the document to this file instead of stdout"),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .help("Log debug information to stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            init_tracing(convert_matches.get_flag("verbose"));
            handle_convert_command(convert_matches);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("ODL_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("error[ConfigError]: {}", e);
        std::process::exit(1);
    });

    let path = matches.get_one::<String>("path").unwrap();
    let result = if path == "-" {
        read_stdin().and_then(|source| process_source(&source, &config))
    } else {
        process_file(path, &config)
    };

    let output = result.unwrap_or_else(|e| {
        eprintln!("error[{}]: {}", e.kind_name(), e);
        std::process::exit(1);
    });

    match matches.get_one::<String>("output") {
        Some(target) => {
            if let Err(e) = std::fs::write(target, with_trailing_newline(output)) {
                eprintln!("error[IoError]: cannot write {}: {}", target, e);
                std::process::exit(1);
            }
        }
        None => print!("{}", with_trailing_newline(output)),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::builtin(DEFAULT_JSON_INDENT);
    println!("Available output formats:\n");
    for formatter in registry.iter() {
        println!("  {}", formatter.name());
        println!("    {}", formatter.description());
    }
}

fn load_config(matches: &ArgMatches) -> Result<OdlConfig, config::ConfigError> {
    let mut loader = ConfigLoader::new().file(LOCAL_CONFIG_FILE, false);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.file(path, true);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set("output.format", format.as_str());
    }
    if let Some(terminator) = matches.get_one::<String>("terminator") {
        loader = loader.set("parse.terminator", unescape(terminator));
    }
    if let Some(trailing) = matches.get_one::<String>("trailing") {
        loader = loader.set("parse.trailing", trailing.as_str());
    }
    if let Some(max_depth) = matches.get_one::<u32>("max-depth") {
        loader = loader.set("parse.max_depth", i64::from(*max_depth));
    }
    if let Some(indent) = matches.get_one::<u8>("indent") {
        loader = loader.set("output.indent", i64::from(*indent));
    }
    loader.load()
}

fn read_stdin() -> Result<String, ProcessingError> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|e| ProcessingError::IoError(e.to_string()))?;
    Ok(source)
}

/// Accept `\n`, `\r` and `\t` escapes so terminators can be typed on a shell
fn unescape(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

fn with_trailing_newline(mut output: String) -> String {
    if !output.ends_with('\n') {
        output.push('\n');
    }
    output
}
