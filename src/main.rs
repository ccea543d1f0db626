//! CLI entry point for katari
//!
//! Plays, checks and prints dialogue scripts from the command line.

use anyhow::Context;
use katari::{
    cli::{check, graph, play},
    debug::{self, DebugConfig, LogLevel},
    lint::config::LintConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    let outcome = match command.as_str() {
        "play" | "check" | "graph" => {
            let Some(file) = args.get(2) else {
                eprintln!("Error: Missing script file path");
                eprintln!();
                print_usage();
                process::exit(1);
            };
            run(command, PathBuf::from(file), &args[3..])
        }
        "--help" | "-h" => {
            print_usage();
            Ok(true)
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("katari - Branching dialogue script engine");
    println!();
    println!("USAGE:");
    println!("    katari <command> <script> [options]");
    println!();
    println!("COMMANDS:");
    println!("    play <file>     Walk the dialogue, one line per step");
    println!("    check <file>    Compile and lint the script");
    println!("    graph <file>    Print the compiled node graph");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --select 0,1,..          Answers for successive prompts (play, default 0)");
    println!("    --json                   Print a JSON dump of the playthrough (play)");
    println!("    --lint-config <file>     Lint configuration in JSON (check)");
    println!("    --debug                  Log parser and engine activity to stderr");
    println!();
    println!("EXAMPLES:");
    println!("    katari play scripts/intro.dlg --select 1,0");
    println!("    katari check scripts/intro.dlg");
}

/// Flags following the script path
#[derive(Debug, Default)]
struct Flags {
    selections: Vec<usize>,
    json: bool,
    debug: bool,
    lint_config: Option<PathBuf>,
}

fn parse_flags(args: &[String]) -> anyhow::Result<Flags> {
    let mut flags = Flags::default();
    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--select" => {
                let value = args.next().context("--select needs a value")?;
                flags.selections = play::parse_selections(value)?;
            }
            "--lint-config" => {
                let value = args.next().context("--lint-config needs a file path")?;
                flags.lint_config = Some(PathBuf::from(value));
            }
            "--json" => flags.json = true,
            "--debug" => flags.debug = true,
            other => anyhow::bail!("Unknown option '{}'", other),
        }
    }
    Ok(flags)
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file '{}'", path.display()))
}

/// Run one command; `Ok(false)` means the exit status should signal failure
fn run(command: &str, file: PathBuf, rest: &[String]) -> anyhow::Result<bool> {
    let flags = parse_flags(rest)?;

    let config = if flags.debug {
        DebugConfig::enabled(LogLevel::Debug)
    } else {
        DebugConfig::default()
    };
    debug::init(config).context("Failed to install logger")?;

    let source = read(&file)?;
    match command {
        "play" => {
            let options = play::PlayOptions {
                selections: flags.selections,
                json: flags.json,
            };
            print!("{}", play::run_play(&source, &options)?);
            if options.json {
                println!();
            }
            Ok(true)
        }
        "check" => {
            let config = match &flags.lint_config {
                Some(path) => check::load_config(&read(path)?)?,
                None => LintConfig::default(),
            };
            let report = check::run_check(&source, &config)?;
            print!("{}", report.output);
            Ok(!report.failed())
        }
        _ => {
            print!("{}", graph::run_graph(&source)?);
            Ok(true)
        }
    }
}
