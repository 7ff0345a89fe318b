//! Smarten CLI - normalizes typographic punctuation in text files.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayon::prelude::*;
use similar::{ChangeTag, TextDiff};

use smarten::config::Config;
use smarten::{Options, normalize};

/// Normalizes straight quotes, apostrophes, dashes, and proper-noun
/// capitalization in text files.
#[derive(Parser, Debug)]
#[command(name = "smarten")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s) to normalize. Use - for stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write normalized output back to the input file(s).
    #[arg(short, long)]
    write: bool,

    /// Check if files are already normalized (exit 1 if not) and print a
    /// diff for each one that is not.
    #[arg(short, long)]
    check: bool,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Skip the smart-quote rewriting.
    #[arg(long)]
    no_quotes: bool,

    /// Re-capitalize input as proper-noun text.
    #[arg(long)]
    names: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match discover_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut options = config
        .as_ref()
        .map(|(_, config)| config.options())
        .unwrap_or_default();
    if args.no_quotes {
        options.smart_quotes = false;
    }
    if args.names {
        options.capitalize_names = true;
    }

    let files = match resolve_files(&args, config.as_ref()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error collecting files: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.stdin || files.is_empty() {
        return run_stdin(&options);
    }

    // Normalization is pure per file, so files are processed in parallel
    // and results emitted in input order afterwards.
    let results: Vec<Result<(String, String), String>> = files
        .par_iter()
        .map(|file| {
            let input = fs::read_to_string(file)
                .map_err(|e| format!("Error reading {}: {}", file.display(), e))?;
            Ok((normalize(&input, &options), input))
        })
        .collect();

    let mut all_normalized = true;
    for (file, result) in files.iter().zip(results) {
        let (output, input) = match result {
            Ok(pair) => pair,
            Err(message) => {
                eprintln!("{}", message);
                return ExitCode::FAILURE;
            }
        };

        if args.check {
            if input != output {
                eprintln!("{}: not normalized", file.display());
                print_diff(&input, &output);
                all_normalized = false;
            }
        } else if args.write {
            if input != output {
                if let Err(e) = fs::write(file, &output) {
                    eprintln!("Error writing {}: {}", file.display(), e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            print!("{}", output);
        }
    }

    if args.check && !all_normalized {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_stdin(options: &Options) -> ExitCode {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        return ExitCode::FAILURE;
    }

    print!("{}", normalize(&input, options));
    ExitCode::SUCCESS
}

fn discover_config() -> Result<Option<(PathBuf, Config)>, Box<dyn std::error::Error>> {
    let current_dir = std::env::current_dir()?;
    Ok(Config::discover(&current_dir)?)
}

/// Files given on the command line win; otherwise the configuration's
/// include patterns are expanded relative to the configuration file's
/// directory. An empty result means stdin.
fn resolve_files(
    args: &Args,
    config: Option<&(PathBuf, Config)>,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !args.files.is_empty() {
        if args.files.len() == 1 && args.files[0] == Path::new("-") {
            return Ok(Vec::new());
        }
        return Ok(args.files.clone());
    }
    if let Some((config_path, config)) = config {
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        return Ok(config.collect_files(base_dir)?);
    }
    Ok(Vec::new())
}

fn print_diff(input: &str, output: &str) {
    let diff = TextDiff::from_lines(input, output);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        print!("{}{}", sign, change);
    }
}
