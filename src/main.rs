//! TextHash CLI - Text Hash Generator
//!
//! Generate, verify and copy text digests from the command line.

use clap::Parser;
use console::style;
use serde_json::json;
use std::collections::BTreeMap;
use texthash::clipboard::{from_backend, Clipboard};
use texthash::config::{
    parse_size, CliArgs, Commands, InputArgs, OutputFormat, ToolConfig, ALGORITHM_GROUPS,
};
use texthash::controller::{apply, HashToolController, SessionCommand, SessionReply};
use texthash::error::{HashToolError, Result};
use texthash::hash::{benchmark_algorithms, HashOptions, TextHasher};
use texthash::input::read_input;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Exit code for a failed verification
const EXIT_MISMATCH: i32 = 1;
/// Exit code for errors
const EXIT_ERROR: i32 = 2;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Handle result
    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(args: CliArgs) -> Result<i32> {
    let config = ToolConfig::from_cli(&args).map_err(HashToolError::ConfigError)?;
    let hasher = TextHasher::from_config(&config);

    match &args.command {
        Commands::Hash { input, copy, .. } => cmd_hash(&config, &hasher, input, *copy),
        Commands::All { input, .. } => cmd_all(&config, &hasher, input),
        Commands::Verify { input, expected, .. } => cmd_verify(&config, &hasher, input, expected),
        Commands::Hmac { input, key, .. } => cmd_hmac(&config, &hasher, input, key),
        Commands::Algorithms => cmd_algorithms(&config),
        Commands::Interactive { .. } => cmd_interactive(&config),
        Commands::Benchmark { size } => cmd_benchmark(&config, size),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| HashToolError::config(format!("Failed to create runtime: {}", e)))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_hash(config: &ToolConfig, hasher: &TextHasher, input: &InputArgs, copy: bool) -> Result<i32> {
    let text = read_input(input, config.max_input_bytes)?;
    let options = HashOptions::new(config.default_algorithm).with_uppercase(config.uppercase);
    let digest = hasher.generate(&text, &options)?;

    let copied = if copy {
        let clipboard = from_backend(config.clipboard)?;
        runtime()?.block_on(async {
            match clipboard.write_text(&digest).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(backend = clipboard.name(), "copy failed: {}", e);
                    false
                }
            }
        })
    } else {
        false
    };

    match config.output_format {
        OutputFormat::Json => print_json(&json!({
            "algorithm": options.algorithm,
            "hash": digest,
            "input_len": text.len(),
            "copied": copied,
        }))?,
        OutputFormat::Text => {
            println!("{}", digest);
            if copied {
                eprintln!("{}", style("Copied to clipboard").green());
            }
        }
    }

    Ok(0)
}

fn cmd_all(config: &ToolConfig, hasher: &TextHasher, input: &InputArgs) -> Result<i32> {
    let text = read_input(input, config.max_input_bytes)?;
    let hashes = hasher.generate_all(&text, config.uppercase)?;

    match config.output_format {
        OutputFormat::Json => print_json(&serde_json::to_value(&hashes)?)?,
        OutputFormat::Text => {
            for (group, members) in ALGORITHM_GROUPS {
                println!("{}", style(group.name()).bold());
                for algorithm in members.iter() {
                    if let Some(digest) = hashes.get(algorithm) {
                        println!("  {:<9} {}", algorithm.name(), digest);
                    }
                }
            }
        }
    }

    Ok(0)
}

fn cmd_verify(
    config: &ToolConfig,
    hasher: &TextHasher,
    input: &InputArgs,
    expected: &str,
) -> Result<i32> {
    let text = read_input(input, config.max_input_bytes)?;
    let algorithm = config.default_algorithm;
    let matched = hasher.verify(&text, expected, algorithm)?;

    match config.output_format {
        OutputFormat::Json => print_json(&json!({
            "algorithm": algorithm,
            "expected": expected.trim(),
            "verified": matched,
        }))?,
        OutputFormat::Text => {
            if matched {
                println!("{} ({})", style("MATCH").green().bold(), algorithm);
            } else {
                println!("{} ({})", style("MISMATCH").red().bold(), algorithm);
            }
        }
    }

    Ok(if matched { 0 } else { EXIT_MISMATCH })
}

fn cmd_hmac(config: &ToolConfig, hasher: &TextHasher, input: &InputArgs, key: &str) -> Result<i32> {
    let text = read_input(input, config.max_input_bytes)?;
    let options = HashOptions::new(config.default_algorithm).with_uppercase(config.uppercase);
    let mac = hasher.hmac(&text, key, &options)?;

    match config.output_format {
        OutputFormat::Json => print_json(&serde_json::to_value(&mac)?)?,
        OutputFormat::Text => println!("{}", mac),
    }

    Ok(0)
}

fn cmd_algorithms(config: &ToolConfig) -> Result<i32> {
    match config.output_format {
        OutputFormat::Json => {
            let groups: BTreeMap<&str, Vec<&str>> = ALGORITHM_GROUPS
                .iter()
                .map(|(group, members)| (group.name(), members.iter().map(|a| a.cli_name()).collect()))
                .collect();
            print_json(&serde_json::to_value(groups)?)?;
        }
        OutputFormat::Text => {
            for (group, members) in ALGORITHM_GROUPS {
                println!("{}", style(group.name()).bold());
                for algorithm in members.iter() {
                    let hmac = if algorithm.supports_hmac() { "hmac" } else { "" };
                    println!(
                        "  {:<10} {:<9} {:>4} bits  {}",
                        algorithm.cli_name(),
                        algorithm.name(),
                        algorithm.output_size() * 8,
                        hmac
                    );
                }
            }
        }
    }

    Ok(0)
}

fn cmd_interactive(config: &ToolConfig) -> Result<i32> {
    let clipboard = from_backend(config.clipboard)?;
    let mut controller = HashToolController::with_config(config, clipboard);

    eprintln!("TextHash {} interactive mode. {}", texthash::VERSION, style(":help for commands").dim());

    runtime()?.block_on(async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let command = match SessionCommand::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    eprintln!("{}", style(message).yellow());
                    continue;
                }
            };

            match apply(&mut controller, command).await {
                SessionReply::Lines(output) => {
                    for line in output {
                        println!("{}", line);
                    }
                }
                SessionReply::Quit => break,
            }
        }

        Ok::<_, HashToolError>(())
    })?;

    Ok(0)
}

fn cmd_benchmark(config: &ToolConfig, size: &str) -> Result<i32> {
    let data_size = parse_size(size).map_err(|e| HashToolError::config(format!("Invalid size: {}", e)))?;
    let results = benchmark_algorithms(data_size as usize);

    match config.output_format {
        OutputFormat::Json => print_json(&serde_json::to_value(&results)?)?,
        OutputFormat::Text => {
            println!(
                "=== Hash Algorithm Benchmark ({}) ===",
                humansize::format_size(data_size, humansize::BINARY)
            );
            for sample in results {
                println!(
                    "{:12} {:>10.2?}  {:>8.1} MiB/s",
                    sample.algorithm.name(),
                    sample.duration,
                    sample.throughput_mibps
                );
            }
        }
    }

    Ok(0)
}
