//! Configuration for the huffpack application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it reads `testText.txt`, writes
//! `compressed.huf`, reads that back and writes `decompressed.txt`. Flags only
//! move those files around or control the sample text generator.

use std::path::PathBuf;

use huffpack_core::{Error, Result};

/// Default plaintext input
pub const DEFAULT_INPUT: &str = "testText.txt";

/// Default container output
pub const DEFAULT_COMPRESSED: &str = "compressed.huf";

/// Default recovered plaintext output
pub const DEFAULT_OUTPUT: &str = "decompressed.txt";

/// Sample size used when the input file is missing
pub const DEFAULT_SAMPLE_CHARS: usize = 16 * 1024;

/// Complete configuration for a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // === Files ===
    /// Plaintext input path
    pub input_file: PathBuf,

    /// Container path
    pub compressed_file: PathBuf,

    /// Recovered plaintext path
    pub output_file: PathBuf,

    // === Sample generation ===
    /// Characters of sample text to write to the input path first (None = only
    /// when the input is missing)
    pub generate_chars: Option<usize>,

    /// Seed for sample generation
    pub seed: u64,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (without the program name).
    ///
    /// If --seed is not provided, a time-based seed is used; it is printed
    /// with the config so a generated sample can be reproduced.
    pub fn from_args(args: &[String]) -> Result<Command> {
        let mut input_file: Option<PathBuf> = None;
        let mut compressed_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut generate_chars: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    input_file = Some(PathBuf::from(next_value(
                        args,
                        &mut i,
                        "--in requires a path",
                    )?));
                }
                "--compressed" => {
                    compressed_file = Some(PathBuf::from(next_value(
                        args,
                        &mut i,
                        "--compressed requires a path",
                    )?));
                }
                "--out" => {
                    output_file = Some(PathBuf::from(next_value(
                        args,
                        &mut i,
                        "--out requires a path",
                    )?));
                }
                "--generate" => {
                    let value = next_value(args, &mut i, "--generate requires a number")?;
                    generate_chars = Some(value.parse().map_err(|_| {
                        Error::Config(format!("invalid generate size: {}", value))
                    })?);
                }
                "--seed" => {
                    let value = next_value(args, &mut i, "--seed requires a number")?;
                    seed = Some(
                        value
                            .parse()
                            .map_err(|_| Error::Config(format!("invalid seed: {}", value)))?,
                    );
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    return Ok(Command::Help);
                }
                _ => {
                    return Err(Error::Config(format!("unknown argument: {}", args[i])));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Command::Run(Config {
            input_file: input_file.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            compressed_file: compressed_file.unwrap_or_else(|| PathBuf::from(DEFAULT_COMPRESSED)),
            output_file: output_file.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            generate_chars,
            seed,
            print_config,
            print_metrics,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Input file:      {}", self.input_file.display());
        println!("Compressed file: {}", self.compressed_file.display());
        println!("Output file:     {}", self.output_file.display());
        println!();
        match self.generate_chars {
            Some(n) => println!("Generate sample: {} chars", n),
            None => println!("Generate sample: only if input is missing"),
        }
        println!("Seed: {}", self.seed);
        println!();
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| Error::Config(missing.to_string()))
}

pub fn print_help() {
    println!("huffpack: Huffman text compression round trip");
    println!();
    println!("USAGE:");
    println!("    huffpack [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Text input (default: {})", DEFAULT_INPUT);
    println!("    --compressed <PATH>     Container output (default: {})", DEFAULT_COMPRESSED);
    println!("    --out <PATH>            Decompressed output (default: {})", DEFAULT_OUTPUT);
    println!();
    println!("    --generate <N>          Write N chars of sample text to the input first");
    println!("    --seed <N>              Random seed for sample text");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("Set RUST_LOG=debug to trace each pipeline stage.");
    println!();
}
