//! huffpack: compress a text file, read the container back and restore it.
//!
//! The run is a straight sequence of stages:
//! read input -> compress -> write container -> read container ->
//! decompress -> write output -> verify.

mod config;
mod input_gen;

use std::fs;
use std::process::ExitCode;

use config::{Command, Config, DEFAULT_SAMPLE_CHARS};
use huffpack_core::{container, metrics::Metrics, pipeline, Result};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.print_metrics {
                metrics.print_summary();
            }
            metrics.print_result();
            if metrics.verified {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<Metrics> {
    let generate = match config.generate_chars {
        Some(n) => Some(n),
        None if !config.input_file.exists() => {
            log::warn!(
                "{} not found, generating sample text (seed {})",
                config.input_file.display(),
                config.seed
            );
            Some(DEFAULT_SAMPLE_CHARS)
        }
        None => None,
    };
    if let Some(chars) = generate {
        input_gen::write_sample_file(&config.input_file, config.seed, chars)?;
        log::info!("wrote {} chars of sample text to {}", chars, config.input_file.display());
    }

    let mut metrics = Metrics::new();

    let text = fs::read_to_string(&config.input_file)?;
    metrics.record_input(&text);

    let compressed = pipeline::compress(&text)?;
    container::write_file(&config.compressed_file, &compressed.frequencies, &compressed.bits)?;
    metrics.record_container(&compressed);
    log::info!(
        "compressed {} bytes into {} ({} bytes)",
        text.len(),
        config.compressed_file.display(),
        compressed.encoded_len()
    );

    let decoded = pipeline::decompress_file(&config.compressed_file, &config.output_file)?;
    metrics.record_output(&text, &decoded);
    metrics.complete();

    let input_crc = crc32fast::hash(text.as_bytes());
    let output_crc = crc32fast::hash(decoded.as_bytes());
    if input_crc == output_crc {
        log::info!("crc32 {:#010x} matches", input_crc);
    } else {
        log::error!(
            "crc32 mismatch: input {:#010x}, output {:#010x}",
            input_crc,
            output_crc
        );
    }

    Ok(metrics)
}
