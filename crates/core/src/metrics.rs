//! Metrics collection and reporting for a compression run.
//!
//! This module provides observable insights into one round trip:
//! - Sizes (input bytes, container bytes, output bytes)
//! - Alphabet and code statistics (distinct units, tree depth, entropy)
//! - Compression ratio and bits per unit
//! - Timing information
//!
//! # Design
//!
//! Metrics are collected in a plain struct with explicit updates at each
//! pipeline stage. The pipeline is single-threaded, so no synchronization is
//! involved.

use std::time::{Duration, Instant};

use crate::container::Container;
use crate::tree::CodeTree;

/// Statistics for one compress / decompress round trip.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Bytes of UTF-8 text read from the input file
    pub input_bytes: u64,

    /// UTF-16 units in the input text
    pub input_units: u64,

    /// Bytes of UTF-8 text written to the decompressed file
    pub output_bytes: u64,

    // === Compression ===
    /// Distinct units in the frequency table
    pub distinct_units: u64,

    /// Logical payload length in bits
    pub encoded_bits: u64,

    /// Serialized container size
    pub container_bytes: u64,

    /// Longest code length
    pub tree_depth: u64,

    /// Shannon entropy of the input in bits per unit
    pub entropy: f64,

    // === Verification ===
    /// Whether the decompressed text equals the input
    pub verified: bool,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            input_units: 0,
            output_bytes: 0,
            distinct_units: 0,
            encoded_bits: 0,
            container_bytes: 0,
            tree_depth: 0,
            entropy: 0.0,
            verified: false,
        }
    }

    /// Record the input text.
    pub fn record_input(&mut self, text: &str) {
        self.input_bytes = text.len() as u64;
        self.input_units = text.encode_utf16().count() as u64;
    }

    /// Record the statistics of a freshly built container.
    pub fn record_container(&mut self, container: &Container) {
        self.distinct_units = container.frequencies.len() as u64;
        self.encoded_bits = container.bits.len() as u64;
        self.container_bytes = container.encoded_len() as u64;
        self.entropy = container.frequencies.entropy();
        self.tree_depth = CodeTree::build(&container.frequencies)
            .map(|tree| tree.depth().max(1) as u64)
            .unwrap_or(0);
    }

    /// Record the decompressed text and compare it to the original.
    pub fn record_output(&mut self, original: &str, decoded: &str) {
        self.output_bytes = decoded.len() as u64;
        self.verified = original == decoded;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compute compression ratio (container / input).
    ///
    /// Returns 0.0 if there was no input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length in bits per unit.
    pub fn bits_per_unit(&self) -> f64 {
        if self.input_units == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.input_units as f64
        }
    }

    /// Compute throughput in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let duration_ms = self.duration().as_millis();

        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", duration_ms);
        println!();

        println!("Input:  {} bytes ({} units)", self.input_bytes, self.input_units);
        println!("Output: {} bytes", self.output_bytes);
        if self.verified {
            println!("Verification: PASSED ✓");
        } else {
            println!("Verification: FAILED ✗");
        }
        println!();

        println!("=== Code ===");
        println!("Distinct units: {}", self.distinct_units);
        println!("Tree depth: {}", self.tree_depth);
        println!("Entropy: {:.3} bits/unit", self.entropy);
        println!("Average code length: {:.3} bits/unit", self.bits_per_unit());
        println!();

        println!("=== Container ===");
        println!("Payload: {} bits", self.encoded_bits);
        println!("Container: {} bytes", self.container_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.verified {
            println!("✓ Round trip completed successfully");
            println!(
                "  {} bytes -> {} bytes in {} ms",
                self.input_bytes,
                self.container_bytes,
                self.duration().as_millis()
            );
        } else {
            println!(
                "✗ Round trip failed: output differs from input ({} != {} bytes)",
                self.input_bytes, self.output_bytes
            );
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             input_units={}\n\
             output_bytes={}\n\
             distinct_units={}\n\
             encoded_bits={}\n\
             container_bytes={}\n\
             tree_depth={}\n\
             compression_ratio={:.4}\n\
             bits_per_unit={:.4}\n\
             entropy={:.4}\n\
             verified={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.input_units,
            self.output_bytes,
            self.distinct_units,
            self.encoded_bits,
            self.container_bytes,
            self.tree_depth,
            self.compression_ratio(),
            self.bits_per_unit(),
            self.entropy,
            self.verified,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compress;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert!(metrics.end_time.is_none());
        assert!(!metrics.verified);
        assert!(metrics.duration().as_millis() < 100);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 1000;
        metrics.container_bytes = 750;

        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_empty_ratios() {
        let metrics = Metrics::new();
        assert_eq!(metrics.compression_ratio(), 0.0);
        assert_eq!(metrics.bits_per_unit(), 0.0);
    }

    #[test]
    fn test_record_aab() {
        let mut metrics = Metrics::new();
        metrics.record_input("aab");
        metrics.record_container(&compress("aab").unwrap());
        metrics.record_output("aab", "aab");

        assert_eq!(metrics.input_units, 3);
        assert_eq!(metrics.distinct_units, 2);
        assert_eq!(metrics.encoded_bits, 3);
        assert_eq!(metrics.container_bytes, 21);
        assert_eq!(metrics.tree_depth, 1);
        assert_eq!(metrics.bits_per_unit(), 1.0);
        assert!(metrics.verified);
    }

    #[test]
    fn test_record_mismatch() {
        let mut metrics = Metrics::new();
        metrics.record_output("abc", "abd");
        assert!(!metrics.verified);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 1_000_000;

        std::thread::sleep(Duration::from_millis(100));
        metrics.complete();

        assert!(metrics.throughput_bps() > 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new();
        metrics.input_bytes = 1000;
        metrics.output_bytes = 1000;
        metrics.distinct_units = 10;

        let text = metrics.export_text();
        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("output_bytes=1000"));
        assert!(text.contains("distinct_units=10"));
    }
}
