//! Sample text generation.
//!
//! When the input file does not exist (or `--generate` is given), we write a
//! sample text with interesting coding characteristics.
//!
//! # Design
//!
//! Generated text has:
//! - Some long runs of one character (short codes dominate)
//! - Some English-like words over a skewed alphabet
//! - Some repeating phrases
//! - Some non-ASCII characters, including surrogate pairs
//!
//! This makes the code statistics visible in metrics.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Letters in rough English frequency order; earlier letters are drawn more often.
const LETTERS: &[u8] = b"etaoinshrdlcumwfgypbvkjxqz";

const PHRASES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "to be or not to be",
    "all work and no play",
    "pack my box with five dozen liquor jugs",
];

const EXOTIC: &[char] = &['é', 'ß', 'λ', 'Ж', '中', '→', '😀', '🦀'];

/// Generate `chars` characters of sample text.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `chars`: exact number of characters generated
pub fn generate_sample_text(seed: u64, chars: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out: Vec<char> = Vec::with_capacity(chars);

    while out.len() < chars {
        let section = (chars - out.len()).min(512);

        match rng.gen_range(0..10) {
            // 20% runs of one character
            0..=1 => {
                let c = LETTERS[rng.gen_range(0..LETTERS.len())] as char;
                out.extend(std::iter::repeat(c).take(section));
            }

            // 50% word-like text
            2..=6 => {
                for _ in 0..section {
                    out.push(random_text_char(&mut rng));
                }
            }

            // 20% repeated phrases
            7..=8 => {
                let phrase = PHRASES[rng.gen_range(0..PHRASES.len())];
                out.extend(phrase.chars().chain(". ".chars()).cycle().take(section));
            }

            // 10% mixed with non-ASCII
            _ => {
                for _ in 0..section {
                    if rng.gen_bool(0.2) {
                        out.push(EXOTIC[rng.gen_range(0..EXOTIC.len())]);
                    } else {
                        out.push(random_text_char(&mut rng));
                    }
                }
            }
        }
    }

    out.truncate(chars);
    out.into_iter().collect()
}

/// A letter biased toward the front of `LETTERS`, or a space / newline.
fn random_text_char(rng: &mut ChaCha8Rng) -> char {
    match rng.gen_range(0..100) {
        0..=14 => ' ',
        15 => '\n',
        _ => {
            let r: f64 = rng.gen();
            let idx = ((r * r) * LETTERS.len() as f64) as usize;
            LETTERS[idx.min(LETTERS.len() - 1)] as char
        }
    }
}

/// Write generated text to a file.
pub fn write_sample_file(path: &std::path::Path, seed: u64, chars: usize) -> std::io::Result<()> {
    let text = generate_sample_text(seed, chars);
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}
