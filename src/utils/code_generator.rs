//! Short code generation.

use rand::Rng;

/// Alphabet for generated short codes: 26 lower + 26 upper + 10 digits.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Fixed length of every generated short code.
///
/// Six characters over a 62-character alphabet give roughly 56.8 billion
/// possible codes.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code.
///
/// Codes are drawn uniformly from [`ALPHABET`] and are not guaranteed
/// collision-free; the shortener service detects collisions on insert and
/// retries with a fresh code.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
