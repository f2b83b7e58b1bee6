//! Test id generation.

use rand::Rng;

/// Literal tag every test id starts with.
pub const TEST_ID_PREFIX: &str = "test-";

/// Number of random characters after the prefix.
pub const TEST_ID_RANDOM_LEN: usize = 10;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate an opaque test id such as `test-k3x9q0m2ab`.
///
/// Uniqueness rests on randomness alone: with 36^10 possible suffixes the
/// birthday bound stays negligible for tens of thousands of live tests.
pub fn generate_test_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..TEST_ID_RANDOM_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();
    format!("{TEST_ID_PREFIX}{suffix}")
}
