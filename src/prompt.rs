//! Prompt analysis - seed derivation and keyword extraction.
//!
//! Both operations are pure: the seed pins the RNG stream for a render,
//! the token set drives palette/motif/accent selection.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Keywords extracted from a prompt. Order and multiplicity are irrelevant.
pub type TokenSet = HashSet<String>;

/// Derive a stable 32-bit seed from a prompt.
///
/// The seed is the first 8 hex digits of SHA-256(prompt), i.e. the
/// big-endian u32 of the digest's leading 4 bytes. Identical prompts
/// always seed identical RNG streams.
pub fn derive_seed(prompt: &str) -> u32 {
    let hash = Sha256::digest(prompt.as_bytes());
    let bytes: [u8; 4] = hash[0..4].try_into().unwrap();
    u32::from_be_bytes(bytes)
}

/// Split a prompt into its lowercase alphanumeric runs.
///
/// Anything that is not alphanumeric acts as a separator and is dropped.
pub fn tokenize(prompt: &str) -> TokenSet {
    prompt
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// True if any of `words` appears in the token set.
pub fn contains_any(tokens: &TokenSet, words: &[&str]) -> bool {
    words.iter().any(|w| tokens.contains(*w))
}
