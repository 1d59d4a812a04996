//! Content hashing
//!
//! Short, stable tokens derived from fingerprint strings.

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Hash a string into 32 bits.
///
/// Walks the UTF-16 code units from last to first with a djb2-style
/// multiply-xor step, so results match hashes produced in a browser runtime.
pub fn string_hash(content: &str) -> u32 {
    let units: Vec<u16> = content.encode_utf16().collect();
    units
        .iter()
        .rev()
        .fold(5381u32, |hash, &unit| hash.wrapping_mul(33) ^ unit as u32)
}

/// Encode a number in lower-case base 36
pub fn to_base36(mut n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::with_capacity(7);
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}
