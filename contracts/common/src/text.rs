//! String helpers for on-chain use, where `alloc` formatting is unavailable.

use soroban_sdk::{Env, String};

use crate::MAX_REASON_LEN;

const BUF_LEN: usize = 512;

/// Returns `prefix` followed by `value`.
///
/// `value` is truncated so the result never exceeds the internal buffer;
/// callers validate lengths against [`MAX_REASON_LEN`] beforehand.
pub fn prefixed(env: &Env, prefix: &str, value: &String) -> String {
    let mut buf = [0u8; BUF_LEN];
    let head = prefix.len().min(BUF_LEN);
    buf[..head].copy_from_slice(&prefix.as_bytes()[..head]);

    let value_len = (value.len() as usize).min(MAX_REASON_LEN as usize);
    let end = (head + value_len).min(BUF_LEN);
    if end - head == value.len() as usize {
        value.copy_into_slice(&mut buf[head..end]);
    } else {
        let bytes = value.to_bytes();
        for (i, slot) in buf[head..end].iter_mut().enumerate() {
            *slot = bytes.get(i as u32).unwrap_or(b'?');
        }
    }

    String::from_bytes(env, &buf[..end])
}

/// Returns `true` if `value` is empty or longer than `max`.
pub fn out_of_bounds(value: &String, max: u32) -> bool {
    value.is_empty() || value.len() > max
}

/// Number of UTF-8 code points in `value`.
pub fn char_count(value: &String) -> u32 {
    value
        .to_bytes()
        .iter()
        .filter(|b| b & 0xC0 != 0x80)
        .count() as u32
}
