//! Qstr hashing.
//!
//! This must match the hash recomputed by the runtime that consumes the
//! generated table, bit for bit. It is djb2 with XOR, seeded with 5381,
//! taken over the code points of the string and masked to the configured
//! hash width. The accumulator wraps in a `u64`; since wrapping multiply
//! mod 2^64 and XOR commute with the final truncation, a single mask at
//! the end is exact for any width up to eight bytes.

/// Computes the bounded hash of a qstr for a hash field of `bytes_hash`
/// bytes. The result is never zero: zero means "hash not computed" in the
/// runtime's data format, so a masked zero is forced to 1.
pub fn compute_hash(qstr: &str, bytes_hash: u32) -> u64 {
    let mut hash: u64 = 5381;
    for c in qstr.chars() {
        hash = hash.wrapping_mul(33) ^ u64::from(c as u32);
    }
    let mask = if bytes_hash >= 8 {
        u64::MAX
    } else {
        (1u64 << (8 * bytes_hash)) - 1
    };
    match hash & mask {
        0 => 1,
        h => h,
    }
}
