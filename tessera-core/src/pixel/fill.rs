//! Multi-byte pattern fill
//!
//! Fills a byte buffer with `count` repetitions of a 1, 2 or 4 byte value.
//! Patterns whose bytes are all equal go straight to `slice::fill`. Other
//! patterns are written literally a handful of times and then the filled
//! prefix is doubled with `copy_within` until the run is complete, which
//! keeps the inner loop at memcpy speed.

/// Upper bound on literal pattern writes before doubling takes over
const LITERAL_LIMIT: usize = 16;

/// Fill `buf` with `count` copies of the low `size` bytes of `value`
///
/// Bytes are taken in little-endian order, matching how native pixels are
/// stored in the frame buffer. `size` must be 1, 2 or 4 and `buf` must hold
/// at least `size * count` bytes.
pub fn fill_pattern(buf: &mut [u8], value: u32, size: usize, count: usize) {
    debug_assert!(matches!(size, 1 | 2 | 4), "unsupported pattern size {}", size);

    let total = size * count;
    if total == 0 {
        return;
    }

    let bytes = value.to_le_bytes();
    let pattern = &bytes[..size];
    let buf = &mut buf[..total];

    if pattern.iter().all(|&b| b == pattern[0]) {
        buf.fill(pattern[0]);
        return;
    }

    let literal = literal_count(count);
    for chunk in buf[..literal * size].chunks_exact_mut(size) {
        chunk.copy_from_slice(pattern);
    }

    let mut len = literal * size;
    let mut remaining = total - len;
    // The filled prefix is always `len` bytes long here
    while remaining > len {
        buf.copy_within(..len, len);
        remaining -= len;
        len <<= 1;
    }
    if remaining > 0 {
        buf.copy_within(..remaining, len);
    }
}

/// Number of elements written literally before doubling
///
/// Counts below the limit are written in full. Larger counts are halved
/// until they drop below the limit and then bumped by one, so the doubling
/// phase always has a non-trivial seed.
fn literal_count(count: usize) -> usize {
    if count < LITERAL_LIMIT {
        return count;
    }
    let mut l = count;
    while l >= LITERAL_LIMIT {
        l >>= 1;
    }
    l + 1
}
