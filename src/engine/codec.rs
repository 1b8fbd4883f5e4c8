//! Single-codepoint UTF-8 decoding and encoding over raw bytes.
//!
//! Decoding never fails: malformed or truncated input yields [`SENTINEL`] and
//! always advances by at least one byte so scanning loops terminate.

/// A Unicode scalar value.
pub type Codepoint = u32;

/// Returned for malformed, truncated or out of range input.
pub const SENTINEL: Codepoint = 0;

/// Decode the codepoint starting at `index` and return it along with the
/// index immediately after it.
pub fn decode_next(bytes: &[u8], index: usize) -> (Codepoint, usize) {
    let b0 = match bytes.get(index) {
        Some(&b) => b,
        None => return (SENTINEL, index.saturating_add(1)),
    };

    let (width, lead) = match b0 {
        0x00..=0x7F => return (b0 as Codepoint, index + 1),
        _ if b0 & 0xE0 == 0xC0 => (2, (b0 & 0x1F) as Codepoint),
        _ if b0 & 0xF0 == 0xE0 => (3, (b0 & 0x0F) as Codepoint),
        _ if b0 & 0xF8 == 0xF0 => (4, (b0 & 0x07) as Codepoint),

        // Stray continuation byte or invalid lead.
        _ => return (SENTINEL, index + 1),
    };

    let tail = match bytes.get(index + 1..index + width) {
        Some(t) => t,
        None => return (SENTINEL, index + 1),
    };

    let mut cp = lead;
    for &b in tail {
        if b & 0xC0 != 0x80 {
            return (SENTINEL, index + 1);
        }
        cp = (cp << 6) | (b & 0x3F) as Codepoint;
    }

    (cp, index + width)
}

/// Append the UTF-8 encoding of `cp` to `out`.
pub fn encode_into(cp: Codepoint, out: &mut Vec<u8>) {
    if cp < 0x80 {
        out.push(cp as u8);
    } else if cp < 0x800 {
        out.push(0xC0 | (cp >> 6) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else if cp < 0x10000 {
        out.push(0xE0 | (cp >> 12) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    } else {
        out.push(0xF0 | ((cp >> 18) & 0x07) as u8);
        out.push(0x80 | ((cp >> 12) & 0x3F) as u8);
        out.push(0x80 | ((cp >> 6) & 0x3F) as u8);
        out.push(0x80 | (cp & 0x3F) as u8);
    }
}

pub fn encode(cp: Codepoint) -> Vec<u8> {
    let mut out = Vec::with_capacity(4);
    encode_into(cp, &mut out);
    out
}

/// Number of codepoints in `s`. Continuation bytes (`10xxxxxx`) are not counted.
pub fn codepoint_count(s: &str) -> usize {
    s.bytes().filter(|b| b & 0xC0 != 0x80).count()
}

/// First codepoint of `s`, or [`SENTINEL`] if `s` is empty.
pub fn first_codepoint(s: &str) -> Codepoint {
    if s.is_empty() {
        return SENTINEL;
    }
    decode_next(s.as_bytes(), 0).0
}

/// Decode `s` into its codepoints. Returns None if any sequence is malformed
/// or decodes to the sentinel.
pub fn codepoints(s: &str) -> Option<Vec<Codepoint>> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let (cp, next) = decode_next(bytes, i);
        if cp == SENTINEL {
            return None;
        }
        out.push(cp);
        i = next;
    }
    Some(out)
}
