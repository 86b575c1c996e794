// RFC 7230 Section 3.2.6 (token) and RFC 7235 Section 2.1 (token68)
// Per-byte classification, precomputed into a flag table.

const TOKEN: u8 = 1 << 0;
const TOKEN68: u8 = 1 << 1;

const fn classify(b: u8) -> u8 {
    let mut flags = 0;
    // tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "."
    //       / "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
    if matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.'
        | b'^' | b'_' | b'`' | b'|' | b'~'
        | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z'
    ) {
        flags |= TOKEN;
    }
    // token68 body: ALPHA / DIGIT / "-" / "." / "_" / "~" / "+" / "/"
    // ("=" is padding only and is handled positionally by the parser)
    if matches!(
        b,
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'+' | b'/'
    ) {
        flags |= TOKEN68;
    }
    flags
}

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
}

// Written once at compile time, read-only afterwards.
static OCTET_FLAGS: [u8; 256] = build_table();

/// Returns true if `b` may appear in a `token` production.
#[inline]
pub fn is_token_octet(b: u8) -> bool {
    OCTET_FLAGS[b as usize] & TOKEN != 0
}

/// Returns true if `b` may appear in the body of a `token68` production.
#[inline]
pub fn is_token68_octet(b: u8) -> bool {
    OCTET_FLAGS[b as usize] & TOKEN68 != 0
}

/// Returns true if `val` is a valid `token`.
pub fn is_token(val: &str) -> bool {
    !val.is_empty() && val.bytes().all(is_token_octet)
}

/// Returns true if `val` is a valid `token68`: a non-empty run of token68
/// octets followed by zero or more `=` padding characters.
pub fn is_token68(val: &str) -> bool {
    let bytes = val.as_bytes();
    let body = bytes.iter().take_while(|&&b| is_token68_octet(b)).count();
    body > 0 && bytes[body..].iter().all(|&b| b == b'=')
}
