// RFC 7230 Section 3.2.6
// quoted-string = DQUOTE *( qdtext / quoted-pair ) DQUOTE
// quoted-pair   = "\" ( HTAB / SP / VCHAR / obs-text )

use nom::error::ErrorKind;

use crate::error::{Error, Result};

use super::ParseResult;

// ASCII control characters other than HTAB cannot appear in a
// quoted-string, escaped or not.
#[inline]
fn is_forbidden_octet(b: u8) -> bool {
    (b < 0x20 && b != b'\t') || b == 0x7F
}

fn fail<O>(at: &[u8], kind: ErrorKind) -> ParseResult<O> {
    Err(nom::Err::Error(nom::error::Error::new(at, kind)))
}

/// Parses a quoted-string, decoding quoted-pair escapes.
///
/// Returns the decoded content without the surrounding quotes. Fails on an
/// unescaped control octet (other than HTAB), on `\` followed by a control
/// octet, and on end of input before the closing quote.
pub(crate) fn quoted_string(input: &[u8]) -> ParseResult<String> {
    if input.first() != Some(&b'"') {
        return fail(input, ErrorKind::Char);
    }
    let mut value = Vec::new();
    let mut i = 1;
    loop {
        let Some(&b) = input.get(i) else {
            // No closing quote
            return fail(&input[i..], ErrorKind::Eof);
        };
        match b {
            b'"' => {
                i += 1;
                break;
            }
            b'\\' => {
                let Some(&escaped) = input.get(i + 1) else {
                    return fail(&input[i + 1..], ErrorKind::Eof);
                };
                if is_forbidden_octet(escaped) {
                    return fail(&input[i + 1..], ErrorKind::Verify);
                }
                value.push(escaped);
                i += 2;
            }
            _ if is_forbidden_octet(b) => return fail(&input[i..], ErrorKind::Verify),
            _ => {
                value.push(b);
                i += 1;
            }
        }
    }
    match String::from_utf8(value) {
        Ok(value) => Ok((&input[i..], value)),
        Err(_) => fail(input, ErrorKind::Verify),
    }
}

/// Appends a quoted-string encoding of `val` to `out`, escaping every `"`
/// and `\` with a backslash.
///
/// Fails with [`Error::InvalidCharacter`] if `val` contains an ASCII
/// control character other than horizontal tab; such octets cannot be
/// represented in a quoted-string and are never silently dropped.
pub fn write_quoted_pair(out: &mut String, val: &str) -> Result<()> {
    out.push('"');
    for b in val.bytes() {
        match b {
            _ if is_forbidden_octet(b) => return Err(Error::InvalidCharacter(b)),
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            _ => out.push(b as char),
        }
    }
    out.push('"');
    Ok(())
}

/// Returns `Ok(())` iff `val` can be encoded by [`write_quoted_pair`].
pub fn validate_quotable(val: &str) -> Result<()> {
    for b in val.bytes() {
        if is_forbidden_octet(b) {
            return Err(Error::InvalidCharacter(b));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_string_basic() {
        let (rem, val) = quoted_string(b"\"hello world\",next").unwrap();
        assert_eq!(val, "hello world");
        assert_eq!(rem, b",next");

        let (rem, val) = quoted_string(b"\"\"").unwrap();
        assert_eq!(val, "");
        assert!(rem.is_empty());
    }

    #[test]
    fn test_quoted_string_escapes() {
        let (rem, val) = quoted_string(b"\"he said \\\"hi\\\"\\\\ok\"").unwrap();
        assert_eq!(val, "he said \"hi\"\\ok");
        assert!(rem.is_empty());
    }

    #[test]
    fn test_quoted_string_tab_allowed() {
        let (_, val) = quoted_string(b"\"a\tb\"").unwrap();
        assert_eq!(val, "a\tb");
    }

    #[test]
    fn test_quoted_string_rejects_controls() {
        assert!(quoted_string(b"\"a\x01b\"").is_err());
        assert!(quoted_string(b"\"a\x7Fb\"").is_err());
        assert!(quoted_string(b"\"a\\\nb\"").is_err());
    }

    #[test]
    fn test_quoted_string_unterminated() {
        assert!(quoted_string(b"\"open").is_err());
        assert!(quoted_string(b"\"trailing escape\\").is_err());
        assert!(quoted_string(b"no quote").is_err());
    }

    #[test]
    fn test_quoted_string_utf8() {
        let (_, val) = quoted_string("\"caf\u{e9}\"".as_bytes()).unwrap();
        assert_eq!(val, "caf\u{e9}");
    }

    #[test]
    fn test_write_quoted_pair() {
        let mut out = String::new();
        write_quoted_pair(&mut out, "he said \"hi\"\\ok").unwrap();
        assert_eq!(out, "\"he said \\\"hi\\\"\\\\ok\"");
    }

    #[test]
    fn test_write_quoted_pair_rejects_controls() {
        let mut out = String::new();
        assert_eq!(
            write_quoted_pair(&mut out, "a\nb"),
            Err(Error::InvalidCharacter(b'\n'))
        );
        assert_eq!(validate_quotable("a\x7Fb"), Err(Error::InvalidCharacter(0x7F)));
        assert!(validate_quotable("tab\tis fine").is_ok());
    }

    #[test]
    fn test_encode_decode_inverse() {
        let original = "he said \"hi\"\\ok";
        let mut encoded = String::new();
        write_quoted_pair(&mut encoded, original).unwrap();
        let (rem, decoded) = quoted_string(encoded.as_bytes()).unwrap();
        assert!(rem.is_empty());
        assert_eq!(decoded, original);
    }
}
