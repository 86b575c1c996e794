use nom::bytes::complete::take_while;

use super::ParseResult;

/// OWS = *( SP / HTAB )
pub(crate) fn ows(input: &[u8]) -> ParseResult<&[u8]> {
    take_while(|b| b == b' ' || b == b'\t')(input)
}
