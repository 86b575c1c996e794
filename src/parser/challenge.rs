// RFC 7235 Section 2.1 & 4.1
// challenge   = auth-scheme [ 1*SP ( token68 / #auth-param ) ]
// auth-param  = token BWS "=" BWS ( token / quoted-string )
//
// After `scheme SP` the input is either a single token68 or a list of
// auth-params, and both start with the same run of token-like octets.
// Every speculative attempt below either consumes its production or
// leaves the caller's slice untouched.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::combinator::{map, map_res, recognize};
use nom::sequence::pair;
use tracing::debug;

use crate::types::{Challenge, Param};

use super::octet::{is_token68_octet, is_token_octet};
use super::quoted::quoted_string;
use super::whitespace::ows;
use super::ParseResult;

// token = 1*tchar
pub(crate) fn token(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_token_octet)(input)
}

fn token_str(input: &[u8]) -> ParseResult<&str> {
    map_res(token, std::str::from_utf8)(input)
}

// auth-param = token OWS "=" OWS ( token / quoted-string )
pub(crate) fn auth_param(input: &[u8]) -> ParseResult<Param> {
    let (rest, attribute) = token_str(input)?;
    let (rest, _) = ows(rest)?;
    let (rest, _) = tag(b"=")(rest)?;
    let (rest, _) = ows(rest)?;
    let (rest, value) = alt((quoted_string, map(token_str, String::from)))(rest)?;
    Ok((rest, Param::new(attribute, value)))
}

// token68 = 1*( ALPHA / DIGIT / "-" / "." / "_" / "~" / "+" / "/" ) *"="
fn token68(input: &[u8]) -> ParseResult<&str> {
    map_res(
        recognize(pair(
            take_while1(is_token68_octet),
            take_while(|b| b == b'='),
        )),
        std::str::from_utf8,
    )(input)
}

/// Returns true if `input` looks like the start of a new challenge: a
/// scheme token followed by a space, a comma or the end of input. Used to
/// tell "next challenge" apart from a malformed auth-param after a comma.
fn starts_challenge(input: &[u8]) -> bool {
    match token(input) {
        Ok((rest, _)) => matches!(rest.first(), None | Some(&b' ') | Some(&b',')),
        Err(_) => false,
    }
}

/// Parses one challenge. The boolean is true when a trailing comma has
/// already been consumed, in which case the caller must not require
/// another separator before the next challenge.
fn challenge(input: &[u8]) -> ParseResult<(Challenge, bool)> {
    let (mut rest, scheme) = token_str(input)?;
    let mut challenge = Challenge::new(scheme, Vec::new());

    // Without a space after the scheme the challenge carries neither
    // token68 nor params. Scheme-specific validators reject it if needed.
    if rest.first() != Some(&b' ') {
        return Ok((rest, (challenge, false)));
    }
    while rest.first() == Some(&b' ') {
        rest = &rest[1..];
    }

    let mut trailing_comma = false;
    match rest.first() {
        // A dangling space is trailing whitespace, not an error.
        None => return Ok((rest, (challenge, false))),
        Some(&b',') => {
            rest = &rest[1..];
            trailing_comma = true;
        }
        Some(&b) => match auth_param(rest) {
            Ok((r, param)) => {
                challenge.params.push(param);
                rest = r;
            }
            // The failed attempt starts with a token68 octet: consume the
            // maximal token68 run plus any trailing "=" padding instead.
            Err(_) if is_token68_octet(b) => {
                let (r, value) = token68(rest)?;
                challenge.token68 = value.to_string();
                return Ok((r, (challenge, false)));
            }
            Err(e) => return Err(e),
        },
    }

    // *( OWS "," OWS auth-param ), recovering from malformed segments.
    loop {
        if !trailing_comma {
            let (after_ws, _) = ows(rest)?;
            if after_ws.first() != Some(&b',') {
                break;
            }
            rest = &after_ws[1..];
            trailing_comma = true;
        }
        // The cursor sits just after a comma.
        let (after_ws, _) = ows(rest)?;
        match after_ws.first() {
            None => break,
            Some(&b',') => {
                // Empty slot between two commas.
                rest = &after_ws[1..];
                continue;
            }
            Some(_) => {}
        }
        match auth_param(after_ws) {
            Ok((r, param)) => {
                challenge.params.push(param);
                rest = r;
                trailing_comma = false;
            }
            Err(_) if starts_challenge(after_ws) => {
                // The comma separated two challenges, not two params.
                rest = after_ws;
                break;
            }
            Err(_) => {
                // Malformed segment: skip to the next comma or end of input.
                let len = after_ws
                    .iter()
                    .position(|&b| b == b',')
                    .unwrap_or(after_ws.len());
                debug!(
                    segment = %String::from_utf8_lossy(&after_ws[..len]),
                    "skipping malformed auth-param segment"
                );
                if len == after_ws.len() {
                    rest = &after_ws[len..];
                    break;
                }
                rest = &after_ws[len + 1..];
            }
        }
    }
    Ok((rest, (challenge, trailing_comma)))
}

/// Parses a challenge-list, appending to `challenges`.
///
/// Consumes a maximal valid list; the caller checks that no input remains.
pub(crate) fn challenge_list(
    mut challenges: Vec<Challenge>,
    input: &[u8],
) -> ParseResult<Vec<Challenge>> {
    let mut rest = input;
    // Leading commas before the first challenge are tolerated.
    while rest.first() == Some(&b',') {
        rest = &rest[1..];
        let (r, _) = ows(rest)?;
        rest = r;
    }
    let (r, (first, mut trailing_comma)) = challenge(rest)?;
    challenges.push(first);
    rest = r;
    loop {
        if !trailing_comma {
            let (after_ws, _) = ows(rest)?;
            if after_ws.first() != Some(&b',') {
                break;
            }
            rest = &after_ws[1..];
        }
        let (after_ws, _) = ows(rest)?;
        match challenge(after_ws) {
            Ok((r, (c, t))) => {
                challenges.push(c);
                rest = r;
                trailing_comma = t;
            }
            Err(_) => {
                // Dangling comma or unparsable segment: leave the cursor just
                // after the comma and let the next iteration decide.
                trailing_comma = false;
            }
        }
    }
    Ok((rest, challenges))
}
