//! Parser for the RFC 7235 challenge grammar.
//!
//! All sub-parsers are pure functions over a byte slice: the remaining
//! slice is the cursor, and a failed speculative attempt always returns
//! the caller's slice untouched. This is what makes backtracking between
//! the `token68` and `auth-param` alternatives safe.

use nom::IResult;

use crate::error::{Error, Result};
use crate::types::Challenge;

pub(crate) type ParseResult<'a, O> = IResult<&'a [u8], O>;

mod challenge;
pub mod octet;
pub mod quoted;
mod whitespace;

pub use octet::{is_token, is_token68, is_token68_octet, is_token_octet};
pub use quoted::{validate_quotable, write_quoted_pair};

/// Maps the position of `remaining` within `input` to a syntax error.
fn error_at(input: &[u8], remaining: &[u8]) -> Error {
    let position = input.len() - remaining.len();
    match remaining.first() {
        Some(&octet) => Error::UnexpectedOctet { octet, position },
        None => Error::UnexpectedEnd { position },
    }
}

/// Parses one `WWW-Authenticate` header value, appending the challenges it
/// contains to `challenges` in order.
///
/// Fails if input remains after the maximal valid challenge-list; internal
/// backtracking failures are never surfaced.
///
/// # Examples
///
/// ```rust
/// use httpauth_core::parse_www_authenticate;
///
/// let challenges =
///     parse_www_authenticate(Vec::new(), r#"Bearer realm="bla",param1=value1"#).unwrap();
/// assert_eq!(challenges.len(), 1);
/// assert_eq!(challenges[0].scheme, "Bearer");
/// ```
pub fn parse_www_authenticate(
    challenges: Vec<Challenge>,
    header_value: &str,
) -> Result<Vec<Challenge>> {
    let input = header_value.as_bytes();
    match challenge::challenge_list(challenges, input) {
        Ok(([], challenges)) => Ok(challenges),
        Ok((remaining, _)) => Err(error_at(input, remaining)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(error_at(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(Error::UnexpectedEnd {
            position: input.len(),
        }),
    }
}

/// Parses every value of a multi-valued `WWW-Authenticate` header,
/// accumulating challenges in header-line order.
pub fn parse_www_authenticate_values<'a, I>(values: I) -> Result<Vec<Challenge>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut challenges = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        challenges = parse_www_authenticate(challenges, value).map_err(|source| {
            Error::InvalidHeaderValue {
                index,
                source: Box::new(source),
            }
        })?;
    }
    Ok(challenges)
}
