//! Bearer scheme rules from RFC 6750 Section 3, layered on top of the
//! generic challenge grammar.

use crate::error::{Error, Result};
use crate::types::challenge::Challenge;

/// The Bearer authentication scheme of RFC 6750.
pub const SCHEME_BEARER: &str = "Bearer";

fn is_visible(b: u8) -> bool {
    (0x21..=0x7E).contains(&b)
}

// NQCHAR / NQSCHAR from RFC 6749 Appendix A, restricted to ASCII since
// header values here are byte-oriented.
fn is_bearer_value_octet(b: u8, allow_space: bool) -> bool {
    match b {
        b'"' | b'\\' => false,
        b' ' => allow_space,
        _ => is_visible(b),
    }
}

/// Validates challenges that are all expected to use the Bearer scheme.
///
/// Checks, per RFC 6750 Section 3: the scheme case-insensitively equals
/// `Bearer`; `realm` (case-insensitive) appears at most once; `scope`,
/// `error`, `error_description` and `error_uri` (case-sensitive) appear at
/// most once each; `scope` is a space-separated list of non-empty values
/// made of visible ASCII excluding `"` and `\`; `error` and
/// `error_description` additionally allow spaces; `error_uri` does not.
///
/// Returns the first violation found, identifying the challenge and, where
/// one applies, the parameter index.
pub fn validate_bearer_challenges(challenges: &[Challenge]) -> Result<()> {
    for (i, challenge) in challenges.iter().enumerate() {
        validate_bearer_challenge(i, challenge)?;
    }
    Ok(())
}

fn validate_bearer_challenge(i: usize, challenge: &Challenge) -> Result<()> {
    let invalid = |param: Option<usize>, reason: String| Error::InvalidBearerChallenge {
        challenge: i,
        param,
        reason,
    };

    if !challenge.scheme.eq_ignore_ascii_case(SCHEME_BEARER) {
        return Err(invalid(
            None,
            format!("scheme {:?} is not {SCHEME_BEARER}", challenge.scheme),
        ));
    }

    let mut realm_count = 0;
    let mut scope_count = 0;
    let mut error_count = 0;
    let mut error_description_count = 0;
    let mut error_uri_count = 0;

    for (j, param) in challenge.params.iter().enumerate() {
        // The realm directive is case-insensitive (RFC 2617 Section 1.2);
        // the RFC 6750 attributes are case-sensitive (RFC 6750 Section 1.1).
        let count = if param.attribute.eq_ignore_ascii_case("realm") {
            &mut realm_count
        } else {
            match param.attribute.as_str() {
                "scope" => {
                    // scope-token list per RFC 6749 Section 3.3
                    for value in param.value.split(' ') {
                        if value.is_empty() {
                            return Err(invalid(
                                Some(j),
                                "scope contains an empty value".to_string(),
                            ));
                        }
                        if let Some(&b) =
                            value.as_bytes().iter().find(|&&b| !is_bearer_value_octet(b, false))
                        {
                            return Err(invalid(
                                Some(j),
                                format!("scope value {value:?} contains invalid octet {b:#04x}"),
                            ));
                        }
                    }
                    &mut scope_count
                }
                attr @ ("error" | "error_description" | "error_uri") => {
                    let allow_space = attr != "error_uri";
                    if let Some(&b) = param
                        .value
                        .as_bytes()
                        .iter()
                        .find(|&&b| !is_bearer_value_octet(b, allow_space))
                    {
                        return Err(invalid(
                            Some(j),
                            format!("{attr} value contains invalid octet {b:#04x}"),
                        ));
                    }
                    match attr {
                        "error" => &mut error_count,
                        "error_description" => &mut error_description_count,
                        _ => &mut error_uri_count,
                    }
                }
                _ => continue,
            }
        };
        *count += 1;
        if *count > 1 {
            return Err(invalid(
                Some(j),
                format!("duplicate {:?} attribute", param.attribute),
            ));
        }
    }
    Ok(())
}

/// Strips the octets an RFC 6750 `error_description` cannot carry: ASCII
/// controls, DEL, double quote and backslash.
pub fn clean_error_description(description: &str) -> String {
    description
        .chars()
        .filter(|&c| !matches!(c, '\x00'..='\x1F' | '"' | '\\' | '\x7F'))
        .collect()
}
