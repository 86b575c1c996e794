//! The `WWW-Authenticate` header: serialization of challenge lists and the
//! challenge-bearing error type consumed by response writers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parser::{is_token, is_token68, parse_www_authenticate, validate_quotable, write_quoted_pair};
use crate::types::bearer::{clean_error_description, SCHEME_BEARER};
use crate::types::challenge::{Challenge, Param};

/// Header carrying the server's challenges on a 401 response.
pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";

/// Header carrying the client's credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// Status code a challenge-bearing response uses.
pub const UNAUTHORIZED: u16 = 401;

/// Serializes `challenges` into one canonical `WWW-Authenticate` value.
///
/// Challenges are joined by a bare comma. A challenge without a `realm`
/// parameter (matched case-insensitively) gets `realm="<default_realm>"`
/// injected before its own parameters, even when `default_realm` is empty.
/// Parameter values are always written as quoted-strings; token68 values
/// are written verbatim.
///
/// Fails when `challenges` is empty, when `default_realm` or a parameter
/// value cannot be quoted-pair encoded, or when a challenge carries neither
/// params nor token68 (or both).
pub fn format_challenges(challenges: &[Challenge], default_realm: &str) -> Result<String> {
    if challenges.is_empty() {
        return Err(Error::EmptyChallenges);
    }
    validate_quotable(default_realm)?;

    let invalid = |challenge: usize, reason: &str| Error::InvalidChallenge {
        challenge,
        reason: reason.to_string(),
    };

    let mut out = String::new();
    for (i, challenge) in challenges.iter().enumerate() {
        if !is_token(&challenge.scheme) {
            return Err(invalid(i, "scheme is not a valid token"));
        }
        if challenge.token68.is_empty() && challenge.params.is_empty() {
            return Err(invalid(i, "carries neither token68 nor params"));
        }
        if i > 0 {
            out.push(',');
        }
        out.push_str(&challenge.scheme);
        out.push(' ');

        if !challenge.token68.is_empty() {
            if !challenge.params.is_empty() {
                return Err(invalid(i, "carries both token68 and params"));
            }
            if !is_token68(&challenge.token68) {
                return Err(invalid(i, "token68 contains invalid octets"));
            }
            out.push_str(&challenge.token68);
            continue;
        }

        let has_realm = challenge
            .params
            .iter()
            .any(|p| p.attribute.eq_ignore_ascii_case("realm"));
        if !has_realm {
            out.push_str("realm=");
            // default_realm was validated above
            write_quoted_pair(&mut out, default_realm)?;
            out.push(',');
        }

        for (j, param) in challenge.params.iter().enumerate() {
            if j > 0 {
                out.push(',');
            }
            if !is_token(&param.attribute) {
                return Err(invalid(i, &format!("params[{j}] attribute is not a valid token")));
            }
            out.push_str(&param.attribute);
            out.push('=');
            write_quoted_pair(&mut out, &param.value).map_err(|e| {
                invalid(i, &format!("params[{j}] value cannot be quoted: {e}"))
            })?;
        }
    }
    Ok(out)
}

/// A parsed or constructed `WWW-Authenticate` header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WwwAuthenticate(pub Vec<Challenge>);

impl WwwAuthenticate {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        WwwAuthenticate(challenges)
    }

    pub fn add_challenge(&mut self, challenge: Challenge) {
        self.0.push(challenge);
    }
}

impl FromStr for WwwAuthenticate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_www_authenticate(Vec::new(), s).map(WwwAuthenticate)
    }
}

// Diagnostic form; the wire form comes from `format_challenges`.
impl fmt::Display for WwwAuthenticate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, challenge) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{challenge}")?;
        }
        Ok(())
    }
}

/// An authorization failure that must be reflected as challenges in a
/// `WWW-Authenticate` response header.
///
/// Construction serializes the challenges up front, so a value of this
/// type is guaranteed to have a well-formed header value and response
/// writers never hit a serialization failure mid-response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WwwAuthenticateError {
    message: String,
    challenges: Vec<Challenge>,
    header_value: String,
}

impl WwwAuthenticateError {
    /// Validates and serializes `challenges`, building an error value
    /// that a response writer can emit without further checks.
    pub fn new(
        message: impl Into<String>,
        challenges: Vec<Challenge>,
        default_realm: &str,
    ) -> Result<Self> {
        let header_value = format_challenges(&challenges, default_realm)?;
        Ok(WwwAuthenticateError {
            message: message.into(),
            challenges,
            header_value,
        })
    }

    /// Builds the RFC 6750 `invalid_token` error response for a rejected
    /// bearer token.
    ///
    /// The message keeps `description` verbatim; the `error_description`
    /// parameter gets a copy cleaned of octets an RFC 6750 error
    /// description cannot carry, so construction cannot fail on
    /// caller-supplied text.
    pub fn invalid_token(description: &str) -> Self {
        let cleaned = clean_error_description(description);
        let challenge = Challenge::new(
            SCHEME_BEARER,
            vec![
                Param::new("error", "invalid_token"),
                Param::new("error_description", cleaned),
            ],
        );
        match Self::new(description, vec![challenge], "") {
            Ok(err) => err,
            // The cleaned description quotes, and the params are static.
            Err(e) => unreachable!("invalid_token challenge failed validation: {e}"),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// The pre-serialized `WWW-Authenticate` header value.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// The status code a response carrying this error uses.
    pub fn status_code(&self) -> u16 {
        UNAUTHORIZED
    }
}
