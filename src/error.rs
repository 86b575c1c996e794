use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, validating or serializing
/// authentication challenges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input does not conform to the challenge grammar at `position`.
    #[error("unexpected octet {octet:#04x} at position {position}")]
    UnexpectedOctet { octet: u8, position: usize },

    /// The input ended in the middle of a production.
    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    /// A header value in a multi-valued header collection failed to parse.
    #[error("error parsing WWW-Authenticate header value {index}: {source}")]
    InvalidHeaderValue {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// A value cannot be represented as a quoted-string because it contains
    /// an ASCII control character other than horizontal tab.
    #[error("value contains ASCII control character (decimal {0})")]
    InvalidCharacter(u8),

    /// A challenge sequence handed to the serializer was empty.
    #[error("challenges must not be empty")]
    EmptyChallenges,

    /// A challenge violates the structural rules the serializer depends on.
    #[error("challenge {challenge} is invalid: {reason}")]
    InvalidChallenge { challenge: usize, reason: String },

    /// A challenge violates the Bearer scheme rules of RFC 6750.
    #[error("Bearer challenge {challenge} is invalid: {reason}")]
    InvalidBearerChallenge {
        challenge: usize,
        param: Option<usize>,
        reason: String,
    },
}
