//! Parsing, validation and serialization for the RFC 7235 challenge
//! grammar carried by the `WWW-Authenticate` header, with the Bearer
//! scheme rules of RFC 6750 layered on top.
//!
//! The crate converts between wire-format header values and structured
//! [`Challenge`] sequences, and builds challenge-bearing errors whose
//! header value is validated and serialized at construction time, so a
//! response writer can emit them without a fallible formatting step.
//!
//! # Examples
//!
//! ```rust
//! use httpauth_core::{parse_www_authenticate, Challenge, Param, WwwAuthenticateError};
//!
//! let err = WwwAuthenticateError::new(
//!     "token expired",
//!     vec![Challenge::new(
//!         "Bearer",
//!         vec![Param::new("error", "invalid_token")],
//!     )],
//!     "api.example.com",
//! )?;
//! assert_eq!(err.status_code(), 401);
//! assert_eq!(
//!     err.header_value(),
//!     r#"Bearer realm="api.example.com",error="invalid_token""#
//! );
//!
//! let challenges = parse_www_authenticate(Vec::new(), err.header_value())?;
//! assert_eq!(challenges[0].realm(), Some("api.example.com"));
//! # Ok::<(), httpauth_core::Error>(())
//! ```
//!
//! All operations are pure functions over immutable input; the only
//! process-wide state is a read-only octet classification table built at
//! compile time, so everything here can be called concurrently without
//! synchronization.

pub mod error;
pub mod parser;
pub mod types;

pub use error::{Error, Result};
pub use parser::{
    is_token, is_token68, parse_www_authenticate, parse_www_authenticate_values,
    validate_quotable, write_quoted_pair,
};
pub use types::{
    clean_error_description, format_challenges, validate_bearer_challenges, Challenge, Param,
    WwwAuthenticate, WwwAuthenticateError, AUTHORIZATION, SCHEME_BEARER, UNAUTHORIZED,
    WWW_AUTHENTICATE,
};

/// Common imports for consumers of this crate.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::parser::{parse_www_authenticate, parse_www_authenticate_values};
    pub use crate::types::{
        format_challenges, validate_bearer_challenges, Challenge, Param, WwwAuthenticate,
        WwwAuthenticateError, SCHEME_BEARER,
    };
}
