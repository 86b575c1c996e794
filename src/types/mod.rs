//! Structured representations of challenges and the headers that carry
//! them.

pub mod bearer;
pub mod challenge;
pub mod www_authenticate;

pub use bearer::{clean_error_description, validate_bearer_challenges, SCHEME_BEARER};
pub use challenge::{Challenge, Param};
pub use www_authenticate::{
    format_challenges, WwwAuthenticate, WwwAuthenticateError, AUTHORIZATION, UNAUTHORIZED,
    WWW_AUTHENTICATE,
};
