//! Challenge and parameter types shared by the parser, the serializer and
//! the scheme-specific validators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One `name=value` pair within a challenge.
///
/// Attribute case sensitivity depends on the attribute: `realm` is
/// conventionally case-insensitive, most scheme-specific attributes are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub attribute: String,
    pub value: String,
}

impl Param {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Param {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"", self.attribute)?;
        for c in self.value.chars() {
            if c == '"' || c == '\\' {
                write!(f, "\\{c}")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        write!(f, "\"")
    }
}

/// One authentication challenge of a `WWW-Authenticate` header.
///
/// A challenge carries either an ordered parameter list or an opaque
/// `token68` credential, never both. Challenges handed to the serializer
/// or a validator must not be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Challenge {
    /// Authentication scheme, compared case-insensitively.
    pub scheme: String,
    /// Ordered parameters; insertion order is significant for
    /// serialization but not for semantic equality.
    pub params: Vec<Param>,
    /// Opaque credential string, mutually exclusive with `params`.
    pub token68: String,
}

impl Challenge {
    /// Creates a challenge carrying an auth-param list.
    pub fn new(scheme: impl Into<String>, params: Vec<Param>) -> Self {
        Challenge {
            scheme: scheme.into(),
            params,
            token68: String::new(),
        }
    }

    /// Creates a challenge carrying a bare token68 credential.
    pub fn with_token68(scheme: impl Into<String>, token68: impl Into<String>) -> Self {
        Challenge {
            scheme: scheme.into(),
            params: Vec::new(),
            token68: token68.into(),
        }
    }

    /// Returns the value of the first parameter whose attribute exactly
    /// equals `attribute`.
    pub fn param(&self, attribute: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.attribute == attribute)
            .map(|p| p.value.as_str())
    }

    /// Returns the first `realm` value, matched case-insensitively.
    pub fn realm(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.attribute.eq_ignore_ascii_case("realm"))
            .map(|p| p.value.as_str())
    }
}

// Diagnostic form. Wire output goes through `format_challenges`, which
// also validates and injects a default realm.
impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scheme)?;
        if !self.token68.is_empty() {
            return write!(f, " {}", self.token68);
        }
        for (i, param) in self.params.iter().enumerate() {
            write!(f, "{}{param}", if i == 0 { " " } else { "," })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_params() {
        let challenge = Challenge::new(
            "Bearer",
            vec![
                Param::new("realm", "bla"),
                Param::new("error_description", "say \"hi\""),
            ],
        );
        assert_eq!(
            challenge.to_string(),
            r#"Bearer realm="bla",error_description="say \"hi\"""#
        );
    }

    #[test]
    fn test_display_token68() {
        let challenge = Challenge::with_token68("Negotiate", "abc==");
        assert_eq!(challenge.to_string(), "Negotiate abc==");
    }

    #[test]
    fn test_serde_round_trip() {
        let challenge = Challenge::new(
            "Bearer",
            vec![Param::new("realm", "bla"), Param::new("scope", "openid")],
        );
        let json = serde_json::to_string(&challenge).unwrap();
        let back: Challenge = serde_json::from_str(&json).unwrap();
        assert_eq!(back, challenge);
    }

    #[test]
    fn test_accessors() {
        let challenge = Challenge::new(
            "Bearer",
            vec![Param::new("Realm", "bla"), Param::new("scope", "openid")],
        );
        assert_eq!(challenge.realm(), Some("bla"));
        assert_eq!(challenge.param("scope"), Some("openid"));
        assert_eq!(challenge.param("Scope"), None);
    }
}
