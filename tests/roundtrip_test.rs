//! Round-trip properties between the challenge serializer and parser.

use httpauth_core::{format_challenges, parse_www_authenticate, Challenge, Param};
use proptest::collection::vec;
use proptest::prelude::*;

fn param_strategy() -> impl Strategy<Value = Param> {
    ("[A-Za-z][A-Za-z0-9._~-]{0,8}", "[ -~]{0,16}")
        .prop_map(|(attribute, value)| Param::new(attribute, value))
}

fn challenge_strategy() -> impl Strategy<Value = Challenge> {
    prop_oneof![
        ("[A-Za-z][A-Za-z0-9._~-]{0,8}", vec(param_strategy(), 1..4))
            .prop_map(|(scheme, params)| Challenge::new(scheme, params)),
        ("[A-Za-z][A-Za-z0-9._~-]{0,8}", "[A-Za-z0-9._~+/-]{1,16}={0,3}")
            .prop_map(|(scheme, token68)| Challenge::with_token68(scheme, token68)),
    ]
}

/// The challenge the parser yields for a serialized challenge: identical,
/// except that a default realm is injected ahead of the params when none
/// was present.
fn with_injected_realm(challenge: &Challenge, default_realm: &str) -> Challenge {
    if !challenge.token68.is_empty() || challenge.realm().is_some() {
        return challenge.clone();
    }
    let mut params = vec![Param::new("realm", default_realm)];
    params.extend(challenge.params.iter().cloned());
    Challenge::new(challenge.scheme.clone(), params)
}

proptest! {
    #[test]
    fn prop_format_then_parse_preserves_challenges(
        challenges in vec(challenge_strategy(), 1..4),
        default_realm in "[ -~]{0,8}",
    ) {
        let header_value = format_challenges(&challenges, &default_realm).unwrap();
        let parsed = parse_www_authenticate(Vec::new(), &header_value).unwrap();
        let expected: Vec<Challenge> = challenges
            .iter()
            .map(|c| with_injected_realm(c, &default_realm))
            .collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn prop_reformat_is_idempotent(
        challenges in vec(challenge_strategy(), 1..4),
        default_realm in "[ -~]{0,8}",
    ) {
        let first = format_challenges(&challenges, &default_realm).unwrap();
        let parsed = parse_www_authenticate(Vec::new(), &first).unwrap();
        // Every parsed challenge already carries a realm or a token68, so
        // the second default realm must not matter.
        let second = format_challenges(&parsed, "unused").unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_quoting_round_trip() {
    let challenges = vec![Challenge::new(
        "Bearer",
        vec![Param::new("error_description", "he said \"hi\"\\ok")],
    )];
    let header_value = format_challenges(&challenges, "r").unwrap();
    assert_eq!(
        header_value,
        "Bearer realm=\"r\",error_description=\"he said \\\"hi\\\"\\\\ok\""
    );
    let parsed = parse_www_authenticate(Vec::new(), &header_value).unwrap();
    assert_eq!(
        parsed[0].param("error_description"),
        Some("he said \"hi\"\\ok")
    );
}

#[test]
fn test_token68_round_trip() {
    let challenges = vec![
        Challenge::with_token68("Negotiate", "dG9rZW4="),
        Challenge::new("Basic", vec![Param::new("realm", "simple")]),
    ];
    let header_value = format_challenges(&challenges, "").unwrap();
    assert_eq!(header_value, r#"Negotiate dG9rZW4=,Basic realm="simple""#);
    let parsed = parse_www_authenticate(Vec::new(), &header_value).unwrap();
    assert_eq!(parsed, challenges);
}
