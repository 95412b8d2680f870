//! Property tests for the policy specification parser.

use proptest::prelude::*;

use credpolicy::{PasswordPolicy, PolicyProviderRegistry};

const INTEGER_IDS: &[&str] = &[
    "passwordAge",
    "passwordHistory",
    "length",
    "maxLength",
    "digits",
    "lowerCase",
    "upperCase",
    "specialChars",
    "hashIterations",
    "forceExpiredPasswordChange",
];

fn integer_entries() -> impl Strategy<Value = Vec<(&'static str, i32)>> {
    proptest::sample::subsequence(INTEGER_IDS.to_vec(), 0..=INTEGER_IDS.len())
        .prop_shuffle()
        .prop_flat_map(|ids| {
            let n = ids.len();
            proptest::collection::vec(-100i32..10_000, n)
                .prop_map(move |values| ids.clone().into_iter().zip(values).collect::<Vec<_>>())
        })
}

fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("  "), Just("\t"), Just("\n")]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing arbitrary input returns a value or an error; it never panics.
    #[test]
    fn property_parse_never_panics(spec in "\\PC{0,64}") {
        let _ = PasswordPolicy::parse(&spec, &PolicyProviderRegistry::with_defaults());
    }

    /// PROPERTY: Parenthesis-heavy input never panics either.
    #[test]
    fn property_parse_never_panics_on_brackets(spec in "[a-zA-Z()\\\\ ]{0,32}") {
        let _ = PasswordPolicy::parse(&spec, &PolicyProviderRegistry::with_defaults());
    }

    /// PROPERTY: Entries keep their order and values, and the canonical form re-parses identically.
    #[test]
    fn property_round_trip_preserves_order(
        entries in integer_entries(),
        sep in separator(),
    ) {
        let registry = PolicyProviderRegistry::with_defaults();
        let spec = entries
            .iter()
            .map(|(id, n)| format!("{id}({n})"))
            .collect::<Vec<_>>()
            .join(sep);

        let policy = PasswordPolicy::parse(&spec, &registry).unwrap();
        let parsed: Vec<(&str, Option<i32>)> = policy
            .entries()
            .iter()
            .map(|e| (e.id(), e.config().as_int()))
            .collect();
        let expected: Vec<(&str, Option<i32>)> =
            entries.iter().map(|(id, n)| (*id, Some(*n))).collect();
        prop_assert_eq!(parsed, expected);

        let canonical = policy.to_spec_string();
        let reparsed = PasswordPolicy::parse(&canonical, &registry).unwrap();
        prop_assert_eq!(reparsed.to_spec_string(), canonical);
    }

    /// PROPERTY: Repeating a single-instance provider is always refused.
    #[test]
    fn property_duplicates_rejected(
        id in proptest::sample::select(INTEGER_IDS.to_vec()),
        a in 0i32..100,
        b in 0i32..100,
    ) {
        let spec = format!("{id}({a}) {id}({b})");
        prop_assert!(PasswordPolicy::parse(&spec, &PolicyProviderRegistry::with_defaults()).is_err());
    }
}
