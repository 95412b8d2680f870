#![no_main]

use credpolicy::{PasswordPolicy, PolicyProviderRegistry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(spec) = std::str::from_utf8(data) {
        let registry = PolicyProviderRegistry::with_defaults();
        // A policy that parses must re-parse from its canonical form
        if let Ok(policy) = PasswordPolicy::parse(spec, &registry) {
            let canonical = policy.to_spec_string();
            let reparsed = PasswordPolicy::parse(&canonical, &registry)
                .expect("canonical policy must parse");
            assert_eq!(reparsed.to_spec_string(), canonical);
        }
    }
});
