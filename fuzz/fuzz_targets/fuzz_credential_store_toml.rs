#![no_main]

use credpolicy::TomlCredentialRepository;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = tempfile::tempdir() else {
        return;
    };
    let path = dir.path().join("credentials.toml");
    if std::fs::write(&path, data).is_ok() {
        // Corrupted stores must surface as errors
        let _ = TomlCredentialRepository::open(&path);
    }
});
