//! PBKDF2-HMAC-SHA256 password hashing (`pbkdf2-sha256`)

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::entities::{CredentialRecord, HashedPassword};
use crate::domain::ports::{HashError, PasswordHashProvider};

pub const PBKDF2_SHA256: &str = "pbkdf2-sha256";
pub const DEFAULT_ITERATIONS: u32 = 27_500;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct Pbkdf2Sha256HashProvider {
    default_iterations: u32,
}

impl Pbkdf2Sha256HashProvider {
    pub fn new() -> Self {
        Self::with_default_iterations(DEFAULT_ITERATIONS)
    }

    pub fn with_default_iterations(iterations: u32) -> Self {
        Self {
            default_iterations: iterations,
        }
    }

    fn derive(password: &str, salt: &[u8], iterations: u32, key_len: usize) -> Vec<u8> {
        let mut key = vec![0u8; key_len];
        pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
        key
    }
}

impl Default for Pbkdf2Sha256HashProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHashProvider for Pbkdf2Sha256HashProvider {
    fn id(&self) -> &str {
        PBKDF2_SHA256
    }

    fn default_iterations(&self) -> u32 {
        self.default_iterations
    }

    fn encode(&self, password: &str, iterations: Option<u32>) -> Result<HashedPassword, HashError> {
        let iterations = iterations.unwrap_or(self.default_iterations);
        if iterations == 0 {
            return Err(HashError::Encoding {
                algorithm: PBKDF2_SHA256.to_string(),
                message: "iteration count must be positive".to_string(),
            });
        }

        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        let key = Self::derive(password, &salt, iterations, KEY_LEN);

        Ok(HashedPassword {
            algorithm: PBKDF2_SHA256.to_string(),
            iterations,
            salt: STANDARD.encode(salt),
            value: STANDARD.encode(key),
        })
    }

    fn verify(&self, candidate: &str, record: &CredentialRecord) -> bool {
        if record.iterations == 0 {
            return false;
        }
        let (Ok(salt), Ok(expected)) = (STANDARD.decode(&record.salt), STANDARD.decode(&record.value))
        else {
            return false;
        };
        if expected.is_empty() {
            return false;
        }

        let actual = Self::derive(candidate, &salt, record.iterations, expected.len());
        actual.ct_eq(&expected).into()
    }
}
