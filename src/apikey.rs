use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::SigningKey;
use std::fmt;

use crate::error::ConfigError;

/// Exchange credentials: the public key identifier sent with every request
/// and the base64-encoded ed25519 seed used to sign it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    key: String,
    secret: String,
}

impl ApiKey {
    pub fn new(key: String, secret: String) -> Self {
        Self { key, secret }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn signing_key(&self) -> Result<SigningKey, ConfigError> {
        let bytes = BASE64
            .decode(self.secret.trim())
            .map_err(|e| ConfigError::Invalid {
                key: "API_SECRET",
                reason: format!("not base64: {e}"),
            })?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::Invalid {
                key: "API_SECRET",
                reason: format!("expected a 32 byte ed25519 seed, got {} bytes", bytes.len()),
            })?;
        Ok(SigningKey::from_bytes(&seed))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}
