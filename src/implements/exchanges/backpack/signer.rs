use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::{Signer as _, SigningKey};
use std::collections::BTreeMap;

use crate::apikey::ApiKey;
use crate::error::ConfigError;

/// Request parameters, kept sorted by key.
pub type Params = BTreeMap<&'static str, String>;

/// Produces the authentication headers for private endpoints.
///
/// The signed message is `instruction=<name>`, followed by the request
/// parameters in key order, followed by `timestamp` and `window`, all joined
/// as `k=v` pairs with `&`.
pub struct Signer {
    key: String,
    signing_key: SigningKey,
    window_ms: u64,
}

impl Signer {
    pub fn new(apikey: &ApiKey, window_ms: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            key: apikey.key().to_string(),
            signing_key: apikey.signing_key()?,
            window_ms,
        })
    }

    pub fn sign(&self, instruction: &str, params: &Params, timestamp: i64) -> Vec<(&'static str, String)> {
        let message = signing_string(instruction, params, timestamp, self.window_ms);
        let signature = self.signing_key.sign(message.as_bytes());

        vec![
            ("X-API-Key", self.key.clone()),
            ("X-Signature", BASE64.encode(signature.to_bytes())),
            ("X-Timestamp", timestamp.to_string()),
            ("X-Window", self.window_ms.to_string()),
            ("Content-Type", "application/json; charset=utf-8".to_string()),
        ]
    }
}

// Values are symbols, side names and decimals, none of which need escaping.
pub fn signing_string(instruction: &str, params: &Params, timestamp: i64, window_ms: u64) -> String {
    let mut message = format!("instruction={instruction}");
    for (key, value) in params {
        message.push('&');
        message.push_str(key);
        message.push('=');
        message.push_str(value);
    }
    message.push_str(&format!("&timestamp={timestamp}&window={window_ms}"));
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    use ed25519_dalek::{Signature, Verifier};

    fn signer() -> Signer {
        let apikey = ApiKey::new("public-key".to_string(), BASE64.encode([42u8; 32]));
        Signer::new(&apikey, 5000).unwrap()
    }

    #[test]
    fn test_signing_string() {
        assert_eq!(
            "instruction=balanceQuery&timestamp=1700000000000&window=5000",
            signing_string("balanceQuery", &Params::new(), 1_700_000_000_000, 5000)
        );

        let mut params = Params::new();
        params.insert("symbol", "RENDER_USDC".to_string());
        params.insert("side", "Bid".to_string());
        params.insert("quantity", "1.8".to_string());
        params.insert("price", "7.21".to_string());
        params.insert("orderType", "Limit".to_string());
        assert_eq!(
            "instruction=orderExecute&orderType=Limit&price=7.21&quantity=1.8&side=Bid\
             &symbol=RENDER_USDC&timestamp=1700000000000&window=5000",
            signing_string("orderExecute", &params, 1_700_000_000_000, 5000)
        );
    }

    #[test]
    fn test_sign_headers_verify() {
        let signer = signer();
        let mut params = Params::new();
        params.insert("symbol", "RENDER_USDC".to_string());

        let headers = signer.sign("orderCancelAll", &params, 1_700_000_000_123);
        let header = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!("public-key", header("X-API-Key"));
        assert_eq!("1700000000123", header("X-Timestamp"));
        assert_eq!("5000", header("X-Window"));

        let signature_bytes: [u8; 64] = BASE64
            .decode(header("X-Signature"))
            .unwrap()
            .try_into()
            .unwrap();
        let signature = Signature::from_bytes(&signature_bytes);
        let message = signing_string("orderCancelAll", &params, 1_700_000_000_123, 5000);

        let verifying_key = SigningKey::from_bytes(&[42u8; 32]).verifying_key();
        assert!(verifying_key.verify(message.as_bytes(), &signature).is_ok());
        assert!(verifying_key.verify(b"instruction=other", &signature).is_err());
    }
}
