#[cfg(test)]
#[path = "access_token_test.rs"]
mod tests;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_derive::Deserialize;

use super::ClientError;

/// Key the access token is kept under in token storage.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<f64>,
}

/// A JWT issued by the service. Only the `exp` claim is ever inspected, the
/// signature is never checked on the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: &str) -> AccessToken {
        return AccessToken(token.to_string());
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }

    /// Expiry of the token in epoch seconds.
    pub fn expires_at(&self) -> Result<f64, ClientError> {
        let payload = self.0.split('.').nth(1).ok_or_else(|| {
            return ClientError::TokenDecodeError("token has no payload segment".to_string());
        })?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|err| return ClientError::TokenDecodeError(err.to_string()))?;

        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|err| return ClientError::TokenDecodeError(err.to_string()))?;

        return claims
            .exp
            .ok_or_else(|| return ClientError::TokenDecodeError("missing exp claim".to_string()));
    }

    pub fn is_expired_at(&self, now_secs: f64) -> Result<bool, ClientError> {
        return Ok(self.expires_at()? < now_secs);
    }
}
