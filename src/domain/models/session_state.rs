#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use super::AccessToken;
use super::ClientError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    Authenticated,
    Unauthenticated,
}

/// Result of inspecting whatever token is currently stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Valid,
    Expired,
    Malformed(ClientError),
}

impl TokenStatus {
    pub fn evaluate(token: Option<&AccessToken>, now_secs: f64) -> TokenStatus {
        let token = match token {
            Some(token) => token,
            None => return TokenStatus::Missing,
        };

        return match token.is_expired_at(now_secs) {
            Ok(true) => TokenStatus::Expired,
            Ok(false) => TokenStatus::Valid,
            Err(err) => TokenStatus::Malformed(err),
        };
    }

    pub fn session_state(&self) -> SessionState {
        if *self == TokenStatus::Valid {
            return SessionState::Authenticated;
        }

        return SessionState::Unauthenticated;
    }
}
