#[cfg(test)]
#[path = "session_manager_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use reqwest::Url;

use super::Screen;
use super::SessionContext;
use crate::domain::models::BackendArc;
use crate::domain::models::ClientError;
use crate::domain::models::Control;
use crate::domain::models::Section;
use crate::domain::models::SessionState;
use crate::domain::models::TokenStatus;

/// Query parameter the identity provider redirect carries the token in.
pub const REDIRECT_TOKEN_PARAM: &str = "access_token";

fn now_secs() -> f64 {
    return SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|e| return e.as_secs_f64())
        .unwrap_or_default();
}

pub struct SessionManager {
    backend: BackendArc,
    context: SessionContext,
    screen: Arc<Screen>,
}

impl SessionManager {
    pub fn new(backend: BackendArc, context: SessionContext, screen: Arc<Screen>) -> SessionManager {
        return SessionManager {
            backend,
            context,
            screen,
        };
    }

    pub fn is_authenticated(&self) -> bool {
        return self.is_authenticated_at(now_secs());
    }

    /// An expired token is cleared as a side effect. A token that can't be
    /// decoded only counts as logged out.
    pub fn is_authenticated_at(&self, now_secs: f64) -> bool {
        let token = self.context.get();
        let status = TokenStatus::evaluate(token.as_ref(), now_secs);
        match &status {
            TokenStatus::Expired => {
                tracing::debug!("Access token expired");
                self.clear_token();
                self.show_login_section();
                self.screen.alert("Session expired. Please log in again.");
            }
            TokenStatus::Malformed(err) => {
                tracing::error!(error = %err, "Error decoding token");
            }
            TokenStatus::Missing | TokenStatus::Valid => {}
        }

        return status.session_state() == SessionState::Authenticated;
    }

    pub fn session_state(&self) -> SessionState {
        if self.is_authenticated() {
            return SessionState::Authenticated;
        }

        return SessionState::Unauthenticated;
    }

    pub fn toggle_sections(&self) {
        let authenticated = self.is_authenticated();
        self.screen.update(|state| {
            if authenticated {
                state.section = Section::Main;
                state.insert_control(Control::Logout);
            } else {
                state.section = Section::Login;
            }
        });
    }

    pub async fn login(&self, username: &str, password: &str) {
        let res = self.backend.request_token(username, password).await;
        let token = match res {
            Ok(token) => token.access_token,
            Err(err) => {
                self.show_login_error(err);
                return;
            }
        };

        if let Err(err) = self.context.set(&token) {
            tracing::error!(error = ?err, "Failed to store access token");
            self.show_login_error(ClientError::LoginFailed);
            return;
        }

        self.screen.update(|state| {
            state.login_error = None;
        });
        self.toggle_sections();
    }

    fn show_login_error(&self, err: ClientError) {
        tracing::error!(error = ?err, "Login failed");
        self.screen.update(|state| {
            state.login_error = Some(err.to_string());
            state.section = Section::Login;
        });
    }

    pub fn logout(&self) {
        if self.clear_token() {
            self.toggle_sections();
        } else {
            self.show_login_section();
        }
    }

    /// Returns false when storage refused to drop the token.
    fn clear_token(&self) -> bool {
        if let Err(err) = self.context.clear() {
            tracing::error!(error = ?err, "Failed to clear access token");
            return false;
        }

        return true;
    }

    fn show_login_section(&self) {
        self.screen.update(|state| {
            state.section = Section::Login;
        });
    }

    /// Asks the service where to send the user for a third-party login.
    /// Returns true when the user was sent somewhere.
    pub async fn start_google_login(&self) -> bool {
        match self.backend.google_login_url().await {
            Ok(Some(url)) if !url.is_empty() => {
                self.screen.navigate(&url);
                return true;
            }
            Ok(_) => {
                self.screen.alert("Failed to initiate Google login.");
            }
            Err(err) => {
                tracing::error!(error = ?err, "Error initiating Google login");
                self.screen.alert("An error occurred. Please try again.");
            }
        }

        return false;
    }

    /// Consumes the token from the URL the identity provider redirected to.
    /// Accepts a full URL or only its query string. Returns true when a
    /// token was stored.
    pub fn complete_google_login(&self, redirect_url: &str) -> bool {
        let url = match Url::parse("http://localhost/").and_then(|base| {
            return base.join(redirect_url.trim());
        }) {
            Ok(url) => url,
            Err(err) => {
                tracing::error!(error = ?err, redirect_url, "Invalid redirect URL");
                return false;
            }
        };

        let token = url
            .query_pairs()
            .find(|(key, _)| return key == REDIRECT_TOKEN_PARAM)
            .map(|(_, value)| return value.to_string());

        let token = match token {
            Some(token) => token,
            None => return false,
        };

        if token.is_empty() {
            self.screen.alert("Google login failed. Please try again.");
            return false;
        }

        if let Err(err) = self.context.set(&token) {
            tracing::error!(error = ?err, "Failed to store access token");
            self.screen.alert("Google login failed. Please try again.");
            return false;
        }

        self.screen.alert("Google login successful!");
        self.toggle_sections();
        return true;
    }
}
