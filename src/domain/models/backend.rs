use std::sync::Arc;

use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::AskResponse;
use super::ClientError;
use super::UploadRequest;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleLoginResponse {
    pub url: Option<String>,
}

/// The remote document question-answering service.
#[async_trait]
pub trait Backend {
    /// Exchanges a username and password for an access token.
    async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError>;

    /// Uploads a file with a question. The bearer token is attached when one
    /// is provided.
    async fn ask(
        &self,
        request: UploadRequest,
        token: Option<String>,
    ) -> Result<AskResponse, ClientError>;

    /// Returns the identity provider URL to send the user to, if the service
    /// provided one.
    async fn google_login_url(&self) -> Result<Option<String>, ClientError>;
}

pub type BackendArc = Arc<dyn Backend + Send + Sync>;
