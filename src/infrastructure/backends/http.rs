#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::StatusCode;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AskResponse;
use crate::domain::models::Backend;
use crate::domain::models::ClientError;
use crate::domain::models::GoogleLoginResponse;
use crate::domain::models::TokenResponse;
use crate::domain::models::UploadRequest;

/// Talks to the question-answering service over HTTP.
pub struct HttpBackend {
    url: String,
    timeout: String,
}

impl Default for HttpBackend {
    fn default() -> HttpBackend {
        return HttpBackend {
            url: Config::get(ConfigKey::ApiURL),
            timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

impl HttpBackend {
    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url.trim_end_matches('/'));
    }

    fn client(&self) -> Result<reqwest::Client, ClientError> {
        let timeout = self.timeout.parse::<u64>().map_err(|err| {
            return ClientError::AppError(format!(
                "Invalid request-timeout '{}': {err}",
                self.timeout
            ));
        })?;

        let mut builder = reqwest::Client::builder();
        if timeout > 0 {
            builder = builder.timeout(Duration::from_millis(timeout));
        }

        return Ok(builder.build()?);
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[allow(clippy::implicit_return)]
    async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ClientError> {
        let res = self
            .client()?
            .post(self.endpoint("/token/"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Token request failed");
            if res.status() == StatusCode::UNAUTHORIZED {
                return Err(ClientError::InvalidCredentials);
            }
            return Err(ClientError::LoginFailed);
        }

        return Ok(res.json::<TokenResponse>().await?);
    }

    #[allow(clippy::implicit_return)]
    async fn ask(
        &self,
        request: UploadRequest,
        token: Option<String>,
    ) -> Result<AskResponse, ClientError> {
        let file = multipart::Part::bytes(request.file_bytes).file_name(request.file_name);
        let form = multipart::Form::new()
            .part("file", file)
            .text("question", request.question);

        let mut req = self.client()?.post(self.endpoint("/ask/")).multipart(form);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Ask request failed");
            if res.status() == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized);
            }
            return Err(ClientError::RequestFailed);
        }

        let body = res.json::<AskResponse>().await?;
        tracing::debug!(body = ?body, "Ask response");

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn google_login_url(&self) -> Result<Option<String>, ClientError> {
        let res = self
            .client()?
            .get(self.endpoint("/google-login/"))
            .send()
            .await?
            .json::<GoogleLoginResponse>()
            .await?;

        return Ok(res.url);
    }
}
