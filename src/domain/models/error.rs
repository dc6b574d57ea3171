use thiserror::Error;

/// Failures a user can run into while logging in or asking a question. The
/// display text of each variant is what ends up in the view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("An unexpected error occurred during login.")]
    LoginFailed,

    #[error("Unauthorized. Please log in again.")]
    Unauthorized,

    #[error("An unexpected error occurred while fetching the answer.")]
    RequestFailed,

    /// The service answered with a success status but an `error` field.
    #[error("{0}")]
    AppError(String),

    /// Transport, decoding, or local I/O failure. The detail is only logged.
    #[error("Something went wrong. Please try again.")]
    NetworkError(String),

    #[error("Failed to decode access token: {0}")]
    TokenDecodeError(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> ClientError {
        return ClientError::NetworkError(err.to_string());
    }
}
