#[cfg(test)]
#[path = "question_test.rs"]
mod tests;

use std::path;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ClientError;

/// A file the user picked for the next question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: path::PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: path::PathBuf) -> SelectedFile {
        let name = path
            .file_name()
            .map(|e| return e.to_string_lossy().to_string())
            .unwrap_or_else(|| return path.to_string_lossy().to_string());

        return SelectedFile { name, path };
    }
}

/// Everything sent to the service for a single question.
pub struct UploadRequest {
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub question: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AskResponse {
    pub fn into_result(self) -> Result<AnswerResult, ClientError> {
        if let Some(error) = self.error {
            return Err(ClientError::AppError(error));
        }

        return Ok(AnswerResult {
            answer: self.answer.unwrap_or_default(),
            explanation: self.explanation.unwrap_or_default(),
        });
    }
}

/// Answer and explanation as returned by the service. Both may carry markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerResult {
    pub answer: String,
    pub explanation: String,
}

/// Lifecycle of a single submission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum SubmissionState {
    Idle,
    Validating,
    Loading,
    Success,
    AppError,
    HttpError,
    NetworkError,
}

impl SubmissionState {
    pub fn from_result(res: &Result<AnswerResult, ClientError>) -> SubmissionState {
        return match res {
            Ok(_) => SubmissionState::Success,
            Err(ClientError::AppError(_)) => SubmissionState::AppError,
            Err(ClientError::Unauthorized) | Err(ClientError::RequestFailed) => {
                SubmissionState::HttpError
            }
            Err(_) => SubmissionState::NetworkError,
        };
    }
}

/// How a call to submit a question ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Input validation failed and nothing was sent.
    Rejected,
    /// A newer submission started before this one finished.
    Superseded,
    Finished(SubmissionState),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        return *self == SubmissionOutcome::Finished(SubmissionState::Success);
    }
}
