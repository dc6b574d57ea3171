#[cfg(test)]
#[path = "question_submitter_test.rs"]
mod tests;

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use tokio::fs;

use super::Screen;
use super::SessionContext;
use crate::domain::models::AnswerResult;
use crate::domain::models::AnswerView;
use crate::domain::models::BackendArc;
use crate::domain::models::ClientError;
use crate::domain::models::FileStatus;
use crate::domain::models::ResponseView;
use crate::domain::models::SelectedFile;
use crate::domain::models::SubmissionOutcome;
use crate::domain::models::SubmissionState;
use crate::domain::models::UploadRequest;

pub const MISSING_INPUT_ALERT: &str = "Please upload a file and enter a question.";

pub struct QuestionSubmitter {
    backend: BackendArc,
    context: SessionContext,
    screen: Arc<Screen>,
    selected: Mutex<Option<SelectedFile>>,
    state: Mutex<SubmissionState>,
    sequence: AtomicU64,
}

impl QuestionSubmitter {
    pub fn new(
        backend: BackendArc,
        context: SessionContext,
        screen: Arc<Screen>,
    ) -> QuestionSubmitter {
        return QuestionSubmitter {
            backend,
            context,
            screen,
            selected: Mutex::new(None),
            state: Mutex::new(SubmissionState::Idle),
            sequence: AtomicU64::new(0),
        };
    }

    /// State of the most recent submission.
    pub fn state(&self) -> SubmissionState {
        return *self.state.lock().unwrap_or_else(PoisonError::into_inner);
    }

    fn set_state(&self, state: SubmissionState) {
        tracing::debug!(%state, "Submission state");
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn select_file(&self, file: Option<SelectedFile>) {
        let status = match &file {
            Some(file) => FileStatus::Selected(file.name.to_string()),
            None => FileStatus::NoFile,
        };

        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = file;
        self.screen.update(|state| {
            state.file_status = status;
        });
    }

    pub async fn submit_question(&self, question: &str) -> SubmissionOutcome {
        self.set_state(SubmissionState::Validating);

        let file = self
            .selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let file = match file {
            Some(file) if !question.trim().is_empty() => file,
            _ => {
                self.screen.alert(MISSING_INPUT_ALERT);
                self.set_state(SubmissionState::Idle);
                return SubmissionOutcome::Rejected;
            }
        };

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(SubmissionState::Loading);
        self.screen.update(|state| {
            state.response = ResponseView::Loading;
        });

        let res = self.fetch_answer(&file, question).await;

        if self.sequence.load(Ordering::SeqCst) != sequence {
            tracing::debug!(sequence, "Discarding stale answer");
            return SubmissionOutcome::Superseded;
        }

        let terminal = SubmissionState::from_result(&res);
        let response = match res {
            Ok(res) => ResponseView::Answer(AnswerView {
                file_name: file.name,
                question: question.to_string(),
                answer: res.answer,
                explanation: res.explanation,
            }),
            Err(ClientError::AppError(msg)) => ResponseView::AppError(msg),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to fetch answer");
                ResponseView::Failure(err.to_string())
            }
        };

        self.screen.update(|state| {
            state.response = response;
        });
        self.set_state(terminal);

        return SubmissionOutcome::Finished(terminal);
    }

    async fn fetch_answer(
        &self,
        file: &SelectedFile,
        question: &str,
    ) -> Result<AnswerResult, ClientError> {
        let file_bytes = fs::read(&file.path)
            .await
            .map_err(|err| return ClientError::NetworkError(err.to_string()))?;

        let request = UploadRequest {
            file_name: file.name.to_string(),
            file_bytes,
            question: question.to_string(),
        };

        let token = self.context.get().map(|e| return e.as_str().to_string());
        let res = self.backend.ask(request, token).await?;

        return res.into_result();
    }
}
