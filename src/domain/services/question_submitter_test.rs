extern crate tempdir;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mockito::Matcher;
use tempdir::TempDir;
use tokio::sync::Notify;

use super::QuestionSubmitter;
use super::MISSING_INPUT_ALERT;
use crate::domain::models::AnswerView;
use crate::domain::models::AskResponse;
use crate::domain::models::Backend;
use crate::domain::models::BackendArc;
use crate::domain::models::ClientError;
use crate::domain::models::FileStatus;
use crate::domain::models::ResponseView;
use crate::domain::models::SelectedFile;
use crate::domain::models::SubmissionOutcome;
use crate::domain::models::SubmissionState;
use crate::domain::models::TokenResponse;
use crate::domain::models::UploadRequest;
use crate::domain::services::Screen;
use crate::domain::services::SessionContext;
use crate::infrastructure::backends::http::HttpBackend;
use crate::infrastructure::presenters::recording::RecordingPresenter;
use crate::infrastructure::storage::MemoryTokenStore;

struct Harness {
    submitter: QuestionSubmitter,
    context: SessionContext,
    screen: Arc<Screen>,
    presenter: RecordingPresenter,
    tmp_dir: TempDir,
}

impl Harness {
    fn write_file(&self, name: &str, contents: &str) -> Result<SelectedFile> {
        let path = self.tmp_dir.path().join(name);
        fs::write(&path, contents)?;
        return Ok(SelectedFile::from_path(path));
    }
}

fn harness_with(backend: BackendArc) -> Result<Harness> {
    let presenter = RecordingPresenter::default();
    let screen = Arc::new(Screen::new(Box::new(presenter.clone())));
    let context = SessionContext::new(Arc::new(MemoryTokenStore::default()));
    let submitter = QuestionSubmitter::new(backend, context.clone(), screen.clone());

    return Ok(Harness {
        submitter,
        context,
        screen,
        presenter,
        tmp_dir: TempDir::new("askdoc")?,
    });
}

fn harness(url: String) -> Result<Harness> {
    return harness_with(Arc::new(HttpBackend::with_url(url)));
}

#[test]
fn it_shows_the_selected_file() -> Result<()> {
    let h = harness("http://127.0.0.1:9".to_string())?;

    h.submitter
        .select_file(Some(SelectedFile::from_path(PathBuf::from("docs/doc.pdf"))));
    assert_eq!(
        h.screen.snapshot().file_status,
        FileStatus::Selected("doc.pdf".to_string())
    );

    h.submitter.select_file(None);
    assert_eq!(h.screen.snapshot().file_status, FileStatus::NoFile);
    assert_eq!(h.screen.snapshot().file_status.text(), "No file selected");
    return Ok(());
}

#[tokio::test]
async fn it_rejects_submissions_without_a_file() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .expect(0)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let outcome = h.submitter.submit_question("What?").await;

    assert_eq!(outcome, SubmissionOutcome::Rejected);
    assert_eq!(h.presenter.alerts(), vec![MISSING_INPUT_ALERT.to_string()]);
    assert_eq!(h.screen.snapshot().response, ResponseView::Empty);
    assert_eq!(h.submitter.state(), SubmissionState::Idle);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_rejects_submissions_without_a_question() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .expect(0)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let file = h.write_file("doc.pdf", "content")?;
    h.submitter.select_file(Some(file));

    let outcome = h.submitter.submit_question("   ").await;

    assert_eq!(outcome, SubmissionOutcome::Rejected);
    assert_eq!(h.presenter.alerts(), vec![MISSING_INPUT_ALERT.to_string()]);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_renders_answers() -> Result<()> {
    let token = test_utils::valid_jwt();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .match_header("authorization", format!("Bearer {token}").as_str())
        .match_body(Matcher::Regex("the document body".to_string()))
        .with_status(200)
        .with_body(r#"{"answer": "42", "explanation": "<ul><li>a</li></ul>"}"#)
        .create_async()
        .await;

    let h = harness(server.url())?;
    h.context.set(&token)?;
    let file = h.write_file("doc.pdf", "the document body")?;
    h.submitter.select_file(Some(file));

    let outcome = h.submitter.submit_question("What?").await;

    mock.assert_async().await;
    assert!(outcome.is_success());
    assert_eq!(h.submitter.state(), SubmissionState::Success);
    assert_eq!(
        h.screen.snapshot().response,
        ResponseView::Answer(AnswerView {
            file_name: "doc.pdf".to_string(),
            question: "What?".to_string(),
            answer: "42".to_string(),
            explanation: "<ul><li>a</li></ul>".to_string(),
        })
    );

    let html = h.screen.snapshot().response.to_html();
    assert!(html.contains("doc.pdf"));
    assert!(html.contains("What?"));
    assert!(html.contains("42"));
    assert!(html.contains("<ul><li>a</li></ul>"));
    return Ok(());
}

#[tokio::test]
async fn it_shows_a_loading_placeholder_first() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .with_status(200)
        .with_body(r#"{"answer": "42", "explanation": ""}"#)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let file = h.write_file("doc.pdf", "body")?;
    h.submitter.select_file(Some(file));
    h.submitter.submit_question("What?").await;

    mock.assert_async().await;
    let responses = h
        .presenter
        .renders()
        .into_iter()
        .map(|e| return e.response)
        .collect::<Vec<ResponseView>>();
    let loading_idx = responses
        .iter()
        .position(|e| return *e == ResponseView::Loading)
        .unwrap();
    assert!(matches!(responses.last(), Some(ResponseView::Answer(_))));
    assert!(loading_idx < responses.len() - 1);
    return Ok(());
}

#[tokio::test]
async fn it_renders_application_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .with_status(200)
        .with_body(r#"{"error": "quota exceeded"}"#)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let file = h.write_file("doc.pdf", "body")?;
    h.submitter.select_file(Some(file));

    let outcome = h.submitter.submit_question("What?").await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Finished(SubmissionState::AppError)
    );
    assert_eq!(
        h.screen.snapshot().response,
        ResponseView::AppError("quota exceeded".to_string())
    );
    return Ok(());
}

#[tokio::test]
async fn it_renders_http_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let unauthorized = server
        .mock("POST", "/ask/")
        .match_body(Matcher::Regex("first question".to_string()))
        .with_status(401)
        .create_async()
        .await;
    let broken = server
        .mock("POST", "/ask/")
        .match_body(Matcher::Regex("second question".to_string()))
        .with_status(500)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let file = h.write_file("doc.pdf", "body")?;
    h.submitter.select_file(Some(file));

    let outcome = h.submitter.submit_question("first question").await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Finished(SubmissionState::HttpError)
    );
    assert_eq!(
        h.screen.snapshot().response,
        ResponseView::Failure("Unauthorized. Please log in again.".to_string())
    );

    let outcome = h.submitter.submit_question("second question").await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Finished(SubmissionState::HttpError)
    );
    assert_eq!(
        h.screen.snapshot().response,
        ResponseView::Failure(
            "An unexpected error occurred while fetching the answer.".to_string()
        )
    );

    unauthorized.assert_async().await;
    broken.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_renders_a_generic_failure_for_unreadable_files() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .expect(0)
        .create_async()
        .await;

    let h = harness(server.url())?;
    let missing = h.tmp_dir.path().join("missing.pdf");
    h.submitter.select_file(Some(SelectedFile::from_path(missing)));

    let outcome = h.submitter.submit_question("What?").await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Finished(SubmissionState::NetworkError)
    );
    assert_eq!(
        h.screen.snapshot().response,
        ResponseView::Failure("Something went wrong. Please try again.".to_string())
    );
    return Ok(());
}

#[tokio::test]
async fn it_renders_a_generic_failure_for_bad_bodies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/ask/")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let h = harness(server.url())?;
    let file = h.write_file("doc.pdf", "body")?;
    h.submitter.select_file(Some(file));

    let outcome = h.submitter.submit_question("What?").await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        SubmissionOutcome::Finished(SubmissionState::NetworkError)
    );
    return Ok(());
}

/// Holds back the answer to "slow" until another question was answered.
struct GatedBackend {
    gate: Notify,
}

#[async_trait]
impl Backend for GatedBackend {
    async fn request_token(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<TokenResponse, ClientError> {
        return Err(ClientError::LoginFailed);
    }

    async fn ask(
        &self,
        request: UploadRequest,
        _token: Option<String>,
    ) -> Result<AskResponse, ClientError> {
        if request.question == "slow" {
            self.gate.notified().await;
        } else {
            self.gate.notify_one();
        }

        return Ok(AskResponse {
            answer: Some(format!("answer to {}", request.question)),
            explanation: Some("".to_string()),
            error: None,
        });
    }

    async fn google_login_url(&self) -> Result<Option<String>, ClientError> {
        return Ok(None);
    }
}

#[tokio::test]
async fn it_discards_stale_answers() -> Result<()> {
    let h = harness_with(Arc::new(GatedBackend {
        gate: Notify::new(),
    }))?;
    let file = h.write_file("doc.pdf", "body")?;
    h.submitter.select_file(Some(file));

    let (slow, fast) = tokio::join!(
        h.submitter.submit_question("slow"),
        h.submitter.submit_question("fast")
    );

    assert_eq!(slow, SubmissionOutcome::Superseded);
    assert!(fast.is_success());
    assert_eq!(h.submitter.state(), SubmissionState::Success);

    match h.screen.snapshot().response {
        ResponseView::Answer(view) => assert_eq!(view.answer, "answer to fast"),
        other => panic!("unexpected response {other:?}"),
    }
    return Ok(());
}
