#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use owo_colors::OwoColorize;

use crate::domain::models::Control;
use crate::domain::models::OutputFormat;
use crate::domain::models::Presenter;
use crate::domain::models::ResponseView;
use crate::domain::models::Section;
use crate::domain::models::ViewState;

struct Inner<W> {
    writer: W,
    last: Option<ViewState>,
}

/// Prints view changes to a terminal. Only regions that changed since the
/// previous render are written again.
pub struct TerminalPresenter<W: Write + Send> {
    inner: Mutex<Inner<W>>,
    format: OutputFormat,
    colored: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> TerminalPresenter<io::Stdout> {
        let colored = io::stdout().is_terminal();
        return TerminalPresenter::new(io::stdout(), format).with_color(colored);
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(writer: W, format: OutputFormat) -> TerminalPresenter<W> {
        return TerminalPresenter {
            inner: Mutex::new(Inner { writer, last: None }),
            format,
            colored: false,
        };
    }

    pub fn with_color(mut self, colored: bool) -> TerminalPresenter<W> {
        self.colored = colored;
        return self;
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        return self
            .inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .writer;
    }

    fn paint<F: Fn(&str) -> String>(&self, text: &str, f: F) -> String {
        if self.colored {
            return f(text);
        }

        return text.to_string();
    }

    fn section_text(&self, state: &ViewState) -> String {
        let mut lines = vec![];
        match state.section {
            Section::Login => {
                lines.push(
                    "You are not logged in. Run `askdoc login` or `askdoc google-login` to continue."
                        .to_string(),
                );
            }
            Section::Main => {
                lines.push(self.paint("Logged in.", |e| return e.green().to_string()));
                for control in state.controls.iter() {
                    match control {
                        Control::Logout => lines.push("Run `askdoc logout` to log out.".to_string()),
                    }
                }
            }
        }

        return lines.join("\n");
    }

    fn response_text(&self, response: &ResponseView) -> String {
        if self.format == OutputFormat::Html {
            return response.to_html();
        }

        return match response {
            ResponseView::Empty => "".to_string(),
            ResponseView::Loading => "Loading...".to_string(),
            ResponseView::Answer(view) => [
                self.paint(&format!("Response for {}", view.file_name), |e| {
                    return e.bold().to_string();
                }),
                format!(
                    "{} {}",
                    self.paint("Question:", |e| return e.bold().to_string()),
                    view.question
                ),
                "".to_string(),
                self.paint("Answer", |e| return e.underline().to_string()),
                self.paint(&view.answer, |e| return e.cyan().to_string()),
                "".to_string(),
                self.paint("Explanation", |e| return e.underline().to_string()),
                view.explanation.to_string(),
            ]
            .join("\n"),
            ResponseView::AppError(msg) | ResponseView::Failure(msg) => {
                self.paint(msg, |e| return e.red().to_string())
            }
        };
    }

    fn write_text(writer: &mut W, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(err) = writeln!(writer, "{text}") {
            tracing::error!(error = ?err, "Failed to write to terminal");
        }
    }
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&self, state: &ViewState) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let first = inner.last.is_none();
        let last = inner.last.take().unwrap_or_default();

        if first || last.section != state.section || last.controls != state.controls {
            let text = self.section_text(state);
            Self::write_text(&mut inner.writer, &text);
        }

        if last.login_error != state.login_error {
            if let Some(err) = &state.login_error {
                let text = self.paint(err, |e| return e.red().to_string());
                Self::write_text(&mut inner.writer, &text);
            }
        }

        if last.file_status != state.file_status {
            let text = state.file_status.text();
            Self::write_text(&mut inner.writer, &text);
        }

        if last.response != state.response {
            let text = self.response_text(&state.response);
            Self::write_text(&mut inner.writer, &text);
        }

        let _ = inner.writer.flush();
        inner.last = Some(state.clone());
    }

    fn alert(&self, message: &str) {
        let text = self.paint(&format!("! {message}"), |e| return e.yellow().to_string());
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Self::write_text(&mut inner.writer, &text);
    }

    fn navigate(&self, url: &str) {
        let text = format!("Open the following URL in your browser to continue:\n  {url}");
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Self::write_text(&mut inner.writer, &text);
    }
}
