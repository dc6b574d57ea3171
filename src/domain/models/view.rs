#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Html,
}

impl OutputFormat {
    pub fn parse(text: String) -> Option<OutputFormat> {
        return OutputFormat::iter().find(|e| return e.to_string() == text);
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Login,
    Main,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Logout,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FileStatus {
    #[default]
    NoFile,
    Selected(String),
}

impl FileStatus {
    pub fn text(&self) -> String {
        return match self {
            FileStatus::NoFile => "No file selected".to_string(),
            FileStatus::Selected(name) => format!("Selected file: {name}"),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerView {
    pub file_name: String,
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResponseView {
    #[default]
    Empty,
    Loading,
    Answer(AnswerView),
    /// Error reported by the service inside a successful response.
    AppError(String),
    Failure(String),
}

impl ResponseView {
    /// Renders the response region as an HTML fragment. Answer and
    /// explanation are inserted as received.
    pub fn to_html(&self) -> String {
        return match self {
            ResponseView::Empty => "".to_string(),
            ResponseView::Loading => "<p>Loading...</p>".to_string(),
            ResponseView::Answer(view) => format!(
                r#"<div class="response-container">
    <h3>Response for <span>{}</span></h3>
    <p><strong>Question:</strong> {}</p>
    <h4>Answer</h4>
    <p class="highlighted-answer">{}</p>
    <h4>Explanation</h4>
    <div class="explanation-box">{}</div>
</div>"#,
                view.file_name, view.question, view.answer, view.explanation
            ),
            ResponseView::AppError(msg) => {
                format!(r#"<p class="app-error" style="color: red;">{msg}</p>"#)
            }
            ResponseView::Failure(msg) => format!(r#"<p style="color: red;">{msg}</p>"#),
        };
    }
}

/// Everything visible to the user. Presenters render this as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub section: Section,
    /// Controls inserted into the main section.
    pub controls: Vec<Control>,
    pub login_error: Option<String>,
    pub file_status: FileStatus,
    pub response: ResponseView,
}

impl ViewState {
    /// Adds a control unless it is already present.
    pub fn insert_control(&mut self, control: Control) {
        if !self.controls.contains(&control) {
            self.controls.insert(0, control);
        }
    }
}

pub trait Presenter {
    fn render(&self, state: &ViewState);

    /// Blocking notice the user has to acknowledge.
    fn alert(&self, message: &str);

    /// Sends the user to an external URL.
    fn navigate(&self, url: &str);
}

pub type PresenterBox = Box<dyn Presenter + Send + Sync>;
