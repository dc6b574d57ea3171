use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::OutputFormat;
use crate::domain::services::QuestionSubmitter;
use crate::domain::services::Screen;
use crate::domain::services::SessionContext;
use crate::domain::services::SessionManager;
use crate::infrastructure::backends::http::HttpBackend;
use crate::infrastructure::presenters::TerminalPresenter;
use crate::infrastructure::storage::FileTokenStore;

/// The session and question workflows wired to the same token storage and
/// the same screen.
pub struct App {
    pub session: SessionManager,
    pub questions: QuestionSubmitter,
    pub screen: Arc<Screen>,
}

impl App {
    pub fn from_config() -> Result<App> {
        let output = Config::get(ConfigKey::Output);
        let format = match OutputFormat::parse(output.to_string()) {
            Some(format) => format,
            None => bail!(format!("Unknown output format {output}")),
        };

        let backend = Arc::new(HttpBackend::default());
        let context = SessionContext::new(Arc::new(FileTokenStore::default()));
        let screen = Arc::new(Screen::new(Box::new(TerminalPresenter::stdout(format))));

        return Ok(App {
            session: SessionManager::new(backend.clone(), context.clone(), screen.clone()),
            questions: QuestionSubmitter::new(backend, context, screen.clone()),
            screen,
        });
    }
}
