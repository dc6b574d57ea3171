use std::sync::Mutex;
use std::sync::PoisonError;

use crate::domain::models::PresenterBox;
use crate::domain::models::ViewState;

/// View state shared by the session and question workflows, re-rendered
/// through the presenter after every change.
pub struct Screen {
    state: Mutex<ViewState>,
    presenter: PresenterBox,
}

impl Screen {
    pub fn new(presenter: PresenterBox) -> Screen {
        return Screen {
            state: Mutex::new(ViewState::default()),
            presenter,
        };
    }

    pub fn update<F: FnOnce(&mut ViewState)>(&self, f: F) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state);
        self.presenter.render(&state);
    }

    pub fn snapshot(&self) -> ViewState {
        return self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
    }

    pub fn alert(&self, message: &str) {
        tracing::debug!(alert = message, "alert");
        self.presenter.alert(message);
    }

    pub fn navigate(&self, url: &str) {
        tracing::debug!(url, "navigate");
        self.presenter.navigate(url);
    }
}
