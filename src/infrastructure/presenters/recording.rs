use std::sync::Arc;
use std::sync::Mutex;

use crate::domain::models::Presenter;
use crate::domain::models::ViewState;

#[derive(Default)]
pub struct Recorded {
    pub renders: Vec<ViewState>,
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
}

/// Keeps every call so tests can inspect what the user would have seen.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    pub recorded: Arc<Mutex<Recorded>>,
}

impl RecordingPresenter {
    pub fn alerts(&self) -> Vec<String> {
        return self.recorded.lock().unwrap().alerts.clone();
    }

    pub fn navigations(&self) -> Vec<String> {
        return self.recorded.lock().unwrap().navigations.clone();
    }

    pub fn renders(&self) -> Vec<ViewState> {
        return self.recorded.lock().unwrap().renders.clone();
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, state: &ViewState) {
        self.recorded.lock().unwrap().renders.push(state.clone());
    }

    fn alert(&self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .alerts
            .push(message.to_string());
    }

    fn navigate(&self, url: &str) {
        self.recorded
            .lock()
            .unwrap()
            .navigations
            .push(url.to_string());
    }
}
