//! Status line for the content surface.

use serde::Serialize;

use crate::history::NavState;

/// Something that happened to, or was asked of, the content surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentEvent {
    StartLoading,
    StopLoading,
    FinishLoad,
    FailLoad { description: String },
    WillNavigate { url: String },
    DidNavigate { url: String },
    Reloading,
    Retrying,
    GoingBack,
    GoingForward,
    GoingHome,
}

/// Everything the toolbar renders, pushed to the chrome page as one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentState {
    pub status: String,
    pub loading: bool,
    /// Failure message shown with the Retry button.
    pub error: Option<String>,
    #[serde(flatten)]
    pub nav: NavState,
}

#[derive(Debug, Clone)]
pub struct ContentStatus {
    text: &'static str,
    loading: bool,
    error: Option<String>,
}

impl Default for ContentStatus {
    fn default() -> Self {
        Self {
            text: "Loading...",
            loading: true,
            error: None,
        }
    }
}

impl ContentStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Fold `event` into the status. Returns whether anything changed.
    pub fn apply(&mut self, event: &ContentEvent) -> bool {
        let before = (self.text, self.loading, self.error.clone());
        match event {
            ContentEvent::StartLoading => {
                self.loading = true;
                self.error = None;
                self.text = "Loading...";
            }
            ContentEvent::StopLoading | ContentEvent::FinishLoad => {
                self.loading = false;
                self.text = "Ready";
            }
            ContentEvent::FailLoad { description } => {
                self.loading = false;
                self.error = Some(format!("Failed to load: {description}"));
                self.text = "Error";
            }
            ContentEvent::WillNavigate { .. } => self.text = "Navigating...",
            ContentEvent::DidNavigate { .. } => self.text = "Ready",
            ContentEvent::Reloading => self.text = "Reloading...",
            ContentEvent::Retrying => {
                self.error = None;
                self.text = "Retrying...";
            }
            ContentEvent::GoingBack => self.text = "Going back...",
            ContentEvent::GoingForward => self.text = "Going forward...",
            ContentEvent::GoingHome => self.text = "Going home...",
        }
        before != (self.text, self.loading, self.error.clone())
    }

    pub fn snapshot(&self, nav: NavState) -> ContentState {
        ContentState {
            status: self.text.to_string(),
            loading: self.loading,
            error: self.error.clone(),
            nav,
        }
    }
}
