//! Back/forward state for the content surface, driven by navigation events.
//!
//! The embedding engine does not report its session history, so it is
//! mirrored here from committed page loads and from the same-document
//! changes (`pushState`, `replaceState`, `popstate`) the content page
//! reports. Back and forward are recorded as pending moves and confirmed by
//! the next commit or pop.

use serde::Serialize;
use tracing::trace;

use crate::ipc::HistoryChange;

/// What the toolbar needs to enable its back and forward buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingMove {
    Back,
    Forward,
}

#[derive(Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: usize,
    pending: Option<PendingMove>,
    last: NavState,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        NavState {
            can_go_back: !self.entries.is_empty() && self.index > 0,
            can_go_forward: self.index + 1 < self.entries.len(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    /// Record a committed navigation to `url`. Returns the new state when
    /// it differs from the last one reported.
    pub fn commit(&mut self, url: &str) -> Option<NavState> {
        match self.pending.take() {
            Some(PendingMove::Back) if self.index > 0 && self.entries[self.index - 1] == url => {
                self.index -= 1;
            }
            Some(PendingMove::Forward)
                if self.entries.get(self.index + 1).is_some_and(|e| e == url) =>
            {
                self.index += 1;
            }
            _ => self.push_entry(url),
        }
        trace!(url, index = self.index, len = self.entries.len(), "history commit");
        self.changed()
    }

    /// Record a same-document history change. Returns the new state when
    /// it differs from the last one reported.
    pub fn record(&mut self, change: HistoryChange, url: &str) -> Option<NavState> {
        match change {
            HistoryChange::Push => {
                self.pending = None;
                self.push_entry(url);
            }
            HistoryChange::Replace => match self.entries.get_mut(self.index) {
                Some(entry) => *entry = url.to_string(),
                None => self.entries.push(url.to_string()),
            },
            HistoryChange::Pop => self.traverse(url),
        }
        trace!(url, ?change, index = self.index, len = self.entries.len(), "history change");
        self.changed()
    }

    fn push_entry(&mut self, url: &str) {
        if self.current() == Some(url) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    /// Move to the neighbouring entry holding `url`, preferring the
    /// direction of a pending move.
    fn traverse(&mut self, url: &str) {
        let pending = self.pending.take();
        if self.current() == Some(url) {
            return;
        }
        let prev = self.index > 0 && self.entries[self.index - 1] == url;
        let next = self.entries.get(self.index + 1).is_some_and(|e| e == url);
        if pending == Some(PendingMove::Forward) && next {
            self.index += 1;
        } else if prev {
            self.index -= 1;
        } else if next {
            self.index += 1;
        } else {
            self.push_entry(url);
        }
    }

    /// Start a back move. Returns `false` when there is nowhere to go.
    pub fn go_back(&mut self) -> bool {
        if !self.state().can_go_back {
            return false;
        }
        self.pending = Some(PendingMove::Back);
        true
    }

    /// Start a forward move. Returns `false` when there is nowhere to go.
    pub fn go_forward(&mut self) -> bool {
        if !self.state().can_go_forward {
            return false;
        }
        self.pending = Some(PendingMove::Forward);
        true
    }

    fn changed(&mut self) -> Option<NavState> {
        let state = self.state();
        if state == self.last {
            return None;
        }
        self.last = state;
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "https://music.apple.com/";
    const B: &str = "https://music.apple.com/browse";
    const C: &str = "https://music.apple.com/radio";

    #[test]
    fn empty_history_cannot_move() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.state(), NavState::default());
        assert!(!history.go_back());
        assert!(!history.go_forward());
        assert!(history.current().is_none());
    }

    #[test]
    fn first_commit_reports_nothing_new() {
        let mut history = NavigationHistory::new();
        assert_eq!(history.commit(A), None);
        assert_eq!(history.current(), Some(A));
    }

    #[test]
    fn second_commit_enables_back() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        assert_eq!(
            history.commit(B),
            Some(NavState {
                can_go_back: true,
                can_go_forward: false
            })
        );
        // Same state again is not re-reported.
        assert_eq!(history.commit(C), None);
    }

    #[test]
    fn reload_does_not_grow_history() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(A);
        assert!(!history.state().can_go_back);
    }

    #[test]
    fn back_then_forward() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);

        assert!(history.go_back());
        assert_eq!(
            history.commit(A),
            Some(NavState {
                can_go_back: false,
                can_go_forward: true
            })
        );

        assert!(history.go_forward());
        assert_eq!(
            history.commit(B),
            Some(NavState {
                can_go_back: true,
                can_go_forward: false
            })
        );
    }

    #[test]
    fn new_navigation_after_back_drops_forward_entries() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        history.go_back();
        history.commit(A);

        history.commit(C);
        let state = history.state();
        assert!(state.can_go_back);
        assert!(!state.can_go_forward);
        assert_eq!(history.current(), Some(C));
    }

    #[test]
    fn push_state_sequence_tracks_single_page_navigation() {
        let mut history = NavigationHistory::new();
        history.commit(A);

        assert_eq!(
            history.record(HistoryChange::Push, B),
            Some(NavState {
                can_go_back: true,
                can_go_forward: false
            })
        );
        assert_eq!(history.record(HistoryChange::Push, C), None);

        // Toolbar back, confirmed by the page's popstate.
        assert!(history.go_back());
        assert_eq!(
            history.record(HistoryChange::Pop, B),
            Some(NavState {
                can_go_back: true,
                can_go_forward: true
            })
        );

        // Back triggered by the page itself, with no pending move.
        assert_eq!(
            history.record(HistoryChange::Pop, A),
            Some(NavState {
                can_go_back: false,
                can_go_forward: true
            })
        );
        assert_eq!(history.current(), Some(A));

        // Forward again from the page.
        history.record(HistoryChange::Pop, B);
        assert_eq!(history.current(), Some(B));
    }

    #[test]
    fn replace_state_rewrites_current_entry() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.record(HistoryChange::Push, B);

        assert_eq!(history.record(HistoryChange::Replace, C), None);
        assert_eq!(history.current(), Some(C));

        assert!(history.go_back());
        history.record(HistoryChange::Pop, A);
        assert!(history.go_forward());
        history.record(HistoryChange::Pop, C);
        assert_eq!(history.current(), Some(C));
    }

    #[test]
    fn push_after_pop_drops_forward_entries() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.record(HistoryChange::Push, B);
        history.record(HistoryChange::Pop, A);
        assert!(history.state().can_go_forward);

        history.record(HistoryChange::Push, C);
        assert_eq!(
            history.state(),
            NavState {
                can_go_back: true,
                can_go_forward: false
            }
        );
    }

    #[test]
    fn cross_document_back_is_not_counted_twice() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        history.go_back();
        history.record(HistoryChange::Pop, A);
        history.commit(A);
        assert_eq!(history.current(), Some(A));
        assert!(history.state().can_go_forward);
    }

    #[test]
    fn unexpected_commit_during_back_is_a_new_entry() {
        let mut history = NavigationHistory::new();
        history.commit(A);
        history.commit(B);
        history.go_back();
        history.commit(C);
        assert_eq!(history.current(), Some(C));
        assert!(!history.state().can_go_forward);
    }
}
