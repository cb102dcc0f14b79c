//! Store - owns the state tree and applies actions in dispatch order

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::constants::MAX_JOURNAL;
use crate::effects::{Effect, Epics};
use crate::messages::Action;
use crate::store::reducer;
use crate::store::state::AppState;

/// One dispatched action and the state it produced
#[derive(Clone, Debug)]
pub struct JournalEntry {
    pub at: DateTime<Utc>,
    /// `None` for the initial state
    pub action: Option<Action>,
    pub state: AppState,
}

pub struct Store {
    state: AppState,
    epics: Epics,
    next_request_id: u64,
    queue: VecDeque<Action>,
    journal: VecDeque<JournalEntry>,
    /// Index into `journal` of the entry `state` came from
    position: usize,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Epics::default())
    }
}

impl Store {
    pub fn new(epics: Epics) -> Self {
        Self::with_state(AppState::default(), epics)
    }

    pub fn with_state(state: AppState, epics: Epics) -> Self {
        let mut journal = VecDeque::with_capacity(MAX_JOURNAL);
        journal.push_back(JournalEntry {
            at: Utc::now(),
            action: None,
            state: state.clone(),
        });
        Store {
            state,
            epics,
            next_request_id: 1,
            queue: VecDeque::new(),
            journal,
            position: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Allocate a lookup request id
    pub fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Start a lookup for `username` under a fresh request id
    pub fn fetch_user(&mut self, username: &str) -> Vec<Effect> {
        let request_id = self.next_request_id();
        self.dispatch(Action::FetchUser {
            request_id,
            username: username.to_string(),
        })
    }

    /// Reduce `action`, then every action its epics emit synchronously, in
    /// order. Returns the asynchronous effects left for the caller to run.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        self.queue.push_back(action);
        let mut scheduled = Vec::new();

        while let Some(action) = self.queue.pop_front() {
            tracing::debug!(action = %action.describe(), "dispatch");
            self.state = reducer::reduce(&self.state, &action);
            for effect in self.epics.run(&action, &self.state) {
                match effect {
                    Effect::Dispatch(next) => self.queue.push_back(next),
                    other => scheduled.push(other),
                }
            }
            self.record(action);
        }

        scheduled
    }

    fn record(&mut self, action: Action) {
        // dispatching after a jump forgets the undone entries
        self.journal.truncate(self.position + 1);
        self.journal.push_back(JournalEntry {
            at: Utc::now(),
            action: Some(action),
            state: self.state.clone(),
        });
        while self.journal.len() > MAX_JOURNAL {
            self.journal.pop_front();
        }
        self.position = self.journal.len() - 1;
    }

    pub fn journal(&self) -> &VecDeque<JournalEntry> {
        &self.journal
    }

    /// Index of the journal entry currently shown
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the state was restored from an earlier journal entry
    pub fn is_time_travelling(&self) -> bool {
        self.position + 1 < self.journal.len()
    }

    /// Restore the state recorded at `index`. Returns false if out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.journal.get(index) {
            Some(entry) => {
                self.state = entry.state.clone();
                self.position = index;
                tracing::info!(index, "jumped to journal entry");
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.position.checked_sub(1) {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.jump_to(self.position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::router::Navigation;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_increment_if_odd_reemits_increment() {
        let mut store = Store::default();
        assert!(store.dispatch(Action::IncrementIfOdd).is_empty());
        assert_eq!(store.state().counter, 0);

        store.dispatch(Action::Increment);
        let effects = store.dispatch(Action::IncrementIfOdd);
        assert!(effects.is_empty());
        assert_eq!(store.state().counter, 2);

        // the re-emitted increment is journaled after its trigger
        let kinds: Vec<_> = store
            .journal()
            .iter()
            .filter_map(|e| e.action.as_ref().map(Action::kind))
            .collect();
        assert_eq!(kinds, vec!["INCREMENT", "INCREMENT_IF_ODD", "INCREMENT"]);
    }

    #[test]
    fn test_ping_sets_flag_and_schedules_pong() {
        let mut store = Store::new(Epics::new(Duration::from_millis(1000)));
        let effects = store.dispatch(Action::Ping);
        assert!(store.state().ping.is_pinging);
        assert_eq!(
            effects,
            vec![Effect::Delay { after: Duration::from_millis(1000), then: Action::Pong }]
        );
        store.dispatch(Action::Pong);
        assert!(!store.state().ping.is_pinging);
    }

    #[test]
    fn test_fetch_user_allocates_increasing_ids() {
        let mut store = Store::default();
        let first = store.fetch_user("a");
        let second = store.fetch_user("b");
        assert_eq!(first, vec![Effect::FetchUser { request_id: 1, username: String::from("a") }]);
        assert_eq!(second, vec![Effect::FetchUser { request_id: 2, username: String::from("b") }]);
        assert_eq!(store.state().users.current_request, Some(2));
    }

    #[test]
    fn test_late_failure_does_not_clobber_newer_lookup() {
        let mut store = Store::default();
        store.fetch_user("slow");
        store.fetch_user("octocat");
        let user = User::from_json(json!({"login": "octocat"})).unwrap();
        store.dispatch(Action::FetchUserFulfilled { request_id: 2, user: user.clone() });
        store.dispatch(Action::FetchUserFailed { request_id: 1, error: String::from("Not Found") });

        let users = &store.state().users;
        assert_eq!(users.error, None);
        assert_eq!(users.current_user(), Some(&user));
    }

    #[test]
    fn test_undo_redo() {
        let mut store = Store::default();
        store.dispatch(Action::Increment);
        store.dispatch(Action::Increment);
        store.dispatch(Action::Navigate(Navigation::Push(String::from("/counter"))));

        assert!(store.undo());
        assert_eq!(store.state().router.location, "/");
        assert!(store.undo());
        assert_eq!(store.state().counter, 1);
        assert!(store.is_time_travelling());

        assert!(store.redo());
        assert_eq!(store.state().counter, 2);

        assert!(store.jump_to(0));
        assert_eq!(store.state(), &AppState::default());
        assert!(!store.undo());
    }

    #[test]
    fn test_dispatch_after_undo_drops_redo_entries() {
        let mut store = Store::default();
        store.dispatch(Action::Increment);
        store.dispatch(Action::Increment);
        store.undo();
        store.dispatch(Action::Ping);

        assert!(!store.redo());
        assert_eq!(store.state().counter, 1);
        assert!(store.state().ping.is_pinging);
        assert_eq!(store.journal().len(), 3);
    }

    #[test]
    fn test_journal_is_bounded() {
        let mut store = Store::default();
        for _ in 0..(MAX_JOURNAL * 2) {
            store.dispatch(Action::Increment);
        }
        assert_eq!(store.journal().len(), MAX_JOURNAL);
        assert_eq!(store.position(), MAX_JOURNAL - 1);
        assert_eq!(store.state().counter, (MAX_JOURNAL * 2) as i64);
    }
}
