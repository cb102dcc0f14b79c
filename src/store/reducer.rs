//! Pure reducers - `(&slice, &action) -> slice`
//!
//! Each reducer returns a fresh value and never touches its input, so the
//! same prior state and action always produce the same next state.

use crate::messages::Action;
use crate::router::RouterState;
use crate::store::state::{AppState, PingState, UsersState};

pub fn ping(state: &PingState, action: &Action) -> PingState {
    match action {
        Action::Ping => PingState { is_pinging: true },
        Action::Pong => PingState { is_pinging: false },
        _ => state.clone(),
    }
}

pub fn users(state: &UsersState, action: &Action) -> UsersState {
    match action {
        Action::FetchUser { request_id, username } => UsersState {
            current: Some(username.clone()),
            current_request: Some(*request_id),
            pending: true,
            error: None,
            ..state.clone()
        },
        Action::FetchUserFulfilled { request_id, user } => {
            if state.current_request != Some(*request_id) {
                // superseded by a newer lookup
                return state.clone();
            }
            let mut next = state.clone();
            next.users.insert(user.login().to_string(), user.clone());
            next.pending = false;
            next.error = None;
            next
        }
        Action::FetchUserFailed { request_id, error } => {
            if state.current_request != Some(*request_id) {
                // superseded by a newer lookup
                return state.clone();
            }
            UsersState {
                pending: false,
                error: Some(error.clone()),
                ..state.clone()
            }
        }
        _ => state.clone(),
    }
}

pub fn counter(state: i64, action: &Action) -> i64 {
    match action {
        Action::Increment => state.saturating_add(1),
        _ => state,
    }
}

pub fn router(state: &RouterState, action: &Action) -> RouterState {
    match action {
        Action::Navigate(nav) => state.navigate(nav),
        _ => state.clone(),
    }
}

/// Root reducer: every slice sees every action
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        ping: ping(&state.ping, action),
        users: users(&state.users, action),
        counter: counter(state.counter, action),
        router: router(&state.router, action),
    }
}
