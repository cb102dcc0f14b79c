//! App actor - message loop turning UI events and effect outcomes into
//! store dispatches

use tokio::sync::mpsc;

use crate::app::view::ViewState;
use crate::config::Config;
use crate::constants::QUICK_LINKS;
use crate::effects::{Effect, Epics};
use crate::messages::render::JournalLine;
use crate::messages::{Action, EffectCommand, RenderState, UiEvent};
use crate::router::{Navigation, Route};
use crate::store::Store;

/// App actor that owns the store and the view-local state
pub struct AppActor {
    store: Store,
    view: ViewState,
    effect_tx: mpsc::UnboundedSender<EffectCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        effect_tx: mpsc::UnboundedSender<EffectCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            store: Store::new(Epics::new(config.ping_delay())),
            view: ViewState::new(&config.default_username),
            effect_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut action_rx: mpsc::UnboundedReceiver<Action>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.effect_tx.send(EffectCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.render_state());
                }
                Some(action) = action_rx.recv() => {
                    self.dispatch(action);
                    let _ = self.render_tx.send(self.render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::GoTo(route) => self.navigate(Navigation::Push(route.path())),
            UiEvent::Back => self.navigate(Navigation::Back),
            UiEvent::Forward => self.navigate(Navigation::Forward),
            UiEvent::OpenLink(index) => {
                if let Some(name) = QUICK_LINKS.get(index) {
                    self.navigate(Navigation::Push(Route::User(Some(name.to_string())).path()));
                }
            }

            // Ping / counter
            UiEvent::Ping => self.dispatch(Action::Ping),
            UiEvent::Increment => self.dispatch(Action::Increment),
            UiEvent::IncrementIfOdd => self.dispatch(Action::IncrementIfOdd),

            // Lookup form
            UiEvent::StartEditing => self.view.start_editing(),
            UiEvent::StopEditing => self.view.stop_editing(),
            UiEvent::CharInput(c) => self.view.enter_char(c),
            UiEvent::Backspace => self.view.delete_char(),
            UiEvent::CursorLeft => self.view.move_cursor_left(),
            UiEvent::CursorRight => self.view.move_cursor_right(),
            UiEvent::SubmitLookup => {
                self.view.stop_editing();
                if let Some(username) = self.view.submission() {
                    let effects = self.store.fetch_user(&username);
                    self.schedule(effects);
                }
            }

            // Time travel
            UiEvent::Undo => {
                if self.store.undo() {
                    self.view.sync_route(&self.store.state().router.route());
                }
            }
            UiEvent::Redo => {
                if self.store.redo() {
                    self.view.sync_route(&self.store.state().router.route());
                }
            }

            // Panels
            UiEvent::ToggleLog => self.view.toggle_log(),
            UiEvent::ToggleHelp => self.view.toggle_help(),
            UiEvent::CloseHelp => self.view.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    fn navigate(&mut self, nav: Navigation) {
        self.dispatch(Action::Navigate(nav));
    }

    fn dispatch(&mut self, action: Action) {
        let effects = self.store.dispatch(action);
        self.schedule(effects);
        self.view.sync_route(&self.store.state().router.route());
    }

    fn schedule(&self, effects: Vec<Effect>) {
        for effect in effects {
            let _ = self.effect_tx.send(EffectCommand::Run(effect));
        }
    }

    /// Snapshot of everything the UI draws
    fn render_state(&self) -> RenderState {
        let state = self.store.state();
        let users = &state.users;
        let position = self.store.position();

        let journal = self
            .store
            .journal()
            .iter()
            .enumerate()
            .map(|(index, entry)| JournalLine {
                index,
                at: entry.at.with_timezone(&chrono::Local).format("%H:%M:%S").to_string(),
                description: entry
                    .action
                    .as_ref()
                    .map(Action::describe)
                    .unwrap_or_else(|| String::from("@@INIT")),
                current: index == position,
            })
            .collect();

        RenderState {
            location: state.router.location.clone(),
            route: state.router.route(),
            can_go_back: !state.router.back.is_empty(),
            can_go_forward: !state.router.forward.is_empty(),
            is_pinging: state.ping.is_pinging,
            counter: state.counter,
            lookup_username: users.current.clone(),
            current_user: users.current_user().map(|u| u.to_pretty()),
            lookup_pending: users.pending,
            lookup_error: users.error.clone(),
            input: self.view.input.clone(),
            cursor_position: self.view.cursor_position,
            input_mode: self.view.input_mode,
            show_log: self.view.show_log,
            journal,
            time_travelling: self.store.is_time_travelling(),
            show_help: self.view.show_help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ui_events::InputMode;
    use crate::models::User;
    use serde_json::json;
    use std::time::Duration;

    fn actor() -> (AppActor, mpsc::UnboundedReceiver<EffectCommand>) {
        let (effect_tx, effect_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        (AppActor::new(&Config::default(), effect_tx, render_tx), effect_rx)
    }

    #[test]
    fn test_ping_schedules_delayed_pong() {
        let (mut app, mut effect_rx) = actor();
        app.handle_ui_event(UiEvent::Ping);
        assert!(app.render_state().is_pinging);

        match effect_rx.try_recv() {
            Ok(EffectCommand::Run(Effect::Delay { after, then })) => {
                assert_eq!(after, Duration::from_millis(1000));
                assert_eq!(then, Action::Pong);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_submit_lookup_from_route_param() {
        let (mut app, mut effect_rx) = actor();
        app.handle_ui_event(UiEvent::OpenLink(0));
        let render = app.render_state();
        assert_eq!(render.route, Route::User(Some(String::from("uzimith"))));
        assert_eq!(render.input, "uzimith");

        app.handle_ui_event(UiEvent::StartEditing);
        assert_eq!(app.view.input_mode, InputMode::Editing);
        app.handle_ui_event(UiEvent::CharInput('2'));
        app.handle_ui_event(UiEvent::SubmitLookup);
        assert_eq!(app.view.input_mode, InputMode::Normal);

        match effect_rx.try_recv() {
            Ok(EffectCommand::Run(Effect::FetchUser { request_id, username })) => {
                assert_eq!(request_id, 1);
                assert_eq!(username, "uzimith2");
            }
            other => panic!("unexpected {:?}", other),
        }
        let render = app.render_state();
        assert!(render.lookup_pending);
        assert_eq!(render.lookup_username.as_deref(), Some("uzimith2"));
    }

    #[test]
    fn test_completion_updates_render_state() {
        let (mut app, _effect_rx) = actor();
        app.handle_ui_event(UiEvent::SubmitLookup);
        let user = User::from_json(json!({"login": "redux-observable"})).unwrap();
        app.dispatch(Action::FetchUserFulfilled { request_id: 1, user });

        let render = app.render_state();
        assert!(!render.lookup_pending);
        assert!(render.current_user.unwrap().contains("\"login\": \"redux-observable\""));
        assert_eq!(render.lookup_error, None);
    }

    #[test]
    fn test_undo_restores_route_and_counter() {
        let (mut app, _effect_rx) = actor();
        app.handle_ui_event(UiEvent::GoTo(Route::Counter));
        app.handle_ui_event(UiEvent::Increment);
        app.handle_ui_event(UiEvent::Undo);
        app.handle_ui_event(UiEvent::Undo);

        let render = app.render_state();
        assert_eq!(render.route, Route::Ping);
        assert_eq!(render.counter, 0);
        assert!(render.time_travelling);
        assert_eq!(render.journal.iter().filter(|l| l.current).count(), 1);
        assert!(render.journal[0].current);
    }

    #[test]
    fn test_quit() {
        let (mut app, _effect_rx) = actor();
        assert!(app.handle_ui_event(UiEvent::Quit));
        assert!(!app.handle_ui_event(UiEvent::ToggleLog));
    }

    #[tokio::test]
    async fn test_run_loop_shuts_down_effects_on_quit() {
        let (effect_tx, mut effect_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_action_tx, action_rx) = mpsc::unbounded_channel();

        let app = AppActor::new(&Config::default(), effect_tx, render_tx);
        let handle = tokio::spawn(app.run(ui_rx, action_rx));

        ui_tx.send(UiEvent::GoTo(Route::Counter)).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        let initial = render_rx.recv().await.unwrap();
        assert_eq!(initial.route, Route::Ping);
        let after_nav = render_rx.recv().await.unwrap();
        assert_eq!(after_nav.route, Route::Counter);
        assert!(matches!(effect_rx.recv().await, Some(EffectCommand::Shutdown)));
    }
}
