//! Effect actor - runs delays, user lookups and the route rotation ticker
//! on the Tokio runtime and reports outcomes back as actions

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{self, Instant};

use crate::config::Config;
use crate::effects::Effect;
use crate::messages::{Action, EffectCommand};
use crate::network::client::UserClient;
use crate::router::Navigation;

/// Periodic navigation through a fixed list of paths
#[derive(Debug, Clone)]
struct Rotation {
    interval: Duration,
    urls: Vec<String>,
}

/// Effect actor that turns effects into follow-up actions
pub struct EffectActor {
    client: UserClient,
    action_tx: mpsc::UnboundedSender<Action>,
    tasks: JoinSet<()>,
    rotation: Option<Rotation>,
}

impl EffectActor {
    pub fn new(client: UserClient, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        EffectActor {
            client,
            action_tx,
            tasks: JoinSet::new(),
            rotation: None,
        }
    }

    pub fn from_config(config: &Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        let client = UserClient::new(&config.api_base, config.request_timeout());
        let actor = Self::new(client, action_tx);
        if config.rotation.enabled {
            actor.with_rotation(config.rotation_interval(), config.rotation.urls.clone())
        } else {
            actor
        }
    }

    /// Push the next of `urls` every `interval`, starting one interval in
    pub fn with_rotation(mut self, interval: Duration, urls: Vec<String>) -> Self {
        if !urls.is_empty() {
            self.rotation = Some(Rotation { interval, urls });
        }
        self
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<EffectCommand>) {
        if let Some(rotation) = self.rotation.take() {
            let action_tx = self.action_tx.clone();
            self.tasks.spawn(rotate(rotation, action_tx));
        }

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(EffectCommand::Run(effect)) => self.spawn(effect),
                        Some(EffectCommand::Shutdown) | None => {
                            // In-flight lookups and timers are dropped
                            self.tasks.abort_all();
                            break;
                        }
                    }
                }

                // Reap finished tasks
                Some(_result) = self.tasks.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, effect: Effect) {
        let action_tx = self.action_tx.clone();

        match effect {
            // The store drains these itself before handing effects out
            Effect::Dispatch(action) => {
                tracing::warn!(action = action.kind(), "Dispatch effect reached the effect actor; dropped");
            }

            Effect::Delay { after, then } => {
                tracing::debug!(delay_ms = after.as_millis() as u64, action = then.kind(), "Scheduling delayed action");
                self.tasks.spawn(async move {
                    time::sleep(after).await;
                    let _ = action_tx.send(then);
                });
            }

            Effect::FetchUser { request_id, username } => {
                let client = self.client.clone();
                self.tasks.spawn(async move {
                    tracing::info!(request_id, %username, "Fetching user");
                    let action = match client.fetch_user(&username).await {
                        Ok(user) => {
                            tracing::info!(request_id, login = user.login(), "User fetched");
                            Action::FetchUserFulfilled { request_id, user }
                        }
                        Err(e) => {
                            tracing::warn!(request_id, %username, error = %e, "User lookup failed");
                            Action::FetchUserFailed {
                                request_id,
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = action_tx.send(action);
                });
            }
        }
    }
}

async fn rotate(rotation: Rotation, action_tx: mpsc::UnboundedSender<Action>) {
    let mut ticker = time::interval_at(Instant::now() + rotation.interval, rotation.interval);
    for url in rotation.urls.iter().cycle() {
        ticker.tick().await;
        tracing::debug!(%url, "Rotating route");
        if action_tx.send(Action::Navigate(Navigation::Push(url.clone()))).is_err() {
            break;
        }
    }
}
