//! Effect Driver
//!
//! Runs the internal commands a [`GameController`] emits: model calls and the
//! celebration timer are spawned as tokio tasks and report back through an
//! mpsc channel as [`DriverEvent`]s. The caller owns the receiving end and
//! feeds each event back through [`GameDriver::apply`], typically from a
//! `tokio::select!` loop alongside its own input source.

use crate::Command;
use crate::game::{GameController, GameError, UiAction};
use crate::llm_client::ShopkeeperClient;
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

/// Results of background work, tagged with the game generation that started it.
#[derive(Debug)]
pub enum DriverEvent {
    ReplyReady {
        generation: u64,
        result: anyhow::Result<String>,
    },
    CelebrationDue {
        generation: u64,
    },
}

pub struct GameDriver {
    controller: GameController,
    client: Arc<dyn ShopkeeperClient>,
    events_tx: mpsc::UnboundedSender<DriverEvent>,
    pending: Vec<JoinHandle<()>>,
}

impl GameDriver {
    /// Creates a driver and the receiver its background tasks report to.
    pub fn new(
        controller: GameController,
        client: Arc<dyn ShopkeeperClient>,
    ) -> (Self, mpsc::UnboundedReceiver<DriverEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let driver = Self {
            controller,
            client,
            events_tx,
            pending: Vec::new(),
        };
        (driver, events_rx)
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Handles a UI action, returning the commands meant for the presentation layer.
    pub fn handle(&mut self, action: UiAction) -> Result<Vec<Command>, GameError> {
        let commands = self.controller.handle(action)?;
        Ok(self.execute(commands))
    }

    /// Feeds a finished background task back into the controller.
    pub fn apply(&mut self, event: DriverEvent) -> Vec<Command> {
        let commands = match event {
            DriverEvent::ReplyReady { generation, result } => {
                self.controller.complete_turn(generation, result)
            }
            DriverEvent::CelebrationDue { generation } => {
                self.controller.fire_celebration(generation)
            }
        };
        self.execute(commands)
    }

    /// Carries out internal commands and passes the rest through.
    fn execute(&mut self, commands: Vec<Command>) -> Vec<Command> {
        self.pending.retain(|handle| !handle.is_finished());

        let mut outward = Vec::with_capacity(commands.len());
        for command in commands {
            match command {
                Command::RequestReply(request) => {
                    let client = self.client.clone();
                    let tx = self.events_tx.clone();
                    self.pending.push(tokio::spawn(async move {
                        let generation = request.generation;
                        let result = client.reply(request).await;
                        if tx.send(DriverEvent::ReplyReady { generation, result }).is_err() {
                            warn!("Reply finished after the game was closed");
                        }
                    }));
                }
                Command::ScheduleCelebration { generation, delay } => {
                    let tx = self.events_tx.clone();
                    self.pending.push(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        if tx.send(DriverEvent::CelebrationDue { generation }).is_err() {
                            warn!("Celebration came due after the game was closed");
                        }
                    }));
                }
                Command::CancelPending => self.cancel_pending(),
                other => outward.push(other),
            }
        }
        outward
    }

    fn cancel_pending(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "Cancelling pending tasks");
        }
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for GameDriver {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
