pub(crate) mod tests;

use std::fmt;

use tokio::sync::{mpsc, oneshot};

use crate::peripherals::RelayLine;
use crate::state::StateHandler;

/// Commands accepted by the pump service. Every relay write in the process
/// goes through this channel, so writes can never interleave.
#[derive(Debug)]
enum PumpCommand {
    /// Drive the relay to the given state. Idempotent: the line is
    /// re-asserted even when the state does not change.
    Set(bool, oneshot::Sender<bool>),
    /// Flip the pump regardless of the current fill level.
    Toggle(oneshot::Sender<bool>),
    /// Turn the pump off only if it is currently on, replying whether an
    /// on-to-off transition actually happened. This is the primitive behind
    /// the edge-triggered auto-shutoff: a toggle racing with it can never
    /// produce a duplicate transition report.
    ShutoffIfOn(oneshot::Sender<bool>),
}

/// Clone-able handle to the single task that owns the relay line and the
/// authoritative pump state.
#[derive(Debug, Clone)]
pub struct PumpHandler {
    commands: mpsc::Sender<PumpCommand>,
}

impl PumpHandler {
    /// Spawns the service task. The relay is forced off before the first
    /// command is accepted, matching the hardware's safe power-on state.
    pub fn spawn(relay: Box<dyn RelayLine>, state_handler: StateHandler) -> PumpHandler {
        let (tx, rx) = mpsc::channel(8);
        let mut service = PumpService {
            relay,
            on: false,
            state_handler,
            commands: rx,
        };
        tokio::spawn(async move {
            if let Err(e) = service.relay.set(false).await {
                log::error!("Could not force the relay off at startup: {e}");
            }
            service.state_handler.record_pump(false);
            service.run().await;
        });
        PumpHandler { commands: tx }
    }

    /// Returns the state the pump ended up in.
    pub async fn set(&self, on: bool) -> Result<bool, PumpError> {
        self.send(|reply| PumpCommand::Set(on, reply)).await
    }

    /// Returns the state the pump ended up in.
    pub async fn toggle(&self) -> Result<bool, PumpError> {
        self.send(PumpCommand::Toggle).await
    }

    /// Returns whether an on-to-off transition happened.
    pub async fn shutoff_if_on(&self) -> Result<bool, PumpError> {
        self.send(PumpCommand::ShutoffIfOn).await
    }

    async fn send(
        &self,
        make: impl FnOnce(oneshot::Sender<bool>) -> PumpCommand,
    ) -> Result<bool, PumpError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(make(reply_tx))
            .await
            .map_err(|_| PumpError::ServiceStopped)?;
        reply_rx.await.map_err(|_| PumpError::ServiceStopped)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PumpError {
    /// The service task is gone, which only happens during shutdown.
    ServiceStopped,
}

impl fmt::Display for PumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PumpError::ServiceStopped => write!(f, "the pump service is not running"),
        }
    }
}

impl std::error::Error for PumpError {}

struct PumpService {
    relay: Box<dyn RelayLine>,
    on: bool,
    state_handler: StateHandler,
    commands: mpsc::Receiver<PumpCommand>,
}

impl PumpService {
    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                PumpCommand::Set(on, reply) => {
                    self.apply(on).await;
                    let _ = reply.send(self.on);
                }
                PumpCommand::Toggle(reply) => {
                    let desired = !self.on;
                    self.apply(desired).await;
                    let _ = reply.send(self.on);
                }
                PumpCommand::ShutoffIfOn(reply) => {
                    let was_on = self.on;
                    if was_on {
                        self.apply(false).await;
                    }
                    let _ = reply.send(was_on && !self.on);
                }
            }
        }
    }

    /// Drives the relay line and only then records the new state, so the
    /// snapshot can never claim a state the hardware did not reach.
    async fn apply(&mut self, on: bool) {
        match self.relay.set(on).await {
            Ok(()) => {
                if self.on != on {
                    log::info!("Pump turned {}", if on { "on" } else { "off" });
                }
                self.on = on;
                self.state_handler.record_pump(on);
            }
            Err(e) => log::error!("Could not drive the pump relay: {e}"),
        }
    }
}
