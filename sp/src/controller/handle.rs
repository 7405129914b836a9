//! ControllerHandle - actor front end for the StepController
//!
//! The controller runs on its own task and drains one command at a time, so
//! two actions can never interleave even when several callers hold a handle.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use super::{Action, BusyFlag, StepController, StepError, StepReport, WizardSnapshot};

/// Messages accepted by the controller actor
#[derive(Debug)]
pub enum ControllerCommand {
    Dispatch {
        action: Action,
        reply: oneshot::Sender<Result<StepReport, StepError>>,
    },
    Snapshot {
        reply: oneshot::Sender<WizardSnapshot>,
    },
    Shutdown,
}

/// Handle to send commands to the controller actor
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::Sender<ControllerCommand>,
    busy: BusyFlag,
}

impl ControllerHandle {
    /// Spawn the actor task that owns `controller`
    pub fn spawn(controller: StepController) -> Self {
        debug!("ControllerHandle::spawn: called");
        let busy = controller.busy_flag();
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(actor_loop(controller, rx));
        info!("Step controller spawned");

        Self { tx, busy }
    }

    /// Queue an action and wait for its result
    pub async fn dispatch(&self, action: Action) -> Result<StepReport, StepError> {
        debug!(kind = %action.kind(), "ControllerHandle::dispatch: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(ControllerCommand::Dispatch {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| StepError::ChannelClosed)?;
        reply_rx.await.map_err(|_| StepError::ChannelClosed)?
    }

    pub async fn snapshot(&self) -> Result<WizardSnapshot, StepError> {
        debug!("ControllerHandle::snapshot: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(ControllerCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| StepError::ChannelClosed)?;
        reply_rx.await.map_err(|_| StepError::ChannelClosed)
    }

    /// True while an action is being applied
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub async fn shutdown(&self) -> Result<(), StepError> {
        debug!("ControllerHandle::shutdown: called");
        self.tx
            .send(ControllerCommand::Shutdown)
            .await
            .map_err(|_| StepError::ChannelClosed)
    }
}

async fn actor_loop(mut controller: StepController, mut rx: mpsc::Receiver<ControllerCommand>) {
    debug!("actor_loop: called");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            ControllerCommand::Dispatch { action, reply } => {
                debug!(kind = %action.kind(), "actor_loop: Dispatch command");
                let result = controller.dispatch(action).await;
                let _ = reply.send(result);
            }

            ControllerCommand::Snapshot { reply } => {
                debug!("actor_loop: Snapshot command");
                let _ = reply.send(controller.snapshot());
            }

            ControllerCommand::Shutdown => {
                info!("Step controller shutting down");
                break;
            }
        }
    }

    debug!("actor_loop: exited");
}
