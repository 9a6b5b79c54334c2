//! Command orchestration helpers from reducer effects to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};
use shared::error::AuthError;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};
use crate::controller::reducer::{Effect, FormAction};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err(UiError::from_message(
                UiErrorContext::Login,
                "Authentication queue is full; please retry",
            ))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err(UiError::from_message(
                UiErrorContext::Login,
                "Authentication worker disconnected (possible startup/runtime failure); restart the app",
            ))
        }
    }
}

/// Runs a reducer effect. When an attempt cannot be handed to the worker the
/// returned action resolves it as failed, so the form never stays loading.
pub fn execute_effect(
    cmd_tx: &Sender<BackendCommand>,
    effect: Effect,
) -> (Option<FormAction>, Option<UiError>) {
    match effect {
        Effect::Authenticate {
            attempt,
            credentials,
        } => match dispatch_backend_command(
            cmd_tx,
            BackendCommand::Authenticate {
                attempt,
                credentials,
            },
        ) {
            Ok(()) => (None, None),
            Err(err) => (
                Some(FormAction::AuthResolved {
                    attempt,
                    result: Err(AuthError::Unavailable(err.message().to_string())),
                }),
                Some(err),
            ),
        },
        Effect::Cancel { attempt } => {
            // Nothing to undo if the worker is already gone.
            let err = dispatch_backend_command(cmd_tx, BackendCommand::Cancel { attempt }).err();
            (None, err)
        }
    }
}
