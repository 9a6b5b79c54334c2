//! Runtime bridge between UI command queue and backend event intake.

use std::{collections::HashMap, sync::Arc, thread};

use client_core::{Authenticator, SubmitDriver};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::AttemptId, error::AuthError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

struct PendingAttempt {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Spawns the backend worker thread. It runs until it receives
/// [`BackendCommand::Shutdown`] or the command queue disconnects, cancelling
/// whatever attempts are still pending on the way out.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    authenticator: Arc<dyn Authenticator>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let driver = Arc::new(SubmitDriver::new(authenticator));
            let mut pending: HashMap<AttemptId, PendingAttempt> = HashMap::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                pending.retain(|_, attempt| !attempt.task.is_finished());

                match cmd {
                    BackendCommand::Authenticate {
                        attempt,
                        credentials,
                    } => {
                        let cancel = CancellationToken::new();
                        let driver = Arc::clone(&driver);
                        let ui_tx = ui_tx.clone();
                        let token = cancel.clone();
                        let task = tokio::spawn(async move {
                            let result = driver.authenticate(attempt, &credentials, &token).await;
                            if matches!(result, Err(AuthError::Cancelled)) {
                                return;
                            }
                            // A full queue must delay the result, never lose it.
                            let event = UiEvent::AuthResolved { attempt, result };
                            let delivered =
                                tokio::task::spawn_blocking(move || ui_tx.send(event)).await;
                            if !matches!(delivered, Ok(Ok(()))) {
                                tracing::warn!(%attempt, "ui event queue disconnected; dropping result");
                            }
                        });
                        pending.insert(attempt, PendingAttempt { cancel, task });
                    }
                    BackendCommand::Cancel { attempt } => {
                        if let Some(entry) = pending.remove(&attempt) {
                            entry.cancel.cancel();
                        } else {
                            tracing::debug!(%attempt, "cancel for unknown or finished attempt");
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            for (attempt, entry) in pending.drain() {
                tracing::debug!(%attempt, "cancelling pending attempt on shutdown");
                entry.cancel.cancel();
                let _ = entry.task.await;
            }
            tracing::info!("backend worker stopped");
        });
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::MockAuthenticator;
    use crossbeam_channel::{bounded, RecvTimeoutError};
    use shared::domain::{AuthOutcome, Credentials};

    use super::*;

    type Resolution = (AttemptId, Result<AuthOutcome, AuthError>);

    fn next_resolution(ui_rx: &Receiver<UiEvent>, timeout: Duration) -> Option<Resolution> {
        loop {
            match ui_rx.recv_timeout(timeout) {
                Ok(UiEvent::AuthResolved { attempt, result }) => return Some((attempt, result)),
                Ok(UiEvent::Info(_)) => continue,
                Ok(UiEvent::Error(err)) => panic!("unexpected backend error: {}", err.message()),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn start(
        latency_ms: u64,
    ) -> (
        Sender<BackendCommand>,
        Receiver<UiEvent>,
        thread::JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        let worker = launch(
            cmd_rx,
            ui_tx,
            Arc::new(MockAuthenticator::new(Duration::from_millis(latency_ms))),
        );
        (cmd_tx, ui_rx, worker)
    }

    #[test]
    fn resolves_queued_attempts() {
        let (cmd_tx, ui_rx, worker) = start(20);

        cmd_tx
            .send(BackendCommand::Authenticate {
                attempt: AttemptId(1),
                credentials: Credentials::new("a@b", "abcdef"),
            })
            .expect("send");

        let (attempt, result) =
            next_resolution(&ui_rx, Duration::from_secs(5)).expect("resolution");
        assert_eq!(attempt, AttemptId(1));
        assert_eq!(result, Ok(AuthOutcome::Rejected));

        cmd_tx.send(BackendCommand::Shutdown).expect("send");
        worker.join().expect("worker exits");
    }

    #[test]
    fn cancelled_attempt_reports_nothing() {
        let (cmd_tx, ui_rx, worker) = start(300);

        cmd_tx
            .send(BackendCommand::Authenticate {
                attempt: AttemptId(7),
                credentials: Credentials::new(
                    client_core::REFERENCE_EMAIL,
                    client_core::REFERENCE_PASSWORD,
                ),
            })
            .expect("send");
        cmd_tx
            .send(BackendCommand::Cancel {
                attempt: AttemptId(7),
            })
            .expect("send");

        assert!(next_resolution(&ui_rx, Duration::from_millis(600)).is_none());

        cmd_tx.send(BackendCommand::Shutdown).expect("send");
        worker.join().expect("worker exits");
    }

    #[test]
    fn full_event_queue_delays_result_instead_of_dropping_it() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(1);
        let worker = launch(
            cmd_rx,
            ui_tx,
            Arc::new(MockAuthenticator::new(Duration::from_millis(10))),
        );

        cmd_tx
            .send(BackendCommand::Authenticate {
                attempt: AttemptId(4),
                credentials: Credentials::new("a@b", "abcdef"),
            })
            .expect("send");

        // The startup notice holds the only slot well past the attempt's latency.
        thread::sleep(Duration::from_millis(200));
        assert!(ui_rx.is_full());

        let (attempt, result) =
            next_resolution(&ui_rx, Duration::from_secs(5)).expect("result delivered");
        assert_eq!(attempt, AttemptId(4));
        assert_eq!(result, Ok(AuthOutcome::Rejected));

        cmd_tx.send(BackendCommand::Shutdown).expect("send");
        worker.join().expect("worker exits");
    }

    struct NeverAuthenticator;

    #[async_trait]
    impl Authenticator for NeverAuthenticator {
        async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
            std::future::pending().await
        }
    }

    #[test]
    fn shutdown_cancels_pending_attempts() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(16);
        let worker = launch(cmd_rx, ui_tx, Arc::new(NeverAuthenticator));

        cmd_tx
            .send(BackendCommand::Authenticate {
                attempt: AttemptId(2),
                credentials: Credentials::new("a@b", "abcdef"),
            })
            .expect("send");
        cmd_tx.send(BackendCommand::Shutdown).expect("send");

        worker.join().expect("worker exits despite a never-ending attempt");
        assert!(next_resolution(&ui_rx, Duration::from_millis(50)).is_none());
    }

    #[test]
    fn dropping_the_command_queue_stops_the_worker() {
        let (cmd_tx, _ui_rx, worker) = start(10);
        drop(cmd_tx);
        worker.join().expect("worker exits");
    }
}
