//! Backend commands queued from UI to backend worker.

use shared::domain::{AttemptId, Credentials};

#[derive(Debug)]
pub enum BackendCommand {
    Authenticate {
        attempt: AttemptId,
        credentials: Credentials,
    },
    Cancel {
        attempt: AttemptId,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Authenticate { .. } => "authenticate",
            BackendCommand::Cancel { .. } => "cancel",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
