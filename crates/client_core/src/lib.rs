//! Authentication capability used by the login form.
//!
//! The form never talks to a credential check directly; it goes through
//! [`Authenticator`], so the mocked check below can later be swapped for a
//! real network call without touching the controller.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use shared::{
    domain::{AuthOutcome, Credentials},
    error::AuthError,
};

pub mod submit;

pub use submit::{AttemptReport, SubmitDriver};

/// The only pair the mocked check accepts. Not a secret and not configurable.
pub const REFERENCE_EMAIL: &str = "24bai70398@cuchd.in";
pub const REFERENCE_PASSWORD: &str = "Aditya123";

pub const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(2000);

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError>;
}

#[async_trait]
impl<T> Authenticator for Arc<T>
where
    T: Authenticator + ?Sized,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        (**self).authenticate(credentials).await
    }
}

/// Fixed-delay, fixed-answer stand-in for a remote credential check.
///
/// Sleeps for `latency` on the tokio timer, then compares both fields by
/// exact string equality against the reference pair. Wrong email and wrong
/// password are indistinguishable to the caller.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    latency: Duration,
}

impl MockAuthenticator {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn accepts(credentials: &Credentials) -> bool {
        credentials.email == REFERENCE_EMAIL && credentials.password == REFERENCE_PASSWORD
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_LATENCY)
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        tokio::time::sleep(self.latency).await;
        let outcome = if Self::accepts(credentials) {
            AuthOutcome::Accepted
        } else {
            AuthOutcome::Rejected
        };
        tracing::debug!(?outcome, latency_ms = self.latency.as_millis() as u64, "mock authentication resolved");
        Ok(outcome)
    }
}

/// Authenticator for setups where no backend is wired; every attempt fails.
pub struct MissingAuthenticator;

#[async_trait]
impl Authenticator for MissingAuthenticator {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AuthOutcome, AuthError> {
        Err(AuthError::Unavailable(
            "no authenticator configured".to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
