//! One submission attempt, end to end, with cancellation.

use shared::{
    domain::{AttemptId, AuthOutcome, Credentials, SubmissionStatus},
    error::AuthError,
    validation::{validate, ValidationErrors},
};
use tokio_util::sync::CancellationToken;

use crate::Authenticator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptReport {
    /// Validation failed; the authenticator was never called.
    Invalid(ValidationErrors),
    Resolved(SubmissionStatus),
    Cancelled,
}

pub struct SubmitDriver<A> {
    authenticator: A,
}

impl<A: Authenticator> SubmitDriver<A> {
    pub fn new(authenticator: A) -> Self {
        Self { authenticator }
    }

    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Races the authenticator against `cancel`. A cancelled attempt drops the
    /// pending call and reports [`AuthError::Cancelled`].
    pub async fn authenticate(
        &self,
        attempt: AttemptId,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<AuthOutcome, AuthError> {
        tracing::info!(
            %attempt,
            email_len = credentials.email.len(),
            "authentication attempt started"
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AuthError::Cancelled),
            result = self.authenticator.authenticate(credentials) => result,
        };

        match &result {
            Ok(outcome) => tracing::info!(%attempt, ?outcome, "authentication attempt resolved"),
            Err(AuthError::Cancelled) => tracing::info!(%attempt, "authentication attempt cancelled"),
            Err(err) => tracing::warn!(%attempt, "authentication attempt failed: {err}"),
        }
        result
    }

    /// Validate, then authenticate. Any failure to get a decision counts as a
    /// failed login; only cancellation is reported separately.
    pub async fn submit(
        &self,
        attempt: AttemptId,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> AttemptReport {
        let errors = validate(credentials);
        if !errors.is_empty() {
            tracing::debug!(%attempt, invalid_fields = errors.len(), "submission rejected by validation");
            return AttemptReport::Invalid(errors);
        }

        match self.authenticate(attempt, credentials, cancel).await {
            Ok(outcome) => AttemptReport::Resolved(outcome.status()),
            Err(AuthError::Cancelled) => AttemptReport::Cancelled,
            Err(_) => AttemptReport::Resolved(SubmissionStatus::Error),
        }
    }
}
