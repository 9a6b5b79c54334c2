//! Login form state and its reducer.
//!
//! The reducer is the only code that mutates [`LoginFormState`]. It never
//! performs I/O: anything that has to leave the UI thread is returned as an
//! [`Effect`] for the app to execute.

use shared::{
    domain::{AttemptId, AuthOutcome, Credentials, Field, SubmissionStatus, UiFlags},
    error::AuthError,
    validation::{validate, ValidationErrors},
};

#[derive(Debug, Clone, Default)]
pub struct LoginFormState {
    pub credentials: Credentials,
    pub errors: ValidationErrors,
    pub status: SubmissionStatus,
    pub flags: UiFlags,
    in_flight: Option<AttemptId>,
    last_attempt: AttemptId,
}

impl LoginFormState {
    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.flags.loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    FieldChanged {
        field: Field,
        value: String,
    },
    SubmitRequested,
    ToggleVisibility,
    AuthResolved {
        attempt: AttemptId,
        result: Result<AuthOutcome, AuthError>,
    },
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Authenticate {
        attempt: AttemptId,
        credentials: Credentials,
    },
    Cancel {
        attempt: AttemptId,
    },
}

pub fn reduce(state: &mut LoginFormState, action: FormAction) -> Option<Effect> {
    match action {
        FormAction::FieldChanged { field, value } => {
            state.credentials.set(field, value);
            state.errors.clear(field);
            None
        }
        FormAction::SubmitRequested => begin_submit(state),
        FormAction::ToggleVisibility => {
            state.flags.password_visible = !state.flags.password_visible;
            None
        }
        FormAction::AuthResolved { attempt, result } => {
            resolve_attempt(state, attempt, result);
            None
        }
        FormAction::Teardown => {
            let attempt = state.in_flight.take()?;
            state.flags.loading = false;
            tracing::debug!(%attempt, "cancelling in-flight attempt on teardown");
            Some(Effect::Cancel { attempt })
        }
    }
}

fn begin_submit(state: &mut LoginFormState) -> Option<Effect> {
    if let Some(attempt) = state.in_flight {
        tracing::debug!(%attempt, "submit ignored; attempt already in flight");
        return None;
    }

    let errors = validate(&state.credentials);
    if !errors.is_empty() {
        tracing::debug!(invalid_fields = errors.len(), "submit blocked by validation");
        state.errors = errors;
        return None;
    }

    let attempt = state.last_attempt.next();
    state.last_attempt = attempt;
    state.in_flight = Some(attempt);
    state.errors.clear_all();
    state.flags.loading = true;
    state.status = SubmissionStatus::Idle;

    Some(Effect::Authenticate {
        attempt,
        credentials: state.credentials.clone(),
    })
}

fn resolve_attempt(
    state: &mut LoginFormState,
    attempt: AttemptId,
    result: Result<AuthOutcome, AuthError>,
) {
    if state.in_flight != Some(attempt) {
        tracing::debug!(%attempt, "dropping result for stale attempt");
        return;
    }

    state.in_flight = None;
    state.flags.loading = false;
    match result {
        Ok(AuthOutcome::Accepted) => {
            state.status = SubmissionStatus::Success;
            state.credentials.clear();
        }
        Ok(AuthOutcome::Rejected) => {
            state.status = SubmissionStatus::Error;
        }
        Err(err) => {
            tracing::warn!(%attempt, "treating failed authentication as rejected: {err}");
            state.status = SubmissionStatus::Error;
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
