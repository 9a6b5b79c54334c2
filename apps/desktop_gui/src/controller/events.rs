//! UI/backend events and error modeling for the login form controller.

use shared::{
    domain::{AttemptId, AuthOutcome},
    error::AuthError,
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    AuthResolved {
        attempt: AttemptId,
        result: Result<AuthOutcome, AuthError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Login,
}

/// Plumbing failure shown in the status banner (never a credential verdict).
#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("queue")
            || message_lower.contains("disconnect")
            || message_lower.contains("unavailable")
            || message_lower.contains("runtime")
            || message_lower.contains("timeout")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text: a short category label followed by the raw message.
    pub fn banner_text(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Transport => "Backend",
            UiErrorCategory::Unknown => "Unexpected",
        };
        format!("{label}: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_worker_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::Login,
            "Authentication worker disconnected; restart the app",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Login);
    }

    #[test]
    fn classifies_runtime_build_failure_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to build backend runtime: out of threads",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert!(err.banner_text().starts_with("Backend: "));
    }

    #[test]
    fn credential_wording_is_not_treated_as_a_verdict() {
        let err = UiError::from_message(UiErrorContext::Login, "invalid credentials");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.banner_text(), "Unexpected: invalid credentials");
    }

    #[test]
    fn unknown_messages_fall_back_to_unexpected() {
        let err = UiError::from_message(UiErrorContext::Login, "something odd happened");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd happened");
        assert_eq!(err.banner_text(), "Unexpected: something odd happened");
    }
}
