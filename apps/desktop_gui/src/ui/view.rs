//! Pure mapping from form state to what the login card shows.

use shared::domain::{Field, SubmissionStatus};

use crate::controller::reducer::LoginFormState;

pub const TITLE: &str = "Secure Login";
pub const SUBTITLE: &str = "Enter your credentials to access your account";
pub const SUCCESS_MESSAGE: &str = "Login Successful! Welcome back.";
pub const FAILURE_MESSAGE: &str = "Invalid credentials. Please try again.";
pub const SUBMIT_LABEL: &str = "Sign In";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub busy: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginViewModel {
    pub banner: Option<Banner>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub password_masked: bool,
    pub visibility_toggle_label: &'static str,
    pub submit: SubmitControl,
}

impl LoginViewModel {
    pub fn field_error(&self, field: Field) -> Option<&str> {
        match field {
            Field::Email => self.email_error.as_deref(),
            Field::Password => self.password_error.as_deref(),
        }
    }
}

pub fn view_model(state: &LoginFormState) -> LoginViewModel {
    let banner = match state.status {
        SubmissionStatus::Idle => None,
        SubmissionStatus::Success => Some(Banner {
            kind: BannerKind::Success,
            message: SUCCESS_MESSAGE,
        }),
        SubmissionStatus::Error => Some(Banner {
            kind: BannerKind::Error,
            message: FAILURE_MESSAGE,
        }),
    };
    let loading = state.flags.loading;
    let visible = state.flags.password_visible;

    LoginViewModel {
        banner,
        email_error: state.errors.get(Field::Email).map(|e| e.to_string()),
        password_error: state.errors.get(Field::Password).map(|e| e.to_string()),
        password_masked: !visible,
        visibility_toggle_label: if visible { "Hide" } else { "Show" },
        submit: SubmitControl {
            enabled: !loading,
            busy: loading,
            label: SUBMIT_LABEL,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::reducer::{reduce, FormAction};
    use shared::domain::{AttemptId, AuthOutcome};

    #[test]
    fn fresh_form_has_no_banner_and_idle_submit() {
        let vm = view_model(&LoginFormState::default());
        assert_eq!(vm.banner, None);
        assert_eq!(vm.field_error(Field::Email), None);
        assert!(vm.password_masked);
        assert_eq!(vm.visibility_toggle_label, "Show");
        assert_eq!(
            vm.submit,
            SubmitControl {
                enabled: true,
                busy: false,
                label: "Sign In",
            }
        );
    }

    #[test]
    fn validation_errors_render_inline() {
        let mut state = LoginFormState::default();
        reduce(&mut state, FormAction::SubmitRequested);

        let vm = view_model(&state);
        assert_eq!(vm.field_error(Field::Email), Some("Email is required"));
        assert_eq!(vm.field_error(Field::Password), Some("Password is required"));
        assert_eq!(vm.banner, None);
    }

    #[test]
    fn loading_disables_submit_and_shows_busy() {
        let mut state = LoginFormState::default();
        state.credentials.email = "a@b".into();
        state.credentials.password = "abcdef".into();
        reduce(&mut state, FormAction::SubmitRequested);

        let vm = view_model(&state);
        assert!(!vm.submit.enabled);
        assert!(vm.submit.busy);
    }

    #[test]
    fn outcomes_map_to_banners() {
        let mut state = LoginFormState::default();
        state.credentials.email = "a@b".into();
        state.credentials.password = "abcdef".into();
        reduce(&mut state, FormAction::SubmitRequested);
        reduce(
            &mut state,
            FormAction::AuthResolved {
                attempt: AttemptId(1),
                result: Ok(AuthOutcome::Rejected),
            },
        );

        let banner = view_model(&state).banner.expect("error banner");
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, "Invalid credentials. Please try again.");

        state.status = SubmissionStatus::Success;
        let banner = view_model(&state).banner.expect("success banner");
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.message, "Login Successful! Welcome back.");
    }

    #[test]
    fn visible_password_is_unmasked() {
        let mut state = LoginFormState::default();
        reduce(&mut state, FormAction::ToggleVisibility);

        let vm = view_model(&state);
        assert!(!vm.password_masked);
        assert_eq!(vm.visibility_toggle_label, "Hide");
    }
}
