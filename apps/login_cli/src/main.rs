use std::{process::ExitCode, time::Duration};

use anyhow::Result;
use clap::Parser;
use client_core::{AttemptReport, MockAuthenticator, SubmitDriver, DEFAULT_AUTH_LATENCY};
use shared::domain::{AttemptId, Credentials, SubmissionStatus};
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Runs one sign-in attempt against the mocked authenticator without a window.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long, default_value_t = DEFAULT_AUTH_LATENCY.as_millis() as u64)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let credentials = Credentials::new(args.email, args.password);
    let driver = SubmitDriver::new(MockAuthenticator::new(Duration::from_millis(
        args.latency_ms,
    )));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let attempt = AttemptId(1);
    tracing::info!(%attempt, email_len = credentials.email.len(), "submitting sign-in attempt");
    let report = driver.submit(attempt, &credentials, &cancel).await;
    log_report(attempt, &report);
    let (message, code) = render_report(&report);
    println!("{message}");
    Ok(ExitCode::from(code))
}

/// Logs the outcome and returns the level it was logged at.
fn log_report(attempt: AttemptId, report: &AttemptReport) -> Level {
    match report {
        AttemptReport::Resolved(SubmissionStatus::Success) => {
            tracing::info!(%attempt, "sign-in accepted");
            Level::INFO
        }
        AttemptReport::Resolved(status) => {
            tracing::info!(%attempt, ?status, "sign-in rejected");
            Level::INFO
        }
        AttemptReport::Invalid(errors) => {
            tracing::info!(%attempt, invalid_fields = errors.len(), "sign-in not submitted");
            Level::INFO
        }
        AttemptReport::Cancelled => {
            tracing::warn!(%attempt, "sign-in interrupted before the authenticator answered");
            Level::WARN
        }
    }
}

fn render_report(report: &AttemptReport) -> (String, u8) {
    match report {
        AttemptReport::Resolved(SubmissionStatus::Success) => {
            ("Login Successful! Welcome back.".to_string(), 0)
        }
        AttemptReport::Resolved(SubmissionStatus::Error | SubmissionStatus::Idle) => {
            ("Invalid credentials. Please try again.".to_string(), 1)
        }
        AttemptReport::Invalid(errors) => {
            let lines: Vec<String> = errors
                .iter()
                .map(|(field, error)| format!("{field}: {error}"))
                .collect();
            (lines.join("\n"), 2)
        }
        AttemptReport::Cancelled => ("Sign-in cancelled.".to_string(), 130),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::validation::validate;

    #[test]
    fn success_exits_zero() {
        let (message, code) = render_report(&AttemptReport::Resolved(SubmissionStatus::Success));
        assert_eq!(code, 0);
        assert_eq!(message, "Login Successful! Welcome back.");
    }

    #[test]
    fn rejection_exits_one_with_generic_message() {
        let (message, code) = render_report(&AttemptReport::Resolved(SubmissionStatus::Error));
        assert_eq!(code, 1);
        assert_eq!(message, "Invalid credentials. Please try again.");
    }

    #[test]
    fn validation_failures_list_each_field() {
        let errors = validate(&Credentials::new("nope", ""));
        let (message, code) = render_report(&AttemptReport::Invalid(errors));
        assert_eq!(code, 2);
        assert_eq!(
            message,
            "email: Invalid email format\npassword: Password is required"
        );
    }

    #[test]
    fn interrupted_attempt_logs_a_warning_and_exits_130() {
        let report = AttemptReport::Cancelled;
        assert_eq!(log_report(AttemptId(1), &report), Level::WARN);
        assert_eq!(render_report(&report).1, 130);
    }

    #[test]
    fn finished_attempts_log_at_info() {
        let invalid = AttemptReport::Invalid(validate(&Credentials::new("", "")));
        for report in [
            AttemptReport::Resolved(SubmissionStatus::Success),
            AttemptReport::Resolved(SubmissionStatus::Error),
            invalid,
        ] {
            assert_eq!(log_report(AttemptId(3), &report), Level::INFO);
        }
    }

    #[test]
    fn args_default_to_two_second_latency() {
        let args = Args::parse_from(["login_cli", "--email", "a@b", "--password", "abcdef"]);
        assert_eq!(args.latency_ms, 2000);
    }
}
