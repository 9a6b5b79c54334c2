use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "login_form.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub auth_latency_ms: u64,
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_latency_ms: 2000,
            log_filter: "info".into(),
            window_width: 480.0,
            window_height: 640.0,
        }
    }
}

impl Settings {
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    auth_latency_ms: Option<u64>,
    log_filter: Option<String>,
    window_width: Option<f32>,
    window_height: Option<f32>,
}

/// Defaults, then the TOML file at `path` (if present), then environment
/// overrides. Skipped or malformed overrides are recorded in `notes` so they
/// can be logged once tracing is up.
pub fn load_settings(path: &Path, notes: &mut Vec<String>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<FileSettings>(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            apply_file_settings(&mut settings, file_cfg);
            notes.push(format!("loaded settings from '{}'", path.display()));
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok(), notes);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.auth_latency_ms {
        settings.auth_latency_ms = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.window_width {
        settings.window_width = v;
    }
    if let Some(v) = file_cfg.window_height {
        settings.window_height = v;
    }
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
    notes: &mut Vec<String>,
) {
    for name in ["LOGIN_FORM_AUTH_LATENCY_MS", "APP__AUTH_LATENCY_MS"] {
        let Some(raw) = read_non_empty(&lookup, name, notes) else {
            continue;
        };
        match raw.trim().parse::<u64>() {
            Ok(parsed) => settings.auth_latency_ms = parsed,
            Err(err) => notes.push(format!("ignoring {name}={raw:?}: {err}")),
        }
    }

    if let Some(filter) = read_non_empty(&lookup, "LOGIN_FORM_LOG_FILTER", notes) {
        settings.log_filter = filter;
    }
}

fn read_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    notes: &mut Vec<String>,
) -> Option<String> {
    match lookup(name) {
        Some(value) if value.trim().is_empty() => {
            notes.push(format!("{name} was set but empty"));
            None
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
