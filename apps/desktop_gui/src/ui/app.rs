use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::Field;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::{dispatch_backend_command, execute_effect};
use crate::controller::reducer::{reduce, FormAction, LoginFormState};
use crate::ui::theme;
use crate::ui::view::{self, view_model, Banner, LoginViewModel};

struct FieldResponse {
    response: egui::Response,
    toggled: bool,
}

pub struct LoginFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: LoginFormState,

    status: String,
    status_banner: Option<UiError>,

    focus: Option<Field>,
    visuals_applied: bool,
    torn_down: bool,
}

impl LoginFormApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: LoginFormState::default(),
            status: "Backend worker not started".to_string(),
            status_banner: None,
            focus: Some(Field::Email),
            visuals_applied: false,
            torn_down: false,
        }
    }

    /// Feeds `action` through the reducer and executes the resulting effect,
    /// including any follow-up action the effect produces.
    pub fn apply(&mut self, action: FormAction) {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let Some(effect) = reduce(&mut self.form, action) else {
                break;
            };
            let (follow_up, err) = execute_effect(&self.cmd_tx, effect);
            if let Some(err) = err {
                self.status = err.message().to_string();
                self.status_banner = Some(err);
            }
            next = follow_up;
        }
    }

    fn submit(&mut self) {
        self.apply(FormAction::SubmitRequested);
        if let Some((field, _)) = self.form.errors.iter().next() {
            self.focus = Some(field);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    tracing::debug!("backend: {message}");
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "backend error: {}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    self.status_banner = Some(err);
                }
                UiEvent::AuthResolved { attempt, result } => {
                    self.apply(FormAction::AuthResolved { attempt, result });
                }
            }
        }
    }

    /// Cancels any in-flight attempt and stops the backend worker. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(attempt) = self.form.in_flight() {
            tracing::info!(%attempt, "cancelling pending sign-in on exit");
        }
        self.apply(FormAction::Teardown);
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown) {
            tracing::debug!("backend already stopped: {}", err.message());
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.banner_text()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
    }

    fn show_login_screen(&mut self, ctx: &egui::Context) {
        let vm = view_model(&self.form);
        let focus_to_set = self.focus.take();
        let mut actions = Vec::new();
        let mut submit_requested = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            let avail = ui.available_size();
            ui.add_space((avail.y * 0.08).clamp(12.0, 60.0));

            ui.vertical_centered(|ui| {
                ui.set_width(theme::CARD_WIDTH.min(avail.x));

                egui::Frame::NONE
                    .fill(theme::CARD_FILL)
                    .corner_radius(16.0)
                    .stroke(egui::Stroke::new(1.0, theme::CARD_STROKE))
                    .inner_margin(egui::Margin::symmetric(28, 24))
                    .show(ui, |ui| {
                        ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);

                        show_header(ui);
                        self.show_status_banner(ui);
                        if let Some(banner) = &vm.banner {
                            show_outcome_banner(ui, banner);
                        }

                        let mut email_buf = self.form.credentials.email.clone();
                        let email = credential_field(
                            ui,
                            "login_email",
                            "Email Address",
                            "you@example.com",
                            &mut email_buf,
                            false,
                            None,
                            vm.field_error(Field::Email),
                            focus_to_set == Some(Field::Email),
                        );
                        if email_buf != self.form.credentials.email {
                            actions.push(FormAction::FieldChanged {
                                field: Field::Email,
                                value: email_buf,
                            });
                        }

                        let mut password_buf = self.form.credentials.password.clone();
                        let password = credential_field(
                            ui,
                            "login_password",
                            "Password",
                            "••••••••",
                            &mut password_buf,
                            vm.password_masked,
                            Some(vm.visibility_toggle_label),
                            vm.field_error(Field::Password),
                            focus_to_set == Some(Field::Password),
                        );
                        if password_buf != self.form.credentials.password {
                            actions.push(FormAction::FieldChanged {
                                field: Field::Password,
                                value: password_buf,
                            });
                        }
                        if password.toggled {
                            actions.push(FormAction::ToggleVisibility);
                        }

                        // Enter in either field submits, like a form would.
                        let enter_pressed = ctx.input(|i| i.key_pressed(egui::Key::Enter));
                        let field_active = email.response.lost_focus()
                            || email.response.has_focus()
                            || password.response.lost_focus()
                            || password.response.has_focus();
                        if enter_pressed && field_active && vm.submit.enabled {
                            submit_requested = true;
                        }

                        ui.add_space(6.0);
                        if show_submit_button(ui, &vm) {
                            submit_requested = true;
                        }

                        ui.add_space(4.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });

        for action in actions {
            self.apply(action);
        }
        if submit_requested {
            self.submit();
        }
    }
}

fn show_header(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("🔒").size(32.0).color(theme::ACCENT));
        ui.label(
            egui::RichText::new(view::TITLE)
                .strong()
                .size(24.0)
                .color(theme::HEADING_TEXT),
        );
        ui.label(egui::RichText::new(view::SUBTITLE).color(theme::MUTED_TEXT));
    });
    ui.add_space(8.0);
}

fn show_outcome_banner(ui: &mut egui::Ui, banner: &Banner) {
    let colors = theme::banner_colors(banner.kind);
    egui::Frame::NONE
        .fill(colors.fill)
        .stroke(egui::Stroke::new(1.0, colors.stroke))
        .corner_radius(12.0)
        .inner_margin(egui::Margin::symmetric(14, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(colors.icon).color(colors.text));
                ui.label(
                    egui::RichText::new(banner.message)
                        .strong()
                        .color(colors.text),
                );
            });
        });
}

#[allow(clippy::too_many_arguments)]
fn credential_field(
    ui: &mut egui::Ui,
    id: &'static str,
    label: &str,
    hint: &str,
    value: &mut String,
    masked: bool,
    toggle_label: Option<&str>,
    error: Option<&str>,
    should_focus: bool,
) -> FieldResponse {
    ui.label(
        egui::RichText::new(label)
            .strong()
            .color(theme::HEADING_TEXT),
    );

    let mut toggled = false;
    let response = egui::Frame::NONE
        .fill(theme::FIELD_FILL)
        .stroke(theme::field_stroke(error.is_some()))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let toggle_width = if toggle_label.is_some() { 56.0 } else { 0.0 };
                let edit = egui::TextEdit::singleline(value)
                    .id_salt(id)
                    .password(masked)
                    .frame(false)
                    .hint_text(egui::RichText::new(hint).color(theme::MUTED_TEXT))
                    .desired_width(f32::INFINITY);
                let response =
                    ui.add_sized([ui.available_width() - toggle_width, theme::FIELD_HEIGHT], edit);

                if let Some(toggle_label) = toggle_label {
                    let toggle = egui::Button::new(
                        egui::RichText::new(toggle_label).color(theme::MUTED_TEXT),
                    )
                    .frame(false);
                    if ui.add_sized([48.0, theme::FIELD_HEIGHT], toggle).clicked() {
                        toggled = true;
                    }
                }
                response
            })
            .inner
        })
        .inner;

    if should_focus {
        response.request_focus();
    }

    if let Some(error) = error {
        ui.label(
            egui::RichText::new(error)
                .small()
                .color(theme::ERROR_TEXT),
        );
    }

    FieldResponse { response, toggled }
}

/// Returns whether the button was clicked.
fn show_submit_button(ui: &mut egui::Ui, vm: &LoginViewModel) -> bool {
    let label = if vm.submit.busy {
        egui::RichText::new("")
    } else {
        egui::RichText::new(vm.submit.label)
            .strong()
            .size(16.0)
            .color(egui::Color32::WHITE)
    };
    let fill = if vm.submit.enabled {
        theme::ACCENT
    } else {
        theme::ACCENT_DISABLED
    };
    let button = egui::Button::new(label)
        .fill(fill)
        .corner_radius(10.0)
        .min_size(egui::vec2(ui.available_width(), 44.0));

    let response = ui.add_enabled(vm.submit.enabled, button);
    if vm.submit.busy {
        let spinner_rect = egui::Rect::from_center_size(response.rect.center(), egui::vec2(20.0, 20.0));
        egui::Spinner::new()
            .color(egui::Color32::WHITE)
            .paint_at(ui, spinner_rect);
    }
    response.clicked()
}

impl eframe::App for LoginFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.visuals_applied {
            ctx.set_visuals(theme::light_visuals());
            self.visuals_applied = true;
        }

        self.process_ui_events();
        self.show_login_screen(ctx);

        if self.form.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for LoginFormApp {
    fn drop(&mut self) {
        self.teardown();
    }
}
