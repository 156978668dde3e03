//! Command palette overlay (Ctrl+K), modal over the whole window.

use eframe::egui::{self, Color32, Key};

use crate::commands::{CommandEntry, CommandPalette};
use crate::ui::theme::WispTheme;

const ROW_HEIGHT: f32 = 44.0;

/// Render the palette and handle its keyboard contract.
/// Returns the selected command's value when the user confirms one.
pub fn render_command_palette(
    ctx: &egui::Context,
    palette: &mut CommandPalette,
    registry: &[CommandEntry],
    theme: &WispTheme,
) -> Option<String> {
    if !palette.visible {
        return None;
    }

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        palette.hide();
        return None;
    }
    if ctx.input(|i| i.key_pressed(Key::ArrowDown)) {
        palette.key_down();
    }
    if ctx.input(|i| i.key_pressed(Key::ArrowUp)) {
        palette.key_up();
    }

    let mut confirmed: Option<String> = None;
    if ctx.input(|i| i.key_pressed(Key::Enter)) {
        confirmed = palette.confirm();
        if confirmed.is_some() {
            return confirmed;
        }
    }

    egui::Window::new("Command Palette")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 90.0))
        .fixed_size(egui::vec2(460.0, 360.0))
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(theme.surface[6])
                .stroke(egui::Stroke::new(1.0, theme.border_strong))
                .corner_radius(8.0),
        )
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(">").size(16.0).color(theme.text_muted));
                    ui.add_space(6.0);
                    let search = ui.add(
                        egui::TextEdit::singleline(&mut palette.query)
                            .hint_text("Type a command…")
                            .desired_width(ui.available_width() - 12.0)
                            .font(egui::TextStyle::Heading),
                    );
                    search.request_focus();
                });
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(4.0);

                palette.refresh(registry);

                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    if palette.matches().is_empty() {
                        ui.add_space(32.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("No matching commands")
                                    .size(13.0)
                                    .color(theme.text_muted),
                            );
                        });
                        return;
                    }

                    let matches: Vec<CommandEntry> = palette.matches().to_vec();
                    for (i, cmd) in matches.iter().enumerate() {
                        let is_active = palette.active_index() == Some(i);
                        let response = render_row(ui, cmd, is_active, theme);
                        if response.hovered() {
                            palette.set_active(i);
                        }
                        if response.clicked() {
                            palette.set_active(i);
                            confirmed = palette.confirm();
                            break;
                        }
                    }
                });

                ui.add_space(4.0);
                ui.separator();
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    for hint in ["↑↓ Navigate", "↵ Run", "Esc Close"] {
                        ui.label(
                            egui::RichText::new(hint)
                                .size(11.0)
                                .color(theme.text_muted),
                        );
                        ui.add_space(10.0);
                    }
                });
                ui.add_space(6.0);
            });
        });

    confirmed
}

fn render_row(
    ui: &mut egui::Ui,
    cmd: &CommandEntry,
    is_active: bool,
    theme: &WispTheme,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ROW_HEIGHT),
        egui::Sense::click(),
    );

    let bg = if is_active {
        theme.surface[4]
    } else if response.hovered() {
        theme.surface[3]
    } else {
        Color32::TRANSPARENT
    };
    if is_active || response.hovered() {
        ui.painter().rect_filled(rect, 6.0, bg);
    }

    ui.painter().text(
        egui::pos2(rect.left() + 14.0, rect.center().y - 7.0),
        egui::Align2::LEFT_CENTER,
        &cmd.label,
        egui::FontId::proportional(14.0),
        theme.text_primary,
    );
    ui.painter().text(
        egui::pos2(rect.left() + 14.0, rect.center().y + 10.0),
        egui::Align2::LEFT_CENTER,
        &cmd.value,
        egui::FontId::monospace(11.0),
        theme.text_muted,
    );

    response
}
