//! @-mention autocomplete overlay, anchored above the message input.

use eframe::egui::{self, Color32, Key};

use crate::mentions::{MentionCandidate, MentionPicker};
use crate::ui::theme::WispTheme;
use crate::ui::widgets::render_avatar;

const ROW_HEIGHT: f32 = 40.0;
const POPUP_WIDTH: f32 = 280.0;

/// Render the mention overlay and handle its keyboard contract.
/// Returns the chosen candidate when the user selects one.
pub fn render_mention_popup(
    ctx: &egui::Context,
    picker: &mut MentionPicker,
    candidates: &[MentionCandidate],
    anchor: egui::Pos2,
    theme: &WispTheme,
) -> Option<MentionCandidate> {
    if !picker.visible {
        return None;
    }

    let query = picker.query.clone();
    picker.set_query(&query, candidates);

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        picker.hide();
        return None;
    }
    if ctx.input(|i| i.key_pressed(Key::ArrowDown)) {
        picker.move_down();
    }
    if ctx.input(|i| i.key_pressed(Key::ArrowUp)) {
        picker.move_up();
    }

    let mut selected: Option<MentionCandidate> = None;
    if ctx.input(|i| i.key_pressed(Key::Enter)) {
        selected = picker.select();
        if selected.is_some() {
            return selected;
        }
    }

    let height = (picker.matches().len().max(1) as f32 * ROW_HEIGHT).min(5.0 * ROW_HEIGHT);

    egui::Area::new(egui::Id::new("wisp-mention-popup"))
        .fixed_pos(egui::pos2(anchor.x, anchor.y - height - 8.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(theme.surface[6])
                .stroke(egui::Stroke::new(1.0, theme.border_strong))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(4))
                .show(ui, |ui| {
                    ui.set_width(POPUP_WIDTH);
                    if picker.matches().is_empty() {
                        ui.add_space(8.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new("No matching people")
                                    .size(12.0)
                                    .color(theme.text_muted),
                            );
                        });
                        ui.add_space(8.0);
                        return;
                    }

                    egui::ScrollArea::vertical()
                        .max_height(5.0 * ROW_HEIGHT)
                        .show(ui, |ui| {
                            let matches: Vec<MentionCandidate> = picker.matches().to_vec();
                            for (i, candidate) in matches.iter().enumerate() {
                                let is_active = picker.active_index() == Some(i);
                                let response = render_row(ui, candidate, is_active, theme);
                                if response.hovered() {
                                    picker.set_active(i);
                                }
                                if response.clicked() {
                                    picker.set_active(i);
                                    selected = picker.select();
                                }
                            }
                        });
                });
        });

    selected
}

fn render_row(
    ui: &mut egui::Ui,
    candidate: &MentionCandidate,
    is_active: bool,
    theme: &WispTheme,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), ROW_HEIGHT),
        egui::Sense::click(),
    );

    if is_active {
        ui.painter().rect_filled(rect, 6.0, theme.surface[4]);
    } else if response.hovered() {
        ui.painter().rect_filled(rect, 6.0, theme.surface[3]);
    } else {
        ui.painter().rect_filled(rect, 6.0, Color32::TRANSPARENT);
    }

    let mut avatar_ui = ui.new_child(egui::UiBuilder::new().max_rect(egui::Rect::from_min_size(
        egui::pos2(rect.left() + 6.0, rect.center().y - 12.0),
        egui::vec2(24.0, 24.0),
    )));
    render_avatar(&mut avatar_ui, &candidate.label, 24.0);

    ui.painter().text(
        egui::pos2(rect.left() + 38.0, rect.center().y - 6.0),
        egui::Align2::LEFT_CENTER,
        &candidate.label,
        egui::FontId::proportional(13.0),
        theme.text_primary,
    );
    if let Some(handle) = candidate.keywords.first() {
        ui.painter().text(
            egui::pos2(rect.left() + 38.0, rect.center().y + 9.0),
            egui::Align2::LEFT_CENTER,
            format!("@{handle}"),
            egui::FontId::proportional(11.0),
            theme.text_muted,
        );
    }

    response
}
