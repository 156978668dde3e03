//! Participant tile grid for the call view.

use eframe::egui::{self, Color32};

use crate::grid::{GridLayout, GridParticipant};
use crate::ui::theme::{sender_color, WispTheme};
use crate::ui::widgets::{render_avatar, render_badge};

const TILE_SPACING: f32 = 8.0;

/// Render all participants as a tile grid filling the available rect.
/// Column/row counts come from `grid::GridLayout`; an empty participant
/// list renders a placeholder instead of an empty grid.
///
/// Returns the id of a clicked tile, if any.
pub fn render_video_grid(
    ui: &mut egui::Ui,
    participants: &[GridParticipant],
    theme: &WispTheme,
) -> Option<String> {
    if participants.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Nobody is in the call")
                    .size(15.0)
                    .color(theme.text_muted),
            );
        });
        return None;
    }

    let layout = GridLayout::for_count(participants.len());
    let (width_frac, height_frac) = layout.tile_fraction();
    let area = ui.available_rect_before_wrap();
    let tile_w = area.width() * width_frac - TILE_SPACING;
    let tile_h = area.height() * height_frac - TILE_SPACING;

    let mut clicked: Option<String> = None;

    for row in 0..layout.rows {
        let start = row * layout.columns;
        let end = (start + layout.columns).min(participants.len());
        ui.horizontal(|ui| {
            ui.add_space(TILE_SPACING / 2.0);
            for participant in &participants[start..end] {
                if render_tile(ui, participant, egui::vec2(tile_w, tile_h), theme).clicked() {
                    clicked = Some(participant.id.clone());
                }
                ui.add_space(TILE_SPACING / 2.0);
            }
        });
        ui.add_space(TILE_SPACING / 2.0);
    }

    clicked
}

/// One participant tile: camera placeholder or avatar, name plate, and
/// mute/camera badges, with an accent ring while speaking.
fn render_tile(
    ui: &mut egui::Ui,
    participant: &GridParticipant,
    size: egui::Vec2,
    theme: &WispTheme,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let painter = ui.painter_at(rect);

    let fill = if participant.is_camera_off {
        theme.surface[3]
    } else {
        // Camera "feed" placeholder: tinted with the participant's color.
        sender_color(&participant.display_name).linear_multiply(0.25)
    };
    painter.rect_filled(rect, 8.0, fill);

    if participant.is_speaking {
        painter.rect_stroke(
            rect.shrink(1.0),
            8.0,
            egui::Stroke::new(2.0, theme.speaking_ring),
            egui::StrokeKind::Inside,
        );
    } else {
        painter.rect_stroke(
            rect.shrink(0.5),
            8.0,
            egui::Stroke::new(1.0, theme.border_medium),
            egui::StrokeKind::Inside,
        );
    }

    // Centered avatar when the camera is off.
    if participant.is_camera_off {
        let avatar_size = (size.y * 0.35).clamp(24.0, 64.0);
        let avatar_rect = egui::Rect::from_center_size(
            rect.center() - egui::vec2(0.0, 8.0),
            egui::vec2(avatar_size, avatar_size),
        );
        let mut child = ui.new_child(egui::UiBuilder::new().max_rect(avatar_rect));
        render_avatar(&mut child, &participant.display_name, avatar_size);
    }

    // Name plate, bottom-left.
    painter.text(
        egui::pos2(rect.left() + 10.0, rect.bottom() - 12.0),
        egui::Align2::LEFT_CENTER,
        &participant.display_name,
        egui::FontId::proportional(13.0),
        theme.text_primary,
    );

    // Status badges, bottom-right.
    let badge_rect = egui::Rect::from_min_max(
        egui::pos2(rect.right() - 96.0, rect.bottom() - 26.0),
        egui::pos2(rect.right() - 6.0, rect.bottom() - 4.0),
    );
    let mut badges = ui.new_child(egui::UiBuilder::new().max_rect(badge_rect));
    badges.horizontal(|ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if participant.is_muted {
                render_badge(ui, "muted", theme.error.linear_multiply(0.6), theme);
            }
            if participant.is_camera_off {
                render_badge(ui, "cam off", Color32::from_black_alpha(120), theme);
            }
        });
    });

    response
}
