//! Shared small widgets: identicon avatars and status badges.

use eframe::egui::{self, Color32};

use super::theme::{sender_color, WispTheme};

/// Render a circular avatar for a display name: a dot-matrix glyph derived
/// from a hash of the name over the sender's palette color, so the same
/// person always gets the same avatar.
pub fn render_avatar(ui: &mut egui::Ui, name: &str, size: f32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());

    let bg_color = sender_color(name);
    let painter = ui.painter();

    painter.circle_filled(rect.center(), size / 2.0, bg_color);

    let pattern = identicon_pattern(name);
    let fg_color = Color32::from_white_alpha(210);
    let cell = size / 6.0;
    let offset = cell * 0.5;

    for col in 0..5 {
        // Mirror across the vertical axis.
        let pattern_col = col.min(4 - col);
        for row in 0..5 {
            let bit = pattern_col * 5 + row;
            if pattern & (1 << bit) == 0 {
                continue;
            }
            let center = egui::pos2(
                rect.left() + offset + (col as f32 + 0.5) * cell,
                rect.top() + offset + (row as f32 + 0.5) * cell,
            );
            // Skip dots that would poke past the circular edge.
            if (center - rect.center()).length() < size / 2.0 - cell * 0.45 {
                painter.circle_filled(center, cell * 0.36, fg_color);
            }
        }
    }

    painter.circle_stroke(
        rect.center(),
        size / 2.0,
        egui::Stroke::new(1.0, Color32::from_white_alpha(20)),
    );

    response
}

/// 15-bit dot pattern for a mirrored 5x5 glyph, column-major over the three
/// distinct columns. Bit 12 pins the middle dot so no name hashes to an
/// empty face.
pub fn identicon_pattern(name: &str) -> u16 {
    let mut hash: u32 = 2166136261;
    for b in name.as_bytes() {
        hash ^= u32::from(*b);
        hash = hash.wrapping_mul(16777619);
    }
    hash ^= hash >> 15;
    (hash as u16 & 0x7FFF) | 0x1000
}

/// Small rounded pill with a short label, used for mute/camera badges.
pub fn render_badge(ui: &mut egui::Ui, label: &str, fill: Color32, theme: &WispTheme) {
    egui::Frame::new()
        .fill(fill)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(label)
                    .size(10.0)
                    .color(theme.text_primary),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identicon_deterministic() {
        assert_eq!(identicon_pattern("Alice Chen"), identicon_pattern("Alice Chen"));
        assert_ne!(identicon_pattern("Alice Chen"), identicon_pattern("Bob Park"));
    }

    #[test]
    fn test_identicon_middle_dot_pinned() {
        for name in ["x", "", "Carol Alvarez"] {
            assert_ne!(identicon_pattern(name) & 0x1000, 0);
        }
    }
}
