//! Wisp color themes and text styles.
//!
//! The theme is always passed explicitly to renderers; nothing reads a
//! global. A 7-level surface ladder gives depth ordering (app background up
//! to modal overlays), with semantic colors for states and a four-step text
//! hierarchy.
//!
//! - `surface[0]`: app background
//! - `surface[1]`: sidebar / rail
//! - `surface[2]`: message area
//! - `surface[3]`: hover
//! - `surface[4]`: active selection
//! - `surface[5]`: elevated panels
//! - `surface[6]`: modals and popovers

use eframe::egui::{Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct WispTheme {
    pub name: String,
    pub surface: [Color32; 7],
    pub accent: Color32,
    pub accent_hover: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_disabled: Color32,
    pub border_subtle: Color32,
    pub border_medium: Color32,
    pub border_strong: Color32,
    /// Bubble fill for the local user's messages.
    pub own_bubble: Color32,
    /// Ring color for the active speaker tile.
    pub speaking_ring: Color32,
}

impl WispTheme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(13, 14, 18),   // app background
                Color32::from_rgb(20, 22, 28),   // sidebar
                Color32::from_rgb(27, 30, 38),   // message area
                Color32::from_rgb(36, 40, 50),   // hover
                Color32::from_rgb(45, 50, 62),   // active selection
                Color32::from_rgb(54, 60, 74),   // elevated panels
                Color32::from_rgb(63, 70, 86),   // modals
            ],
            accent: Color32::from_rgb(64, 186, 173),
            accent_hover: Color32::from_rgb(52, 158, 147),
            success: Color32::from_rgb(87, 190, 120),
            warning: Color32::from_rgb(235, 170, 50),
            error: Color32::from_rgb(232, 84, 84),
            info: Color32::from_rgb(86, 156, 240),
            text_primary: Color32::from_rgb(240, 243, 247),
            text_secondary: Color32::from_rgb(178, 185, 196),
            text_muted: Color32::from_rgb(120, 127, 140),
            text_disabled: Color32::from_rgb(82, 88, 100),
            border_subtle: Color32::from_rgb(34, 37, 45),
            border_medium: Color32::from_rgb(48, 52, 63),
            border_strong: Color32::from_rgb(68, 74, 89),
            own_bubble: Color32::from_rgb(33, 66, 62),
            speaking_ring: Color32::from_rgb(64, 186, 173),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 247, 249),
                Color32::from_rgb(240, 242, 245),
                Color32::from_rgb(228, 231, 236),
                Color32::from_rgb(214, 219, 227),
                Color32::from_rgb(199, 206, 216),
                Color32::from_rgb(184, 192, 205),
            ],
            accent: Color32::from_rgb(24, 147, 134),
            accent_hover: Color32::from_rgb(19, 122, 111),
            success: Color32::from_rgb(46, 150, 82),
            warning: Color32::from_rgb(198, 134, 18),
            error: Color32::from_rgb(205, 60, 60),
            info: Color32::from_rgb(44, 112, 196),
            text_primary: Color32::from_rgb(18, 21, 26),
            text_secondary: Color32::from_rgb(74, 82, 94),
            text_muted: Color32::from_rgb(118, 128, 142),
            text_disabled: Color32::from_rgb(176, 184, 196),
            border_subtle: Color32::from_rgb(231, 234, 238),
            border_medium: Color32::from_rgb(211, 216, 223),
            border_strong: Color32::from_rgb(182, 189, 199),
            own_bubble: Color32::from_rgb(210, 238, 233),
            speaking_ring: Color32::from_rgb(24, 147, 134),
        }
    }

    /// Pick the theme matching a settings value ("dark"/"light").
    pub fn by_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

/// Stable per-sender colors for names and avatars.
const SENDER_PALETTE: [Color32; 8] = [
    Color32::from_rgb(230, 126, 109),
    Color32::from_rgb(226, 178, 78),
    Color32::from_rgb(129, 199, 110),
    Color32::from_rgb(83, 190, 180),
    Color32::from_rgb(96, 160, 234),
    Color32::from_rgb(160, 130, 232),
    Color32::from_rgb(222, 120, 191),
    Color32::from_rgb(150, 166, 97),
];

/// Deterministic color for a sender name (FNV-1a over the name).
pub fn sender_color(name: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603;
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211);
    }
    SENDER_PALETTE[(hash % SENDER_PALETTE.len() as u64) as usize]
}

/// Text style ladder: small metadata, body copy, headers, monospace.
pub fn text_styles() -> BTreeMap<TextStyle, FontId> {
    let mut styles = BTreeMap::new();
    styles.insert(TextStyle::Small, FontId::new(10.0, FontFamily::Proportional));
    styles.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    styles.insert(TextStyle::Button, FontId::new(13.0, FontFamily::Proportional));
    styles.insert(TextStyle::Heading, FontId::new(17.0, FontFamily::Proportional));
    styles.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));
    styles
}

/// Apply theme-wide visuals and text styles to the egui context.
pub fn apply_app_style(ctx: &eframe::egui::Context, theme: &WispTheme) {
    let mut style = (*ctx.style()).clone();
    style.text_styles = text_styles();
    style.visuals.panel_fill = theme.surface[0];
    style.visuals.window_fill = theme.surface[6];
    style.visuals.widgets.noninteractive.bg_fill = theme.surface[1];
    style.visuals.widgets.inactive.bg_fill = theme.surface[2];
    style.visuals.widgets.hovered.bg_fill = theme.surface[3];
    style.visuals.widgets.active.bg_fill = theme.surface[4];
    style.visuals.selection.bg_fill = theme.accent;
    style.visuals.hyperlink_color = theme.info;
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_color_deterministic() {
        assert_eq!(sender_color("alice"), sender_color("alice"));
    }

    #[test]
    fn test_sender_color_spreads() {
        // Not a strong guarantee, just a sanity check that the hash isn't
        // collapsing everything onto one palette slot.
        let distinct: std::collections::HashSet<_> = ["alice", "bob", "carol", "dev", "eve"]
            .iter()
            .map(|n| sender_color(n).to_array())
            .collect();
        assert!(distinct.len() >= 3);
    }

    #[test]
    fn test_theme_by_name() {
        assert_eq!(WispTheme::by_name("light").name, "Light");
        assert_eq!(WispTheme::by_name("LIGHT").name, "Light");
        assert_eq!(WispTheme::by_name("dark").name, "Dark");
        assert_eq!(WispTheme::by_name("unknown").name, "Dark");
    }

    #[test]
    fn test_surface_ladder_monotonic_in_dark() {
        let theme = WispTheme::dark();
        for pair in theme.surface.windows(2) {
            assert!(pair[0].r() <= pair[1].r(), "dark surfaces should brighten upward");
        }
    }
}
