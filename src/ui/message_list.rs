//! Grouped message-list rendering.
//!
//! Consumes the caller's timeline (messages plus separators), derives the
//! grouped view via `timeline::group_entries`, and renders one avatar/header
//! per group with compact continuation rows. Scroll geometry is fed into the
//! caller's `ScrollTracker` every frame; the function reports load-older and
//! jump-to-bottom events back as plain values.

use eframe::egui::{self, Color32};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::scroll::{ScrollTracker, TOP_SENTINEL_HEIGHT};
use crate::timeline::{group_entries, MessageEntry, TimelineEntry, TimelineItem};
use crate::ui::theme::{sender_color, WispTheme};
use crate::ui::widgets::render_avatar;

const AVATAR_SIZE: f32 = 36.0;
const GUTTER: f32 = 12.0;

/// Events produced by one frame of the message list.
#[derive(Default)]
pub struct MessageListResponse {
    /// The top sentinel became visible; the caller should fetch older
    /// history (at most once per crossing).
    pub load_older: bool,
    /// The jump-to-bottom affordance was clicked.
    pub jump_clicked: bool,
}

/// Render the timeline into a vertical scroll area.
///
/// `scroll_to_bottom` forces the view to the newest message this frame
/// (used right after sending, or after a jump click).
pub fn render_message_list(
    ui: &mut egui::Ui,
    entries: &[TimelineEntry],
    tracker: &mut ScrollTracker,
    show_timestamps: bool,
    scroll_to_bottom: bool,
    theme: &WispTheme,
) -> MessageListResponse {
    let mut response = MessageListResponse::default();

    let mut scroll_area = egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(tracker.should_stick_to_bottom());
    if scroll_to_bottom {
        // Clamped by the scroll area to the real content extent.
        scroll_area = scroll_area.vertical_scroll_offset(1_000_000.0);
    }

    let output = scroll_area.show(ui, |ui| {
        // Leading-edge sentinel: a fixed-height row that doubles as the
        // loading indicator while history is in flight.
        ui.allocate_ui(egui::vec2(ui.available_width(), TOP_SENTINEL_HEIGHT), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(14.0);
                if tracker.loading_more {
                    ui.spinner();
                } else if !tracker.has_more {
                    ui.label(
                        egui::RichText::new("Beginning of conversation")
                            .size(12.0)
                            .color(theme.text_muted),
                    );
                }
            });
        });

        if entries.is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("No messages yet")
                        .size(14.0)
                        .color(theme.text_muted),
                );
            });
            return;
        }

        for item in group_entries(entries) {
            match item {
                TimelineItem::Group(messages) => {
                    render_group(ui, &messages, show_timestamps, theme);
                }
                TimelineItem::Divider(entry) => render_divider(ui, entry, theme),
            }
        }
        ui.add_space(8.0);
    });

    tracker.update(
        output.state.offset.y,
        output.content_size.y,
        output.inner_rect.height(),
    );
    response.load_older = tracker.take_load_more();

    if tracker.show_jump_to_bottom() {
        let area = output.inner_rect;
        let button_rect = egui::Rect::from_center_size(
            egui::pos2(area.center().x, area.bottom() - 24.0),
            egui::vec2(140.0, 28.0),
        );
        let clicked = ui
            .put(
                button_rect,
                egui::Button::new(
                    egui::RichText::new("↓ Jump to latest")
                        .size(12.0)
                        .color(theme.text_primary),
                )
                .fill(theme.surface[5])
                .corner_radius(14.0),
            )
            .clicked();
        if clicked {
            response.jump_clicked = true;
        }
    }

    response
}

/// One group: avatar + sender header, then the run of message bodies.
fn render_group(
    ui: &mut egui::Ui,
    messages: &[&MessageEntry],
    show_timestamps: bool,
    theme: &WispTheme,
) {
    let first = match messages.first() {
        Some(first) => first,
        None => return,
    };

    ui.add_space(10.0);
    ui.horizontal_top(|ui| {
        ui.add_space(GUTTER);
        render_avatar(ui, &first.sender, AVATAR_SIZE);
        ui.add_space(8.0);

        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                let name_color = if first.is_own {
                    theme.accent
                } else {
                    sender_color(&first.sender)
                };
                ui.label(
                    egui::RichText::new(first.sender.as_str())
                        .size(14.0)
                        .strong()
                        .color(name_color),
                );
                if show_timestamps {
                    ui.add_space(6.0);
                    ui.label(
                        egui::RichText::new(first.timestamp.format("%H:%M").to_string())
                            .size(11.0)
                            .color(theme.text_muted),
                    );
                }
            });

            for msg in messages {
                render_body(ui, msg, theme);
            }
        });
    });
}

/// A single message body with URL linkification and own-message tinting.
fn render_body(ui: &mut egui::Ui, msg: &MessageEntry, theme: &WispTheme) {
    static URL_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("URL regex pattern is valid"));

    let fill = if msg.is_own {
        theme.own_bubble
    } else {
        Color32::TRANSPARENT
    };

    egui::Frame::new()
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(if msg.is_own { 8 } else { 0 }, 2))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                for word in msg.content.split_inclusive(char::is_whitespace) {
                    let trimmed = word.trim_end();
                    if URL_RE.is_match(trimmed) {
                        ui.hyperlink_to(
                            egui::RichText::new(trimmed).size(14.0).color(theme.info),
                            trimmed.to_string(),
                        );
                        if word.len() > trimmed.len() {
                            ui.label(" ");
                        }
                    } else {
                        ui.label(
                            egui::RichText::new(word)
                                .size(14.0)
                                .color(theme.text_primary),
                        );
                    }
                }
            });
        });
}

/// Separators, the unread divider, and lone system messages.
fn render_divider(ui: &mut egui::Ui, entry: &TimelineEntry, theme: &WispTheme) {
    match entry {
        TimelineEntry::Separator { label } => {
            ui.add_space(14.0);
            ui.horizontal(|ui| {
                ui.add_space(GUTTER);
                divider_line(ui, theme.border_subtle);
                ui.label(
                    egui::RichText::new(label.as_str())
                        .size(11.0)
                        .color(theme.text_muted),
                );
                divider_line(ui, theme.border_subtle);
                ui.add_space(GUTTER);
            });
        }
        TimelineEntry::NewMessages { label } => {
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.add_space(GUTTER);
                divider_line(ui, theme.error);
                ui.label(
                    egui::RichText::new(label.as_deref().unwrap_or("New messages"))
                        .size(11.0)
                        .strong()
                        .color(theme.error),
                );
                divider_line(ui, theme.error);
                ui.add_space(GUTTER);
            });
        }
        TimelineEntry::Message(msg) => {
            // System notice: compact, centered on the content column.
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add_space(GUTTER + AVATAR_SIZE + 8.0);
                ui.label(
                    egui::RichText::new(format!("• {}", msg.content))
                        .size(12.0)
                        .italics()
                        .color(theme.text_muted),
                );
            });
        }
    }
}

fn divider_line(ui: &mut egui::Ui, color: Color32) {
    let width = (ui.available_width() / 2.0 - 60.0).max(16.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 1.0), egui::Sense::hover());
    ui.painter()
        .hline(rect.x_range(), rect.center().y, egui::Stroke::new(1.0, color));
}
