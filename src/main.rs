//! Wisp demo shell: a chat view and a call view exercising every component
//! in the library with sample data. No networking; the "history fetch" is a
//! short frame-countdown so the load-more flow stays observable.

use eframe::egui::{self, Key};

use wisp_ui::commands::{CommandEntry, CommandPalette};
use wisp_ui::config::{load_settings, save_settings, Settings};
use wisp_ui::mentions::MentionPicker;
use wisp_ui::state::{sample_chat, sample_history_batch, CallState, ChatState};
use wisp_ui::timeline::build_timeline;
use wisp_ui::ui::{
    apply_app_style, render_command_palette, render_mention_popup, render_message_list,
    render_video_grid, WispTheme,
};

/// Frames to wait before a simulated history fetch "arrives".
const FAKE_FETCH_FRAMES: u32 = 30;

#[derive(Clone, Copy, PartialEq)]
enum View {
    Chat,
    Call,
}

struct WispApp {
    settings: Settings,
    view: View,
    chat: ChatState,
    call: CallState,
    palette: CommandPalette,
    mention_picker: MentionPicker,
    registry: Vec<CommandEntry>,
    input: String,
    force_scroll_bottom: bool,
    fetch_countdown: Option<u32>,
    history_batch: usize,
}

impl WispApp {
    fn new() -> Self {
        let settings = load_settings().unwrap_or_default();
        let chat = sample_chat();
        let mut call = CallState::default();
        call.join("Alice Chen");
        call.join("Bob Park");
        call.join("You");
        call.set_speaking("p1", true);
        call.toggle_mute("p3");

        let registry = vec![
            CommandEntry::new("view.chat", "Go to Chat").with_keywords(&["messages"]),
            CommandEntry::new("view.call", "Go to Call").with_keywords(&["video", "grid"]),
            CommandEntry::new("theme.toggle", "Toggle Theme").with_keywords(&["dark", "light"]),
            CommandEntry::new("chat.mark-read", "Mark All Read").with_keywords(&["unread"]),
            CommandEntry::new("call.join-guest", "Add Guest to Call"),
            CommandEntry::new("call.leave-last", "Remove Last Participant"),
        ];

        Self {
            palette: CommandPalette::new(settings.loop_palette_nav, true),
            mention_picker: MentionPicker::new(true, settings.close_mentions_on_select),
            settings,
            view: View::Chat,
            chat,
            call,
            registry,
            input: String::new(),
            force_scroll_bottom: false,
            fetch_countdown: None,
            history_batch: 0,
        }
    }

    fn run_command(&mut self, value: &str) {
        match value {
            "view.chat" => self.view = View::Chat,
            "view.call" => self.view = View::Call,
            "theme.toggle" => {
                self.settings.theme = if self.settings.theme == "dark" {
                    "light".into()
                } else {
                    "dark".into()
                };
                if let Err(e) = save_settings(&self.settings) {
                    eprintln!("Failed to save settings: {}", e);
                }
            }
            "chat.mark-read" => self.chat.mark_all_read(),
            "call.join-guest" => {
                let name = format!("Guest {}", self.call.participants.len() + 1);
                self.call.join(&name);
            }
            "call.leave-last" => {
                if let Some(last) = self.call.participants.last() {
                    let id = last.id.clone();
                    self.call.leave(&id);
                }
            }
            _ => {}
        }
    }

    /// Keep the mention picker in sync with the trailing @token of the
    /// input, opening and closing it as the user types.
    fn sync_mention_picker(&mut self) {
        let last_token = self
            .input
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default();
        match last_token.strip_prefix('@') {
            Some(query) => {
                if !self.mention_picker.visible {
                    self.mention_picker.open();
                }
                self.mention_picker.query = query.to_string();
            }
            None => {
                if self.mention_picker.visible {
                    self.mention_picker.hide();
                }
            }
        }
    }

    fn apply_mention(&mut self, label: &str) {
        let token_start = self
            .input
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        self.input.truncate(token_start);
        self.input.push_str(&format!("@{} ", label));
    }

    fn tick_fake_fetch(&mut self) {
        if let Some(frames) = self.fetch_countdown.take() {
            if frames > 0 {
                self.fetch_countdown = Some(frames - 1);
            } else {
                let batch = sample_history_batch(self.history_batch);
                self.history_batch += 1;
                let more = self.chat.prepend_history(batch);
                self.chat.scroll.finish_load(more);
            }
        }
    }

    fn render_chat(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, theme: &WispTheme) {
        let entries = build_timeline(&self.chat.messages, self.chat.last_read.as_deref());

        let input_height = 56.0;
        let list_height = ui.available_height() - input_height;
        let mut list_response = None;
        ui.allocate_ui(egui::vec2(ui.available_width(), list_height), |ui| {
            list_response = Some(render_message_list(
                ui,
                &entries,
                &mut self.chat.scroll,
                self.settings.show_timestamps,
                self.force_scroll_bottom,
                theme,
            ));
        });
        self.force_scroll_bottom = false;

        if let Some(list) = list_response {
            if list.load_older {
                self.chat.scroll.begin_load();
                self.fetch_countdown = Some(FAKE_FETCH_FRAMES);
            }
            if list.jump_clicked {
                self.force_scroll_bottom = true;
                self.chat.mark_all_read();
            }
        }

        // Input row with mention popup anchored above it.
        let input_rect = ui
            .horizontal(|ui| {
                ui.add_space(12.0);
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .hint_text("Message… (@ to mention, Ctrl+K for commands)")
                        .desired_width(ui.available_width() - 80.0),
                );
                if edit.changed() {
                    self.sync_mention_picker();
                }

                let send_now = ui.button("Send").clicked()
                    || (edit.lost_focus()
                        && ui.input(|i| i.key_pressed(Key::Enter))
                        && !self.mention_picker.visible);
                if send_now && !self.input.trim().is_empty() {
                    let text = self.input.trim().to_string();
                    let name = self.settings.display_name.clone();
                    self.chat.send_message(&name, text);
                    self.input.clear();
                    self.force_scroll_bottom = true;
                    edit.request_focus();
                }
                edit.rect
            })
            .inner;

        let roster = self.chat.roster.clone();
        if let Some(picked) = render_mention_popup(
            ctx,
            &mut self.mention_picker,
            &roster,
            input_rect.left_top(),
            theme,
        ) {
            self.apply_mention(&picked.label);
        }
    }

    fn render_call(&mut self, ui: &mut egui::Ui, theme: &WispTheme) {
        // Clicking a tile toggles that participant's mute, as a stand-in for
        // a real focus/pin interaction.
        if let Some(id) = render_video_grid(ui, &self.call.participants, theme) {
            self.call.toggle_mute(&id);
        }
    }
}

impl eframe::App for WispApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = WispTheme::by_name(&self.settings.theme);
        apply_app_style(ctx, &theme);

        if ctx.input(|i| i.modifiers.command && i.key_pressed(Key::K)) {
            self.palette.toggle();
        }

        self.tick_fake_fetch();
        if self.fetch_countdown.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("wisp-topbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Wisp")
                        .size(16.0)
                        .strong()
                        .color(theme.accent),
                );
                ui.add_space(16.0);
                ui.selectable_value(&mut self.view, View::Chat, "Chat");
                ui.selectable_value(&mut self.view, View::Call, "Call");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(8.0);
                    let unread = self.chat.unread_count();
                    if unread > 0 {
                        ui.label(
                            egui::RichText::new(format!("{unread} unread"))
                                .size(12.0)
                                .color(theme.warning),
                        );
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Chat => self.render_chat(ctx, ui, &theme),
            View::Call => self.render_call(ui, &theme),
        });

        let registry = self.registry.clone();
        if let Some(command) = render_command_palette(ctx, &mut self.palette, &registry, &theme) {
            self.run_command(&command);
        }
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Wisp"),
        ..Default::default()
    };

    eframe::run_native(
        "Wisp",
        options,
        Box::new(|_cc| Ok(Box::new(WispApp::new()))),
    )
}
