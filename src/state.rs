//! Session state for the demo shell, separated from UI logic.
//!
//! `ChatState` and `CallState` hold the data a real client would source from
//! its sync layer. UI components receive them as parameters rather than
//! owning them, so the renderers stay testable with plain fixtures.

use chrono::{Duration, Local};

use crate::grid::GridParticipant;
use crate::mentions::MentionCandidate;
use crate::scroll::ScrollTracker;
use crate::timeline::MessageEntry;

/// Conversation data for the chat view.
pub struct ChatState {
    /// Raw messages in timestamp order; separators are derived at render
    /// time by `timeline::build_timeline`.
    pub messages: Vec<MessageEntry>,
    /// Id of the last message the user has read, for the unread divider.
    pub last_read: Option<String>,
    /// Users offered by the @-mention autocomplete.
    pub roster: Vec<MentionCandidate>,
    /// Scroll/load-more tracking for the message list.
    pub scroll: ScrollTracker,
    /// Batches of older history left to "fetch" in the demo.
    pub history_batches_left: usize,
    next_id: usize,
}

impl ChatState {
    pub fn new(roster: Vec<MentionCandidate>) -> Self {
        Self {
            messages: Vec::new(),
            last_read: None,
            roster,
            scroll: ScrollTracker::default(),
            history_batches_left: 3,
            next_id: 1,
        }
    }

    fn take_id(&mut self) -> String {
        let id = format!("m{}", self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a message sent by the local user. Own messages are read by
    /// definition, so the unread divider moves past them.
    pub fn send_message(&mut self, display_name: &str, content: impl Into<String>) {
        let id = self.take_id();
        self.messages.push(
            MessageEntry::new(id.clone(), display_name, content, Local::now()).own(),
        );
        self.last_read = Some(id);
    }

    /// Append an incoming message without touching the read marker.
    pub fn receive_message(&mut self, sender: &str, content: impl Into<String>) {
        let id = self.take_id();
        self.messages
            .push(MessageEntry::new(id, sender, content, Local::now()));
    }

    pub fn push_system(&mut self, content: impl Into<String>) {
        let id = self.take_id();
        self.messages
            .push(MessageEntry::new(id, "system", content, Local::now()).system());
    }

    pub fn mark_all_read(&mut self) {
        self.last_read = self.messages.last().map(|m| m.id.clone());
    }

    /// Prepend a batch of older messages, as a history fetch would. Returns
    /// whether more history remains afterwards.
    pub fn prepend_history(&mut self, batch: Vec<MessageEntry>) -> bool {
        self.messages.splice(0..0, batch);
        self.history_batches_left = self.history_batches_left.saturating_sub(1);
        self.history_batches_left > 0
    }

    pub fn unread_count(&self) -> usize {
        match &self.last_read {
            None => self.messages.iter().filter(|m| !m.is_own).count(),
            Some(id) => match self.messages.iter().position(|m| &m.id == id) {
                Some(pos) => self.messages[pos + 1..].iter().filter(|m| !m.is_own).count(),
                None => 0,
            },
        }
    }
}

/// Participant data for the call view.
#[derive(Default)]
pub struct CallState {
    pub participants: Vec<GridParticipant>,
    next_id: usize,
}

impl CallState {
    pub fn join(&mut self, display_name: &str) -> String {
        self.next_id += 1;
        let id = format!("p{}", self.next_id);
        self.participants
            .push(GridParticipant::new(id.clone(), display_name));
        id
    }

    pub fn leave(&mut self, id: &str) {
        self.participants.retain(|p| p.id != id);
    }

    pub fn toggle_mute(&mut self, id: &str) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.is_muted = !p.is_muted;
        }
    }

    pub fn toggle_camera(&mut self, id: &str) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.is_camera_off = !p.is_camera_off;
        }
    }

    pub fn set_speaking(&mut self, id: &str, speaking: bool) {
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.is_speaking = speaking;
        }
    }
}

/// Canned conversation used by the demo binary and integration tests.
pub fn sample_chat() -> ChatState {
    let roster = vec![
        MentionCandidate::new("u1", "Alice Chen").with_keywords(&["alice", "achen"]),
        MentionCandidate::new("u2", "Bob Park").with_keywords(&["bob", "bpark"]),
        MentionCandidate::new("u3", "Carol Alvarez").with_keywords(&["carol"]),
        MentionCandidate::new("u4", "Dev Patel").with_keywords(&["dev"]),
    ];
    let mut chat = ChatState::new(roster);

    let now = Local::now();
    let stamp = |mins_ago: i64| now - Duration::minutes(mins_ago);

    let seed = [
        ("Alice Chen", "Morning! Did the design review land?", 95, false, false),
        ("Alice Chen", "I pushed the new button specs", 94, false, false),
        ("You", "Yes, looks great", 90, true, false),
        ("system", "Carol Alvarez joined the room", 60, false, true),
        ("Carol Alvarez", "Catching up now", 58, false, false),
        ("Carol Alvarez", "The grid breakpoints read well at 3 columns", 57, false, false),
        ("Bob Park", "Check https://wisp.dev/tokens for the palette", 20, false, false),
        ("Bob Park", "@Alice Chen the contrast pass is done", 18, false, false),
    ];

    for (i, (sender, content, mins_ago, own, system)) in seed.into_iter().enumerate() {
        let mut msg = MessageEntry::new(format!("m{}", i + 1), sender, content, stamp(mins_ago));
        msg.is_own = own;
        msg.system = system;
        chat.messages.push(msg);
    }
    chat.next_id = chat.messages.len() + 1;
    chat.last_read = Some("m6".into());
    chat
}

/// Older messages for one simulated history fetch.
pub fn sample_history_batch(batch_index: usize) -> Vec<MessageEntry> {
    let base = Local::now() - Duration::days(1) - Duration::hours(batch_index as i64);
    (0..5)
        .map(|i| {
            MessageEntry::new(
                format!("h{}-{}", batch_index, i),
                if i % 2 == 0 { "Alice Chen" } else { "Bob Park" },
                format!("earlier discussion #{}", i + 1),
                base + Duration::minutes(i),
            )
        })
        .collect()
}
