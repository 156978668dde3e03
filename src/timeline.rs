//! Timeline data model and message grouping.
//!
//! A chat screen owns an ordered `Vec<TimelineEntry>` (messages plus day
//! separators and the unread divider) and passes it to the renderer on every
//! frame. Grouping is a pure, derived view over that sequence: consecutive
//! messages from the same sender in the same direction collapse into one
//! group so the renderer can show a single avatar/header per run.

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// A single chat message as stored in the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageEntry {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Whether the local user sent this message.
    pub is_own: bool,
    /// System notices (joins, renames, call events) render compactly and
    /// never merge into a group.
    pub system: bool,
}

impl MessageEntry {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            content: content.into(),
            timestamp,
            is_own: false,
            system: false,
        }
    }

    pub fn own(mut self) -> Self {
        self.is_own = true;
        self
    }

    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }
}

/// One element of the ordered timeline a chat screen owns.
#[derive(Clone, Debug, PartialEq)]
pub enum TimelineEntry {
    Message(MessageEntry),
    /// Day separator ("Today", "Yesterday", "March 3, 2026").
    Separator { label: String },
    /// Unread divider, at most one per timeline.
    NewMessages { label: Option<String> },
}

impl TimelineEntry {
    pub fn message(&self) -> Option<&MessageEntry> {
        match self {
            TimelineEntry::Message(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Output element of [`group_entries`]: either a run of consecutive
/// same-sender messages or a standalone divider row.
#[derive(Debug, PartialEq)]
pub enum TimelineItem<'a> {
    /// Non-empty run of non-system messages sharing `sender` and `is_own`.
    Group(Vec<&'a MessageEntry>),
    /// Separator, new-messages marker, or a lone system message.
    Divider(&'a TimelineEntry),
}

/// Partition a timeline into message groups and standalone dividers.
///
/// Single left-to-right pass. A message extends the pending group only when
/// the group is non-empty, the previous message has the same `sender` and
/// `is_own`, and the message is not a system notice. Separators, the unread
/// divider, and system messages flush the pending group and stand alone.
/// Flattening the result reproduces the input order exactly.
pub fn group_entries(entries: &[TimelineEntry]) -> Vec<TimelineItem<'_>> {
    let mut items: Vec<TimelineItem<'_>> = Vec::new();
    let mut pending: Vec<&MessageEntry> = Vec::new();

    for entry in entries {
        match entry {
            TimelineEntry::Message(msg) if !msg.system => {
                let extends = pending
                    .last()
                    .is_some_and(|last| last.sender == msg.sender && last.is_own == msg.is_own);
                if !extends && !pending.is_empty() {
                    items.push(TimelineItem::Group(std::mem::take(&mut pending)));
                }
                pending.push(msg);
            }
            _ => {
                if !pending.is_empty() {
                    items.push(TimelineItem::Group(std::mem::take(&mut pending)));
                }
                items.push(TimelineItem::Divider(entry));
            }
        }
    }

    if !pending.is_empty() {
        items.push(TimelineItem::Group(pending));
    }

    items
}

/// Human label for a day separator, relative to `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else if date.year() == today.year() {
        date.format("%B %-d").to_string()
    } else {
        date.format("%B %-d, %Y").to_string()
    }
}

/// Assemble a renderable timeline from raw messages.
///
/// Inserts a day separator whenever the calendar date changes between
/// consecutive messages (and before the first one), and a single
/// new-messages divider before the first message that follows `last_read`.
pub fn build_timeline(messages: &[MessageEntry], last_read: Option<&str>) -> Vec<TimelineEntry> {
    let today = Local::now().date_naive();
    let mut entries: Vec<TimelineEntry> = Vec::with_capacity(messages.len() + 4);
    let mut current_day: Option<NaiveDate> = None;
    let mut unread_boundary = last_read.is_none();
    let mut divider_placed = false;

    for msg in messages {
        let day = msg.timestamp.date_naive();
        if current_day != Some(day) {
            entries.push(TimelineEntry::Separator {
                label: day_label(day, today),
            });
            current_day = Some(day);
        }

        if unread_boundary && !divider_placed && last_read.is_some() {
            entries.push(TimelineEntry::NewMessages { label: None });
            divider_placed = true;
        }

        entries.push(TimelineEntry::Message(msg.clone()));

        if last_read == Some(msg.id.as_str()) {
            unread_boundary = true;
        }
    }

    entries
}
