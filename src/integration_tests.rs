//! End-to-end scenarios exercising the component logic together, the way
//! the demo shell drives it.

use chrono::{Duration, Local, TimeZone};

use crate::commands::{CommandEntry, CommandPalette};
use crate::grid::GridLayout;
use crate::mentions::MentionPicker;
use crate::scroll::ScrollTracker;
use crate::state::{sample_chat, sample_history_batch, CallState, ChatState};
use crate::timeline::{build_timeline, group_entries, MessageEntry, TimelineEntry, TimelineItem};

#[test]
fn test_grouping_end_to_end_scenario() {
    let at = |min| Local.with_ymd_and_hms(2026, 3, 10, 12, min, 0).unwrap();
    let entries = vec![
        TimelineEntry::Message(MessageEntry::new("1", "Alice", "hello", at(0))),
        TimelineEntry::Message(MessageEntry::new("2", "Alice", "again", at(1))),
        TimelineEntry::Separator { label: "Today".into() },
        TimelineEntry::Message(MessageEntry::new("3", "Bob", "hi", at(2))),
    ];

    let items = group_entries(&entries);
    assert_eq!(items.len(), 3);
    match &items[0] {
        TimelineItem::Group(msgs) => {
            let ids: Vec<&str> = msgs.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(ids, vec!["1", "2"]);
        }
        other => panic!("expected leading group, got {other:?}"),
    }
    assert!(matches!(
        items[1],
        TimelineItem::Divider(TimelineEntry::Separator { .. })
    ));
    match &items[2] {
        TimelineItem::Group(msgs) => assert_eq!(msgs[0].id, "3"),
        other => panic!("expected trailing group, got {other:?}"),
    }
}

#[test]
fn test_chat_flow_timeline_to_groups() {
    let mut chat = sample_chat();
    chat.receive_message("Alice Chen", "one more thing");

    let entries = build_timeline(&chat.messages, chat.last_read.as_deref());
    let items = group_entries(&entries);

    // Flattened output reproduces every message exactly once, in order.
    let flat: Vec<&str> = items
        .iter()
        .flat_map(|item| match item {
            TimelineItem::Group(msgs) => msgs.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            TimelineItem::Divider(TimelineEntry::Message(m)) => vec![m.id.as_str()],
            TimelineItem::Divider(_) => vec![],
        })
        .collect();
    let expected: Vec<&str> = chat.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(flat, expected);

    // The unread divider is present and sits before an unread message.
    assert!(entries
        .iter()
        .any(|e| matches!(e, TimelineEntry::NewMessages { .. })));
}

#[test]
fn test_history_load_flow() {
    let mut chat = sample_chat();
    let mut tracker = ScrollTracker::default();

    // User scrolls to the top of a tall conversation.
    tracker.update(800.0, 2000.0, 500.0);
    assert!(!tracker.take_load_more());
    tracker.update(0.0, 2000.0, 500.0);
    assert!(tracker.take_load_more());

    // The shell starts the fetch; re-entering the sentinel region while
    // loading must not double-fire.
    tracker.begin_load();
    tracker.update(10.0, 2000.0, 500.0);
    assert!(!tracker.take_load_more());

    let more = chat.prepend_history(sample_history_batch(0));
    tracker.finish_load(more);
    assert!(tracker.has_more);
    assert_eq!(chat.messages[0].id, "h0-0");

    // Prepended history introduces an extra day separator.
    let entries = build_timeline(&chat.messages, chat.last_read.as_deref());
    let separators = entries
        .iter()
        .filter(|e| matches!(e, TimelineEntry::Separator { .. }))
        .count();
    assert!(separators >= 2);
}

#[test]
fn test_mention_flow_from_chat_roster() {
    let chat = sample_chat();
    let mut picker = MentionPicker::default();
    picker.open();
    picker.set_query("a", &chat.roster);

    // Alice, Carol ("Alvarez"), Dev Patel all contain "a".
    assert!(picker.matches().len() >= 2);

    picker.move_down();
    let picked = picker.select().expect("first match selectable");
    assert_eq!(picked.id, "u1");
    assert!(!picker.visible);
}

#[test]
fn test_palette_flow_drives_call_state() {
    let registry = vec![
        CommandEntry::new("call.start", "Start Call").with_keywords(&["video"]),
        CommandEntry::new("call.leave", "Leave Call"),
    ];
    let mut palette = CommandPalette::new(true, true);
    let mut call = CallState::default();

    palette.toggle();
    palette.query = "start".into();
    palette.refresh(&registry);
    palette.key_down();

    match palette.confirm().as_deref() {
        Some("call.start") => {
            call.join("Alice Chen");
            call.join("Bob Park");
            call.join("You");
        }
        other => panic!("unexpected command {other:?}"),
    }

    assert_eq!(call.participants.len(), 3);
    let layout = GridLayout::for_count(call.participants.len());
    assert_eq!(layout.columns, 2);
    assert_eq!(layout.rows, 2);
}

#[test]
fn test_grid_tracks_roster_changes() {
    let mut call = CallState::default();
    for i in 0..9 {
        call.join(&format!("Guest {i}"));
    }
    assert_eq!(GridLayout::for_count(call.participants.len()).columns, 3);

    call.join("Tenth");
    assert_eq!(GridLayout::for_count(call.participants.len()).columns, 4);

    let first = call.participants[0].id.clone();
    call.leave(&first);
    assert_eq!(GridLayout::for_count(call.participants.len()).columns, 3);
}

#[test]
fn test_send_resets_unread_and_sticks_to_bottom() {
    let mut chat = ChatState::new(Vec::new());
    let mut tracker = ScrollTracker::default();

    for i in 0..4 {
        chat.receive_message("Alice", format!("msg {i}"));
    }
    assert_eq!(chat.unread_count(), 4);

    // At the bottom: appends should auto-scroll, no jump button.
    tracker.update(600.0, 1000.0, 400.0);
    assert!(tracker.should_stick_to_bottom());
    assert!(!tracker.show_jump_to_bottom());

    chat.send_message("You", "replying");
    assert_eq!(chat.unread_count(), 0);

    // Scrolled up into history: appends must not yank the view down.
    tracker.update(100.0, 1000.0, 400.0);
    assert!(!tracker.should_stick_to_bottom());
    assert!(tracker.show_jump_to_bottom());
}

#[test]
fn test_old_messages_do_not_move_unread_divider() {
    let mut chat = sample_chat();
    let before = build_timeline(&chat.messages, chat.last_read.as_deref());
    let divider_follows = |entries: &[TimelineEntry]| {
        let pos = entries
            .iter()
            .position(|e| matches!(e, TimelineEntry::NewMessages { .. }))
            .unwrap();
        entries[pos + 1].message().unwrap().id.clone()
    };
    let anchor = divider_follows(&before);

    chat.prepend_history(sample_history_batch(0));
    let after = build_timeline(&chat.messages, chat.last_read.as_deref());
    assert_eq!(divider_follows(&after), anchor);
}

#[test]
fn test_day_separator_spans_midnight() {
    let yesterday = Local::now() - Duration::days(1);
    let messages = vec![
        MessageEntry::new("1", "Alice", "before midnight", yesterday),
        MessageEntry::new("2", "Alice", "after midnight", Local::now()),
    ];
    let entries = build_timeline(&messages, None);
    let labels: Vec<&str> = entries
        .iter()
        .filter_map(|e| match e {
            TimelineEntry::Separator { label } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec!["Yesterday", "Today"]);

    // Same sender across a separator still forms two groups.
    let items = group_entries(&entries);
    let groups = items
        .iter()
        .filter(|i| matches!(i, TimelineItem::Group(_)))
        .count();
    assert_eq!(groups, 2);
}
