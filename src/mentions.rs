//! @-mention autocomplete state: candidate filtering and keyboard cursor.
//!
//! The picker owns only transient UI state (query text, visible matches,
//! active index). The caller owns the candidate list and feeds it back in
//! whenever the query or the roster changes.

/// A user that can be @-mentioned.
#[derive(Clone, Debug, PartialEq)]
pub struct MentionCandidate {
    pub id: String,
    pub label: String,
    /// Extra match targets (handle, nickname, email prefix).
    pub keywords: Vec<String>,
}

impl MentionCandidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.label.to_lowercase().contains(query_lower)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(query_lower))
    }
}

/// Case-insensitive substring filter over label and keywords. An empty query
/// passes everything, in order.
pub fn filter_candidates<'a>(
    candidates: &'a [MentionCandidate],
    query: &str,
) -> Vec<&'a MentionCandidate> {
    let query_lower = query.to_lowercase();
    candidates
        .iter()
        .filter(|c| query_lower.is_empty() || c.matches(&query_lower))
        .collect()
}

/// Transient state for the mention overlay.
pub struct MentionPicker {
    pub visible: bool,
    pub query: String,
    /// Query the current `matches` were computed from.
    last_query: String,
    matches: Vec<MentionCandidate>,
    active: Option<usize>,
    /// ArrowUp/ArrowDown wrap past the ends.
    pub loop_nav: bool,
    /// Selecting hides the overlay.
    pub close_on_select: bool,
}

impl Default for MentionPicker {
    fn default() -> Self {
        Self {
            visible: false,
            query: String::new(),
            last_query: String::new(),
            matches: Vec::new(),
            active: None,
            loop_nav: true,
            close_on_select: true,
        }
    }
}

impl MentionPicker {
    pub fn new(loop_nav: bool, close_on_select: bool) -> Self {
        Self {
            loop_nav,
            close_on_select,
            ..Self::default()
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.query.clear();
        self.last_query.clear();
        self.matches.clear();
        self.active = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.query.clear();
        self.last_query.clear();
        self.matches.clear();
        self.active = None;
    }

    /// Replace the query and recompute matches. The active cursor resets
    /// whenever the query or the candidate set changes; feeding the same
    /// query back in (the per-frame case) keeps it.
    pub fn set_query(&mut self, query: &str, candidates: &[MentionCandidate]) {
        let query_changed = query != self.last_query;
        self.query = query.to_string();
        let matches: Vec<MentionCandidate> = filter_candidates(candidates, query)
            .into_iter()
            .cloned()
            .collect();
        if query_changed || matches != self.matches {
            self.active = None;
            self.matches = matches;
        }
        self.last_query = self.query.clone();
    }

    pub fn matches(&self) -> &[MentionCandidate] {
        &self.matches
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn set_active(&mut self, index: usize) {
        if index < self.matches.len() {
            self.active = Some(index);
        }
    }

    /// ArrowDown: no selection picks index 0; at the end, wrap or stay
    /// depending on `loop_nav`.
    pub fn move_down(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        self.active = Some(match self.active {
            None => 0,
            Some(i) if i >= last => {
                if self.loop_nav {
                    0
                } else {
                    last
                }
            }
            Some(i) => i + 1,
        });
    }

    /// ArrowUp mirror of [`move_down`].
    pub fn move_up(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        self.active = Some(match self.active {
            None => last,
            Some(0) => {
                if self.loop_nav {
                    last
                } else {
                    0
                }
            }
            Some(i) => i - 1,
        });
    }

    /// Enter: return the active candidate, if any, hiding the overlay when
    /// configured to.
    pub fn select(&mut self) -> Option<MentionCandidate> {
        let picked = self.active.and_then(|i| self.matches.get(i).cloned())?;
        if self.close_on_select {
            self.hide();
        }
        Some(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<MentionCandidate> {
        vec![
            MentionCandidate::new("u1", "Alice Chen").with_keywords(&["alice", "achen"]),
            MentionCandidate::new("u2", "Bob Park").with_keywords(&["bob"]),
            MentionCandidate::new("u3", "Carol Alvarez").with_keywords(&["carol"]),
        ]
    }

    #[test]
    fn test_empty_query_passes_all_in_order() {
        let roster = roster();
        let visible = filter_candidates(&roster, "");
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].id, "u1");
        assert_eq!(visible[2].id, "u3");
    }

    #[test]
    fn test_filter_matches_label_and_keywords() {
        let roster = roster();
        // "al" hits Alice (label + keyword) and Carol Alvarez (label).
        let visible = filter_candidates(&roster, "al");
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3"]);

        // Keyword-only match, case-insensitive.
        let visible = filter_candidates(&roster, "ACHEN");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "u1");
    }

    #[test]
    fn test_filter_idempotent() {
        let roster = roster();
        let once: Vec<MentionCandidate> = filter_candidates(&roster, "al")
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<MentionCandidate> =
            filter_candidates(&once, "al").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_arrow_down_from_none_selects_first() {
        let mut picker = MentionPicker::default();
        picker.open();
        picker.set_query("", &roster());
        assert_eq!(picker.active_index(), None);
        picker.move_down();
        assert_eq!(picker.active_index(), Some(0));
    }

    #[test]
    fn test_wraparound_modes() {
        let roster = roster();

        let mut looping = MentionPicker::new(true, true);
        looping.open();
        looping.set_query("", &roster);
        looping.set_active(2);
        looping.move_down();
        assert_eq!(looping.active_index(), Some(0));
        looping.move_up();
        assert_eq!(looping.active_index(), Some(2));

        let mut pinned = MentionPicker::new(false, true);
        pinned.open();
        pinned.set_query("", &roster);
        pinned.set_active(2);
        pinned.move_down();
        assert_eq!(pinned.active_index(), Some(2));
    }

    #[test]
    fn test_select_returns_active_and_closes() {
        let mut picker = MentionPicker::default();
        picker.open();
        picker.set_query("bob", &roster());
        picker.move_down();
        let picked = picker.select().expect("selection");
        assert_eq!(picked.id, "u2");
        assert!(!picker.visible);
    }

    #[test]
    fn test_select_without_active_is_noop() {
        let mut picker = MentionPicker::default();
        picker.open();
        picker.set_query("", &roster());
        assert!(picker.select().is_none());
        assert!(picker.visible);
    }

    #[test]
    fn test_query_change_resets_cursor() {
        let mut picker = MentionPicker::default();
        picker.open();
        let roster = roster();
        picker.set_query("", &roster);
        picker.set_active(2);
        picker.set_query("al", &roster);
        assert_eq!(picker.active_index(), None);
    }

    #[test]
    fn test_query_refinement_resets_cursor_when_matches_stay() {
        let mut picker = MentionPicker::default();
        picker.open();
        let roster = roster();
        // "car" and "caro" both narrow to Carol alone; the cursor still
        // resets because the query changed.
        picker.set_query("car", &roster);
        picker.set_active(0);
        picker.set_query("caro", &roster);
        assert_eq!(picker.matches().len(), 1);
        assert_eq!(picker.active_index(), None);
    }

    #[test]
    fn test_same_query_refresh_keeps_cursor() {
        let mut picker = MentionPicker::default();
        picker.open();
        let roster = roster();
        picker.set_query("car", &roster);
        picker.set_active(0);
        // The overlay re-feeds the unchanged query every frame.
        picker.set_query("car", &roster);
        assert_eq!(picker.active_index(), Some(0));
    }

    #[test]
    fn test_keep_open_on_select() {
        let mut picker = MentionPicker::new(true, false);
        picker.open();
        picker.set_query("bob", &roster());
        picker.move_down();
        assert!(picker.select().is_some());
        assert!(picker.visible);
    }
}
