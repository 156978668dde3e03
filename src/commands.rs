//! Command palette state: incremental filtering and selection cursor.
//!
//! Deliberately separate from the mention picker even though the shapes
//! rhyme; the palette adds relevance ordering (prefix matches first) and a
//! visibility toggle bound to Ctrl+K.

/// One executable entry in the palette.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandEntry {
    /// Stable identifier handed back on selection.
    pub value: String,
    pub label: String,
    /// Aliases and search terms ("prefs", "settings", "options").
    pub keywords: Vec<String>,
}

impl CommandEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            keywords: Vec::new(),
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }
}

/// Transient palette state. The caller owns the command registry and passes
/// it to [`CommandPalette::refresh`] whenever the query changes.
pub struct CommandPalette {
    pub visible: bool,
    pub query: String,
    /// Query the current `matches` were computed from.
    last_query: String,
    matches: Vec<CommandEntry>,
    active: Option<usize>,
    /// Whether Up/Down wrap past the list ends.
    pub loop_nav: bool,
    /// Confirming a command hides the palette.
    pub close_on_select: bool,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self {
            visible: false,
            query: String::new(),
            last_query: String::new(),
            matches: Vec::new(),
            active: None,
            loop_nav: false,
            close_on_select: true,
        }
    }
}

impl CommandPalette {
    pub fn new(loop_nav: bool, close_on_select: bool) -> Self {
        Self {
            loop_nav,
            close_on_select,
            ..Self::default()
        }
    }

    /// Toggle visibility (Ctrl+K), clearing the query on open.
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
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

    /// Recompute matches for the current query. An empty query shows the
    /// whole registry in its original order; otherwise case-insensitive
    /// substring matches over label, value, and keywords, with label-prefix
    /// matches sorted first. The active cursor resets whenever the query or
    /// the match set changes; re-running with an unchanged query (the
    /// per-frame case) keeps it.
    pub fn refresh(&mut self, registry: &[CommandEntry]) {
        let query_lower = self.query.to_lowercase();

        let mut matches: Vec<CommandEntry> = if query_lower.is_empty() {
            registry.to_vec()
        } else {
            registry
                .iter()
                .filter(|cmd| {
                    cmd.label.to_lowercase().contains(&query_lower)
                        || cmd.value.to_lowercase().contains(&query_lower)
                        || cmd
                            .keywords
                            .iter()
                            .any(|k| k.to_lowercase().contains(&query_lower))
                })
                .cloned()
                .collect()
        };

        if !query_lower.is_empty() {
            // Prefix matches first, keep the registry order within each tier.
            matches.sort_by_key(|cmd| !cmd.label.to_lowercase().starts_with(&query_lower));
        }

        if self.query != self.last_query || matches != self.matches {
            self.matches = matches;
            self.active = None;
        }
        self.last_query = self.query.clone();
    }

    pub fn matches(&self) -> &[CommandEntry] {
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

    pub fn key_down(&mut self) {
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

    pub fn key_up(&mut self) {
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

    /// Enter: hand back the active command's value, hiding the palette when
    /// configured to.
    pub fn confirm(&mut self) -> Option<String> {
        let value = self
            .active
            .and_then(|i| self.matches.get(i))
            .map(|cmd| cmd.value.clone())?;
        if self.close_on_select {
            self.hide();
        }
        Some(value)
    }
}
