//! Scroll-position tracking for the message list.
//!
//! `ScrollTracker` watches the viewport each frame and answers three
//! questions for the renderer: should older history be fetched (the top
//! sentinel became visible), should the view stick to the bottom when new
//! messages arrive, and should a "jump to bottom" affordance be shown.
//! Everything is event-driven from per-frame `update` calls; teardown is
//! just dropping the value.

/// Distance from the bottom edge, in points, within which the view still
/// counts as "at the bottom".
pub const NEAR_BOTTOM_THRESHOLD: f32 = 100.0;

/// Height of the leading-edge sentinel region that triggers history loads.
pub const TOP_SENTINEL_HEIGHT: f32 = 48.0;

#[derive(Debug)]
pub struct ScrollTracker {
    /// Whether older history remains to be fetched.
    pub has_more: bool,
    /// A history load is in flight; suppresses re-triggering.
    pub loading_more: bool,
    near_bottom: bool,
    sentinel_visible: bool,
    /// Armed when the sentinel is out of view; a load fires only on the
    /// not-visible -> visible crossing.
    load_armed: bool,
    load_requested: bool,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self {
            has_more: true,
            loading_more: false,
            near_bottom: true,
            sentinel_visible: false,
            load_armed: true,
            load_requested: false,
        }
    }
}

impl ScrollTracker {
    pub fn new(has_more: bool) -> Self {
        Self {
            has_more,
            ..Self::default()
        }
    }

    /// Feed the current frame's scroll geometry. `offset` is the scroll
    /// position from the top, `content_height` the full content extent,
    /// `viewport_height` the visible extent.
    pub fn update(&mut self, offset: f32, content_height: f32, viewport_height: f32) {
        let max_offset = (content_height - viewport_height).max(0.0);
        self.near_bottom = max_offset - offset <= NEAR_BOTTOM_THRESHOLD;

        let visible = offset < TOP_SENTINEL_HEIGHT;
        if visible && self.load_armed {
            // One shot per crossing, even when the crossing happens while a
            // load is in flight or history is exhausted.
            if self.has_more && !self.loading_more {
                self.load_requested = true;
            }
            self.load_armed = false;
        }
        if !visible {
            self.load_armed = true;
        }
        self.sentinel_visible = visible;
    }

    /// Consume a pending load-more request. Returns true at most once per
    /// sentinel crossing.
    pub fn take_load_more(&mut self) -> bool {
        std::mem::take(&mut self.load_requested)
    }

    /// Mark a history load as started.
    pub fn begin_load(&mut self) {
        self.loading_more = true;
    }

    /// Mark a history load as finished, updating whether more remains.
    pub fn finish_load(&mut self, has_more: bool) {
        self.loading_more = false;
        self.has_more = has_more;
    }

    /// Auto-scroll on append only while the user is already at the bottom.
    pub fn should_stick_to_bottom(&self) -> bool {
        self.near_bottom
    }

    /// Show the "jump to bottom" button while scrolled up into history.
    pub fn show_jump_to_bottom(&self) -> bool {
        !self.near_bottom
    }

    pub fn is_near_bottom(&self) -> bool {
        self.near_bottom
    }

    /// Whether the leading-edge sentinel was visible on the last `update`.
    pub fn sentinel_visible(&self) -> bool {
        self.sentinel_visible
    }
}
