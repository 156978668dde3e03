//! Video-tile grid layout arithmetic.
//!
//! The call screen owns its participants; the grid renderer only needs a
//! column/row count and per-tile dimensions. Column count follows a fixed
//! band table up to 25 tiles, then grows with `ceil(sqrt(n))`:
//!
//! | participants | columns |
//! |--------------|---------|
//! | 0–1          | 1       |
//! | 2–4          | 2       |
//! | 5–9          | 3       |
//! | 10–16        | 4       |
//! | 17–25        | 5       |
//! | 26+          | ceil(sqrt(n)) |
//!
//! The bands keep tile aspect close to 4:3 on a 16:9 viewport.

/// One participant tile in a call grid. Owned by the call/session layer and
/// borrowed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParticipant {
    pub id: String,
    pub display_name: String,
    pub is_muted: bool,
    pub is_camera_off: bool,
    pub is_speaking: bool,
}

impl GridParticipant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_muted: false,
            is_camera_off: true,
            is_speaking: false,
        }
    }
}

/// Resolved column/row counts for a participant grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn for_count(count: usize) -> Self {
        let columns = columns_for(count);
        Self {
            columns,
            rows: rows_for(count, columns),
        }
    }

    /// Per-tile width/height as fractions of the viewport. Zero-row layouts
    /// (empty grid) report a zero height fraction.
    pub fn tile_fraction(&self) -> (f32, f32) {
        let width = 1.0 / self.columns as f32;
        let height = if self.rows == 0 {
            0.0
        } else {
            1.0 / self.rows as f32
        };
        (width, height)
    }
}

/// Column count for a participant grid. Always at least 1, monotonically
/// non-decreasing in `count`.
pub fn columns_for(count: usize) -> usize {
    match count {
        0..=1 => 1,
        2..=4 => 2,
        5..=9 => 3,
        10..=16 => 4,
        17..=25 => 5,
        n => (n as f64).sqrt().ceil() as usize,
    }
}

/// Row count: `ceil(count / columns)`. An empty grid has zero rows.
pub fn rows_for(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_is_safe() {
        assert_eq!(columns_for(0), 1);
        assert_eq!(rows_for(0, columns_for(0)), 0);
        let layout = GridLayout::for_count(0);
        assert_eq!(layout, GridLayout { columns: 1, rows: 0 });
        assert_eq!(layout.tile_fraction(), (1.0, 0.0));
    }

    #[test]
    fn test_band_breakpoints() {
        assert_eq!(columns_for(1), 1);
        assert_eq!(columns_for(2), 2);
        assert_eq!(columns_for(4), 2);
        assert_eq!(columns_for(5), 3);
        assert_eq!(columns_for(9), 3);
        assert_eq!(columns_for(10), 4);
        assert_eq!(columns_for(16), 4);
        assert_eq!(columns_for(17), 5);
        assert_eq!(columns_for(25), 5);
        // Beyond the bands: ceil(sqrt(n)).
        assert_eq!(columns_for(26), 6);
        assert_eq!(columns_for(36), 6);
        assert_eq!(columns_for(37), 7);
    }

    #[test]
    fn test_columns_monotonic() {
        let mut prev = 0;
        for count in 0..100 {
            let cols = columns_for(count);
            assert!(cols >= 1);
            assert!(cols >= prev, "columns regressed at count {count}");
            prev = cols;
        }
    }

    #[test]
    fn test_rows_cover_all_tiles() {
        for count in 0..100 {
            let layout = GridLayout::for_count(count);
            assert!(layout.columns * layout.rows >= count);
            // Never a fully empty trailing row.
            if count > 0 {
                assert!(layout.columns * (layout.rows - 1) < count);
            }
        }
    }

    #[test]
    fn test_tile_fraction() {
        let layout = GridLayout::for_count(6);
        assert_eq!(layout, GridLayout { columns: 3, rows: 2 });
        let (w, h) = layout.tile_fraction();
        assert!((w - 1.0 / 3.0).abs() < f32::EPSILON);
        assert!((h - 0.5).abs() < f32::EPSILON);
    }
}
