//! egui rendering for the Wisp components.
//!
//! Every renderer takes the active `WispTheme` as an explicit argument and
//! reports user actions back as return values:
//! - `message_list`: grouped timeline rendering with scroll tracking
//! - `video_grid`: participant tile grid
//! - `mention_popup`: @-mention autocomplete overlay
//! - `command_palette`: Ctrl+K modal
//! - `theme`: color system and text styles
//! - `widgets`: avatars and badges

mod command_palette;
mod mention_popup;
mod message_list;
mod theme;
mod video_grid;
mod widgets;

pub use command_palette::*;
pub use mention_popup::*;
pub use message_list::*;
pub use theme::*;
pub use video_grid::*;
pub use widgets::*;
