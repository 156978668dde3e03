//! Wisp UI component library.
//!
//! Pure component logic (grouping, grid arithmetic, filtering, scroll
//! tracking) lives in the top-level modules; egui rendering lives in `ui`.

pub mod commands;
pub mod config;
pub mod grid;
pub mod mentions;
pub mod scroll;
pub mod state;
pub mod timeline;
pub mod ui;

#[cfg(test)]
mod integration_tests;
