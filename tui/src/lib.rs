//! Labelkit TUI - Terminal input surface for annotation sessions
//!
//! This crate renders a `labelkit-core` session in a full-screen terminal
//! UI: a status line, an item pane, and a control row whose widgets follow
//! the task mode (one button per discrete label, a bounded slider, or a
//! free-text entry, plus an optional skip button).
//!
//! # Architecture
//!
//! - **App**: event loop, key dispatch, frame rendering
//! - **Controls**: per-mode input surface state and key-to-action mapping
//! - **Presenter**: pluggable item-to-text rendering seam
//! - **Theme**: control role colors

pub mod app;
pub mod controls;
pub mod presenter;
pub mod theme;

pub use app::{run_annotator, App};
pub use controls::InputSurface;
pub use presenter::{DisplayPresenter, ItemPresenter};
