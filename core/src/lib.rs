//! Labelkit Core - Headless Annotation Session for labelkit
//!
//! This crate provides the annotation state machine for labelkit, completely
//! independent of any UI framework. It can drive a TUI, a notebook-style
//! frontend, or run headless for testing/automation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   Input Surfaces                     │
//! │   ┌─────────┐   ┌──────────┐   ┌──────────────────┐  │
//! │   │   TUI   │   │ Headless │   │  Custom surface  │  │
//! │   │(ratatui)│   │ (tests)  │   │                  │  │
//! │   └────┬────┘   └────┬─────┘   └────────┬─────────┘  │
//! │        └─────────────┴──────────────────┘            │
//! │                      │                               │
//! │              SessionEvent (up)                       │
//! │              Step / status (down)                    │
//! └──────────────────────┼───────────────────────────────┘
//!                        │
//! ┌──────────────────────┼───────────────────────────────┐
//! │               AnnotationSession                      │
//! │   item queue · cursor · records · task mode          │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`AnnotationSession`]: the state machine that owns the item queue,
//!   cursor, and collected records
//! - [`TaskMode`]: the three-way task variant (classification, regression,
//!   captioning), decided once at configuration time
//! - [`Label`]: a collected label value, shaped by the task mode
//! - [`SessionEvent`]: actions reported by an input surface
//! - [`Renderer`]: the presentation capability invoked once per item
//!
//! # Quick Start
//!
//! ```
//! use labelkit_core::{AnnotationSession, Label, SessionConfig, Step, TaskMode};
//!
//! let mode = TaskMode::classification(["cat", "dog"]);
//! let mut session = AnnotationSession::new(vec![1, 2, 3], mode, SessionConfig::default());
//!
//! assert_eq!(session.start(), Step::Presented);
//! session.submit(Label::choice("dog"));
//! session.skip();
//! assert_eq!(session.submit(Label::choice("cat")), Step::Finished);
//!
//! let records = session.into_records();
//! assert_eq!(records.len(), 2);
//! ```
//!
//! # Module Overview
//!
//! - [`session`]: the annotation session state machine
//! - [`options`]: task mode dispatch and configuration validation
//! - [`label`]: label value types
//! - [`events`]: surface actions and step outcomes
//! - [`render`]: the renderer capability seam
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure session logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod events;
pub mod label;
pub mod options;
pub mod render;
pub mod session;

pub use events::{SessionEvent, Step};
pub use label::{Label, Numeric};
pub use options::{ConfigError, NumericRange, TaskMode};
pub use render::Renderer;
pub use session::{Annotation, AnnotationSession, SessionConfig, SessionState, DONE_NOTICE};
