//! Surface Events
//!
//! Actions reported by input surfaces to the annotation session, and the
//! step outcome the session reports back.
//!
//! # Design Philosophy
//!
//! Input surfaces are "dumb" controls that forward what the user did. They
//! don't interpret what an action means for the queue; the session decides
//! whether it advances, finishes, or ignores.

use serde::{Deserialize, Serialize};

use crate::label::Label;

/// An action reported by an input surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The user activated a submit control carrying this label
    Submit(Label),
    /// The user activated the skip control
    Skip,
}

/// Outcome of `start` or of applying a [`SessionEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// An item is now presented and the session is awaiting an action
    Presented,
    /// The queue is exhausted; reported exactly once per session
    Finished,
    /// The session was not accepting this action; nothing changed
    Ignored,
}
