//! Renderer Capability
//!
//! The presentation seam between the session and whatever shows items to
//! the user. The session invokes the installed renderer exactly once per
//! presentation (on `start` and on every advance to a remaining item).
//! Frame-based surfaces that redraw from session state instead can simply
//! not install one.

/// Presents an item to the user.
pub trait Renderer<T> {
    /// Present `item`. Called once each time an item becomes current.
    fn render(&mut self, item: &T);
}

impl<T, F> Renderer<T> for F
where
    F: FnMut(&T),
{
    fn render(&mut self, item: &T) {
        self(item);
    }
}
