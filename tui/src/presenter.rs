//! Item Presentation
//!
//! The seam between the session's opaque items and the item pane. Callers
//! with structured items (images, records, diffs) implement
//! [`ItemPresenter`]; everything `Display` works out of the box through
//! [`DisplayPresenter`].

use std::fmt::Display;

use ratatui::text::Text;

/// Turns an item into the text shown in the item pane.
pub trait ItemPresenter<T> {
    /// Render `item` for presentation.
    fn present(&self, item: &T) -> Text<'static>;
}

/// Presents any `Display` item as plain text.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayPresenter;

impl<T: Display> ItemPresenter<T> for DisplayPresenter {
    fn present(&self, item: &T) -> Text<'static> {
        Text::from(item.to_string())
    }
}

impl<T, F> ItemPresenter<T> for F
where
    F: Fn(&T) -> Text<'static>,
{
    fn present(&self, item: &T) -> Text<'static> {
        self(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_presenter_renders_plain_text() {
        let text = DisplayPresenter.present(&42);
        assert_eq!(text, Text::from("42"));
    }

    #[test]
    fn test_closures_are_presenters() {
        let presenter = |item: &&str| Text::from(format!(">> {item}"));
        assert_eq!(presenter.present(&"hi"), Text::from(">> hi"));
    }
}
