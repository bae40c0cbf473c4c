//! Input Controls
//!
//! The interactive control row for a session: per-mode widget state plus
//! the key-to-action mapping. Controls only ever emit values inside their
//! configured domain (a button emits its own label, the slider clamps to
//! its range), so the session never has to re-validate.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use labelkit_core::{Label, NumericRange, SessionEvent, TaskMode};

use crate::theme;

/// Rendered width of the slider track, in cells
const TRACK_WIDTH: usize = 20;

/// Per-mode control state
enum Controls {
    /// One button per discrete label, always individual buttons
    Buttons { labels: Vec<String> },
    /// Bounded numeric slider plus a submit button
    Slider { range: NumericRange, value: f64 },
    /// Single-line free text entry
    Entry { buffer: String },
}

/// The control row of an annotation surface.
///
/// Focus cycles across the mode's controls with the skip button (when
/// configured) always last. Once disabled, every key is inert.
pub struct InputSurface {
    controls: Controls,
    include_skip: bool,
    focused: usize,
    disabled: bool,
}

impl InputSurface {
    /// Build the control set for a task mode.
    pub fn from_mode(mode: &TaskMode, include_skip: bool) -> Self {
        let controls = match mode {
            TaskMode::Classification(labels) => Controls::Buttons {
                labels: labels.clone(),
            },
            TaskMode::Regression(range) => Controls::Slider {
                range: *range,
                value: range.min_f64(),
            },
            TaskMode::Captioning => Controls::Entry {
                buffer: String::new(),
            },
        };
        Self {
            controls,
            include_skip,
            focused: 0,
            disabled: false,
        }
    }

    /// Make every control inert (queue exhausted).
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Whether the controls are inert.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Map a key press onto a session action, updating control state.
    ///
    /// Returns `None` for keys that only move focus or edit control state.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SessionEvent> {
        if self.disabled {
            return None;
        }
        let count = self.focus_count();
        if count == 0 {
            // Empty label set without a skip button; nothing to drive.
            return None;
        }
        let on_skip = self.include_skip && self.focused + 1 == count;

        match &mut self.controls {
            Controls::Buttons { labels } => match key.code {
                KeyCode::Right | KeyCode::Tab => {
                    self.focused = (self.focused + 1) % count;
                    None
                }
                KeyCode::Left | KeyCode::BackTab => {
                    self.focused = (self.focused + count - 1) % count;
                    None
                }
                KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                    let idx = (c as usize) - ('1' as usize);
                    labels
                        .get(idx)
                        .cloned()
                        .map(|label| SessionEvent::Submit(Label::Choice(label)))
                }
                KeyCode::Enter if on_skip => Some(SessionEvent::Skip),
                KeyCode::Enter => labels
                    .get(self.focused)
                    .cloned()
                    .map(|label| SessionEvent::Submit(Label::Choice(label))),
                _ => None,
            },

            Controls::Slider { range, value } => match key.code {
                KeyCode::Left if !on_skip => {
                    *value = range.clamp(*value - range.step_size());
                    None
                }
                KeyCode::Right if !on_skip => {
                    *value = range.clamp(*value + range.step_size());
                    None
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    if self.include_skip {
                        self.focused = if on_skip { 0 } else { count - 1 };
                    }
                    None
                }
                KeyCode::Enter if on_skip => Some(SessionEvent::Skip),
                KeyCode::Enter => Some(SessionEvent::Submit(range.label_for(*value))),
                _ => None,
            },

            Controls::Entry { buffer } => match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    if self.include_skip {
                        self.focused = if on_skip { 0 } else { count - 1 };
                    }
                    None
                }
                KeyCode::Enter if on_skip => Some(SessionEvent::Skip),
                // The buffer is kept as-is across items, like a sticky
                // text widget; the empty string is a valid submission.
                KeyCode::Enter => Some(SessionEvent::Submit(Label::Text(buffer.clone()))),
                KeyCode::Char(c) if !on_skip => {
                    buffer.push(c);
                    None
                }
                KeyCode::Backspace if !on_skip => {
                    buffer.pop();
                    None
                }
                _ => None,
            },
        }
    }

    /// Build the control row line for a given terminal width.
    pub fn control_line(&self, width: u16) -> Line<'static> {
        match &self.controls {
            Controls::Buttons { labels } => self.buttons_line(labels),
            Controls::Slider { range, value } => self.slider_line(*range, *value),
            Controls::Entry { buffer } => self.entry_line(buffer, width),
        }
    }

    /// Key help for the current mode and state.
    pub fn hint_line(&self) -> Line<'static> {
        let hint = if self.disabled {
            "Enter or q to close".to_string()
        } else {
            let base = match self.controls {
                Controls::Buttons { .. } => "Left/Right move | Enter select | 1-9 pick",
                Controls::Slider { .. } => "Left/Right adjust | Enter submit | Tab focus",
                Controls::Entry { .. } => "type to edit | Enter submit | Tab focus",
            };
            if self.include_skip {
                format!("{base} | Esc close")
            } else {
                format!("{base} | Esc close (no skip)")
            }
        };
        Line::from(Span::styled(hint, Style::default().fg(theme::DIM_GRAY)))
    }

    fn focus_count(&self) -> usize {
        let own = match &self.controls {
            Controls::Buttons { labels } => labels.len(),
            Controls::Slider { .. } | Controls::Entry { .. } => 1,
        };
        own + usize::from(self.include_skip)
    }

    fn skip_is_focused(&self) -> bool {
        self.include_skip && self.focused + 1 == self.focus_count()
    }

    fn buttons_line(&self, labels: &[String]) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            spans.push(self.button_span(
                format!("[ {label} ]"),
                theme::CHOICE_BLUE,
                self.focused == i,
            ));
            spans.push(Span::raw(" "));
        }
        self.push_skip_button(&mut spans);
        Line::from(spans)
    }

    fn slider_line(&self, range: NumericRange, value: f64) -> Line<'static> {
        let min = range.min_f64();
        let max = range.max_f64();
        let span_width = max - min;
        let ratio = if span_width > 0.0 {
            ((value - min) / span_width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let knob = ((ratio * (TRACK_WIDTH - 1) as f64).round() as usize).min(TRACK_WIDTH - 1);

        let mut track = String::new();
        for cell in 0..TRACK_WIDTH {
            track.push(if cell == knob { '#' } else { '-' });
        }

        let shown = range.label_for(value);
        let track_color = if self.disabled {
            theme::DISABLED_GRAY
        } else {
            theme::TRACK_GRAY
        };

        let mut spans = vec![
            Span::styled(
                format!("{min} [{track}] {max}  = {shown}  "),
                Style::default().fg(track_color),
            ),
            self.button_span("[ submit ]".to_string(), theme::SUBMIT_GREEN, self.focused == 0),
            Span::raw(" "),
        ];
        self.push_skip_button(&mut spans);
        Line::from(spans)
    }

    fn entry_line(&self, buffer: &str, width: u16) -> Line<'static> {
        // Reserve room for the prompt, cursor, and skip button.
        let reserved = 4 + "[ skip ]".width() + 2;
        let available = (width as usize).saturating_sub(reserved);
        let shown = fit_tail(buffer, available);

        let entry_color = if self.disabled {
            theme::DISABLED_GRAY
        } else {
            theme::ENTRY_GREEN
        };
        let cursor = if self.disabled || self.skip_is_focused() { "" } else { "_" };

        let mut spans = vec![
            Span::styled(
                format!("> {shown}{cursor}  "),
                Style::default().fg(entry_color),
            ),
        ];
        self.push_skip_button(&mut spans);
        Line::from(spans)
    }

    fn push_skip_button(&self, spans: &mut Vec<Span<'static>>) {
        if self.include_skip {
            spans.push(self.button_span(
                "[ skip ]".to_string(),
                theme::SKIP_YELLOW,
                self.skip_is_focused(),
            ));
        }
    }

    fn button_span(&self, text: String, color: ratatui::style::Color, focused: bool) -> Span<'static> {
        let style = if self.disabled {
            Style::default().fg(theme::DISABLED_GRAY)
        } else if focused {
            Style::default()
                .fg(theme::FOCUS_BLACK)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        Span::styled(text, style)
    }
}

/// Keep the tail of `s` that fits in `max_width` terminal cells.
fn fit_tail(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut tail = String::new();
    let mut used = 0;
    for c in s.chars().rev() {
        let w = c.to_string().width();
        if used + w > max_width {
            break;
        }
        used += w;
        tail.insert(0, c);
    }
    tail
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn buttons(include_skip: bool) -> InputSurface {
        InputSurface::from_mode(&TaskMode::classification(["cat", "dog"]), include_skip)
    }

    #[test]
    fn test_enter_submits_focused_button() {
        let mut surface = buttons(true);
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::choice("cat")))
        );

        surface.handle_key(key(KeyCode::Right));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::choice("dog")))
        );
    }

    #[test]
    fn test_digits_pick_buttons_directly() {
        let mut surface = buttons(true);
        assert_eq!(
            surface.handle_key(key(KeyCode::Char('2'))),
            Some(SessionEvent::Submit(Label::choice("dog")))
        );
        // No third label configured.
        assert_eq!(surface.handle_key(key(KeyCode::Char('3'))), None);
    }

    #[test]
    fn test_focus_wraps_onto_skip() {
        let mut surface = buttons(true);
        surface.handle_key(key(KeyCode::Right));
        surface.handle_key(key(KeyCode::Right));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Skip)
        );

        // One more step wraps back to the first label.
        surface.handle_key(key(KeyCode::Right));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::choice("cat")))
        );
    }

    #[test]
    fn test_no_skip_control_without_flag() {
        let mut surface = buttons(false);
        surface.handle_key(key(KeyCode::Right));
        surface.handle_key(key(KeyCode::Right));
        // Only the two label buttons exist; focus wrapped to "cat".
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::choice("cat")))
        );
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let mode = TaskMode::integer_range(0, 3, None).unwrap();
        let mut surface = InputSurface::from_mode(&mode, true);

        // Starts at the minimum and cannot go below it.
        surface.handle_key(key(KeyCode::Left));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::int(0)))
        );

        for _ in 0..10 {
            surface.handle_key(key(KeyCode::Right));
        }
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::int(3)))
        );
    }

    #[test]
    fn test_slider_real_range_emits_real_labels() {
        let mode = TaskMode::real_range(0.0, 1.0, Some(0.5)).unwrap();
        let mut surface = InputSurface::from_mode(&mode, true);
        surface.handle_key(key(KeyCode::Right));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::real(0.5)))
        );
    }

    #[test]
    fn test_slider_tab_reaches_skip() {
        let mode = TaskMode::integer_range(0, 5, None).unwrap();
        let mut surface = InputSurface::from_mode(&mode, true);
        surface.handle_key(key(KeyCode::Tab));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Skip)
        );
    }

    #[test]
    fn test_entry_edits_and_submits() {
        let mut surface = InputSurface::from_mode(&TaskMode::captioning(), true);
        for c in "hey".chars() {
            surface.handle_key(key(KeyCode::Char(c)));
        }
        surface.handle_key(key(KeyCode::Backspace));
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::text("he")))
        );
    }

    #[test]
    fn test_entry_empty_submission_is_valid() {
        let mut surface = InputSurface::from_mode(&TaskMode::captioning(), true);
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Submit(Label::text("")))
        );
    }

    #[test]
    fn test_disabled_surface_is_inert() {
        let mut surface = buttons(true);
        surface.disable();
        assert_eq!(surface.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(surface.handle_key(key(KeyCode::Char('1'))), None);
    }

    #[test]
    fn test_empty_label_set_renders_only_skip() {
        let mut surface = InputSurface::from_mode(&TaskMode::Classification(Vec::new()), true);
        // The skip button is the only control, so Enter skips immediately.
        assert_eq!(
            surface.handle_key(key(KeyCode::Enter)),
            Some(SessionEvent::Skip)
        );
    }

    #[test]
    fn test_fit_tail_keeps_the_end() {
        assert_eq!(fit_tail("hello world", 5), "world");
        assert_eq!(fit_tail("short", 10), "short");
    }
}
