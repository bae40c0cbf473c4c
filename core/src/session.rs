//! Annotation Session
//!
//! The state machine at the heart of labelkit. A session owns a fixed item
//! queue, a monotone cursor, and the append-only record list; it advances by
//! exactly one item per completed action (submit or skip) and never revisits
//! an item.
//!
//! # Design Philosophy
//!
//! The session is strictly synchronous and event-driven: it does work only
//! inside `start`, `submit`, and `skip`, each of which runs to completion
//! before the next action is processed. All bookkeeping lives in explicit
//! fields owned by the session, mutated only by its own handlers.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::events::{SessionEvent, Step};
use crate::label::Label;
use crate::options::{ConfigError, TaskMode};
use crate::render::Renderer;

/// Completion notice shown when the queue is exhausted.
pub const DONE_NOTICE: &str = "Annotation done.";

/// Session state.
///
/// `Terminal` is absorbing; once reached, all actions are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Accepting actions (or awaiting `start`)
    Active,
    /// Queue exhausted; controls should be disabled
    Terminal,
}

/// One collected `(item, label)` record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation<T> {
    /// The annotated item
    pub item: T,
    /// The label the user submitted for it
    pub label: Label,
}

/// Session behavior flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Permute the item queue once, before the first presentation
    pub shuffle: bool,
    /// Offer a skip control that advances without recording a label
    pub include_skip: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shuffle: false,
            include_skip: true,
        }
    }
}

/// An interactive annotation session over a fixed queue of items.
///
/// Constructed with a queue, a [`TaskMode`], and flags; driven by `start`
/// followed by `submit`/`skip` actions until the queue is exhausted. The
/// collected records come back out via [`AnnotationSession::records`] or
/// [`AnnotationSession::into_records`].
pub struct AnnotationSession<T> {
    items: Vec<T>,
    mode: TaskMode,
    config: SessionConfig,
    /// Count of completed actions; index of the current item while Active.
    cursor: usize,
    started: bool,
    state: SessionState,
    records: Vec<Annotation<T>>,
    skipped: usize,
    renderer: Option<Box<dyn Renderer<T>>>,
}

impl<T: Clone> AnnotationSession<T> {
    /// Create a session over `items` with an already-resolved task mode.
    ///
    /// The queue is copied in and, if configured, shuffled exactly once
    /// here; it never changes afterwards.
    pub fn new(items: impl IntoIterator<Item = T>, mode: TaskMode, config: SessionConfig) -> Self {
        let mut items: Vec<T> = items.into_iter().collect();
        if config.shuffle {
            items.shuffle(&mut rand::thread_rng());
        }
        tracing::debug!(
            items = items.len(),
            mode = mode.name(),
            shuffle = config.shuffle,
            include_skip = config.include_skip,
            "session created"
        );
        Self {
            items,
            mode,
            config,
            cursor: 0,
            started: false,
            state: SessionState::Active,
            records: Vec::new(),
            skipped: 0,
            renderer: None,
        }
    }

    /// Create a session from a loose JSON options descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] if the descriptor
    /// matches none of the recognized shapes; nothing is constructed and no
    /// rendering occurs in that case.
    pub fn with_options(
        items: impl IntoIterator<Item = T>,
        options: &serde_json::Value,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        let mode = TaskMode::from_value(options)?;
        Ok(Self::new(items, mode, config))
    }

    /// Install the renderer capability invoked once per presentation.
    pub fn set_renderer(&mut self, renderer: impl Renderer<T> + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    /// Begin the session: present the first item, or finish immediately if
    /// the queue is empty. Calling `start` twice is ignored.
    pub fn start(&mut self) -> Step {
        if self.started {
            tracing::warn!("start called on a session that already started");
            return Step::Ignored;
        }
        self.started = true;
        if self.items.is_empty() {
            self.state = SessionState::Terminal;
            tracing::info!("empty queue, {}", DONE_NOTICE);
            return Step::Finished;
        }
        self.present();
        Step::Presented
    }

    /// Apply a surface action.
    pub fn apply(&mut self, event: SessionEvent) -> Step {
        match event {
            SessionEvent::Submit(label) => self.submit(label),
            SessionEvent::Skip => self.skip(),
        }
    }

    /// Record a label for the current item and advance.
    ///
    /// Ignored before `start` and after the session is terminal; enabled
    /// controls never produce those calls, so this is a quiet no-op rather
    /// than an error.
    pub fn submit(&mut self, label: Label) -> Step {
        if !self.accepting() {
            tracing::warn!("submit ignored, session is not accepting actions");
            return Step::Ignored;
        }
        let item = self.items[self.cursor].clone();
        self.records.push(Annotation { item, label });
        self.advance()
    }

    /// Advance past the current item without recording anything.
    ///
    /// Ignored when the skip control was not configured, before `start`,
    /// and after the session is terminal.
    pub fn skip(&mut self) -> Step {
        if !self.config.include_skip {
            tracing::warn!("skip ignored, session has no skip control");
            return Step::Ignored;
        }
        if !self.accepting() {
            tracing::warn!("skip ignored, session is not accepting actions");
            return Step::Ignored;
        }
        self.skipped += 1;
        self.advance()
    }

    /// The item currently awaiting an action, if any.
    #[must_use]
    pub fn current_item(&self) -> Option<&T> {
        if self.accepting() {
            self.items.get(self.cursor)
        } else {
            None
        }
    }

    /// Status text, recomputed from counts: `"N examples annotated, M
    /// examples left"`.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "{} examples annotated, {} examples left",
            self.records.len(),
            self.items.len() - self.cursor
        )
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the queue is exhausted.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state == SessionState::Terminal
    }

    /// The configured task mode.
    #[must_use]
    pub fn mode(&self) -> &TaskMode {
        &self.mode
    }

    /// The configured behavior flags.
    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// The item queue, in presentation (post-shuffle) order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Records collected so far, in submission order.
    #[must_use]
    pub fn records(&self) -> &[Annotation<T>] {
        &self.records
    }

    /// Count of annotated items.
    #[must_use]
    pub fn annotated(&self) -> usize {
        self.records.len()
    }

    /// Count of skipped items.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Items not yet acted on, including the one currently presented.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items.len() - self.cursor
    }

    /// Consume the session, returning the collected records in submission
    /// order. Skipped items contribute nothing.
    #[must_use]
    pub fn into_records(self) -> Vec<Annotation<T>> {
        self.records
    }

    fn accepting(&self) -> bool {
        self.started && self.state == SessionState::Active
    }

    /// Move the cursor past the acted-on item and present the next one, or
    /// finish when the queue is exhausted.
    fn advance(&mut self) -> Step {
        self.cursor += 1;
        tracing::debug!(
            cursor = self.cursor,
            annotated = self.records.len(),
            skipped = self.skipped,
            "advanced"
        );
        if self.cursor >= self.items.len() {
            self.state = SessionState::Terminal;
            tracing::info!(
                annotated = self.records.len(),
                skipped = self.skipped,
                "{}",
                DONE_NOTICE
            );
            return Step::Finished;
        }
        self.present();
        Step::Presented
    }

    fn present(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(&self.items[self.cursor]);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classification_session(items: Vec<i32>) -> AnnotationSession<i32> {
        AnnotationSession::new(
            items,
            TaskMode::classification(["cat", "dog"]),
            SessionConfig::default(),
        )
    }

    #[test]
    fn test_worked_example() {
        // items [1,2,3], submit "dog", skip, submit "cat"
        let mut session = classification_session(vec![1, 2, 3]);

        assert_eq!(session.start(), Step::Presented);
        assert_eq!(session.status_line(), "0 examples annotated, 3 examples left");
        assert_eq!(session.current_item(), Some(&1));

        assert_eq!(session.submit(Label::choice("dog")), Step::Presented);
        assert_eq!(session.skip(), Step::Presented);
        assert_eq!(session.current_item(), Some(&3));
        assert_eq!(session.submit(Label::choice("cat")), Step::Finished);

        assert_eq!(session.status_line(), "2 examples annotated, 0 examples left");
        assert!(session.is_terminal());

        let records = session.into_records();
        assert_eq!(
            records,
            vec![
                Annotation { item: 1, label: Label::choice("dog") },
                Annotation { item: 3, label: Label::choice("cat") },
            ]
        );
    }

    #[test]
    fn test_empty_queue_finishes_on_start() {
        let mut session = classification_session(Vec::new());
        assert_eq!(session.start(), Step::Finished);
        assert!(session.is_terminal());
        assert_eq!(session.status_line(), "0 examples annotated, 0 examples left");
        assert!(session.into_records().is_empty());
    }

    #[test]
    fn test_actions_before_start_are_ignored() {
        let mut session = classification_session(vec![1]);
        assert_eq!(session.submit(Label::choice("cat")), Step::Ignored);
        assert_eq!(session.skip(), Step::Ignored);
        assert!(session.records().is_empty());
        assert_eq!(session.current_item(), None);
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let mut session = classification_session(vec![1]);
        session.start();
        assert_eq!(session.submit(Label::choice("cat")), Step::Finished);
        // Finished is reported exactly once; everything after is ignored.
        assert_eq!(session.submit(Label::choice("dog")), Step::Ignored);
        assert_eq!(session.skip(), Step::Ignored);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_skip_requires_skip_control() {
        let mut session = AnnotationSession::new(
            vec![1, 2],
            TaskMode::classification(["a"]),
            SessionConfig { shuffle: false, include_skip: false },
        );
        session.start();
        assert_eq!(session.skip(), Step::Ignored);
        assert_eq!(session.current_item(), Some(&1));
    }

    #[test]
    fn test_counts_stay_consistent() {
        let mut session = classification_session(vec![1, 2, 3, 4]);
        session.start();

        session.submit(Label::choice("cat"));
        session.skip();
        assert_eq!(session.annotated(), 1);
        assert_eq!(session.skipped(), 1);
        assert_eq!(session.remaining(), 2);
        assert_eq!(
            session.annotated() + session.skipped() + session.remaining(),
            4
        );
    }

    #[test]
    fn test_apply_dispatches_events() {
        let mut session = classification_session(vec![1, 2]);
        session.start();
        assert_eq!(
            session.apply(SessionEvent::Submit(Label::choice("cat"))),
            Step::Presented
        );
        assert_eq!(session.apply(SessionEvent::Skip), Step::Finished);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_double_start_is_ignored() {
        let mut session = classification_session(vec![1, 2]);
        assert_eq!(session.start(), Step::Presented);
        assert_eq!(session.start(), Step::Ignored);
        assert_eq!(session.current_item(), Some(&1));
    }

    #[test]
    fn test_empty_caption_is_a_valid_submission() {
        let mut session = AnnotationSession::new(
            vec!["photo"],
            TaskMode::captioning(),
            SessionConfig::default(),
        );
        session.start();
        assert_eq!(session.submit(Label::text("")), Step::Finished);
        assert_eq!(session.records()[0].label, Label::text(""));
    }
}
