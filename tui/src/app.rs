//! Annotator Application
//!
//! The App struct drives one annotation session in the terminal:
//! - converts key presses into surface actions
//! - applies actions to the headless session
//! - renders status, item pane, controls, and key hints
//!
//! The loop is strictly event-driven: it blocks on the next terminal event,
//! handles it to completion, redraws, and blocks again. No timers, no
//! background work.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use labelkit_core::{
    Annotation, AnnotationSession, SessionConfig, SessionEvent, Step, TaskMode, DONE_NOTICE,
};

use crate::controls::InputSurface;
use crate::presenter::ItemPresenter;
use crate::theme;

/// Terminal frontend for one annotation session.
pub struct App<T, P> {
    session: AnnotationSession<T>,
    surface: InputSurface,
    presenter: P,
    running: bool,
    notice: Option<&'static str>,
}

impl<T: Clone, P: ItemPresenter<T>> App<T, P> {
    /// Wire a session to its control surface and presenter.
    pub fn new(session: AnnotationSession<T>, presenter: P) -> Self {
        let surface = InputSurface::from_mode(session.mode(), session.config().include_skip);
        Self {
            session,
            surface,
            presenter,
            running: true,
            notice: None,
        }
    }

    /// Run to completion on the given terminal, returning the collected
    /// records (also on early close via Esc).
    pub fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<Vec<Annotation<T>>> {
        self.start();
        self.draw(terminal)?;
        while self.running {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
            self.draw(terminal)?;
        }
        Ok(self.session.into_records())
    }

    /// Present the first item (or the completion notice for an empty queue).
    pub fn start(&mut self) {
        if self.session.start() == Step::Finished {
            self.finish();
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.running = false;
            return;
        }
        if self.session.is_terminal() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
                self.running = false;
            }
            return;
        }
        if let Some(action) = self.surface.handle_key(key) {
            self.apply(action);
        }
    }

    /// Whether the app still wants events.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The driven session (read-only).
    pub fn session(&self) -> &AnnotationSession<T> {
        &self.session
    }

    /// Consume the app, returning the records collected so far.
    pub fn into_records(self) -> Vec<Annotation<T>> {
        self.session.into_records()
    }

    /// Draw one frame.
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn apply(&mut self, action: SessionEvent) {
        if self.session.apply(action) == Step::Finished {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.surface.disable();
        self.notice = Some(DONE_NOTICE);
        tracing::debug!("surface disabled, queue exhausted");
    }

    fn render(&self, frame: &mut Frame) {
        let [status_area, item_area, control_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let status = Line::from(Span::styled(
            format!(" {}", self.session.status_line()),
            Style::default().fg(theme::DIM_GRAY),
        ));
        frame.render_widget(status, status_area);

        let body = if let Some(notice) = self.notice {
            Text::from(Span::styled(
                notice,
                Style::default().fg(theme::NOTICE_CYAN),
            ))
        } else if let Some(item) = self.session.current_item() {
            self.presenter.present(item)
        } else {
            Text::default()
        };
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), item_area);

        frame.render_widget(self.surface.control_line(control_area.width), control_area);
        frame.render_widget(self.surface.hint_line(), hint_area);
    }
}

/// One-call entry point: set the terminal up, run a session over `items`,
/// restore the terminal, and return the collected records.
pub fn run_annotator<T, P>(
    items: impl IntoIterator<Item = T>,
    mode: TaskMode,
    config: SessionConfig,
    presenter: P,
) -> anyhow::Result<Vec<Annotation<T>>>
where
    T: Clone,
    P: ItemPresenter<T>,
{
    let session = AnnotationSession::new(items, mode, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = App::new(session, presenter).run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
