//! Main TUI application state and logic

use crate::errors::HanoiError;
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

const SPEED_STEP: i32 = 5;
const DELAY_STEP: Duration = Duration::from_millis(10);
const MAX_INPUT_LEN: usize = 8;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Board,
    Moves,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Board => FocusedPane::Moves,
            FocusedPane::Moves => FocusedPane::Board,
        }
    }
}

/// Whether keys drive the app or edit the disk count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    DiskCount(String),
}

/// The main application state
pub struct App {
    /// The solve / playback session
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Scroll offset of the move log
    pub moves_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    pub input_mode: InputMode,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Board,
            moves_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            input_mode: InputMode::Normal,
        }
    }

    /// Run the TUI application.
    ///
    /// Each frame tick advances the animations, redraws, then drains any
    /// pending key events without blocking.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut frames = tokio::time::interval(self.session.config().frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frames.tick().await;
            self.session.tick();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.session.cancel();
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Board and move log side by side, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(78), Constraint::Percentage(22)])
            .split(main_chunks[0]);

        let records = self.session.records();
        super::panes::render_board_pane(
            frame,
            columns[0],
            self.session.visual(),
            &records,
            self.session.config().disks,
            self.session.caption(),
            self.focused_pane == FocusedPane::Board,
        );

        super::panes::render_moves_pane(
            frame,
            columns[1],
            self.session.log(),
            self.focused_pane == FocusedPane::Moves,
            &mut self.moves_scroll,
        );

        let disk_input = match &self.input_mode {
            InputMode::DiskCount(input) => Some(input.as_str()),
            InputMode::Normal => None,
        };
        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusRenderData {
                message: &self.status_message,
                shown: self.session.shown(),
                total_moves: self.session.ledger().counter(),
                config: self.session.config(),
                is_playing: self.session.is_replaying(),
                is_settled: self.session.is_settled(),
                disk_input,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let InputMode::DiskCount(input) = &mut self.input_mode {
            match key.code {
                KeyCode::Enter => {
                    let input = std::mem::take(input);
                    self.input_mode = InputMode::Normal;
                    self.apply_disk_count(&input);
                }
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    self.status_message = "Disk count unchanged".to_string();
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if input.len() < MAX_INPUT_LEN => input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Char('v') => match self.session.visualize() {
                Ok(()) => {
                    self.status_message = "Playing...".to_string();
                    self.moves_scroll = usize::MAX;
                }
                Err(err) => self.report(err),
            },
            KeyCode::Char('s') => match self.session.solve() {
                Ok(report) => {
                    self.status_message = format!(
                        "Solved in {} moves (~{}ms to visualize)",
                        report.moves,
                        report.estimated.as_millis()
                    );
                    self.moves_scroll = usize::MAX;
                }
                Err(err) => self.report(err),
            },
            KeyCode::Char('r') => match self.session.reset() {
                Ok(()) => self.status_message = "Reset".to_string(),
                Err(err) => self.report(err),
            },
            KeyCode::Char('c') => {
                if self.session.cancel() {
                    self.status_message = "Cancelled; disks in flight will land".to_string();
                }
            }
            KeyCode::Char('d') => {
                if self.session.is_replaying() {
                    return;
                }
                self.input_mode = InputMode::DiskCount(String::new());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let speed = self.session.config().speed.saturating_add(SPEED_STEP);
                self.session.set_speed(speed);
                self.status_message = format!("Speed {}", self.session.config().speed);
            }
            KeyCode::Char('-') => {
                let speed = self.session.config().speed.saturating_sub(SPEED_STEP);
                self.session.set_speed(speed);
                self.status_message = format!("Speed {}", self.session.config().speed);
            }
            KeyCode::Char(']') => {
                let delay = self.session.config().delay.saturating_add(DELAY_STEP);
                self.session.set_delay(delay);
                self.status_message = format!("Delay {}ms", delay.as_millis());
            }
            KeyCode::Char('[') => {
                let delay = self.session.config().delay.saturating_sub(DELAY_STEP);
                self.session.set_delay(delay);
                self.status_message = format!("Delay {}ms", delay.as_millis());
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => {
                if self.focused_pane == FocusedPane::Moves {
                    self.moves_scroll = self.moves_scroll.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.focused_pane == FocusedPane::Moves {
                    self.moves_scroll = self.moves_scroll.saturating_add(1);
                }
            }
            _ => {}
        }
    }

    fn apply_disk_count(&mut self, input: &str) {
        match self.session.set_disk_count(input) {
            Ok(disks) => self.status_message = format!("{} disks", disks),
            Err(err) => self.report(err),
        }
    }

    /// Show an error in the status bar; rejected requests are ignored
    fn report(&mut self, err: HanoiError) {
        match err {
            HanoiError::ConcurrentOperationRejected { .. } => {}
            HanoiError::InvalidConfiguration { input, .. } => {
                self.status_message = format!(
                    "Invalid disk count '{}', keeping {}",
                    input,
                    self.session.config().disks
                );
            }
            err => {
                self.status_message = format!("Error: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_disk_count_input() {
        let mut app = App::new(Session::new(Config::default()));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.config().disks, 6);
    }

    #[test]
    fn test_invalid_disk_count_reverts() {
        let mut app = App::new(Session::new(Config::default()));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.config().disks, 3);
        assert!(app.status_message.contains("keeping 3"));
    }

    #[test]
    fn test_speed_never_drops_below_one() {
        let mut app = App::new(Session::new(Config::default()));
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.session.config().speed, 1);
    }

    #[test]
    fn test_solve_key() {
        let mut app = App::new(Session::new(Config::default()));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.session.ledger().counter(), 7);
        assert!(app.status_message.starts_with("Solved in 7 moves"));
    }
}
