//! TUI (Terminal User Interface) module for spaceman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `Guessing`: letters submit guesses immediately, ESC quits
//! - `GameOver`: the word is shown until any key is pressed

use crate::game_loop::{GameInterface, UserAction};
use crate::game_state::{ALPHABET, GameState, GuessOutcome};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const AVAILABLE_STYLE: Style = Style::new().fg(Color::White);
const USED_STYLE: Style = Style::new().fg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Guessing,
    GameOver,
}

/// Everything a frame needs, borrowed from the interface.
struct RenderContext<'a> {
    game: Option<&'a GameState>,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
}

/// Map a key press to a player action.
fn key_to_action(key: KeyEvent) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UserAction::Exit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(UserAction::Exit),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Some(UserAction::Guess(c)),
        _ => None,
    }
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Word
            Constraint::Length(3), // Guesses remaining
            Constraint::Length(4), // Alphabet
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    if let Some(game) = ctx.game {
        render_word(f, chunks[1], game, ctx.state);
        render_allowance(f, chunks[2], game);
        render_alphabet(f, chunks[3], game);
    }
    render_messages(f, chunks[4], ctx.message, ctx.error_message);
    render_instructions(f, chunks[5], ctx.state);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("SPACEMAN")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_word(f: &mut Frame, area: Rect, game: &GameState, state: TuiState) {
    // Once the game is over the whole word is shown
    let shown: Vec<char> = if state == TuiState::GameOver {
        game.word().chars().collect()
    } else {
        game.masked_word().chars().collect()
    };

    let mut spans = vec![Span::raw("  ")];
    for (slot, letter) in game.guessed_word_state().iter().zip(shown) {
        let style = if slot.is_some() {
            SUCCESS_STYLE
        } else if state == TuiState::GameOver {
            ERROR_STYLE
        } else {
            AVAILABLE_STYLE
        };
        spans.push(Span::styled(format!("{letter} "), style));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().title("Word").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_allowance(f: &mut Frame, area: Rect, game: &GameState) {
    let ratio = if game.guesses_allowed() == 0 {
        0.0
    } else {
        f64::from(game.guesses_remaining()) / f64::from(game.guesses_allowed())
    };
    let color = match game.guesses_remaining() {
        0 | 1 => Color::Red,
        2 => Color::Yellow,
        _ => Color::Green,
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Guesses left").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "{}/{}",
            game.guesses_remaining(),
            game.guesses_allowed()
        ));
    f.render_widget(gauge, area);
}

fn render_alphabet(f: &mut Frame, area: Rect, game: &GameState) {
    let spans: Vec<Span> = ALPHABET
        .chars()
        .map(|c| {
            let style = if game.is_available(c) {
                AVAILABLE_STYLE
            } else {
                USED_STYLE
            };
            Span::styled(format!("{c} "), style)
        })
        .collect();
    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Letters").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
    let mut lines = Vec::new();
    if !message.is_empty() {
        lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
    }
    if !error_message.is_empty() {
        lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
    }
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
    let text = match state {
        TuiState::Guessing => "Type a letter to guess | ESC: Quit",
        TuiState::GameOver => "Press any key to exit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Run `setup`, calling `restore` if it fails.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T, io::Error>,
    restore: impl FnOnce(),
) -> Result<T, io::Error> {
    setup().inspect_err(|_| restore())
}

/// Main TUI interface component.
///
/// Keeps a copy of the last board it was shown so it can redraw between
/// calls from the game loop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    game: Option<GameState>,
    state: TuiState,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        // Self does not exist yet, so Drop cannot leave raw mode on failure
        let terminal = setup_or_restore(Self::setup_terminal, || {
            let _ = disable_raw_mode();
        })?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            game: None,
            state: TuiState::Guessing,
            message: String::new(),
            error_message: String::new(),
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: self.game.as_ref(),
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Wait up to one poll interval for a key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, game: &GameState) {
        self.game = Some(game.clone());
        self.state = TuiState::Guessing;
        self.draw_or_log();
    }

    fn read_guess(&mut self, _game: &GameState) -> Option<UserAction> {
        loop {
            match self.next_key() {
                Ok(Some(key)) => {
                    self.error_message.clear();
                    let action = key_to_action(key);
                    if action.is_none() {
                        self.error_message = "Only letters A-Z can be guessed".to_string();
                        self.draw_or_log();
                    }
                    debug_log!("read_guess() - {:?} -> {:?}", key.code, action);
                    return action;
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - input error: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_guess_result(&mut self, letter: char, outcome: GuessOutcome) {
        self.message = match outcome {
            GuessOutcome::Correct { occurrences } => format!("{letter} appears {occurrences}x"),
            GuessOutcome::Incorrect => format!("No {letter} in the word"),
        };
    }

    fn display_already_guessed(&mut self, letter: char) {
        self.error_message = format!("{letter} was already guessed");
    }

    fn display_game_over(&mut self, game: &GameState) {
        self.game = Some(game.clone());
        self.state = TuiState::GameOver;
        self.message = if game.is_won() {
            format!("You saved the spaceman! The word was {}", game.word())
        } else {
            format!("Out of guesses. The word was {}", game.word())
        };
        self.error_message.clear();
        self.draw_or_log();

        loop {
            match self.next_key() {
                Ok(Some(_)) | Err(_) => break,
                Ok(None) => {}
            }
        }
    }

    fn display_exit_message(&mut self) {
        info_log!("TUI exit requested");
        self.message = "Exiting.".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            debug_log!("Cleanup error: {}", e);
        }
    }
}
