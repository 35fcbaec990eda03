//! TUI (Terminal User Interface) front end for Mastermind
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `Waiting` → `EnteringCode` → `Waiting` (repeated per request)
//! - Terminal state: `GameOver`, left by any key

use crate::code::{Code, Hue, Peg};
use crate::error::InvalidCode;
use crate::game_state::{BoardView, CodeRequest, GameInterface, Outcome};
use crate::recorder::Turn;
use crate::rules::Rules;
use crate::scoring::Feedback;
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
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 1;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const EMPTY_STYLE: Style = Style::new().fg(Color::DarkGray);

fn peg_color(peg: Peg) -> Color {
    match peg.hue() {
        Hue::Red => Color::Red,
        Hue::Green => Color::Green,
        Hue::Yellow => Color::Yellow,
        Hue::Blue => Color::Blue,
        Hue::Magenta => Color::Magenta,
        Hue::Cyan => Color::Cyan,
        Hue::Plain => Color::White,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TuiState {
    Waiting,
    EnteringCode { request: CodeRequest },
    GameOver,
}

/// What a key press did to the input line.
#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Edited,
    Submit(String),
    Quit,
    Ignored,
}

/// Applies one key press to `input`, which holds at most `max_len` symbols.
fn apply_code_key(input: &mut String, key: KeyEvent, max_len: usize) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    {
        return KeyOutcome::Ignored;
    }
    match key.code {
        KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Enter => KeyOutcome::Submit(std::mem::take(input)),
        KeyCode::Backspace if !input.is_empty() => {
            input.pop();
            KeyOutcome::Edited
        }
        KeyCode::Char(c) if c.is_ascii_graphic() && input.chars().count() < max_len => {
            input.push(c.to_ascii_uppercase());
            KeyOutcome::Edited
        }
        _ => KeyOutcome::Ignored,
    }
}

fn code_spans(code: &Code) -> Vec<Span<'static>> {
    code.pegs()
        .iter()
        .map(|&peg| {
            Span::styled(
                format!(" {peg} "),
                Style::default().fg(Color::Black).bg(peg_color(peg)),
            )
        })
        .collect()
}

fn feedback_spans(feedback: Feedback, length: usize) -> Vec<Span<'static>> {
    feedback
        .render(length)
        .chars()
        .map(|c| match c {
            'E' => Span::styled("●", Style::default().fg(Color::White)),
            'P' => Span::styled("○", Style::default().fg(Color::White)),
            _ => Span::styled("·", EMPTY_STYLE),
        })
        .collect()
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rules: &'a Rules,
    turns: &'a [Turn],
    current_input: &'a str,
    state: &'a TuiState,
    remaining: usize,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rules: Rules,
    turns: Vec<Turn>,
    remaining: usize,
    current_input: String,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(rules: Rules) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        let remaining = rules.max_attempts;
        Ok(Self {
            terminal,
            rules,
            turns: Vec::new(),
            remaining,
            current_input: String::new(),
            state: TuiState::Waiting,
            message: String::new(),
            error_message: String::new(),
            status: "Waiting for the secret code".to_string(),
        })
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

    /// Blocks until a key is pressed. Used to hold the final board on screen.
    pub fn wait_for_key(&mut self) -> Result<(), io::Error> {
        self.draw()?;
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(());
            }
        }
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rules: &self.rules,
            turns: &self.turns,
            current_input: &self.current_input,
            state: &self.state,
            remaining: self.remaining,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_height = u16::try_from(ctx.rules.max_attempts + 3).unwrap_or(u16::MAX);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Board
                Constraint::Min(6),               // Info panel
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MASTERMIND")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title(format!("Guesses ({} left)", ctx.remaining))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let length = ctx.rules.code_length;
        for row in 0..ctx.rules.max_attempts {
            let y = inner.y + (row as u16 * ROW_SPACING);
            if y >= inner.y + inner.height {
                break;
            }
            let mut spans = vec![Span::raw(format!("{:>2}  ", row + 1))];
            match ctx.turns.get(row) {
                Some(turn) => {
                    spans.extend(code_spans(&turn.guess));
                    spans.push(Span::raw("  "));
                    spans.extend(feedback_spans(turn.feedback, length));
                }
                None if row == ctx.turns.len() => {
                    spans.extend(Self::input_spans(ctx, length));
                }
                None => {
                    spans.push(Span::styled(" · ".repeat(length), EMPTY_STYLE));
                }
            }
            Self::render_line(f, inner, y, spans);
        }
    }

    fn input_spans(ctx: &RenderContext, length: usize) -> Vec<Span<'static>> {
        let hide = matches!(
            ctx.state,
            TuiState::EnteringCode {
                request: CodeRequest::Secret,
                ..
            }
        );
        let guessing = matches!(
            ctx.state,
            TuiState::EnteringCode {
                request: CodeRequest::Guess { .. },
                ..
            }
        );
        let mut chars = ctx.current_input.chars();
        (0..length)
            .map(|_| match chars.next() {
                Some(_) if hide => Span::styled(" * ", Style::default().fg(Color::White)),
                Some(c) if guessing => Span::styled(
                    format!(" {c} "),
                    Style::default().fg(Color::Black).bg(peg_color(Peg::new(c))),
                ),
                Some(c) => Span::raw(format!(" {c} ")),
                None => Span::styled(" _ ", Style::default().fg(Color::White).bg(Color::DarkGray)),
            })
            .collect()
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        let mut legend = vec![Span::styled("Colors: ", HEADER_STYLE)];
        for peg in ctx.rules.palette.iter() {
            legend.push(Span::styled(
                format!(" {peg} "),
                Style::default().fg(Color::Black).bg(peg_color(peg)),
            ));
            legend.push(Span::raw(" "));
        }
        lines.push(Line::from(legend));
        lines.push(Line::from("● right color, right place   ○ right color, wrong place"));
        lines.push(Line::from(""));

        if !ctx.message.is_empty() {
            let style = if matches!(ctx.state, TuiState::GameOver) {
                SUCCESS_STYLE
            } else {
                MESSAGE_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message.to_string(), style)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringCode { .. } => {
                "Type color letters | BACKSPACE: Delete | ENTER: Submit | ESC: Quit"
            }
            TuiState::Waiting => "Waiting for the other player...",
            TuiState::GameOver => "Press any key to exit",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits for the next key press. `Ok(None)` when the poll timed out or
    /// the event was not a key press.
    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                debug_log!("next_key() - Key event received: {:?}", key.code);
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_code(&mut self, player: &str, request: CodeRequest, rules: &Rules) -> Option<String> {
        self.rules = rules.clone();
        self.current_input.clear();
        self.state = TuiState::EnteringCode { request };
        self.status = match request {
            CodeRequest::Secret => format!("{player}, enter the secret code (hidden)"),
            CodeRequest::Guess { attempt } => format!("{player}, enter guess #{attempt}"),
        };

        loop {
            if self.draw().is_err() {
                info_log!("read_code() - Draw failed, giving up");
                return None;
            }
            let key = match self.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("reading terminal input failed: {e}");
                    return None;
                }
            };
            match apply_code_key(&mut self.current_input, key, rules.code_length) {
                KeyOutcome::Submit(code) => {
                    info_log!("read_code() - Submitted {} symbols", code.chars().count());
                    self.error_message.clear();
                    self.state = TuiState::Waiting;
                    return Some(code);
                }
                KeyOutcome::Quit => {
                    info_log!("read_code() - ESC pressed, quitting");
                    self.state = TuiState::Waiting;
                    return None;
                }
                KeyOutcome::Edited | KeyOutcome::Ignored => {}
            }
        }
    }

    fn display_invalid_code(&mut self, request: CodeRequest, reason: &InvalidCode) {
        self.error_message = match request {
            CodeRequest::Secret => format!("Invalid code, try again! ({reason})"),
            CodeRequest::Guess { .. } => format!("Invalid guess! ({reason})"),
        };
        self.draw_or_log();
    }

    fn display_secret_accepted(&mut self, selector: &str, board: &BoardView<'_>) {
        self.rules = board.rules().clone();
        self.turns.clear();
        self.remaining = board.remaining_attempts();
        self.error_message.clear();
        self.message = format!("{selector} has chosen a secret code.");
        self.status = "Game on".to_string();
        self.draw_or_log();
    }

    fn display_turn(&mut self, turn: &Turn, board: &BoardView<'_>) {
        self.turns = board.turns().to_vec();
        self.remaining = board.remaining_attempts();
        self.error_message.clear();
        self.message = format!(
            "Guess #{}: {} exact, {} partial",
            turn.attempt, turn.feedback.exact, turn.feedback.partial
        );
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &Outcome) {
        self.state = TuiState::GameOver;
        self.message = format!(
            "{} was the correct answer. {} wins!",
            outcome.secret, outcome.winner
        );
        self.status = format!("Game over after {} guesses", outcome.attempts_used);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
