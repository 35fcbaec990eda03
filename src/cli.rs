use crate::code::{Code, Hue, Peg};
use crate::error::InvalidCode;
use crate::game_state::{BoardView, CodeRequest, GameInterface, Outcome};
use crate::logging::{LogTarget, default_log_path};
use crate::players::{ComputerPlayer, Guesser, HumanPlayer, Selector};
use crate::recorder::Turn;
use crate::rules::Rules;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::BufRead;
use std::path::PathBuf;

/// Mastermind: break the secret color code in ten guesses
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Front end to play in
    #[arg(short, long, value_enum, default_value_t = UiMode::Cli)]
    pub mode: UiMode,

    /// Who makes the guesses
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    pub guesser: PlayerKind,

    /// Who picks the secret code
    #[arg(long, value_enum, default_value_t = PlayerKind::Computer)]
    pub selector: PlayerKind,

    /// Name of a human guesser
    #[arg(short, long, default_value = "Player")]
    pub name: String,

    /// Name of a human selector
    #[arg(long, default_value = "Codemaker")]
    pub selector_name: String,

    /// Seed for computer players, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many invalid codes in a row (default: never)
    #[arg(long)]
    pub max_retries: Option<usize>,

    /// Write logs to this file instead of the default location
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UiMode {
    Cli,
    Tui,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Computer,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

impl Cli {
    pub fn rules(&self) -> Rules {
        Rules::default().with_max_retries(self.max_retries)
    }

    /// The TUI owns the terminal, so it always logs to a file.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.mode) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, UiMode::Tui) => default_log_path().map_or(LogTarget::Stderr, LogTarget::File),
            (None, UiMode::Cli) => LogTarget::Stderr,
        }
    }

    pub fn build_selector(&self) -> Player {
        Player::build(self.selector, &self.selector_name, self.seed)
    }

    pub fn build_guesser(&self) -> Player {
        Player::build(self.guesser, &self.name, self.seed.map(|s| s.wrapping_add(1)))
    }
}

/// Either kind of player, chosen once at startup.
#[derive(Debug)]
pub enum Player {
    Human(HumanPlayer),
    Computer(ComputerPlayer),
}

impl Player {
    pub fn build(kind: PlayerKind, name: &str, seed: Option<u64>) -> Self {
        match (kind, seed) {
            (PlayerKind::Human, _) => Self::Human(HumanPlayer::new(name)),
            (PlayerKind::Computer, Some(seed)) => Self::Computer(ComputerPlayer::seeded(seed)),
            (PlayerKind::Computer, None) => Self::Computer(ComputerPlayer::new()),
        }
    }
}

impl Selector for Player {
    fn generate_code(&mut self, rules: &Rules, ui: &mut dyn GameInterface) -> Option<Vec<Peg>> {
        match self {
            Self::Human(p) => p.generate_code(rules, ui),
            Self::Computer(p) => p.generate_code(rules, ui),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Human(p) => Selector::name(p),
            Self::Computer(p) => Selector::name(p),
        }
    }
}

impl Guesser for Player {
    fn get_guess(
        &mut self,
        board: &BoardView<'_>,
        ui: &mut dyn GameInterface,
    ) -> Option<Vec<Peg>> {
        match self {
            Self::Human(p) => p.get_guess(board, ui),
            Self::Computer(p) => p.get_guess(board, ui),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Human(p) => Guesser::name(p),
            Self::Computer(p) => Guesser::name(p),
        }
    }
}

// UI Input/Output functions

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

fn colorize(code: &Code) -> String {
    code.pegs()
        .iter()
        .map(|&peg| peg.symbol().with(peg_color(peg)).to_string())
        .collect()
}

fn prompt_text(player: &str, request: CodeRequest, rules: &Rules) -> String {
    let what = match request {
        CodeRequest::Secret => "enter secret color code. Secret code".to_string(),
        CodeRequest::Guess { attempt } => format!("enter guess #{attempt}. Guess"),
    };
    format!(
        "{player}, {what} must be {} characters long and contain {} only. Order matters! ('exit' to quit)",
        rules.code_length,
        rules.palette.describe()
    )
}

/// Board rows from top to bottom. Played rows fill from the bottom up.
pub fn board_lines(board: &BoardView<'_>) -> Vec<String> {
    board_rows(board, Code::to_string)
}

fn board_rows(board: &BoardView<'_>, paint: impl Fn(&Code) -> String) -> Vec<String> {
    let rules = board.rules();
    let empty = format!(
        "{}|{}",
        "-".repeat(rules.code_length),
        "-".repeat(rules.code_length)
    );
    let mut rows = vec![empty; rules.max_attempts];
    for turn in board.turns() {
        if let Some(row) = rules
            .max_attempts
            .checked_sub(turn.attempt)
            .and_then(|i| rows.get_mut(i))
        {
            *row = format!(
                "{}|{}",
                paint(&turn.guess),
                turn.feedback.render(rules.code_length)
            );
        }
    }
    rows
}

pub fn display_board(board: &BoardView<'_>) {
    for line in board_rows(board, colorize) {
        println!("{line}");
    }
    println!("{} guesses left", board.remaining_attempts());
}

pub fn display_invalid_code(request: CodeRequest, reason: &InvalidCode) {
    match request {
        CodeRequest::Secret => println!("Invalid code, try again! ({reason})"),
        CodeRequest::Guess { .. } => println!("Invalid guess! ({reason})"),
    }
}

pub fn display_outcome(outcome: &Outcome) {
    println!();
    println!("{} was the correct answer", colorize(&outcome.secret));
    println!("{} wins!", outcome.winner);
}

fn clear_screen() {
    let mut stdout = std::io::stdout();
    if let Err(e) = execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)) {
        log::warn!("could not clear screen: {e}");
    }
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and prints to stdout
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_code(&mut self, player: &str, request: CodeRequest, rules: &Rules) -> Option<String> {
        println!("{}", prompt_text(player, request, rules));
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => {
                let input = input.trim().to_string();
                if input.eq_ignore_ascii_case("exit") {
                    None
                } else {
                    Some(input)
                }
            }
            Err(e) => {
                log::warn!("failed to read input: {e}");
                None
            }
        }
    }

    fn display_invalid_code(&mut self, request: CodeRequest, reason: &InvalidCode) {
        display_invalid_code(request, reason);
    }

    fn display_secret_accepted(&mut self, _selector: &str, board: &BoardView<'_>) {
        clear_screen();
        display_board(board);
    }

    fn display_turn(&mut self, _turn: &Turn, board: &BoardView<'_>) {
        display_board(board);
    }

    fn display_outcome(&mut self, outcome: &Outcome) {
        display_outcome(outcome);
    }
}
