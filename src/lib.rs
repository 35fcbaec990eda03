// Library interface for mastermind
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod players;
pub mod recorder;
pub mod rules;
pub mod scoring;
pub mod tui;
pub mod validator;

// Re-export commonly used items for easier testing
pub use code::{Code, ColorCounts, Hue, Palette, Peg, parse_pegs};
pub use error::{GameError, GameResult, InvalidCode};
pub use game_state::{
    BoardView, CodeRequest, GameEngine, GameInterface, GameState, Outcome, play_game,
};
pub use players::{ComputerPlayer, Guesser, HumanPlayer, Selector};
pub use recorder::{Turn, TurnRecorder};
pub use rules::{CODE_LENGTH, MAX_ATTEMPTS, Rules};
pub use scoring::{Feedback, score};
pub use validator::{is_valid, validate};
