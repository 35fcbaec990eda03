//! The game engine: obtains a secret, then scores guesses until the code is
//! broken or the attempts run out.
//!
//! # State Machine
//! - `AwaitingSecret` → `InProgress` → `Won` | `Lost`
//!
//! Terminal states are never left. Invalid candidates are re-requested from
//! the same player and do not count as attempts.

use crate::code::{Code, Peg};
use crate::error::{GameError, GameResult, InvalidCode};
use crate::players::{Guesser, Selector};
use crate::recorder::{Turn, TurnRecorder};
use crate::rules::Rules;
use crate::scoring::score;
use crate::validator::validate;
use crate::debug_log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    AwaitingSecret,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a player is being asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeRequest {
    Secret,
    Guess { attempt: usize },
}

impl CodeRequest {
    pub fn role(self) -> &'static str {
        match self {
            Self::Secret => "selector",
            Self::Guess { .. } => "guesser",
        }
    }
}

/// Read-only view of a game in progress, handed to guessers and the UI.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    rules: &'a Rules,
    recorder: &'a TurnRecorder,
    remaining: usize,
}

impl<'a> BoardView<'a> {
    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    pub fn turns(&self) -> &'a [Turn] {
        self.recorder.turns()
    }

    pub fn remaining_attempts(&self) -> usize {
        self.remaining
    }

    pub fn attempts_used(&self) -> usize {
        self.recorder.count()
    }
}

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub state: GameState,
    pub secret: Code,
    pub winner: String,
    pub attempts_used: usize,
    pub remaining_attempts: usize,
}

impl Outcome {
    pub fn guesser_won(&self) -> bool {
        self.state == GameState::Won
    }
}

/// Presentation and raw input, implemented by the CLI and the TUI.
pub trait GameInterface {
    /// Asks `player` for a code. `None` means no more input is coming.
    fn read_code(&mut self, player: &str, request: CodeRequest, rules: &Rules) -> Option<String>;
    fn display_invalid_code(&mut self, request: CodeRequest, reason: &InvalidCode);
    /// Called once the secret is locked in; should hide it from the guesser.
    fn display_secret_accepted(&mut self, selector: &str, board: &BoardView<'_>);
    fn display_turn(&mut self, turn: &Turn, board: &BoardView<'_>);
    fn display_outcome(&mut self, outcome: &Outcome);
}

pub struct GameEngine<S: Selector, G: Guesser> {
    rules: Rules,
    selector: S,
    guesser: G,
    state: GameState,
    secret: Option<Code>,
    remaining: usize,
    recorder: TurnRecorder,
    outcome: Option<Outcome>,
}

impl<S: Selector, G: Guesser> GameEngine<S, G> {
    pub fn new(rules: Rules, selector: S, guesser: G) -> Self {
        let recorder = TurnRecorder::new(rules.max_attempts);
        let remaining = rules.max_attempts;
        Self {
            rules,
            selector,
            guesser,
            state: GameState::AwaitingSecret,
            secret: None,
            remaining,
            recorder,
            outcome: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn remaining_attempts(&self) -> usize {
        self.remaining
    }

    pub fn turns(&self) -> &TurnRecorder {
        &self.recorder
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    pub fn guesser(&self) -> &G {
        &self.guesser
    }

    pub fn board(&self) -> BoardView<'_> {
        BoardView {
            rules: &self.rules,
            recorder: &self.recorder,
            remaining: self.remaining,
        }
    }

    /// Obtains and locks in the secret, moving the game to `InProgress`.
    /// With no attempts allowed the game is lost on the spot.
    pub fn start(&mut self, ui: &mut dyn GameInterface) -> GameResult<()> {
        match self.state {
            GameState::AwaitingSecret => {}
            GameState::InProgress => return Err(GameError::SecretAlreadySet),
            GameState::Won | GameState::Lost => return Err(GameError::GameOver),
        }

        let name = self.selector.name().to_string();
        let selector = &mut self.selector;
        let rules = &self.rules;
        let secret = obtain_code(rules, &name, CodeRequest::Secret, ui, |ui| {
            selector.generate_code(rules, ui)
        })?;

        log::info!("{name} set a secret of {} pegs", secret.len());
        self.secret = Some(secret);
        self.remaining = self.rules.max_attempts;
        self.state = GameState::InProgress;
        ui.display_secret_accepted(&name, &self.board());

        if self.remaining == 0 {
            log::warn!("no attempts allowed, {name} wins by default");
            self.state = GameState::Lost;
            self.finish(ui);
        }
        Ok(())
    }

    /// Requests, scores and records one valid guess.
    pub fn play_turn(&mut self, ui: &mut dyn GameInterface) -> GameResult<GameState> {
        match self.state {
            GameState::InProgress => {}
            GameState::AwaitingSecret => return Err(GameError::SecretNotSet),
            GameState::Won | GameState::Lost => return Err(GameError::GameOver),
        }
        let Some(secret) = self.secret.as_ref() else {
            return Err(GameError::SecretNotSet);
        };

        let attempt = self.recorder.count() + 1;
        let request = CodeRequest::Guess { attempt };
        let name = self.guesser.name().to_string();
        let board = BoardView {
            rules: &self.rules,
            recorder: &self.recorder,
            remaining: self.remaining,
        };
        let guesser = &mut self.guesser;
        let guess = obtain_code(&self.rules, &name, request, ui, |ui| {
            guesser.get_guess(&board, ui)
        })?;

        self.remaining -= 1;
        let feedback = score(&self.rules.palette, secret, &guess);
        log::info!(
            "attempt {attempt}: {guess} scored {} exact, {} partial",
            feedback.exact,
            feedback.partial
        );
        let turn = Turn {
            attempt,
            guess,
            feedback,
        };
        self.recorder.record(turn.clone());
        debug_assert_eq!(
            self.remaining,
            self.recorder.remaining_attempts(self.rules.max_attempts)
        );

        if feedback.is_solved(self.rules.code_length) {
            self.state = GameState::Won;
        } else if self.remaining == 0 {
            self.state = GameState::Lost;
        }
        ui.display_turn(&turn, &self.board());

        if self.state.is_terminal() {
            self.finish(ui);
        }
        Ok(self.state)
    }

    /// Plays from the current state to the end and returns the outcome.
    pub fn play(&mut self, ui: &mut dyn GameInterface) -> GameResult<Outcome> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.state == GameState::AwaitingSecret {
            self.start(ui)?;
        }
        while self.state == GameState::InProgress {
            self.play_turn(ui)?;
        }
        self.outcome.clone().ok_or(GameError::GameOver)
    }

    fn finish(&mut self, ui: &mut dyn GameInterface) {
        let Some(secret) = self.secret.clone() else {
            return;
        };
        let winner = if self.state == GameState::Won {
            self.guesser.name()
        } else {
            self.selector.name()
        };
        let outcome = Outcome {
            state: self.state,
            secret,
            winner: winner.to_string(),
            attempts_used: self.recorder.count(),
            remaining_attempts: self.remaining,
        };
        log::info!(
            "game over: {:?} after {} attempts, {} wins",
            outcome.state,
            outcome.attempts_used,
            outcome.winner
        );
        ui.display_outcome(&outcome);
        self.outcome = Some(outcome);
    }
}

/// Keeps asking until a candidate passes validation.
fn obtain_code(
    rules: &Rules,
    name: &str,
    request: CodeRequest,
    ui: &mut dyn GameInterface,
    mut ask: impl FnMut(&mut dyn GameInterface) -> Option<Vec<Peg>>,
) -> GameResult<Code> {
    let mut rejected = 0;
    loop {
        let Some(candidate) = ask(&mut *ui) else {
            log::warn!("{name} stopped responding while asked for a {}", request.role());
            return Err(GameError::CapabilityUnavailable {
                name: name.to_string(),
                role: request.role(),
            });
        };

        match validate(candidate, rules) {
            Ok(code) => return Ok(code),
            Err(reason) => {
                debug_log!("rejected candidate from {}: {}", name, reason);
                ui.display_invalid_code(request, &reason);
                rejected += 1;
                if let Some(limit) = rules.max_retries
                    && rejected >= limit
                {
                    return Err(GameError::RetriesExhausted {
                        name: name.to_string(),
                        limit,
                    });
                }
            }
        }
    }
}

/// Runs one complete game.
pub fn play_game<S: Selector, G: Guesser>(
    rules: Rules,
    selector: S,
    guesser: G,
    ui: &mut dyn GameInterface,
) -> GameResult<Outcome> {
    GameEngine::new(rules, selector, guesser).play(ui)
}
