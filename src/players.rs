//! Players that supply secrets and guesses.
//!
//! Both roles come in two flavours: [`HumanPlayer`] types codes through the
//! active [`GameInterface`], [`ComputerPlayer`] samples them uniformly.

use crate::code::{Palette, Peg, parse_pegs};
use crate::game_state::{BoardView, CodeRequest, GameInterface};
use crate::rules::Rules;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the secret code.
pub trait Selector {
    /// Returns an unchecked candidate, or `None` if the player cannot answer.
    fn generate_code(&mut self, rules: &Rules, ui: &mut dyn GameInterface) -> Option<Vec<Peg>>;

    fn name(&self) -> &str;
}

/// Supplies one guess per turn.
pub trait Guesser {
    /// Returns an unchecked candidate, or `None` if the player cannot answer.
    fn get_guess(&mut self, board: &BoardView<'_>, ui: &mut dyn GameInterface)
    -> Option<Vec<Peg>>;

    fn name(&self) -> &str;
}

/// A person at the keyboard.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    name: String,
}

impl HumanPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Selector for HumanPlayer {
    fn generate_code(&mut self, rules: &Rules, ui: &mut dyn GameInterface) -> Option<Vec<Peg>> {
        ui.read_code(&self.name, CodeRequest::Secret, rules)
            .map(|input| parse_pegs(&input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Guesser for HumanPlayer {
    fn get_guess(
        &mut self,
        board: &BoardView<'_>,
        ui: &mut dyn GameInterface,
    ) -> Option<Vec<Peg>> {
        let request = CodeRequest::Guess {
            attempt: board.attempts_used() + 1,
        };
        ui.read_code(&self.name, request, board.rules())
            .map(|input| parse_pegs(&input))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Picks every peg uniformly at random from the palette, with replacement.
#[derive(Debug)]
pub struct ComputerPlayer<R: Rng = StdRng> {
    name: String,
    rng: R,
}

impl ComputerPlayer<StdRng> {
    /// Seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible play.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for ComputerPlayer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ComputerPlayer<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let name = format!("Computer{}", rng.gen_range(1000..=9999));
        Self { name, rng }
    }

    fn random_code(&mut self, palette: &Palette, length: usize) -> Vec<Peg> {
        (0..length)
            .filter_map(|_| palette.get(self.rng.gen_range(0..palette.len())))
            .collect()
    }
}

impl<R: Rng> Selector for ComputerPlayer<R> {
    fn generate_code(&mut self, rules: &Rules, _ui: &mut dyn GameInterface) -> Option<Vec<Peg>> {
        if rules.palette.is_empty() {
            return None;
        }
        Some(self.random_code(&rules.palette, rules.code_length))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<R: Rng> Guesser for ComputerPlayer<R> {
    fn get_guess(
        &mut self,
        board: &BoardView<'_>,
        _ui: &mut dyn GameInterface,
    ) -> Option<Vec<Peg>> {
        let rules = board.rules();
        if rules.palette.is_empty() {
            return None;
        }
        Some(self.random_code(&rules.palette, rules.code_length))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
