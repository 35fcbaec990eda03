use crate::code::Palette;

/// Pegs per code in the standard game.
pub const CODE_LENGTH: usize = 4;
/// Validated guesses allowed per game.
pub const MAX_ATTEMPTS: usize = 10;

/// Fixed parameters of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub palette: Palette,
    pub code_length: usize,
    pub max_attempts: usize,
    /// Consecutive invalid candidates tolerated from one player before giving
    /// up. `None` keeps asking forever.
    pub max_retries: Option<usize>,
}

impl Rules {
    pub fn new(palette: Palette, code_length: usize, max_attempts: usize) -> Self {
        Self {
            palette,
            code_length,
            max_attempts,
            max_retries: None,
        }
    }

    pub fn with_max_retries(mut self, max_retries: Option<usize>) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(Palette::classic(), CODE_LENGTH, MAX_ATTEMPTS)
    }
}
