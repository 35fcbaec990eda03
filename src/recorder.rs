use crate::code::Code;
use crate::scoring::Feedback;

/// One scored guess. Attempts are numbered from 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub attempt: usize,
    pub guess: Code,
    pub feedback: Feedback,
}

/// Append-only history of the turns played so far.
#[derive(Debug)]
pub struct TurnRecorder {
    turns: Vec<Turn>,
    capacity: usize,
}

impl TurnRecorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// # Panics
    ///
    /// If the recorder is already full. The engine stops asking for guesses
    /// before that can happen.
    pub fn record(&mut self, turn: Turn) {
        assert!(
            self.turns.len() < self.capacity,
            "recorded more than {} turns",
            self.capacity
        );
        self.turns.push(turn);
    }

    pub fn count(&self) -> usize {
        self.turns.len()
    }

    pub fn remaining_attempts(&self, max: usize) -> usize {
        max.saturating_sub(self.count())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a TurnRecorder {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::parse_pegs;
    use crate::rules::Rules;
    use crate::validator::validate;

    fn turn(attempt: usize, guess: &str) -> Turn {
        Turn {
            attempt,
            guess: validate(parse_pegs(guess), &Rules::default()).unwrap(),
            feedback: Feedback::new(0, 1),
        }
    }

    #[test]
    fn test_record_and_count() {
        let mut recorder = TurnRecorder::new(10);
        assert_eq!(recorder.count(), 0);
        assert_eq!(recorder.remaining_attempts(10), 10);

        recorder.record(turn(1, "RGBY"));
        recorder.record(turn(2, "MCMC"));
        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.remaining_attempts(10), 8);
        assert_eq!(recorder.last().map(|t| t.attempt), Some(2));
    }

    #[test]
    fn test_iteration_in_play_order_and_restartable() {
        let mut recorder = TurnRecorder::new(3);
        recorder.record(turn(1, "RRRR"));
        recorder.record(turn(2, "GGGG"));
        recorder.record(turn(3, "BBBB"));

        let first: Vec<usize> = recorder.iter().map(|t| t.attempt).collect();
        let second: Vec<usize> = (&recorder).into_iter().map(|t| t.attempt).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(recorder.turns()[1].guess.to_string(), "GGGG");
    }

    #[test]
    #[should_panic(expected = "recorded more than 1 turns")]
    fn test_record_past_capacity_panics() {
        let mut recorder = TurnRecorder::new(1);
        recorder.record(turn(1, "RGBY"));
        recorder.record(turn(2, "RGBY"));
    }
}
