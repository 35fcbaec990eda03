use crate::code::{Code, ColorCounts, Palette};
use std::fmt;

/// Result of comparing a guess with the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Feedback {
    /// Right color in the right position.
    pub exact: usize,
    /// Right color in the wrong position.
    pub partial: usize,
}

impl Feedback {
    pub fn new(exact: usize, partial: usize) -> Self {
        Self { exact, partial }
    }

    pub fn is_solved(&self, length: usize) -> bool {
        self.exact == length
    }

    /// Board notation padded to `length` with `-`.
    pub fn render(&self, length: usize) -> String {
        format!("{self:-<length$}")
    }
}

/// `E` per exact match then `P` per partial. Honors fill and width, so
/// `{:-<4}` gives the padded board form.
impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.exact + self.partial);
        out.extend(std::iter::repeat_n('E', self.exact));
        out.extend(std::iter::repeat_n('P', self.partial));
        f.pad(&out)
    }
}

/// Scores `guess` against `secret`.
///
/// Colors are tallied over the whole of both codes, so each exact match is
/// also inside the overlap total for its color and is subtracted once.
///
/// # Panics
///
/// If the codes differ in length.
pub fn score(palette: &Palette, secret: &Code, guess: &Code) -> Feedback {
    assert_eq!(
        secret.len(),
        guess.len(),
        "secret and guess must have the same length"
    );

    let exact = secret
        .pegs()
        .iter()
        .zip(guess.pegs())
        .filter(|(s, g)| s == g)
        .count();

    let secret_counts = ColorCounts::tally(palette, secret.pegs());
    let guess_counts = ColorCounts::tally(palette, guess.pegs());
    let overlap = secret_counts.overlap(&guess_counts);

    Feedback {
        exact,
        partial: overlap.saturating_sub(exact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Peg, parse_pegs};
    use crate::rules::Rules;
    use crate::validator::validate;

    fn code(symbols: &str) -> Code {
        validate(parse_pegs(symbols), &Rules::default()).unwrap()
    }

    fn all_codes(palette: &Palette, length: usize) -> Vec<Code> {
        let mut codes = vec![Vec::new()];
        for _ in 0..length {
            codes = codes
                .into_iter()
                .flat_map(|prefix: Vec<Peg>| {
                    palette.iter().map(move |peg| {
                        let mut next = prefix.clone();
                        next.push(peg);
                        next
                    })
                })
                .collect();
        }
        codes.into_iter().map(Code::from_validated).collect()
    }

    // Two-pass scoring: mark exact positions, then match leftovers.
    fn two_pass(secret: &Code, guess: &Code) -> Feedback {
        let mut secret_left: Vec<Option<Peg>> = secret.pegs().iter().copied().map(Some).collect();
        let mut guess_left: Vec<Option<Peg>> = guess.pegs().iter().copied().map(Some).collect();
        let mut exact = 0;
        for i in 0..secret_left.len() {
            if secret_left[i] == guess_left[i] {
                exact += 1;
                secret_left[i] = None;
                guess_left[i] = None;
            }
        }
        let mut partial = 0;
        for g in guess_left.into_iter().flatten() {
            if let Some(slot) = secret_left.iter_mut().find(|s| **s == Some(g)) {
                *slot = None;
                partial += 1;
            }
        }
        Feedback { exact, partial }
    }

    #[test]
    fn test_duplicate_in_guess() {
        let palette = Palette::classic();
        assert_eq!(
            score(&palette, &code("RGBY"), &code("RRGB")),
            Feedback::new(1, 2)
        );
    }

    #[test]
    fn test_all_colors_misplaced() {
        let palette = Palette::classic();
        assert_eq!(
            score(&palette, &code("RRGB"), &code("GBRR")),
            Feedback::new(0, 4)
        );
    }

    #[test]
    fn test_exact_match() {
        let palette = Palette::classic();
        assert_eq!(
            score(&palette, &code("MCMC"), &code("MCMC")),
            Feedback::new(4, 0)
        );
    }

    #[test]
    fn test_no_shared_colors() {
        let palette = Palette::classic();
        assert_eq!(
            score(&palette, &code("RRGG"), &code("BYMC")),
            Feedback::new(0, 0)
        );
    }

    #[test]
    fn test_duplicate_in_secret_single_in_guess() {
        let palette = Palette::classic();
        // Only one R in the guess, so it earns a single credit.
        assert_eq!(
            score(&palette, &code("RRYY"), &code("GRBB")),
            Feedback::new(1, 0)
        );
        assert_eq!(
            score(&palette, &code("RRYY"), &code("BBBR")),
            Feedback::new(0, 1)
        );
    }

    #[test]
    fn test_exact_not_counted_as_partial() {
        let palette = Palette::classic();
        assert_eq!(
            score(&palette, &code("RGGG"), &code("RRRR")),
            Feedback::new(1, 0)
        );
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        let palette = Palette::classic();
        let short = validate(
            parse_pegs("RGB"),
            &Rules::new(Palette::classic(), 3, 10),
        )
        .unwrap();
        let _ = score(&palette, &code("RGBY"), &short);
    }

    #[test]
    fn test_render() {
        assert_eq!(Feedback::new(1, 2).render(4), "EPP-");
        assert_eq!(Feedback::new(0, 0).render(4), "----");
        assert_eq!(Feedback::new(4, 0).render(4), "EEEE");
        assert!(Feedback::new(4, 0).is_solved(4));
        assert!(!Feedback::new(3, 1).is_solved(4));
    }

    #[test]
    fn test_display_is_unpadded() {
        assert_eq!(Feedback::new(1, 2).to_string(), "EPP");
        assert_eq!(Feedback::new(0, 0).to_string(), "");
        assert_eq!(format!("{:-<4}", Feedback::new(0, 3)), "PPP-");
    }

    #[test]
    fn test_overlap_covers_exact_matches_per_color() {
        let palette = Palette::classic();
        let codes = all_codes(&palette, 4);
        let secrets = [code("RGBY"), code("RRGB"), code("MMMM"), code("CYCY")];
        for secret in &secrets {
            let secret_counts = ColorCounts::tally(&palette, secret.pegs());
            for guess in &codes {
                let guess_counts = ColorCounts::tally(&palette, guess.pegs());
                for (i, peg) in palette.iter().enumerate() {
                    let exact_of_color = secret
                        .pegs()
                        .iter()
                        .zip(guess.pegs())
                        .filter(|&(s, g)| *s == peg && s == g)
                        .count();
                    assert!(
                        secret_counts.at(i).min(guess_counts.at(i)) >= exact_of_color,
                        "overlap below exact count for {peg} in {secret} vs {guess}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_matches_two_pass_scoring() {
        let palette = Palette::classic();
        let codes = all_codes(&palette, 4);
        let secrets = [code("RGBY"), code("RRGB"), code("MMMM"), code("CYCY")];
        for secret in &secrets {
            for guess in &codes {
                let feedback = score(&palette, secret, guess);
                assert_eq!(feedback, two_pass(secret, guess), "{secret} vs {guess}");
                assert!(feedback.exact + feedback.partial <= 4);
            }
        }
    }

    #[test]
    fn test_self_score_is_all_exact() {
        let palette = Palette::classic();
        for secret in all_codes(&palette, 4).iter().step_by(37) {
            assert_eq!(score(&palette, secret, secret), Feedback::new(4, 0));
        }
    }

    #[test]
    fn test_total_invariant_under_reordering_guess() {
        let palette = Palette::classic();
        let secret = code("RRGB");
        let a = score(&palette, &secret, &code("BGRY"));
        let b = score(&palette, &secret, &code("YRGB"));
        assert_eq!(a.exact + a.partial, b.exact + b.partial);
    }
}
