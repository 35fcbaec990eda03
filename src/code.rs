//! Pegs, palettes and codes.
//!
//! A [`Code`] is only ever built by the validator, so anything holding one
//! knows its length and colors match the [`Rules`](crate::rules::Rules) it was
//! checked against.

use std::fmt;

/// A single colored peg, identified by its symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Peg(char);

impl Peg {
    pub fn new(symbol: char) -> Self {
        Self(symbol.to_ascii_uppercase())
    }

    pub fn symbol(self) -> char {
        self.0
    }

    /// Display color of the peg; symbols outside the classic set are plain.
    pub fn hue(self) -> Hue {
        match self.0 {
            'R' => Hue::Red,
            'G' => Hue::Green,
            'Y' => Hue::Yellow,
            'B' => Hue::Blue,
            'M' => Hue::Magenta,
            'C' => Hue::Cyan,
            _ => Hue::Plain,
        }
    }
}

/// Terminal color a peg is drawn in, independent of the rendering crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Plain,
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered set of colors a code may be built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pegs: Vec<Peg>,
}

impl Palette {
    /// Builds a palette from symbols, dropping duplicates but keeping order.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Self {
        let mut pegs: Vec<Peg> = Vec::new();
        for peg in symbols.into_iter().map(Peg::new) {
            if !pegs.contains(&peg) {
                pegs.push(peg);
            }
        }
        Self { pegs }
    }

    /// Red, green, yellow, blue, magenta, cyan.
    pub fn classic() -> Self {
        Self::new(['R', 'G', 'Y', 'B', 'M', 'C'])
    }

    pub fn contains(&self, peg: Peg) -> bool {
        self.pegs.contains(&peg)
    }

    pub fn index_of(&self, peg: Peg) -> Option<usize> {
        self.pegs.iter().position(|&p| p == peg)
    }

    pub fn get(&self, index: usize) -> Option<Peg> {
        self.pegs.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Peg> + '_ {
        self.pegs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    /// Comma separated symbols, e.g. `B, C, G, M, R, Y`, sorted for prompts.
    pub fn describe(&self) -> String {
        let mut symbols: Vec<String> = self.pegs.iter().map(ToString::to_string).collect();
        symbols.sort();
        symbols.join(", ")
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// A validated sequence of pegs: a secret or a guess.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Code {
    pegs: Vec<Peg>,
}

impl Code {
    /// Wraps pegs that have already passed validation.
    pub(crate) fn from_validated(pegs: Vec<Peg>) -> Self {
        Self { pegs }
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for peg in &self.pegs {
            write!(f, "{peg}")?;
        }
        Ok(())
    }
}

/// Turns raw player input into pegs: case-insensitive, whitespace ignored.
///
/// No membership check happens here; that is the validator's job.
pub fn parse_pegs(input: &str) -> Vec<Peg> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Peg::new)
        .collect()
}

/// Per-color multiplicities of a peg sequence, indexed by palette position.
///
/// Pegs outside the palette are not counted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorCounts {
    counts: Vec<usize>,
}

impl ColorCounts {
    pub fn tally(palette: &Palette, pegs: &[Peg]) -> Self {
        let mut counts = vec![0; palette.len()];
        for &peg in pegs {
            if let Some(i) = palette.index_of(peg) {
                counts[i] += 1;
            }
        }
        Self { counts }
    }

    /// Count for the color at `index` in the palette.
    pub fn at(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn count(&self, palette: &Palette, peg: Peg) -> usize {
        palette.index_of(peg).map_or(0, |i| self.at(i))
    }

    /// Sum over colors of `min(self[c], other[c])`.
    pub fn overlap(&self, other: &Self) -> usize {
        self.counts
            .iter()
            .zip(&other.counts)
            .map(|(&a, &b)| a.min(b))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_is_uppercased() {
        assert_eq!(Peg::new('r'), Peg::new('R'));
        assert_eq!(Peg::new('g').symbol(), 'G');
    }

    #[test]
    fn test_classic_pegs_have_distinct_hues() {
        let hues: Vec<Hue> = Palette::classic().iter().map(Peg::hue).collect();
        assert!(!hues.contains(&Hue::Plain));
        for (i, hue) in hues.iter().enumerate() {
            assert!(!hues[i + 1..].contains(hue));
        }
        assert_eq!(Peg::new('r').hue(), Hue::Red);
        assert_eq!(Peg::new('X').hue(), Hue::Plain);
    }

    #[test]
    fn test_classic_palette() {
        let palette = Palette::classic();
        assert_eq!(palette.len(), 6);
        for symbol in ['R', 'G', 'Y', 'B', 'M', 'C'] {
            assert!(palette.contains(Peg::new(symbol)));
        }
        assert!(!palette.contains(Peg::new('W')));
        assert_eq!(palette.describe(), "B, C, G, M, R, Y");
    }

    #[test]
    fn test_palette_drops_duplicates() {
        let palette = Palette::new("RRgG".chars());
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.index_of(Peg::new('G')), Some(1));
    }

    #[test]
    fn test_parse_pegs_ignores_whitespace_and_case() {
        let pegs = parse_pegs(" r g\tb y \n");
        assert_eq!(
            pegs,
            vec![Peg::new('R'), Peg::new('G'), Peg::new('B'), Peg::new('Y')]
        );
        assert!(parse_pegs("").is_empty());
    }

    #[test]
    fn test_color_counts_tally() {
        let palette = Palette::classic();
        let counts = ColorCounts::tally(&palette, &parse_pegs("RRGB"));
        assert_eq!(counts.count(&palette, Peg::new('R')), 2);
        assert_eq!(counts.count(&palette, Peg::new('G')), 1);
        assert_eq!(counts.count(&palette, Peg::new('Y')), 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_color_counts_skips_unknown_pegs() {
        let palette = Palette::classic();
        let counts = ColorCounts::tally(&palette, &parse_pegs("RXZ"));
        assert_eq!(counts.total(), 1);
        assert_eq!(counts.count(&palette, Peg::new('X')), 0);
    }

    #[test]
    fn test_color_counts_overlap() {
        let palette = Palette::classic();
        let secret = ColorCounts::tally(&palette, &parse_pegs("RGBY"));
        let guess = ColorCounts::tally(&palette, &parse_pegs("RRGB"));
        assert_eq!(secret.overlap(&guess), 3);
        assert_eq!(guess.overlap(&secret), 3);
    }
}
