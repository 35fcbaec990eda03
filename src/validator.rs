use crate::code::{Code, Palette, Peg};
use crate::error::InvalidCode;
use crate::rules::Rules;

/// True when `sequence` has exactly `length` pegs, all drawn from `palette`.
///
/// Repeated colors are allowed.
pub fn is_valid(sequence: &[Peg], palette: &Palette, length: usize) -> bool {
    check(sequence, palette, length).is_ok()
}

/// Checks a candidate against the rules and promotes it to a [`Code`].
pub fn validate(candidate: Vec<Peg>, rules: &Rules) -> Result<Code, InvalidCode> {
    check(&candidate, &rules.palette, rules.code_length)?;
    Ok(Code::from_validated(candidate))
}

fn check(sequence: &[Peg], palette: &Palette, length: usize) -> Result<(), InvalidCode> {
    if sequence.len() != length {
        return Err(InvalidCode::WrongLength {
            expected: length,
            actual: sequence.len(),
        });
    }
    if let Some((position, &peg)) = sequence
        .iter()
        .enumerate()
        .find(|&(_, &peg)| !palette.contains(peg))
    {
        return Err(InvalidCode::UnknownPeg { peg, position });
    }
    Ok(())
}
