//! Variable name validation

use super::error::FormatError;
use crate::config::constants::compile_time::lexical::{MAX_VARIABLE_LENGTH, RESERVED_BOUNDS_LITERAL};
use crate::grammar::SectionKind;
use crate::utils::Position;

/// Punctuation allowed in variable names besides ASCII letters and digits
pub const ALLOWED_PUNCTUATION: [char; 19] = [
    '!', '"', '#', '$', '%', '&', '(', ')', ',', '.', ';', '?', '@', '_', '\u{2018}', '\'', '{',
    '}', '~',
];

/// Outcome for a candidate token that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validated<'a> {
    Symbol(&'a str),
    /// Reserved literal in a section where it is not a variable
    Skip,
}

pub fn is_valid_variable_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(&c))
}

/// Validate a candidate token found in `section`.
///
/// Checks run in a fixed order: the bounds `inf` literal is skipped first,
/// then the length limit in raw bytes, then the character set. A name that
/// is not UTF-8 always fails the character set.
pub fn validate_candidate<'a>(
    candidate: &'a [u8],
    section: SectionKind,
    position: &Position,
) -> Result<Validated<'a>, FormatError> {
    if section == SectionKind::Bounds && candidate == RESERVED_BOUNDS_LITERAL {
        return Ok(Validated::Skip);
    }

    if candidate.len() > MAX_VARIABLE_LENGTH {
        return Err(FormatError::VariableTooLong {
            position: position.clone(),
            name: String::from_utf8_lossy(candidate).into_owned(),
            length: candidate.len(),
        });
    }

    match std::str::from_utf8(candidate) {
        Ok(name) if is_valid_variable_name(name) => Ok(Validated::Symbol(name)),
        _ => Err(FormatError::InvalidVariableName {
            position: position.clone(),
            name: String::from_utf8_lossy(candidate).into_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pos() -> Position {
        Position::new("v.lp", 3)
    }

    #[test]
    fn test_valid_names() {
        for name in ["x", "x_1", "a.b", "y(2,3)", "q{1}", "n'", "w~", "p#1", "\u{2018}s", "_"] {
            assert!(is_valid_variable_name(name), "{}", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["x*y", "a/b", "c[1]", "é", "x^2", "a|b"] {
            assert!(!is_valid_variable_name(name), "{}", name);
        }
    }

    #[test]
    fn test_inf_only_reserved_in_bounds() {
        assert_eq!(
            validate_candidate(b"inf", SectionKind::Bounds, &pos()),
            Ok(Validated::Skip)
        );
        assert_eq!(
            validate_candidate(b"inf", SectionKind::Constraints, &pos()),
            Ok(Validated::Symbol("inf"))
        );
        // Case-sensitive
        assert_eq!(
            validate_candidate(b"INF", SectionKind::Bounds, &pos()),
            Ok(Validated::Symbol("INF"))
        );
    }

    #[test]
    fn test_length_boundary() {
        let at_limit = vec![b'v'; MAX_VARIABLE_LENGTH];
        assert_matches!(
            validate_candidate(&at_limit, SectionKind::Objective, &pos()),
            Ok(Validated::Symbol(_))
        );

        let over = vec![b'v'; MAX_VARIABLE_LENGTH + 1];
        assert_matches!(
            validate_candidate(&over, SectionKind::Objective, &pos()),
            Err(FormatError::VariableTooLong { length: 256, .. })
        );
    }

    #[test]
    fn test_length_checked_before_charset() {
        let over = format!("{}*", "v".repeat(MAX_VARIABLE_LENGTH)).into_bytes();
        assert_matches!(
            validate_candidate(&over, SectionKind::General, &pos()),
            Err(FormatError::VariableTooLong { .. })
        );
    }

    #[test]
    fn test_star_rejected() {
        assert_matches!(
            validate_candidate(b"x*y", SectionKind::Constraints, &pos()),
            Err(FormatError::InvalidVariableName { name, .. }) if name == "x*y"
        );
    }

    #[test]
    fn test_non_utf8_name_rejected() {
        assert_matches!(
            validate_candidate(b"\xE9x", SectionKind::Objective, &pos()),
            Err(FormatError::InvalidVariableName { name, .. }) if name == "\u{FFFD}x"
        );

        // Length is counted in raw bytes before the character set
        let mut long = vec![0xE9u8; MAX_VARIABLE_LENGTH];
        assert_matches!(
            validate_candidate(&long, SectionKind::Objective, &pos()),
            Err(FormatError::InvalidVariableName { .. })
        );
        long.push(0xE9);
        assert_matches!(
            validate_candidate(&long, SectionKind::Objective, &pos()),
            Err(FormatError::VariableTooLong { length: 256, .. })
        );
    }
}
