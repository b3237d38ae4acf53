//! LP file section grammar
//!
//! The format has no nesting: a file is a flat sequence of sections, each
//! introduced by a keyword line. [`SectionState`] tracks which one is active.

pub mod keywords;

pub use keywords::{is_section_keyword, SectionKeyword, SectionKind};

/// Section the parser is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Before the first keyword or after `END`
    #[default]
    NoSection,
    In(SectionKind),
}

impl SectionState {
    /// State after reading a keyword line
    pub fn transition(self, keyword: SectionKeyword) -> Self {
        match keyword {
            SectionKeyword::Enter(kind) => Self::In(kind),
            SectionKeyword::End => Self::NoSection,
        }
    }

    pub fn current(self) -> Option<SectionKind> {
        match self {
            Self::NoSection => None,
            Self::In(kind) => Some(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let state = SectionState::default();
        assert_eq!(state.current(), None);

        let state = state.transition(SectionKeyword::Enter(SectionKind::Bounds));
        assert_eq!(state.current(), Some(SectionKind::Bounds));

        // Re-entering a section is allowed
        let state = state
            .transition(SectionKeyword::Enter(SectionKind::Objective))
            .transition(SectionKeyword::Enter(SectionKind::Bounds));
        assert_eq!(state, SectionState::In(SectionKind::Bounds));

        assert_eq!(state.transition(SectionKeyword::End), SectionState::NoSection);
    }
}
