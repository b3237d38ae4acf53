//! LP section keywords
//!
//! A line whose first whitespace-delimited word is one of these keywords
//! (compared case-insensitively) switches the active section.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six sections of an LP file that carry variable names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Objective,
    Constraints,
    Bounds,
    General,
    Binary,
    SemiContinuous,
}

impl SectionKind {
    /// Every section in file order
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Objective,
        SectionKind::Constraints,
        SectionKind::Bounds,
        SectionKind::General,
        SectionKind::Binary,
        SectionKind::SemiContinuous,
    ];

    /// Sections whose variables must be declared
    pub const USES: [SectionKind; 3] = [
        SectionKind::Objective,
        SectionKind::Constraints,
        SectionKind::Bounds,
    ];

    /// Sections that declare a variable type
    pub const DECLARATIONS: [SectionKind; 3] = [
        SectionKind::General,
        SectionKind::Binary,
        SectionKind::SemiContinuous,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Objective => "objective",
            Self::Constraints => "constraints",
            Self::Bounds => "bounds",
            Self::General => "general",
            Self::Binary => "binary",
            Self::SemiContinuous => "semi-continuous",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of looking a word up in the keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKeyword {
    /// Enter the named section
    Enter(SectionKind),
    /// `END`: leave every section
    End,
}

impl SectionKeyword {
    /// Look up a word, ignoring case
    pub fn from_word(word: &str) -> Option<Self> {
        Self::from_upper(&word.to_uppercase())
    }

    /// Exact match against the upper-case keyword spellings
    fn from_upper(s: &str) -> Option<Self> {
        use SectionKind::*;
        match s {
            // Objective
            "MIN" | "MAX" | "MINIMIZE" | "MAXIMIZE" | "MINIMUM" | "MAXIMUM" => {
                Some(Self::Enter(Objective))
            }
            // Constraints
            "SUBJECT" | "S.T" | "SUCH" | "ST" | "ST." => Some(Self::Enter(Constraints)),
            // Bounds
            "BOUNDS" | "BOUND" => Some(Self::Enter(Bounds)),
            // Variable type declarations
            "GENERAL" | "GEN" | "GENERALS" => Some(Self::Enter(General)),
            "BINARY" | "BIN" | "BINARIES" => Some(Self::Enter(Binary)),
            "SEMI-CONTINUOUS" | "SEMI" | "SEMIS" => Some(Self::Enter(SemiContinuous)),
            "END" => Some(Self::End),
            _ => None,
        }
    }
}

/// Check if a word introduces or ends a section
pub fn is_section_keyword(word: &str) -> bool {
    SectionKeyword::from_word(word).is_some()
}
