//! Line classification
//!
//! Decides what a single raw line of an LP file is. The length limit is
//! checked on the untrimmed bytes before anything else, so an overlong
//! comment still fails.

use super::error::FormatError;
use super::scan;
use crate::config::constants::compile_time::lexical::{COMMENT_MARKER, MAX_LINE_LENGTH};
use crate::grammar::{SectionKeyword, SectionKind, SectionState};
use crate::utils::Position;

/// What a line contributes to the parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty or whitespace only
    Blank,
    /// Tool comment, first non-space byte is `\`
    Comment,
    /// Section keyword line; the rest of the line is ignored
    Keyword(SectionKeyword),
    /// Row content for the active section, already trimmed
    Data { section: SectionKind, text: &'a [u8] },
}

/// Classify one line given the section that is active before it.
pub fn classify_line<'a>(
    line: &'a [u8],
    state: SectionState,
    position: &Position,
) -> Result<LineClass<'a>, FormatError> {
    if line.len() > MAX_LINE_LENGTH {
        return Err(FormatError::LineTooLong {
            position: position.clone(),
            length: line.len(),
        });
    }

    let text = scan::trim_space(line);
    if text.is_empty() {
        return Ok(LineClass::Blank);
    }
    if text.first() == Some(&COMMENT_MARKER) {
        return Ok(LineClass::Comment);
    }

    // A first word that is not UTF-8 is never a keyword
    if let Some(keyword) = scan::first_field(text)
        .and_then(|word| std::str::from_utf8(word).ok())
        .and_then(SectionKeyword::from_word)
    {
        return Ok(LineClass::Keyword(keyword));
    }

    match state.current() {
        Some(section) => Ok(LineClass::Data { section, text }),
        None => Err(FormatError::SectionContext {
            position: position.clone(),
        }),
    }
}
