//! Data line tokenizer
//!
//! Splits a data line into raw tokens and sorts them into candidate
//! variable names and noise (numbers, labels, sense markers). Tokens are
//! byte slices of the line; nothing here assumes UTF-8.

use super::scan;
use crate::config::constants::compile_time::lexical::LABEL_SEPARATOR;

/// Operator characters that separate tokens in addition to whitespace
pub const OPERATOR_SEPARATORS: [char; 5] = ['+', '-', '=', '>', '<'];

/// A raw token from a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// Starts like a variable name; still subject to validation
    Candidate(&'a [u8]),
    /// Anything else; discarded
    Noise(&'a [u8]),
}

impl<'a> RawToken<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        match self {
            RawToken::Candidate(bytes) | RawToken::Noise(bytes) => bytes,
        }
    }
}

/// Drop a leading row label.
///
/// Everything before the first colon goes; the colon itself is kept and
/// ends up as (or glued to) the first token.
pub fn strip_label(text: &[u8]) -> &[u8] {
    match text.iter().position(|&byte| byte == LABEL_SEPARATOR) {
        Some(index) => &text[index..],
        None => text,
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || OPERATOR_SEPARATORS.contains(&c)
}

/// Split on whitespace and operator characters, skipping empty pieces
pub fn split_tokens(text: &[u8]) -> Vec<&[u8]> {
    scan::split_fields(text, is_separator)
}

/// True if the first raw byte, read as a Latin-1 code point, is a letter or `_`
fn starts_symbol(token: &[u8]) -> bool {
    match token.first() {
        Some(&b'_') => true,
        Some(&byte) => char::from(byte).is_alphabetic(),
        None => false,
    }
}

pub fn classify_token(token: &[u8]) -> RawToken<'_> {
    if starts_symbol(token) {
        RawToken::Candidate(token)
    } else {
        RawToken::Noise(token)
    }
}

/// Tokenize a trimmed data line
pub fn tokenize(text: &[u8]) -> impl Iterator<Item = RawToken<'_>> {
    split_tokens(strip_label(text)).into_iter().map(classify_token)
}
