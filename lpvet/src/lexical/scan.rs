//! Byte-level scanning helpers
//!
//! LP files are not required to be UTF-8. Lines are kept as raw bytes and
//! walked one scalar at a time: a valid UTF-8 sequence yields its `char`,
//! any other byte yields `None` and is one byte wide. Invalid bytes are
//! never whitespace or separators.

/// Decode the scalar starting at the front of `bytes`.
///
/// Returns the character (or `None` for an invalid byte) and its width.
pub fn decode_first(bytes: &[u8]) -> (Option<char>, usize) {
    for width in 1..=bytes.len().min(4) {
        if let Ok(text) = std::str::from_utf8(&bytes[..width]) {
            return (text.chars().next(), width);
        }
    }
    (None, 1)
}

/// Iterator over `(offset, scalar, width)` for a byte string
pub struct Scalars<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Iterator for Scalars<'a> {
    type Item = (usize, Option<char>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        let start = self.offset;
        let (scalar, width) = decode_first(&self.bytes[start..]);
        self.offset += width;
        Some((start, scalar, width))
    }
}

pub fn scalars(bytes: &[u8]) -> Scalars<'_> {
    Scalars { bytes, offset: 0 }
}

fn is_space(scalar: Option<char>) -> bool {
    scalar.is_some_and(char::is_whitespace)
}

/// Remove leading and trailing Unicode whitespace
pub fn trim_space(bytes: &[u8]) -> &[u8] {
    let mut start = None;
    let mut end = 0;
    for (offset, scalar, width) in scalars(bytes) {
        if !is_space(scalar) {
            start.get_or_insert(offset);
            end = offset + width;
        }
    }
    match start {
        Some(start) => &bytes[start..end],
        None => &bytes[..0],
    }
}

/// Split on runs of scalars matching `is_separator`, dropping empty pieces
pub fn split_fields<F>(bytes: &[u8], is_separator: F) -> Vec<&[u8]>
where
    F: Fn(char) -> bool,
{
    let mut fields = Vec::new();
    let mut field_start = None;

    for (offset, scalar, _) in scalars(bytes) {
        if scalar.is_some_and(&is_separator) {
            if let Some(start) = field_start.take() {
                fields.push(&bytes[start..offset]);
            }
        } else {
            field_start.get_or_insert(offset);
        }
    }
    if let Some(start) = field_start {
        fields.push(&bytes[start..]);
    }

    fields
}

/// First whitespace-delimited field
pub fn first_field(bytes: &[u8]) -> Option<&[u8]> {
    split_fields(bytes, char::is_whitespace).into_iter().next()
}
