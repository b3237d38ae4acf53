//! Single forward pass that fills the section tables

use super::table::{LpDocument, Symbol};
use crate::grammar::SectionState;
use crate::lexical::{
    classify_line, tokenize, validate_candidate, FormatError, LexicalMetrics, LineClass, RawToken,
    Validated,
};
use crate::utils::Position;
use std::sync::Arc;

/// Line-at-a-time parser state for one file
pub struct SymbolCollector {
    file: Arc<str>,
    line_number: u32,
    state: SectionState,
    document: LpDocument,
    metrics: LexicalMetrics,
}

impl SymbolCollector {
    pub fn new(file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            line_number: 0,
            state: SectionState::NoSection,
            document: LpDocument::new(),
            metrics: LexicalMetrics::default(),
        }
    }

    /// Consume the next line of the file.
    ///
    /// Lines are numbered in the order they are fed, starting at 1. A line
    /// is raw bytes without its terminator.
    pub fn feed_line<L: AsRef<[u8]>>(&mut self, line: L) -> Result<(), FormatError> {
        self.line_number += 1;
        let position = Position::new(Arc::clone(&self.file), self.line_number);

        let class = classify_line(line.as_ref(), self.state, &position)?;
        self.metrics.record_line(&class);

        match class {
            LineClass::Blank | LineClass::Comment => Ok(()),
            LineClass::Keyword(keyword) => {
                self.state = self.state.transition(keyword);
                Ok(())
            }
            LineClass::Data { section, text } => {
                for token in tokenize(text) {
                    self.metrics.record_token(&token);
                    let RawToken::Candidate(candidate) = token else {
                        continue;
                    };
                    match validate_candidate(candidate, section, &position)? {
                        Validated::Symbol(value) => self
                            .document
                            .section_mut(section)
                            .add(Symbol::new(value, position.clone())),
                        Validated::Skip => self.metrics.reserved_skipped += 1,
                    }
                }
                Ok(())
            }
        }
    }

    pub fn finish(self) -> (LpDocument, LexicalMetrics) {
        (self.document, self.metrics)
    }
}

/// Run the parse pass over a sequence of lines
pub fn collect_symbols<I, L>(
    file: impl Into<Arc<str>>,
    lines: I,
) -> Result<(LpDocument, LexicalMetrics), FormatError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let mut collector = SymbolCollector::new(file);
    for line in lines {
        collector.feed_line(line)?;
    }
    Ok(collector.finish())
}
