//! Symbol collection for LP files
//!
//! Builds the six per-section symbol tables in one forward pass over the
//! file's lines.

use crate::logging::codes;
use crate::{log_debug, log_success};
use std::sync::Arc;

pub mod collector;
pub mod table;

// Re-export main types
pub use collector::{collect_symbols, SymbolCollector};
pub use table::{LpDocument, SectionSummary, SectionTable, Symbol};

use crate::lexical::{FormatError, LexicalMetrics};

/// Document plus the counters gathered while reading it
#[derive(Debug, Clone)]
pub struct SymbolDiscoveryResult {
    pub document: LpDocument,
    pub metrics: LexicalMetrics,
}

/// Collect symbols from the lines of `file`, logging the outcome
pub fn discover_symbols<I, L>(file: &str, lines: I) -> Result<SymbolDiscoveryResult, FormatError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    log_debug!("Starting symbol collection", "file" => file);

    let (document, metrics) = collect_symbols(Arc::<str>::from(file), lines)?;

    log_success!(codes::success::SYMBOL_COLLECTION_COMPLETE,
        "Symbol collection completed",
        "file" => file,
        "lines" => metrics.total_lines,
        "data_lines" => metrics.data_lines,
        "symbols" => document.total_occurrences()
    );

    Ok(SymbolDiscoveryResult { document, metrics })
}
