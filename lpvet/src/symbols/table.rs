//! Per-section symbol tables

use crate::grammar::SectionKind;
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One occurrence of a variable name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// Token text exactly as written; identity is case-sensitive
    pub value: String,
    pub position: Position,
}

impl Symbol {
    pub fn new(value: impl Into<String>, position: Position) -> Self {
        Self {
            value: value.into(),
            position,
        }
    }
}

/// Occurrences of symbols in one section, in file order.
///
/// Duplicates are kept in the sequence; the presence set always holds
/// exactly the distinct values of the sequence.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    occurrences: Vec<Symbol>,
    present: HashSet<String>,
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: Symbol) {
        if !self.present.contains(&symbol.value) {
            self.present.insert(symbol.value.clone());
        }
        self.occurrences.push(symbol);
    }

    pub fn has(&self, value: &str) -> bool {
        self.present.contains(value)
    }

    pub fn occurrences(&self) -> &[Symbol] {
        &self.occurrences
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn distinct_count(&self) -> usize {
        self.present.len()
    }
}

/// Symbol counts for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub section: SectionKind,
    pub occurrences: usize,
    pub distinct: usize,
}

/// The six symbol tables of one LP file
#[derive(Debug, Clone, Default)]
pub struct LpDocument {
    objective: SectionTable,
    constraints: SectionTable,
    bounds: SectionTable,
    general: SectionTable,
    binary: SectionTable,
    semi_continuous: SectionTable,
}

impl LpDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, kind: SectionKind) -> &SectionTable {
        match kind {
            SectionKind::Objective => &self.objective,
            SectionKind::Constraints => &self.constraints,
            SectionKind::Bounds => &self.bounds,
            SectionKind::General => &self.general,
            SectionKind::Binary => &self.binary,
            SectionKind::SemiContinuous => &self.semi_continuous,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut SectionTable {
        match kind {
            SectionKind::Objective => &mut self.objective,
            SectionKind::Constraints => &mut self.constraints,
            SectionKind::Bounds => &mut self.bounds,
            SectionKind::General => &mut self.general,
            SectionKind::Binary => &mut self.binary,
            SectionKind::SemiContinuous => &mut self.semi_continuous,
        }
    }

    /// Declared as general, binary or semi-continuous
    pub fn is_declared(&self, value: &str) -> bool {
        SectionKind::DECLARATIONS
            .iter()
            .any(|&kind| self.section(kind).has(value))
    }

    /// Used in the objective or the constraints
    pub fn is_used(&self, value: &str) -> bool {
        self.objective.has(value) || self.constraints.has(value)
    }

    pub fn total_occurrences(&self) -> usize {
        SectionKind::ALL
            .iter()
            .map(|&kind| self.section(kind).len())
            .sum()
    }

    pub fn summaries(&self) -> Vec<SectionSummary> {
        SectionKind::ALL
            .iter()
            .map(|&kind| {
                let table = self.section(kind);
                SectionSummary {
                    section: kind,
                    occurrences: table.len(),
                    distinct: table.distinct_count(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(value: &str, line: u32) -> Symbol {
        Symbol::new(value, Position::new("t.lp", line))
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let mut table = SectionTable::new();
        table.add(sym("x", 1));
        table.add(sym("y", 2));
        table.add(sym("x", 3));

        let values: Vec<&str> = table.occurrences().iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["x", "y", "x"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.distinct_count(), 2);
        assert!(table.has("x"));
        assert!(!table.has("X"));
    }

    #[test]
    fn test_declaration_union() {
        let mut doc = LpDocument::new();
        doc.section_mut(SectionKind::Binary).add(sym("b", 1));
        doc.section_mut(SectionKind::SemiContinuous).add(sym("s", 2));
        doc.section_mut(SectionKind::Constraints).add(sym("c", 3));

        assert!(doc.is_declared("b"));
        assert!(doc.is_declared("s"));
        assert!(!doc.is_declared("c"));
        assert!(doc.is_used("c"));
        assert!(!doc.is_used("b"));
        assert_eq!(doc.total_occurrences(), 3);
    }

    #[test]
    fn test_summaries_cover_all_sections() {
        let mut doc = LpDocument::new();
        doc.section_mut(SectionKind::Bounds).add(sym("x", 1));
        doc.section_mut(SectionKind::Bounds).add(sym("x", 2));

        let summaries = doc.summaries();
        assert_eq!(summaries.len(), 6);
        let bounds = summaries[2];
        assert_eq!(bounds.section, SectionKind::Bounds);
        assert_eq!((bounds.occurrences, bounds.distinct), (2, 1));
    }
}
