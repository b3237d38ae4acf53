//! Cross-reference check
//!
//! Compares the section tables of a parsed LP file: variables used in the
//! objective, constraints or bounds must be declared general, binary or
//! semi-continuous, and (optionally) every declared variable should be used
//! in the objective or constraints. Each variable value is reported at most
//! once per file, at its first offending occurrence.

use crate::grammar::SectionKind;
use crate::logging::{codes, LogEvent};
use crate::symbols::{LpDocument, Symbol};
use crate::{log_debug, log_success};
use std::collections::HashSet;

pub mod types;

// Re-export main types
pub use types::{
    CheckOptions, CrossReferenceReport, Diagnostic, DiagnosticKind, DiagnosticSeverity,
};

/// Accumulates diagnostics, suppressing repeats of the same value
#[derive(Default)]
struct Reporter {
    issued_for: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    fn issue(&mut self, kind: DiagnosticKind, symbol: &Symbol) {
        if self.issued_for.contains(&symbol.value) {
            return;
        }
        self.issued_for.insert(symbol.value.clone());
        self.diagnostics.push(Diagnostic::new(
            kind,
            symbol.position.clone(),
            symbol.value.as_str(),
        ));
    }
}

/// Run the check over a fully parsed document
pub fn check_references(document: &LpDocument, options: &CheckOptions) -> CrossReferenceReport {
    let mut reporter = Reporter::default();

    for kind in SectionKind::USES {
        for symbol in document.section(kind).occurrences() {
            if !document.is_declared(&symbol.value) {
                reporter.issue(DiagnosticKind::Undeclared, symbol);
            }
        }
    }

    if options.issue_warnings {
        for kind in SectionKind::DECLARATIONS {
            for symbol in document.section(kind).occurrences() {
                if !document.is_used(&symbol.value) {
                    reporter.issue(DiagnosticKind::Unused(kind), symbol);
                }
            }
        }
    }

    CrossReferenceReport {
        diagnostics: reporter.diagnostics,
    }
}

/// Run the check and record every diagnostic with the error collector
pub fn validate_references(document: &LpDocument, options: &CheckOptions) -> CrossReferenceReport {
    log_debug!("Starting cross-reference check",
        "symbols" => document.total_occurrences(),
        "warnings" => options.issue_warnings
    );

    let report = check_references(document, options);

    for diagnostic in &report.diagnostics {
        let message = format!("{} {}", diagnostic.kind.message(), diagnostic.value);
        let event = if diagnostic.is_error() {
            LogEvent::error(diagnostic.kind.code(), &message)
        } else {
            LogEvent::warning_with_code(diagnostic.kind.code(), &message)
        };
        crate::logging::record_file_event(event.with_position(diagnostic.position.clone()));
    }

    log_success!(codes::success::REFERENCE_CHECK_COMPLETE,
        "Cross-reference check completed",
        "errors" => report.error_count(),
        "warnings" => report.warning_count()
    );

    report
}

/// Check that the reference codes carry metadata
pub fn init_reference_validation() -> Result<(), String> {
    for code in [
        codes::references::UNDECLARED_VARIABLE,
        codes::references::UNUSED_VARIABLE,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Reference code {} has no metadata", code));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::collect_symbols;

    fn check(text: &str, warnings: bool) -> Vec<String> {
        let (doc, _) = collect_symbols("t.lp", text.lines()).unwrap();
        check_references(&doc, &CheckOptions::with_warnings(warnings))
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn test_undeclared_reported_once_at_first_use() {
        let text = "max\n x + y\nst\n c1: x + y <= 4\nbounds\n y <= 3\ngeneral\n x\nend\n";
        assert_eq!(check(text, false), vec!["t.lp:2: error: no var declaration for y"]);
    }

    #[test]
    fn test_unused_warnings_only_when_enabled() {
        let text = "min\n x\nst\n c: x >= 1\nbinary\n x z\nsemi\n s\ngenerals\n g\nend\n";
        assert!(check(text, false).is_empty());
        assert_eq!(
            check(text, true),
            vec![
                "t.lp:10: warning: no use of general var g",
                "t.lp:6: warning: no use of binary var z",
                "t.lp:8: warning: no use of semi-continuous var s",
            ]
        );
    }

    #[test]
    fn test_error_pass_order_objective_constraints_bounds() {
        let text = "bounds\n b <= 1\nst\n c >= 0\nmin\n o\n";
        assert_eq!(
            check(text, false),
            vec![
                "t.lp:6: error: no var declaration for o",
                "t.lp:4: error: no var declaration for c",
                "t.lp:2: error: no var declaration for b",
            ]
        );
    }

    #[test]
    fn test_bounds_only_variable_declared_is_unused() {
        // Bounds do not count as a use
        let text = "min\n x\nbounds\n y <= 1\ngeneral\n x y\n";
        assert_eq!(check(text, true), vec!["t.lp:6: warning: no use of general var y"]);
    }

    #[test]
    fn test_each_value_reported_once() {
        use crate::utils::Position;

        let mut doc = LpDocument::new();
        doc.section_mut(SectionKind::Bounds)
            .add(Symbol::new("v", Position::new("d.lp", 1)));
        doc.section_mut(SectionKind::General)
            .add(Symbol::new("w", Position::new("d.lp", 2)));
        doc.section_mut(SectionKind::General)
            .add(Symbol::new("w", Position::new("d.lp", 3)));

        let report = check_references(&doc, &CheckOptions::with_warnings(true));
        let rendered: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "d.lp:1: error: no var declaration for v",
                "d.lp:2: warning: no use of general var w",
            ]
        );
    }

    #[test]
    fn test_inf_in_constraints_needs_declaration() {
        let text = "min\n x\nst\n x <= inf\nbounds\n x <= inf\ngeneral\n x\n";
        assert_eq!(check(text, false), vec!["t.lp:4: error: no var declaration for inf"]);
    }

    #[test]
    fn test_clean_file() {
        let text = "min\n 2 x + 3 y\nst\n c1: x + y >= 1\nbin\n x\ngen\n y\nend\n";
        assert!(check(text, true).is_empty());
    }

    #[test]
    fn test_init_reference_validation() {
        assert!(init_reference_validation().is_ok());
    }
}
