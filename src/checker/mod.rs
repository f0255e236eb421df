//! Keyword-based compliance checklist.
//!
//! This is a heuristic, not a regulatory verification. A category passes when
//! any of its keywords appears anywhere in the text as a case-insensitive
//! substring, so "vol" in "volcano" satisfies the alcohol check and a label
//! with every required element spelled differently fails. The checklist is a
//! nudge for the person editing the label and must not be read as a verdict.
//!
//! Besides the seven keyword categories, two structural checks run on the
//! unmodified text: whether it carries any `**bold**` emphasis, and whether its
//! non-empty line count fits the physical label.

mod tables;

pub use tables::{table, CategoryKind, ComplianceCategory};

use serde::Serialize;

use crate::config::DEFAULT_MAX_LABEL_LINES;
use crate::emphasis;
use crate::market::Market;

/// Name of the emphasis structural check
pub const EMPHASIS_CHECK: &str = "Emphasis";
/// Name of the line-count structural check
pub const COMPACT_CHECK: &str = "Compact Layout";

/// Outcome of a single checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    #[serde(skip)]
    pub name: &'static str,
    pub pass: bool,
    pub message: String,
}

/// Full checklist for one text and market
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub checks: Vec<CheckResult>,
    pub summary: String,
    pub compliant: bool,
    #[serde(skip)]
    pub passed: usize,
    #[serde(skip)]
    pub total: usize,
}

impl ComplianceReport {
    fn from_checks(checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().filter(|check| check.pass).count();
        let total = checks.len();
        Self {
            summary: format!("{}/{} checks passed", passed, total),
            compliant: passed == total,
            checks,
            passed,
            total,
        }
    }

    /// Look up a check by name (category name or structural check name)
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }
}

/// Stateless checker; the only knob is the line threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceChecker {
    max_lines: usize,
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LABEL_LINES)
    }
}

impl ComplianceChecker {
    pub fn new(max_lines: usize) -> Self {
        Self { max_lines }
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Run the market's keyword table and the structural checks over `text`.
    ///
    /// Never fails; empty input yields a report where every category fails.
    pub fn check(&self, text: &str, market: Market) -> ComplianceReport {
        let lowered = text.to_lowercase();

        let mut checks: Vec<CheckResult> = table(market)
            .iter()
            .map(|category| category_result(category, &lowered))
            .collect();

        checks.push(emphasis_result(text));
        checks.push(compact_result(text, self.max_lines));

        ComplianceReport::from_checks(checks)
    }
}

/// Check `text` against `market` with the default line threshold.
pub fn check(text: &str, market: Market) -> ComplianceReport {
    ComplianceChecker::default().check(text, market)
}

/// Number of lines containing anything besides whitespace
pub fn non_empty_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

fn category_result(category: &ComplianceCategory, lowered: &str) -> CheckResult {
    let pass = category.matches(lowered);
    let message = if pass {
        format!("✓ {} present", category.label)
    } else {
        format!(
            "✗ {} missing (looked for: {})",
            category.label,
            category.keywords.join(", ")
        )
    };

    CheckResult {
        name: category.kind.name(),
        pass,
        message,
    }
}

fn emphasis_result(text: &str) -> CheckResult {
    let pass = emphasis::has_emphasis(text);
    let message = if pass {
        "✓ Key information emphasized with **bold** markers".to_string()
    } else {
        "✗ No **bold** emphasis found (product name, headers and allergens should be bold)"
            .to_string()
    };

    CheckResult {
        name: EMPHASIS_CHECK,
        pass,
        message,
    }
}

fn compact_result(text: &str, max_lines: usize) -> CheckResult {
    let lines = non_empty_lines(text);
    let pass = lines <= max_lines;
    let message = if pass {
        format!("✓ Compact layout ({} of at most {} lines)", lines, max_lines)
    } else {
        format!("✗ Too long for the label ({} lines, at most {})", lines, max_lines)
    };

    CheckResult {
        name: COMPACT_CHECK,
        pass,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWISS_LABEL: &str = "**Savanna Cidre - Alkoholisches Getränk auf Apfelweinbasis**\n\
        Zutaten: Apfelwein, Konservierungsstoff: **SULFITE**\n\
        **Alkoholgehalt:** 6% vol. **Nettofüllmenge:** 500ml\n\
        **Hergestellt in Südafrika** **Importeur:** Lekker Roots, Haberweidstrasse 4, 8610 Uster\n\
        **Mindestens haltbar bis:** siehe Flasche **Losnummer:** siehe Flasche";

    fn category_passes(report: &ComplianceReport) -> Vec<bool> {
        report.checks[..7].iter().map(|check| check.pass).collect()
    }

    #[test]
    fn test_empty_text_fails_every_category() {
        for market in Market::ALL {
            let report = check("", market);
            assert_eq!(category_passes(&report), vec![false; 7]);
            assert!(!report.compliant);
            // No lines is compact; nothing else passes
            assert_eq!(report.passed, 1);
            assert_eq!(report.total, 9);
            assert_eq!(report.summary, "1/9 checks passed");
        }
    }

    #[test]
    fn test_eu_cider_scenario() {
        let text = "Cider 6% vol 500ml Importer: Acme, Address: Main St, allergen: sulfite";
        let report = check(text, Market::Eu);

        assert!(report.check("Product Name").unwrap().pass);
        assert!(!report.check("Origin").unwrap().pass);
        assert!(report.check("Alcohol").unwrap().pass);
        assert!(report.check("Volume").unwrap().pass);
        assert!(report.check("Importer").unwrap().pass);
        assert!(report.check("Allergen Declaration").unwrap().pass);
        assert!(!report.check("Language").unwrap().pass);
        assert!(!report.check(EMPHASIS_CHECK).unwrap().pass);
        assert!(report.check(COMPACT_CHECK).unwrap().pass);
        assert!(!report.compliant);
    }

    #[test]
    fn test_keyword_matching_ignores_case() {
        for text in ["SULFITE", "sulfite", "Sulfite"] {
            let report = check(text, Market::Eu);
            assert!(report.check("Allergen Declaration").unwrap().pass, "{}", text);
        }
        let report = check("ENTHÄLT SCHWEFELDIOXID", Market::Switzerland);
        assert!(report.check("Allergen Declaration").unwrap().pass);
    }

    #[test]
    fn test_complete_swiss_label_is_compliant() {
        let report = check(SWISS_LABEL, Market::Switzerland);
        assert!(report.compliant, "{:#?}", report.checks);
        assert_eq!(report.summary, "9/9 checks passed");
    }

    #[test]
    fn test_emphasis_check_runs_on_unlowered_text() {
        let report = check("**Savanna Cider**", Market::Eu);
        assert!(report.check(EMPHASIS_CHECK).unwrap().pass);
    }

    #[test]
    fn test_emphasis_pair_may_span_lines() {
        let report = check("**Hergestellt in\nSüdafrika** Importeur: X", Market::Switzerland);
        assert!(report.check(EMPHASIS_CHECK).unwrap().pass);

        let report = check("Cider ** 6% vol", Market::Eu);
        assert!(!report.check(EMPHASIS_CHECK).unwrap().pass);
    }

    #[test]
    fn test_too_many_lines_fails_compact_check() {
        let long = SWISS_LABEL.to_string() + "\nA\nB\nC\nD\nE\nF";
        assert_eq!(non_empty_lines(&long), 11);
        let report = check(&long, Market::Switzerland);
        assert!(!report.check(COMPACT_CHECK).unwrap().pass);
        assert!(!report.compliant);
        // Keyword categories are unaffected
        assert_eq!(category_passes(&report), vec![true; 7]);
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let text = "a\n\n   \nb\n\t\nc\n";
        assert_eq!(non_empty_lines(text), 3);
        let report = ComplianceChecker::new(3).check(text, Market::Eu);
        assert!(report.check(COMPACT_CHECK).unwrap().pass);
    }

    #[test]
    fn test_custom_threshold() {
        let text = "one\ntwo\nthree";
        let strict = ComplianceChecker::new(2).check(text, Market::Eu);
        assert!(!strict.check(COMPACT_CHECK).unwrap().pass);
        assert!(strict.check(COMPACT_CHECK).unwrap().message.contains("3 lines, at most 2"));
    }

    #[test]
    fn test_check_is_deterministic() {
        let text = "Cidre 5% vol, 330 ml\nImporteur: X\n**SULFITE**";
        for market in Market::ALL {
            assert_eq!(check(text, market), check(text, market));
        }
    }

    #[test]
    fn test_failure_message_lists_keywords() {
        let report = check("", Market::Eu);
        let language = report.check("Language").unwrap();
        assert_eq!(
            language.message,
            "✗ English text missing (looked for: english, ingredients)"
        );
    }

    #[test]
    fn test_report_serializes_wire_shape() {
        let report = check("Cider", Market::Eu);
        let value = serde_json::to_value(&report).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["checks", "compliant", "summary"]);

        let first = value["checks"][0].as_object().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first["pass"], serde_json::json!(true));
        assert!(first["message"].as_str().unwrap().starts_with("✓ Product name"));
    }
}
