// ctsl-report - core/report.rs
//
// Report Renderer: builds a display tree from a result set and renders
// it as plain text (terminal) or HTML (web adapter).
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::classify::{classify, query_type_label, MatchStatus};
use crate::core::model::{Match, QueryResult};
use crate::util::constants::UNNAMED_COMPOUND;
use std::fmt::Write as _;

// =============================================================================
// Display tree
// =============================================================================

/// Fully classified report over one result set. One section per sub-query,
/// in the original query order.
#[derive(Debug, Clone)]
pub struct Report {
    pub sections: Vec<Section>,

    /// Number of results with `found_match == true`.
    pub matched_count: usize,

    /// Total number of sub-queries in the set.
    pub total_count: usize,
}

/// One sub-query's report section.
#[derive(Debug, Clone)]
pub struct Section {
    pub query: String,

    /// Display label from the Query-Type Labeler (not the raw tag).
    pub query_type: String,

    pub status: MatchStatus,

    /// Present iff the result carried a non-empty error message.
    pub error: Option<String>,

    /// One card per candidate match, in service order. Empty when the
    /// result carried no matches.
    pub matches: Vec<MatchCard>,
}

/// Display-ready view of one candidate compound.
///
/// Absent fields become empty strings so renderers never have to branch;
/// the compound name additionally falls back to the "Unnamed Compound"
/// marker so every card has a heading.
#[derive(Debug, Clone)]
pub struct MatchCard {
    pub pubchem_cid: String,
    pub inchikey: String,
    pub first_block: String,
    pub inchi: String,
    pub smiles: String,
    pub compound_name: String,
    pub molecular_formula: String,
    pub monoisotopic_mass: String,
    pub pubmed_count: String,
    pub patent_count: String,
}

impl MatchCard {
    fn from_match(m: &Match) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            pubchem_cid: text(&m.identifier),
            inchikey: text(&m.inchikey),
            first_block: text(&m.first_block),
            inchi: text(&m.inchi),
            smiles: text(&m.smiles),
            compound_name: m
                .compound_name
                .clone()
                .unwrap_or_else(|| UNNAMED_COMPOUND.to_string()),
            molecular_formula: text(&m.molecular_formula),
            monoisotopic_mass: m.monoisotopic_mass.map(|v| v.to_string()).unwrap_or_default(),
            pubmed_count: m.pubmed_count.map(|v| v.to_string()).unwrap_or_default(),
            patent_count: m.patent_count.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    /// (label, value) pairs in display order.
    fn fields(&self) -> [(&'static str, &str); 9] {
        [
            ("PubChem CID", &self.pubchem_cid),
            ("InChIKey", &self.inchikey),
            ("First Block", &self.first_block),
            ("InChI", &self.inchi),
            ("SMILES", &self.smiles),
            ("Molecular Formula", &self.molecular_formula),
            ("Monoisotopic Mass", &self.monoisotopic_mass),
            ("PubMed Count", &self.pubmed_count),
            ("Patent Count", &self.patent_count),
        ]
    }
}

// =============================================================================
// Report building
// =============================================================================

/// Builds the display tree for a result set. Order-preserving, read-only.
pub fn build_report(results: &[QueryResult]) -> Report {
    let sections = results
        .iter()
        .map(|result| Section {
            query: result.query.clone(),
            query_type: query_type_label(&result.query_type),
            status: classify(result),
            error: result.error_message.clone(),
            matches: result.matches.iter().map(MatchCard::from_match).collect(),
        })
        .collect();

    let matched_count = results.iter().filter(|r| r.found_match).count();
    tracing::debug!(
        matched = matched_count,
        total = results.len(),
        "Built report"
    );

    Report {
        sections,
        matched_count,
        total_count: results.len(),
    }
}

// =============================================================================
// Plain-text rendering
// =============================================================================

/// Renders the report for a terminal.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Matched {} of {} queries",
        report.matched_count, report.total_count
    );

    for section in &report.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "Query: {} ({})", section.query, section.query_type);
        let _ = writeln!(out, "  {}", section.status.marked_text());
        if let Some(error) = &section.error {
            let _ = writeln!(out, "  Error: {error}");
        }
        for card in &section.matches {
            let _ = writeln!(out, "  {}", card.compound_name);
            for (label, value) in card.fields() {
                let _ = writeln!(out, "    {label}: {value}");
            }
        }
    }
    out
}

// =============================================================================
// HTML rendering
// =============================================================================

/// Escapes text for literal inclusion in HTML.
///
/// Queries and compound names are arbitrary external text; every free-text
/// field goes through this before touching markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the report as an HTML fragment for a web adapter.
///
/// Status style classes are the fixed set from
/// [`StatusClass::css_class`](crate::core::classify::StatusClass::css_class).
pub fn render_html(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<p class="summary">Matched {} of {} queries</p>"#,
        report.matched_count, report.total_count
    );

    for section in &report.sections {
        let _ = writeln!(out, r#"<section class="query-result">"#);
        let _ = writeln!(
            out,
            "  <h3>{} <small>({})</small></h3>",
            escape_html(&section.query),
            escape_html(&section.query_type)
        );
        let _ = writeln!(
            out,
            r#"  <p class="{}">{}</p>"#,
            section.status.class.css_class(),
            escape_html(&section.status.marked_text())
        );
        if let Some(error) = &section.error {
            let _ = writeln!(
                out,
                r#"  <p class="error">{}</p>"#,
                escape_html(error)
            );
        }
        for card in &section.matches {
            let _ = writeln!(out, r#"  <div class="match">"#);
            let _ = writeln!(out, "    <h4>{}</h4>", escape_html(&card.compound_name));
            let _ = writeln!(out, "    <dl>");
            for (label, value) in card.fields() {
                let _ = writeln!(
                    out,
                    "      <dt>{label}</dt><dd>{}</dd>",
                    escape_html(value)
                );
            }
            let _ = writeln!(out, "    </dl>");
            let _ = writeln!(out, "  </div>");
        }
        let _ = writeln!(out, "</section>");
    }
    out
}
