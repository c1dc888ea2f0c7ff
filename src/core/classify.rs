// ctsl-report - core/classify.rs
//
// Status Classifier and Query-Type Labeler.
// Core layer: pure functions over QueryResult, no I/O.

use crate::core::model::QueryResult;

// =============================================================================
// Status class
// =============================================================================

/// Display style class for a classified result, ordered strongest first.
///
/// `match_level` is free text from the service, so classification is
/// substring-based and must degrade to the generic [`StatusClass::Found`]
/// bucket for level text it does not recognise. Narrowing this to an
/// enumerated tag would change observable behaviour the service relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    ExactMatch,
    FirstBlockMatch,
    Found,
    NoMatch,
}

impl StatusClass {
    /// CSS-style class name used by HTML rendering.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusClass::ExactMatch => "exact-match",
            StatusClass::FirstBlockMatch => "first-block-match",
            StatusClass::Found => "found",
            StatusClass::NoMatch => "no-match",
        }
    }

    /// Status marker shown in front of the status text (✓ / ✗).
    pub fn marker(&self) -> &'static str {
        match self {
            StatusClass::NoMatch => "✗",
            _ => "✓",
        }
    }
}

/// Classified display status: human-readable text plus style class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchStatus {
    pub text: String,
    pub class: StatusClass,
}

impl MatchStatus {
    /// Status line with the ✓/✗ marker prepended, as shown in the report.
    pub fn marked_text(&self) -> String {
        format!("{} {}", self.class.marker(), self.text)
    }
}

// =============================================================================
// Status Classifier
// =============================================================================

/// Maps a result's match fields to its display status.
///
/// `found_match == false` always classifies as [`StatusClass::NoMatch`],
/// regardless of any leftover `match_level` text. Otherwise the level text
/// is tested case-insensitively for "exact" first, then "first block";
/// anything else keeps the original level text in a generic "found" status.
pub fn classify(result: &QueryResult) -> MatchStatus {
    if !result.found_match {
        return MatchStatus {
            text: "No match".to_string(),
            class: StatusClass::NoMatch,
        };
    }

    match &result.match_level {
        Some(level) => {
            let lower = level.to_lowercase();
            if lower.contains("exact") {
                MatchStatus {
                    text: "Match Found: Exact".to_string(),
                    class: StatusClass::ExactMatch,
                }
            } else if lower.contains("first block") {
                MatchStatus {
                    text: "Match Found: First Block".to_string(),
                    class: StatusClass::FirstBlockMatch,
                }
            } else {
                // Unknown level text passes through un-lowercased.
                MatchStatus {
                    text: format!("Match Found: {level}"),
                    class: StatusClass::Found,
                }
            }
        }
        None => MatchStatus {
            text: "Match Found".to_string(),
            class: StatusClass::Found,
        },
    }
}

// =============================================================================
// Query-Type Labeler
// =============================================================================

/// Display label for a raw query-type tag.
///
/// Case-insensitive lookup; unknown tags pass through unchanged so newer
/// server tags still render rather than erroring.
pub fn query_type_label(tag: &str) -> String {
    match tag.to_lowercase().as_str() {
        "inchikey" => "InChIKey".to_string(),
        "smiles" => "SMILES".to_string(),
        "inchi" => "InChI".to_string(),
        "bad_inchi" => "Malformed InChI".to_string(),
        "bad_inchikey" => "Malformed InChIKey".to_string(),
        "unidentified" => "Unidentified".to_string(),
        _ => tag.to_string(),
    }
}
