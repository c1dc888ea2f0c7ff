// ctsl-report - app/pipeline.rs
//
// Single synchronous entry point over the core: classification, report
// building, and both exports in one pass. Adapters (CLI, web, tests)
// call this instead of re-deriving escaping or classification logic.

use crate::core::export::{csv_string, raw_json};
use crate::core::model::ResultSet;
use crate::core::report::{build_report, Report};
use crate::util::error::Result;

/// Everything a presentation surface needs for one result set.
///
/// Pure function of the input: no cross-call state, so a superseded
/// render can be discarded without partial-state leakage.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Classified display tree, one section per sub-query.
    pub report: Report,

    /// CSV export text (header plus one row per match).
    pub csv_text: String,

    /// Indented raw JSON, shared by the download, the raw view, and the
    /// clipboard copy.
    pub json_text: String,
}

/// Runs the full formatting and export pipeline over one result set.
pub fn render_and_export(set: &ResultSet) -> Result<PipelineOutput> {
    let report = build_report(&set.results);
    let csv_text = csv_string(&set.results)?;
    let json_text = raw_json(set)?;

    tracing::info!(
        queries = report.total_count,
        matched = report.matched_count,
        csv_bytes = csv_text.len(),
        "Pipeline complete"
    );

    Ok(PipelineOutput {
        report,
        csv_text,
        json_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_is_pure_per_input() {
        let set = ResultSet::from_json(
            r#"[{"query":"q","query_type":"smiles","found_match":true,
                 "match_level":"Exact","matches":[{"identifier":"241"}]}]"#,
        )
        .unwrap();

        let first = render_and_export(&set).unwrap();
        let second = render_and_export(&set).unwrap();
        assert_eq!(first.csv_text, second.csv_text);
        assert_eq!(first.json_text, second.json_text);
        assert_eq!(first.report.matched_count, 1);
    }
}
