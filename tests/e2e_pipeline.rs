// ctsl-report - tests/e2e_pipeline.rs
//
// End-to-end tests for the formatting and export pipeline: raw JSON
// response text in, classified report plus CSV and raw-JSON export text
// out. No mocks; this exercises the same path every adapter uses.

use ctsl_report::app::pipeline::render_and_export;
use ctsl_report::app::view::RawViewState;
use ctsl_report::core::classify::StatusClass;
use ctsl_report::core::export::export_filename;
use ctsl_report::core::model::ResultSet;
use ctsl_report::core::report::{render_html, render_text};

// =============================================================================
// Helpers
// =============================================================================

/// The benzene exact-match response, as the matching service sends it.
const BENZENE_RESPONSE: &str = r#"[{
    "query": "C1=CC=CC=C1",
    "query_type": "smiles",
    "found_match": true,
    "match_level": "Exact",
    "matches": [{
        "identifier": "241",
        "inchikey": "UHOVQNZJYSORNB-UHFFFAOYSA-N",
        "compound_name": "Benzene",
        "smiles": "c1ccccc1",
        "molecular_formula": "C6H6",
        "monoisotopic_mass": 78.0470,
        "pubmed_count": 120,
        "patent_count": 5
    }]
}]"#;

fn parse(body: &str) -> ResultSet {
    ResultSet::from_json(body).expect("valid response body")
}

// =============================================================================
// Full pipeline E2E
// =============================================================================

/// The benzene example classifies as exact-match and produces the
/// documented CSV body row.
#[test]
fn e2e_benzene_exact_match() {
    let set = parse(BENZENE_RESPONSE);
    let output = render_and_export(&set).unwrap();

    let section = &output.report.sections[0];
    assert_eq!(section.status.class, StatusClass::ExactMatch);
    assert_eq!(section.status.text, "Match Found: Exact");
    assert_eq!(section.query_type, "SMILES");

    let body_row = output.csv_text.lines().nth(1).unwrap();
    assert_eq!(
        body_row,
        "C1=CC=CC=C1,smiles,true,Exact,\"\",241,UHOVQNZJYSORNB-UHFFFAOYSA-N,,\
         \"\",c1ccccc1,\"Benzene\",C6H6,78.047,120,5"
    );
}

/// A failed query renders the ✗ marker and emits a single CSV row with
/// ten empty match columns.
#[test]
fn e2e_no_match_result() {
    let set = parse(
        r#"[{"query":"XYZ","query_type":"unidentified","found_match":false,
             "error_message":"no compound found for provided query","matches":[]}]"#,
    );
    let output = render_and_export(&set).unwrap();

    assert!(render_text(&output.report).contains("✗ No match"));

    let body_row = output.csv_text.lines().nth(1).unwrap();
    assert_eq!(
        body_row,
        "XYZ,unidentified,false,,\"no compound found for provided query\",,,,\"\",,\"\",,,,"
    );
    assert_eq!(output.csv_text.lines().count(), 2);
}

/// Section order and the CSV row order follow the original query order,
/// with one row per match.
#[test]
fn e2e_order_preserved_and_rows_expanded() {
    let set = parse(
        r#"[
            {"query":"first","query_type":"inchikey","found_match":true,
             "match_level":"First Block",
             "matches":[{"identifier":"1"},{"identifier":"2"}]},
            {"query":"second","query_type":"smiles","found_match":false,"matches":[]}
        ]"#,
    );
    let output = render_and_export(&set).unwrap();

    assert_eq!(output.report.total_count, 2);
    assert_eq!(output.report.matched_count, 1);
    assert_eq!(output.report.sections[0].query, "first");
    assert_eq!(
        output.report.sections[0].status.class,
        StatusClass::FirstBlockMatch
    );
    assert_eq!(output.report.sections[1].query, "second");

    // Header + 2 match rows + 1 empty-match row.
    let rows: Vec<&str> = output.csv_text.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[1].starts_with("first,inchikey,true,First Block,"));
    assert!(rows[2].starts_with("first,inchikey,true,First Block,"));
    assert!(rows[3].starts_with("second,smiles,false,"));
}

/// Exported CSV parses back with a standard reader even when free-text
/// fields contain separators, and the raw JSON is deep-equal to the input.
#[test]
fn e2e_export_round_trips() {
    let set = parse(
        r#"[{
            "query": "CC(=O)Oc1ccccc1C(=O)O",
            "query_type": "smiles",
            "found_match": true,
            "match_level": "Exact",
            "error_message": null,
            "matches": [{
                "identifier": "2244",
                "compound_name": "aspirin, \"acetylsalicylic acid\"",
                "inchi": "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)"
            }],
            "upstream_latency_ms": 41
        }]"#,
    );
    let output = render_and_export(&set).unwrap();

    let mut reader = csv::Reader::from_reader(output.csv_text.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[10], "aspirin, \"acetylsalicylic acid\"");
    assert_eq!(
        &record[8],
        "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)"
    );

    // Raw export keeps fields the typed model does not know about.
    let reparsed: serde_json::Value = serde_json::from_str(&output.json_text).unwrap();
    assert_eq!(&reparsed, set.raw());
    assert_eq!(reparsed[0]["upstream_latency_ms"], 41);
}

/// Malicious query text is rendered literally, never as markup.
#[test]
fn e2e_html_report_escapes_injection() {
    let set = parse(
        r#"[{"query":"<img src=x onerror=alert(1)>","query_type":"unidentified",
             "found_match":false,"matches":[]}]"#,
    );
    let output = render_and_export(&set).unwrap();
    let html = render_html(&output.report);
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

/// Toggling the raw view never changes the export text, and the clipboard
/// copy matches the raw view byte for byte regardless of visibility.
#[test]
fn e2e_raw_view_toggle_and_clipboard() {
    let set = parse(BENZENE_RESPONSE);
    let output = render_and_export(&set).unwrap();

    let mut view = RawViewState::new();
    assert_eq!(view.button_label(), "Show Raw JSON");
    let copied_hidden = view.clipboard_text(&output.json_text).to_string();

    view.toggle();
    assert_eq!(view.button_label(), "Hide Raw JSON");
    assert_eq!(view.clipboard_text(&output.json_text), copied_hidden);

    // The underlying result set is untouched by view state changes.
    let again = render_and_export(&set).unwrap();
    assert_eq!(again.json_text, output.json_text);
}

/// Export files land on disk as UTF-8 with the timestamped name pattern.
#[test]
fn e2e_export_files_written() {
    let set = parse(BENZENE_RESPONSE);
    let output = render_and_export(&set).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let now = chrono::Utc::now();
    let csv_path = dir.path().join(export_filename("csv", now));
    let json_path = dir.path().join(export_filename("json", now));

    std::fs::write(&csv_path, &output.csv_text).unwrap();
    std::fs::write(&json_path, &output.json_text).unwrap();

    let name = csv_path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("ctsl_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(name.len(), "ctsl_2026-08-30T14:05:09.csv".len());

    assert_eq!(std::fs::read_to_string(&csv_path).unwrap(), output.csv_text);
    assert_eq!(
        std::fs::read_to_string(&json_path).unwrap(),
        output.json_text
    );
}
