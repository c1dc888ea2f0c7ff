// ctsl-report - core/export.rs
//
// Tabular (CSV) and raw (JSON) export of a result set.
// Core layer: writes to any Write trait object.
//
// The CSV layout quotes three columns unconditionally (error_message,
// inchi, compound_name): they are structurally free text and routinely
// contain commas, so they are quote-wrapped even when empty. The csv
// crate's writer quotes per-record, not per-column, so the escaping here
// is written directly against the Write sink; the round-trip property is
// verified in tests with the csv crate's reader.

use crate::core::model::{QueryResult, ResultSet};
use crate::util::constants::{EXPORT_FILE_PREFIX, EXPORT_TIMESTAMP_FORMAT, MAX_EXPORT_ROWS};
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use std::io::Write;

/// CSV column header, in the fixed export order. The first five columns
/// repeat per-query fields on every row; the rest are per-match.
pub const CSV_COLUMNS: [&str; 15] = [
    "query",
    "query_type",
    "found_match",
    "match_level",
    "error_message",
    "pubchem_cid",
    "inchikey",
    "first_block",
    "inchi",
    "smiles",
    "compound_name",
    "molecular_formula",
    "monoisotopic_mass",
    "pubmed_count",
    "patent_count",
];

// =============================================================================
// CSV export
// =============================================================================

/// Writes the result set as CSV: header row, then one row per match, or a
/// single row with empty match columns for results without matches.
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(results: &[QueryResult], mut writer: W) -> Result<usize, ExportError> {
    let total_rows: usize = results.iter().map(|r| r.matches.len().max(1)).sum();
    if total_rows > MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: total_rows,
            max: MAX_EXPORT_ROWS,
        });
    }

    write_row(&mut writer, &CSV_COLUMNS.map(Field::plain))?;

    for result in results {
        let found = if result.found_match { "true" } else { "false" };
        let query_fields = [
            Field::plain(&result.query),
            Field::plain(&result.query_type),
            Field::plain(found),
            Field::plain(result.match_level.as_deref().unwrap_or("")),
            Field::quoted(result.error_message.as_deref().unwrap_or("")),
        ];

        if result.matches.is_empty() {
            // Ten empty match columns; inchi and compound_name keep their
            // forced quoting even when empty.
            let mut row = query_fields.to_vec();
            row.extend([
                Field::plain(""),  // pubchem_cid
                Field::plain(""),  // inchikey
                Field::plain(""),  // first_block
                Field::quoted(""), // inchi
                Field::plain(""),  // smiles
                Field::quoted(""), // compound_name
                Field::plain(""),  // molecular_formula
                Field::plain(""),  // monoisotopic_mass
                Field::plain(""),  // pubmed_count
                Field::plain(""),  // patent_count
            ]);
            write_row(&mut writer, &row)?;
        } else {
            for m in &result.matches {
                let mass = m.monoisotopic_mass.map(|v| v.to_string()).unwrap_or_default();
                let pubmed = m.pubmed_count.map(|v| v.to_string()).unwrap_or_default();
                let patents = m.patent_count.map(|v| v.to_string()).unwrap_or_default();

                let row: Vec<Field> = query_fields
                    .iter()
                    .cloned()
                    .chain([
                        Field::plain(m.identifier.as_deref().unwrap_or("")),
                        Field::plain(m.inchikey.as_deref().unwrap_or("")),
                        Field::plain(m.first_block.as_deref().unwrap_or("")),
                        Field::quoted(m.inchi.as_deref().unwrap_or("")),
                        Field::plain(m.smiles.as_deref().unwrap_or("")),
                        Field::quoted(m.compound_name.as_deref().unwrap_or("")),
                        Field::plain(m.molecular_formula.as_deref().unwrap_or("")),
                        Field::plain(&mass),
                        Field::plain(&pubmed),
                        Field::plain(&patents),
                    ])
                    .collect();
                write_row(&mut writer, &row)?;
            }
        }
    }

    tracing::debug!(rows = total_rows, "CSV export complete");
    Ok(total_rows)
}

/// CSV export into a String, for adapters that hand the text onward
/// (download blob, clipboard) rather than streaming to a file.
pub fn csv_string(results: &[QueryResult]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_csv(results, &mut buf)?;
    // The writer only ever receives valid UTF-8.
    Ok(String::from_utf8(buf).unwrap_or_default())
}

/// One CSV field plus its quoting policy.
#[derive(Clone)]
struct Field<'a> {
    value: &'a str,
    always_quote: bool,
}

impl<'a> Field<'a> {
    fn plain(value: &'a str) -> Self {
        Field { value, always_quote: false }
    }

    /// Unconditionally quote-wrapped, guarding against embedded separators.
    fn quoted(value: &'a str) -> Self {
        Field { value, always_quote: true }
    }
}

fn write_row<W: Write>(writer: &mut W, fields: &[Field<'_>]) -> Result<(), ExportError> {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        push_escaped(&mut line, field);
    }
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .map_err(|e| ExportError::Io { source: e })
}

/// Escapes one field: embedded double quotes are doubled, and the field is
/// quote-wrapped when forced or when it contains a quote, comma, or line
/// break. Anything else passes through verbatim.
fn push_escaped(out: &mut String, field: &Field<'_>) {
    let needs_quotes = field.always_quote
        || field
            .value
            .chars()
            .any(|c| matches!(c, '"' | ',' | '\n' | '\r'));

    if needs_quotes {
        out.push('"');
        for c in field.value.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field.value);
    }
}

// =============================================================================
// Raw JSON export
// =============================================================================

/// Serialises the untouched result set as indented JSON text.
///
/// Used for the downloadable file, the inline raw view, and the clipboard
/// copy; all three receive byte-identical text. Serialising the raw parsed
/// value (not the typed model) keeps unknown service fields intact.
pub fn raw_json(set: &ResultSet) -> Result<String, ExportError> {
    serde_json::to_string_pretty(set.raw()).map_err(|e| ExportError::Json { source: e })
}

// =============================================================================
// Export filenames
// =============================================================================

/// Export filename: `ctsl_<ISO-8601 timestamp, seconds precision>.<ext>`.
pub fn export_filename(extension: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        EXPORT_FILE_PREFIX,
        now.format(EXPORT_TIMESTAMP_FORMAT),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Match;
    use chrono::TimeZone;

    fn benzene_result() -> QueryResult {
        QueryResult {
            query: "C1=CC=CC=C1".to_string(),
            query_type: "smiles".to_string(),
            found_match: true,
            match_level: Some("Exact".to_string()),
            matches: vec![Match {
                identifier: Some("241".to_string()),
                inchikey: Some("UHOVQNZJYSORNB-UHFFFAOYSA-N".to_string()),
                smiles: Some("c1ccccc1".to_string()),
                compound_name: Some("Benzene".to_string()),
                molecular_formula: Some("C6H6".to_string()),
                monoisotopic_mass: Some(78.047),
                pubmed_count: Some(120),
                patent_count: Some(5),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_csv_body_row_layout() {
        let text = csv_string(&[benzene_result()]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "query,query_type,found_match,match_level,error_message,pubchem_cid,\
             inchikey,first_block,inchi,smiles,compound_name,molecular_formula,\
             monoisotopic_mass,pubmed_count,patent_count"
        );
        assert_eq!(
            lines.next().unwrap(),
            "C1=CC=CC=C1,smiles,true,Exact,\"\",241,UHOVQNZJYSORNB-UHFFFAOYSA-N,,\
             \"\",c1ccccc1,\"Benzene\",C6H6,78.047,120,5"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_one_row_per_match() {
        let mut result = benzene_result();
        result.matches.push(Match::default());
        result.matches.push(Match::default());
        let mut buf = Vec::new();
        let rows = export_csv(&[result], &mut buf).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 4); // + header
    }

    #[test]
    fn test_empty_matches_emit_single_row_with_empty_match_columns() {
        let result = QueryResult {
            query: "nope".to_string(),
            query_type: "unidentified".to_string(),
            error_message: Some("no compound found".to_string()),
            ..Default::default()
        };
        let text = csv_string(&[result]).unwrap();
        let body = text.lines().nth(1).unwrap();
        assert_eq!(
            body,
            "nope,unidentified,false,,\"no compound found\",,,,\"\",,\"\",,,,"
        );
    }

    #[test]
    fn test_quote_doubling() {
        let result = QueryResult {
            query: "say \"hi\"".to_string(),
            query_type: "smiles".to_string(),
            ..Default::default()
        };
        let text = csv_string(&[result]).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"say \"\"hi\"\"\","));
    }

    #[test]
    fn test_round_trips_through_standard_csv_reader() {
        // Commas, quotes, and newlines in free-text fields must survive a
        // parse with default quoting rules.
        let result = QueryResult {
            query: "a,b".to_string(),
            query_type: "smiles".to_string(),
            found_match: true,
            error_message: Some("line one\nline \"two\", with comma".to_string()),
            matches: vec![Match {
                compound_name: Some("1,2-dichloro \"benzene\"".to_string()),
                inchi: Some("InChI=1S/C6H4Cl2/c7-5-3-1-2-4-6(5)8/h1-4H".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let text = csv_string(&[result.clone()]).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[0], "a,b");
        assert_eq!(&record[4], "line one\nline \"two\", with comma");
        assert_eq!(&record[8], result.matches[0].inchi.as_deref().unwrap());
        assert_eq!(&record[10], "1,2-dichloro \"benzene\"");
    }

    #[test]
    fn test_raw_json_round_trip() {
        let body = r#"[{"query":"q","query_type":"smiles","found_match":true,
                        "match_level":"Exact","matches":[],"extra_field":[1,2,3]}]"#;
        let set = ResultSet::from_json(body).unwrap();
        let text = raw_json(&set).unwrap();
        assert!(text.starts_with("[\n  {")); // 2-space indentation
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(&reparsed, set.raw());
    }

    #[test]
    fn test_export_filename_pattern() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 14, 5, 9).unwrap();
        assert_eq!(export_filename("csv", now), "ctsl_2026-08-30T14:05:09.csv");
        assert_eq!(export_filename("json", now), "ctsl_2026-08-30T14:05:09.json");
    }
}
