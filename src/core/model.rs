// ctsl-report - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types mirror the CTS-Lite matching service's JSON response
// shape and are the shared vocabulary across render and export.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

// =============================================================================
// Result Set (one matching request)
// =============================================================================

/// The complete response of one matching request: an ordered sequence of
/// [`QueryResult`], one per submitted sub-query, plus the original parsed
/// JSON value.
///
/// The raw value is kept alongside the typed results so the raw export can
/// re-serialise the service's response without losing fields this crate
/// does not model. Both views are read-only after construction.
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Typed results in the original query order.
    pub results: Vec<QueryResult>,

    /// The untouched parsed JSON array, as received from the service.
    raw: serde_json::Value,
}

impl ResultSet {
    /// Parses a matching-service response body.
    ///
    /// Returns [`InputError::EmptyQuery`] for blank input and
    /// [`InputError::Json`] when the body is not a valid result array.
    ///
    /// [`InputError::EmptyQuery`]: crate::util::error::InputError::EmptyQuery
    /// [`InputError::Json`]: crate::util::error::InputError::Json
    pub fn from_json(body: &str) -> crate::util::error::Result<Self> {
        use crate::util::error::InputError;

        if body.trim().is_empty() {
            return Err(InputError::EmptyQuery.into());
        }

        let raw: serde_json::Value =
            serde_json::from_str(body).map_err(|e| InputError::Json { source: e })?;
        let results: Vec<QueryResult> =
            serde_json::from_value(raw.clone()).map_err(|e| InputError::Json { source: e })?;

        tracing::debug!(results = results.len(), "Parsed result set");
        Ok(Self { results, raw })
    }

    /// The untouched parsed response, for lossless re-serialisation.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Number of sub-queries in the set.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when the service returned no results at all.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// =============================================================================
// Query Result (one sub-query's outcome)
// =============================================================================

/// One sub-query's outcome, including zero or more candidate matches.
///
/// `found_match` and `matches` are independent signals from the service:
/// a result may carry candidate matches without any being authoritative.
/// Consumers must branch on `matches.is_empty()`, never infer it from
/// `found_match`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Original query text, verbatim. May contain arbitrary characters.
    #[serde(default)]
    pub query: String,

    /// Raw query-type tag from the service (`inchikey`, `smiles`, `inchi`,
    /// `bad_inchi`, `bad_inchikey`, `unidentified`, or anything newer).
    #[serde(default)]
    pub query_type: String,

    /// True iff at least one match is authoritative.
    #[serde(default)]
    pub found_match: bool,

    /// Free-text strength-of-match indicator ("Exact", "First Block", ...).
    /// Present only when a match was found; never an enumerated tag.
    #[serde(default, deserialize_with = "opt_string")]
    pub match_level: Option<String>,

    /// Failure detail when the sub-query produced no usable result.
    #[serde(default, deserialize_with = "opt_string")]
    pub error_message: Option<String>,

    /// Candidate compound records, in service order. Possibly empty.
    #[serde(default)]
    pub matches: Vec<Match>,
}

// =============================================================================
// Match (one candidate compound)
// =============================================================================

/// One candidate compound record returned for a query.
///
/// Every field is optional: upstream data quality varies per query type,
/// and the service sends `null`, `""`, or omits fields interchangeably.
/// All three deserialise uniformly to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Match {
    /// External database id (a PubChem CID).
    #[serde(default, deserialize_with = "opt_string")]
    pub identifier: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub inchikey: Option<String>,

    /// Leading segment of the InChIKey, used for partial-identifier matches.
    #[serde(default, deserialize_with = "opt_string")]
    pub first_block: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub inchi: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub smiles: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub compound_name: Option<String>,

    #[serde(default, deserialize_with = "opt_string")]
    pub molecular_formula: Option<String>,

    /// The service historically serialised the numeric columns as strings;
    /// both JSON numbers and numeric strings are accepted.
    #[serde(default, deserialize_with = "opt_f64")]
    pub monoisotopic_mass: Option<f64>,

    #[serde(default, deserialize_with = "opt_u64")]
    pub pubmed_count: Option<u64>,

    #[serde(default, deserialize_with = "opt_u64")]
    pub patent_count: Option<u64>,
}

// =============================================================================
// Lenient field deserialisers
// =============================================================================

/// `null`, missing, and `""` all mean "no value".
fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Accepts a JSON number, a numeric string, `""`, or `null`.
/// Unparseable text degrades to `None` rather than failing the whole set.
fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    opt_number(d)
}

fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    Ok(opt_number(d)?.and_then(|n| {
        if n >= 0.0 && n.fract() == 0.0 {
            Some(n as u64)
        } else {
            None
        }
    }))
}

fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    match Option::<Raw>::deserialize(d)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                match trimmed.parse::<f64>() {
                    Ok(n) => Ok(Some(n)),
                    Err(_) => {
                        tracing::warn!(value = %s, "Unparseable numeric field; treating as absent");
                        Ok(None)
                    }
                }
            }
        }
        // A structurally wrong value (bool, object, ...) degrades the same
        // way: one bad field must never sink the whole result set.
        Some(Raw::Other(v)) => {
            tracing::warn!(value = %v, "Non-numeric value in numeric field; treating as absent");
            Ok(None)
        }
    }
}
