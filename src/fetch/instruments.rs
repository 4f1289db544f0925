use serde::Deserialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::fetch::client::JsonFetch;

/// A tradeable security resolved from an ISIN search match.
#[derive(Debug, Clone)]
pub struct Instrument {
    pub isin: String,
    /// Opaque upstream identifier used in downstream URLs.
    pub id: String,
    /// Upstream `entityType` discriminator, e.g. `DERIVATIVE`.
    pub kind: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    list: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    isin: String,
    #[serde(rename = "entityValue")]
    entity_value: String,
    #[serde(rename = "entityType")]
    entity_type: String,
}

/// Maps an ISIN to an upstream instrument id and kind via the search endpoint.
pub struct InstrumentResolver<'a> {
    fetcher: &'a dyn JsonFetch,
    config: &'a ApiConfig,
}

impl<'a> InstrumentResolver<'a> {
    pub fn new(fetcher: &'a dyn JsonFetch, config: &'a ApiConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn search(&self, isin: &str) -> Result<Instrument> {
        let url = self.config.search_url(isin);
        let payload = self.fetcher.fetch_json(&url).await?;
        let instrument = match_instrument(payload, isin)?;
        log::info!(
            "resolved {} to instrument {} ({})",
            isin,
            instrument.id,
            instrument.kind
        );
        Ok(instrument)
    }
}

/// Scan the candidate list for a case-sensitive exact ISIN match. Candidates
/// that do not carry the expected fields are skipped.
fn match_instrument(payload: Value, isin: &str) -> Result<Instrument> {
    let response: SearchResponse = serde_json::from_value(payload)
        .map_err(|e| AppError::MalformedResponse(format!("instrument search: {}", e)))?;

    for entry in response.list {
        let Ok(hit) = serde_json::from_value::<SearchHit>(entry) else {
            continue;
        };
        if hit.isin == isin {
            return Ok(Instrument {
                isin: hit.isin,
                id: hit.entity_value,
                kind: hit.entity_type,
            });
        }
    }

    Err(AppError::InstrumentNotFound {
        isin: isin.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_payload() -> Value {
        json!({
            "list": [
                {"isin": "DE0001", "entityValue": "123", "entityType": "DERIVATIVE"},
                {"isin": "DE0002", "entityValue": "456", "entityType": "STOCK"}
            ]
        })
    }

    #[test]
    fn picks_the_exact_isin_match() {
        let instrument = match_instrument(search_payload(), "DE0002").unwrap();
        assert_eq!(instrument.id, "456");
        assert_eq!(instrument.kind, "STOCK");
    }

    #[test]
    fn match_is_case_sensitive() {
        let err = match_instrument(search_payload(), "de0001").unwrap_err();
        assert!(matches!(err, AppError::InstrumentNotFound { .. }));
    }

    #[test]
    fn no_candidate_matches() {
        let err = match_instrument(search_payload(), "US9999").unwrap_err();
        assert!(matches!(err, AppError::InstrumentNotFound { ref isin } if isin == "US9999"));
    }

    #[test]
    fn skips_candidates_with_missing_fields() {
        let payload = json!({
            "list": [
                {"entityValue": "999"},
                {"isin": "DE0001", "entityValue": "123", "entityType": "DERIVATIVE"}
            ]
        });
        let instrument = match_instrument(payload, "DE0001").unwrap();
        assert_eq!(instrument.id, "123");
    }

    #[test]
    fn empty_list_is_not_found() {
        let err = match_instrument(json!({"list": []}), "DE0001").unwrap_err();
        assert!(matches!(err, AppError::InstrumentNotFound { .. }));
    }

    #[test]
    fn non_object_payload_is_malformed() {
        let err = match_instrument(json!([1, 2, 3]), "DE0001").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
