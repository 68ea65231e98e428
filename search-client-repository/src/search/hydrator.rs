//! Hit hydration.
//!
//! The engine wraps every document in metadata. Hydration strips the
//! wrappers, re-serializes the raw `_source` payloads as one JSON array and
//! decodes that array into the caller's destination in a single pass, so
//! either every hit hydrates or none does.

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use search_client_shared::SearchResponse;

use crate::errors::SearchError;

/// A destination that can be populated from a JSON array of documents.
///
/// Implemented for every `DeserializeOwned` type, typically `Vec<T>`.
pub trait Hydrate {
    /// Replace `self` with the value decoded from `payloads`.
    ///
    /// On error `self` is left untouched.
    fn hydrate_from_json(&mut self, payloads: &str) -> Result<(), serde_json::Error>;
}

impl<T: DeserializeOwned> Hydrate for T {
    fn hydrate_from_json(&mut self, payloads: &str) -> Result<(), serde_json::Error> {
        *self = serde_json::from_str(payloads)?;
        Ok(())
    }
}

/// The raw document payloads of `response`, in hit order.
///
/// A found document yields a single payload; error and not-found responses
/// yield none. Hits without `_source` yield `None`.
pub fn payloads(response: &SearchResponse) -> Vec<Option<&RawValue>> {
    match response {
        SearchResponse::Hits(hits) => hits.hits.iter().map(|hit| hit.source.as_deref()).collect(),
        SearchResponse::Document(document) => vec![document.source.as_deref()],
        SearchResponse::NotFound(_) | SearchResponse::Error(_) => Vec::new(),
    }
}

/// Serialize the payloads of `response` as a single JSON array.
pub fn payload_array(response: &SearchResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string(&payloads(response))
}

/// Decode the payloads of `response` into `destination`.
pub fn hydrate_into<D: Hydrate + ?Sized>(
    response: &SearchResponse,
    destination: &mut D,
) -> Result<(), serde_json::Error> {
    let array = payload_array(response)?;
    destination.hydrate_from_json(&array)
}

/// Decode the payloads of `response` into a new `T`.
pub fn hydrate<T: DeserializeOwned>(response: &SearchResponse) -> Result<T, SearchError> {
    let array = payload_array(response)
        .map_err(|e| SearchError::hydration(e.to_string(), response.clone()))?;
    serde_json::from_str(&array).map_err(|e| SearchError::hydration(e.to_string(), response.clone()))
}

/// Finish a request: hydrate `destination` unless the engine reported an
/// error or a miss, in which case the response is returned untouched.
pub(crate) fn complete(
    response: SearchResponse,
    destination: Option<&mut (dyn Hydrate + Send + '_)>,
) -> Result<SearchResponse, SearchError> {
    if !response.has_payloads() {
        return Ok(response);
    }

    if let Some(destination) = destination {
        if let Err(e) = hydrate_into(&response, destination) {
            return Err(SearchError::hydration(e.to_string(), response));
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::decoder::decode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        a: i64,
    }

    fn two_hits() -> SearchResponse {
        decode(
            br#"{"took": 7, "hits": {"hits": [
                {"_index": "i", "_id": "1", "_source": {"a": 1}},
                {"_index": "i", "_id": "2", "_source": {"a": 2}}
            ]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_hydrate_preserves_order() {
        let docs: Vec<Doc> = hydrate(&two_hits()).unwrap();
        assert_eq!(docs, vec![Doc { a: 1 }, Doc { a: 2 }]);
    }

    #[test]
    fn test_payload_array() {
        assert_eq!(payload_array(&two_hits()).unwrap(), r#"[{"a": 1},{"a": 2}]"#);
    }

    #[test]
    fn test_missing_source_is_null() {
        let response = decode(br#"{"hits": {"hits": [{"_id": "1"}]}}"#).unwrap();
        assert_eq!(payload_array(&response).unwrap(), "[null]");

        let docs: Vec<Option<Doc>> = hydrate(&response).unwrap();
        assert_eq!(docs, vec![None]);
    }

    #[test]
    fn test_document_is_single_payload() {
        let response = decode(br#"{"_id": "9", "found": true, "_source": {"a": 9}}"#).unwrap();
        let docs: Vec<Doc> = hydrate(&response).unwrap();
        assert_eq!(docs, vec![Doc { a: 9 }]);
    }

    #[test]
    fn test_type_mismatch_leaves_destination_untouched() {
        let response = decode(
            br#"{"took": 3, "hits": {"hits": [
                {"_source": {"a": 1}},
                {"_source": {"a": "two"}}
            ]}}"#,
        )
        .unwrap();

        let mut destination = vec![Doc { a: 100 }];
        assert!(hydrate_into(&response, &mut destination).is_err());
        assert_eq!(destination, vec![Doc { a: 100 }]);
    }

    #[test]
    fn test_hydrate_error_carries_response() {
        let response = decode(br#"{"took": 4, "hits": {"hits": [{"_source": {"a": "x"}}]}}"#)
            .unwrap();

        let error = hydrate::<Vec<Doc>>(&response).unwrap_err();
        assert!(matches!(error, SearchError::HydrationError { .. }));
        assert_eq!(error.response().and_then(SearchResponse::took), Some(4));
    }

    #[test]
    fn test_complete_skips_not_found() {
        let response = decode(br#"{"_id": "1", "found": false}"#).unwrap();
        let mut destination: Vec<Doc> = vec![Doc { a: 5 }];

        let response = complete(response, Some(&mut destination)).unwrap();
        assert!(response.is_not_found());
        assert_eq!(destination, vec![Doc { a: 5 }]);
    }

    #[test]
    fn test_complete_without_destination() {
        let response = complete(two_hits(), None).unwrap();
        assert_eq!(response.hits().len(), 2);
    }
}
