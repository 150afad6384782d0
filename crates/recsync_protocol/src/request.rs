//! REST request and response vocabulary.
//!
//! Only request *construction* lives here; execution, authentication, and
//! session handling belong to the transport implementation.

use crate::error::{ProtocolError, ProtocolResult};
use crate::record::RemoteRecord;
use serde_json::Value;

/// A read request against the remote data API.
///
/// All fetch requests are reads; the transport issues them as GETs against
/// its configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    path: String,
    params: Vec<(String, String)>,
}

impl RestRequest {
    /// Builds the full-text-search request for an API version.
    ///
    /// The query text is carried literally; the search mechanism accepts no
    /// structured filter and no page token.
    pub fn for_search(api_version: &str, query: &str) -> Self {
        Self {
            path: format!("/{api_version}/search"),
            params: vec![("q".into(), query.into())],
        }
    }

    /// The request path, without query parameters.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters, in order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Renders the request as a path with an encoded query string.
    pub fn to_path_and_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// The JSON body of a successful transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    body: Value,
}

impl RestResponse {
    /// Wraps an already-parsed JSON body.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Parses raw response bytes as JSON.
    pub fn from_slice(bytes: &[u8]) -> ProtocolResult<Self> {
        let body =
            serde_json::from_slice(bytes).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;
        Ok(Self { body })
    }

    /// The raw JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Interprets the body per the fetch response contract: a JSON array of
    /// record objects.
    pub fn records(&self) -> ProtocolResult<Vec<RemoteRecord>> {
        match &self.body {
            Value::Array(items) => Ok(items.iter().cloned().map(RemoteRecord::new).collect()),
            other => Err(ProtocolError::unexpected_shape(
                "a JSON array of records",
                json_type_name(other),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request_shape() {
        let request = RestRequest::for_search("v1", "FIND {Acme}");
        assert_eq!(request.path(), "/v1/search");
        assert_eq!(request.params(), [("q".to_string(), "FIND {Acme}".to_string())]);
    }

    #[test]
    fn path_and_query_is_encoded() {
        let request = RestRequest::for_search("v1", "FIND {Acme & Co}");
        assert_eq!(
            request.to_path_and_query(),
            "/v1/search?q=FIND%20%7BAcme%20%26%20Co%7D"
        );
    }

    #[test]
    fn records_from_array() {
        let response = RestResponse::new(json!([{"id": "001"}, {"id": "002"}]));
        let records = response.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("id"), Some(&json!("001")));
    }

    #[test]
    fn empty_array_is_zero_records() {
        let response = RestResponse::new(json!([]));
        assert!(response.records().unwrap().is_empty());
    }

    #[test]
    fn non_array_body_is_rejected() {
        let response = RestResponse::new(json!({"records": []}));
        let err = response.records().unwrap_err();
        assert!(matches!(err, ProtocolError::UnexpectedShape { got, .. } if got == "object"));
    }

    #[test]
    fn from_slice_parses_json() {
        let response = RestResponse::from_slice(b"[{\"id\":\"001\"}]").unwrap();
        assert_eq!(response.records().unwrap().len(), 1);

        let err = RestResponse::from_slice(b"not json").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidJson(_)));
    }
}
