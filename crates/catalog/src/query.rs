//! Request and response bodies of the gallery extension-query endpoint.

use crate::consts::{filter, flags};
use crate::models::Extension;
use serde::{Deserialize, Serialize};

/// JSON body POSTed to the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub filters: Vec<Filter>,
    /// Facet bitmask, see [`consts::flags`](crate::consts::flags).
    pub flags: u32,
}
impl QueryRequest {
    /// Builds the structured query for extensions whose identifier matches
    /// `name`, scoped to the given installation target.
    pub fn by_name(name: impl Into<String>, target: impl Into<String>, flags: u32) -> Self {
        Self {
            filters: vec![Filter {
                criteria: vec![
                    Criterion { filter_type: filter::EXTENSION_NAME, value: name.into() },
                    Criterion { filter_type: filter::INSTALLATION_TARGET, value: target.into() },
                ],
            }],
            flags,
        }
    }

    /// The extension name this request queries for, if any. Used by the mock
    /// transport to key canned responses.
    pub fn queried_name(&self) -> Option<&str> {
        self.filters
            .iter()
            .flat_map(|f| f.criteria.iter())
            .find(|c| c.filter_type == filter::EXTENSION_NAME)
            .map(|c| c.value.as_str())
    }
}
impl Default for QueryRequest {
    fn default() -> Self {
        Self { filters: Vec::new(), flags: flags::DEFAULT }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub filter_type: u32,
    pub value: String,
}

/// Top-level response body of the query endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<ResultSet>,
}
impl QueryResponse {
    /// The first matched extension across all result sets, consuming the
    /// response. The gallery orders matches by relevance; the first one is
    /// the resolution the pipeline uses.
    pub fn into_first_extension(self) -> Option<Extension> {
        self.results.into_iter().flat_map(|set| set.extensions).next()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TARGET_VSCODE, flags};
    use serde_json::json;

    #[test]
    fn test_query_body_wire_shape() {
        let request = QueryRequest::by_name("ms-python.python", TARGET_VSCODE, flags::DEFAULT);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "filters": [{
                    "criteria": [
                        { "filterType": 7, "value": "ms-python.python" },
                        { "filterType": 8, "value": "Microsoft.VisualStudio.Code" },
                    ],
                }],
                "flags": 0x1FF,
            })
        );
    }

    #[test]
    fn test_default_flags_request_required_facets() {
        assert_ne!(flags::DEFAULT & flags::INCLUDE_VERSIONS, 0);
        assert_ne!(flags::DEFAULT & flags::INCLUDE_FILES, 0);
        assert_ne!(flags::DEFAULT & flags::INCLUDE_STATISTICS, 0);
    }

    #[test]
    fn test_queried_name() {
        let request = QueryRequest::by_name("esbenp.prettier-vscode", TARGET_VSCODE, flags::DEFAULT);
        assert_eq!(request.queried_name(), Some("esbenp.prettier-vscode"));
        assert_eq!(QueryRequest::default().queried_name(), None);
    }

    #[test]
    fn test_response_decodes_with_missing_facets() {
        let response: QueryResponse = serde_json::from_value(json!({
            "results": [{
                "extensions": [{
                    "displayName": "Python",
                    "publisher": { "displayName": "Microsoft" },
                }],
            }],
        }))
        .unwrap();
        let extension = response.into_first_extension().unwrap();
        assert_eq!(extension.display_name, "Python");
        assert!(extension.versions.is_empty());
        assert!(extension.statistics.is_empty());
    }

    #[test]
    fn test_empty_response_has_no_extension() {
        assert_eq!(QueryResponse::default().into_first_extension(), None);
    }
}
