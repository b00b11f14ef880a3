use crate::error::ShrinkError;
use crate::model::Record;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// The subset of an API Gateway proxy event the router reads. Both HTTP API (`routeKey`)
/// and REST (`httpMethod` + `path`) shapes are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    #[serde(default)]
    route_key: Option<String>,
    #[serde(default)]
    http_method: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    path_parameters: Option<HashMap<String, String>>,
}

impl ApiRequest {
    pub fn route_key(&self) -> String {
        match &self.route_key {
            Some(route_key) if !route_key.is_empty() => route_key.clone(),
            _ => format!(
                "{} {}",
                self.http_method.as_deref().unwrap_or_default(),
                self.path.as_deref().unwrap_or_default()
            ),
        }
    }

    /// Parses the body as a JSON object; an absent body reads as `{}`.
    pub fn body_record(&self) -> Result<Record, ShrinkError> {
        let body = self.body.as_deref().unwrap_or("{}");
        match serde_json::from_str::<Value>(body)? {
            Value::Object(record) => Ok(record),
            other => Err(ShrinkError::InvalidRecord(other.to_string())),
        }
    }

    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }

    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|parameters| parameters.get(name))
            .map(String::as_str)
    }
}
