use crate::error::ShrinkError;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
];

/// API Gateway proxy response. `body` carries the JSON-encoded payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ApiResponse {
    fn new(status_code: u16, body: String) -> Self {
        ApiResponse {
            status_code,
            body,
            headers: CORS_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn ok<T: Serialize>(payload: &T) -> Result<Self, ShrinkError> {
        Ok(Self::new(200, serde_json::to_string(payload)?))
    }

    pub fn created<T: Serialize>(payload: &T) -> Result<Self, ShrinkError> {
        Ok(Self::new(201, serde_json::to_string(payload)?))
    }

    pub fn error(message: &str, status_code: u16) -> Self {
        Self::new(status_code, json!({ "message": message }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::response::ApiResponse;
    use serde_json::{json, Value};

    #[test]
    fn test_error_response() {
        let response = ApiResponse::error("Not found", 404);

        assert_eq!(response.status_code, 404);
        assert_eq!(
            serde_json::from_str::<Value>(&response.body).unwrap(),
            json!({"message": "Not found"})
        );
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[test]
    fn test_serialized_shape() {
        let response = ApiResponse::created(&json!({"id": "vol-1"})).unwrap();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], json!(201));
        assert_eq!(value["body"], json!("{\"id\":\"vol-1\"}"));
        assert_eq!(
            value["headers"]["Access-Control-Allow-Headers"],
            json!("Content-Type,Authorization")
        );
    }
}
