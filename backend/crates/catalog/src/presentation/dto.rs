//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Body of `DELETE /{resource}/multiple`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteManyRequest {
    pub slugs: Option<Vec<serde_json::Value>>,
}

impl DeleteManyRequest {
    /// Non-string entries are kept in text form so they fail the
    /// existence check under their own index
    pub fn into_slugs(self) -> Option<Vec<String>> {
        self.slugs.map(|values| {
            values
                .into_iter()
                .map(|value| match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect()
        })
    }
}

/// `{data}` envelope of single resources and the active list
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
