use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRequest {
    pub name: String,
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl VariableRequest {
    pub fn new(name: &str, key: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct VariableListParams {
    pub name: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub api_key_id: Option<String>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
}

impl VariableListParams {
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl Query for VariableListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("name", self.name.as_deref());
        pairs.push_opt("key", self.key.as_deref());
        pairs.push_opt("value", self.value.as_deref());
        pairs.push_opt("apiKeyId", self.api_key_id.as_deref());
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        pairs.into_inner()
    }
}
