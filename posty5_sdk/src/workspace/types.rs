use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs, UploadMetadata, UploadTarget};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl WorkspaceRequest {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_ref_id(mut self, ref_id: &str) -> Self {
        self.ref_id = Some(ref_id.to_string());
        self
    }
}

/// List entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Connected social accounts. Each platform entry is whatever the API
/// reports for it; `None` means not connected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceAccount {
    pub youtube: Option<Value>,
    pub facebook: Option<Value>,
    pub instagram: Option<Value>,
    pub tiktok: Option<Value>,
    pub facebook_platform_page_id: Option<String>,
    pub instagram_platform_account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub account: WorkspaceAccount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadImageConfig {
    pub upload_url: String,
    pub image_url: Option<String>,
}

/// Result of the create/update call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WorkspaceWrite {
    pub workspace_id: String,
    #[serde(default)]
    pub upload_image_config: Option<UploadImageConfig>,
}

impl UploadMetadata for WorkspaceWrite {
    fn resource_id(&self) -> &str {
        &self.workspace_id
    }

    fn upload_target(&self) -> Option<UploadTarget> {
        self.upload_image_config
            .as_ref()
            .map(|config| UploadTarget::put(config.upload_url.clone()))
    }

    fn public_url(&self) -> Option<String> {
        self.upload_image_config
            .as_ref()
            .and_then(|config| config.image_url.clone())
    }
}

/// A created or updated workspace, with the public logo URL when one was uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkspace {
    pub workspace_id: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceListParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub api_key_id: Option<String>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
}

impl WorkspaceListParams {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }
}

impl Query for WorkspaceListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("name", self.name.as_deref());
        pairs.push_opt("description", self.description.as_deref());
        pairs.push_opt("userId", self.user_id.as_deref());
        pairs.push_opt("apiKeyId", self.api_key_id.as_deref());
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        pairs.into_inner()
    }
}
