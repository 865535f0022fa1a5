use std::fmt;

use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs, UploadMetadata, UploadTarget};
use serde::{Deserialize, Serialize};

use crate::common::PreviewStatus;

/// Where a hosted page's HTML comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    File,
    Github,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceType::File => "file",
            SourceType::Github => "github",
        })
    }
}

/// Settings shared by file and GitHub pages, on create and update.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPageRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_landing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable_monetization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_save_in_google_sheet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
}

impl HtmlPageRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
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

    pub fn with_auto_save_in_google_sheet(mut self, enabled: bool) -> Self {
        self.auto_save_in_google_sheet = Some(enabled);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubInfo {
    #[serde(rename = "fileURL")]
    pub file_url: String,
    #[serde(rename = "finalFileRawURL", skip_serializing_if = "Option::is_none", default)]
    pub final_file_raw_url: Option<String>,
}

impl GithubInfo {
    pub fn new(file_url: &str) -> Self {
        Self {
            file_url: file_url.to_string(),
            final_file_raw_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewReason {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmissionSummary {
    #[serde(rename = "lasFormSubmissionAt")]
    pub last_form_submission_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub number_of_form_submission: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub html_hosting_id: String,
    pub name: Option<String>,
    pub page_path: Option<String>,
    #[serde(default)]
    pub shorter_link: String,
    pub status: Option<PreviewStatus>,
    pub source_type: Option<SourceType>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub github_info: Option<GithubInfo>,
    #[serde(default)]
    pub number_of_visitors: u64,
    pub last_visitor_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user: Option<String>,
    pub is_enable_monetization: Option<bool>,
    pub auto_save_in_google_sheet: Option<bool>,
    #[serde(default)]
    pub is_temp: bool,
    #[serde(default)]
    pub is_cached_in_local_storage: bool,
    #[serde(default)]
    pub preview_reasons: Vec<PreviewReason>,
    pub form_submission: Option<FormSubmissionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadFileConfig {
    pub upload_url: String,
}

/// Result of the create/update metadata call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct HtmlPageWrite {
    // The API spells this key "uplaod".
    #[serde(rename = "uplaodFileConfig", alias = "uploadFileConfig", default)]
    pub upload_file_config: Option<UploadFileConfig>,
    pub details: HtmlPage,
}

impl UploadMetadata for HtmlPageWrite {
    fn resource_id(&self) -> &str {
        &self.details.id
    }

    fn upload_target(&self) -> Option<UploadTarget> {
        self.upload_file_config
            .as_ref()
            .map(|config| UploadTarget::put(config.upload_url.clone()))
    }

    fn public_url(&self) -> Option<String> {
        self.details.file_url.clone()
    }
}

/// A file-backed page after upload and publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedPage {
    pub id: String,
    pub shorter_link: String,
    pub file_url: Option<String>,
}

/// A GitHub-backed page after create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubPage {
    pub id: String,
    pub shorter_link: String,
    pub github_info: Option<GithubInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPageLookup {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub html_hosting_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLookup {
    #[serde(rename = "_id")]
    pub id: String,
    pub form_id: String,
    #[serde(default)]
    pub form_fields: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HtmlPageListParams {
    pub name: Option<String>,
    pub html_hosting_id: Option<String>,
    pub api_key_id: Option<String>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
    pub status: Option<PreviewStatus>,
    pub source_type: Option<SourceType>,
    pub is_enable_monetization: Option<bool>,
    pub auto_save_in_google_sheet: Option<bool>,
    pub is_temp: Option<bool>,
}

impl HtmlPageListParams {
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = Some(source_type);
        self
    }
}

impl Query for HtmlPageListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("name", self.name.as_deref());
        pairs.push_opt("htmlHostingId", self.html_hosting_id.as_deref());
        pairs.push_opt("apiKeyId", self.api_key_id.as_deref());
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        pairs.push_opt("status", self.status);
        pairs.push_opt("sourceType", self.source_type);
        pairs.push_opt("isEnableMonetization", self.is_enable_monetization);
        pairs.push_opt("autoSaveInGoogleSheet", self.auto_save_in_google_sheet);
        pairs.push_opt("isTemp", self.is_temp);
        pairs.into_inner()
    }
}
