//! Types shared by several resources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin tag the API records for records created through this SDK.
pub(crate) const CREATED_FROM: &str = "rustPackage";

/// A request body with the SDK's origin tag appended.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WithOrigin<'a, T> {
    #[serde(flatten)]
    pub inner: &'a T,
    pub created_from: &'static str,
}

impl<'a, T> WithOrigin<'a, T> {
    pub(crate) fn new(inner: &'a T) -> Self {
        Self {
            inner,
            created_from: CREATED_FROM,
        }
    }
}

/// Moderation state shared by short links, QR codes and hosted pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewStatus {
    New,
    Pending,
    Rejected,
    Approved,
    FileIsNotFound,
    #[serde(other)]
    Unknown,
}

impl PreviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewStatus::New => "new",
            PreviewStatus::Pending => "pending",
            PreviewStatus::Rejected => "rejected",
            PreviewStatus::Approved => "approved",
            PreviewStatus::FileIsNotFound => "fileIsNotFound",
            PreviewStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PreviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Landing page title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_is_html_file: Option<bool>,
}

/// `{ _id, name }` pair returned by lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}
