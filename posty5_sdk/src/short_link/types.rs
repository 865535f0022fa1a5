use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs};
use serde::{Deserialize, Serialize};

use crate::common::{PageInfo, PreviewStatus};

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShortLinkRequest {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_landing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable_monetization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl CreateShortLinkRequest {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_ref_id(mut self, ref_id: &str) -> Self {
        self.ref_id = Some(ref_id.to_string());
        self
    }

    pub fn with_template_id(mut self, template_id: &str) -> Self {
        self.template_id = Some(template_id.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShortLinkRequest {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable_landing_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enable_monetization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

/// A short link as returned by list, get, create and update.
///
/// `get` fills in the extra detail fields (`android_url`, `ios_url`,
/// `template_type`); they stay `None` elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub shorter_link: String,
    #[serde(default)]
    pub short_link_id: String,
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub status: Option<PreviewStatus>,
    pub ref_id: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub number_of_visitors: u64,
    pub number_of_reports: Option<u64>,
    pub last_visitor_date: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub template_id: Option<String>,
    pub qr_code_template_name: Option<String>,
    pub is_enable_landing_page: Option<bool>,
    pub is_enable_monetization: Option<bool>,
    pub page_info: Option<PageInfo>,
    #[serde(rename = "qrCodeLandingPageURL")]
    pub qr_code_landing_page_url: Option<String>,
    #[serde(rename = "qrCodeDownloadURL")]
    pub qr_code_download_url: Option<String>,
    pub android_url: Option<String>,
    pub ios_url: Option<String>,
    pub template_type: Option<String>,
}

/// Filters for [`crate::ShortLinkClient::list`].
#[derive(Debug, Clone, Default)]
pub struct ShortLinkListParams {
    pub base_url: Option<String>,
    pub name: Option<String>,
    pub page_title: Option<String>,
    pub short_link_id: Option<String>,
    pub ref_id: Option<String>,
    pub tag: Option<String>,
    pub template_id: Option<String>,
    pub status: Option<PreviewStatus>,
    pub created_from: Option<String>,
    pub is_enable_monetization: Option<bool>,
}

impl ShortLinkListParams {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_page_title(mut self, title: &str) -> Self {
        self.page_title = Some(title.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_ref_id(mut self, ref_id: &str) -> Self {
        self.ref_id = Some(ref_id.to_string());
        self
    }

    pub fn with_status(mut self, status: PreviewStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Query for ShortLinkListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("baseUrl", self.base_url.as_deref());
        pairs.push_opt("name", self.name.as_deref());
        pairs.push_opt("pageinfo.title", self.page_title.as_deref());
        pairs.push_opt("shortLinkId", self.short_link_id.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("templateId", self.template_id.as_deref());
        pairs.push_opt("status", self.status);
        pairs.push_opt("createdFrom", self.created_from.as_deref());
        pairs.push_opt("isEnableMonetization", self.is_enable_monetization);
        pairs.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_use_wire_names() {
        let pairs = ShortLinkListParams::default()
            .with_page_title("Spring")
            .with_status(PreviewStatus::Approved)
            .query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("pageinfo.title".to_string(), "Spring".to_string()),
                ("status".to_string(), "approved".to_string()),
            ]
        );
    }

    #[test]
    fn empty_params_send_nothing() {
        assert!(ShortLinkListParams::default().query_pairs().is_empty());
    }
}
