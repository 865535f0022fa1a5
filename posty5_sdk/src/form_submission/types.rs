use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use posty5_core::{Query, QueryPairs};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormStatus {
    New,
    #[serde(rename = "Pending Review")]
    PendingReview,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Need More Info")]
    NeedMoreInfo,
    Approved,
    #[serde(rename = "Partially Approved")]
    PartiallyApproved,
    Rejected,
    Completed,
    Archived,
    Cancelled,
}

impl FormStatus {
    pub const ALL: [FormStatus; 11] = [
        FormStatus::New,
        FormStatus::PendingReview,
        FormStatus::InProgress,
        FormStatus::OnHold,
        FormStatus::NeedMoreInfo,
        FormStatus::Approved,
        FormStatus::PartiallyApproved,
        FormStatus::Rejected,
        FormStatus::Completed,
        FormStatus::Archived,
        FormStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::New => "New",
            FormStatus::PendingReview => "Pending Review",
            FormStatus::InProgress => "In Progress",
            FormStatus::OnHold => "On Hold",
            FormStatus::NeedMoreInfo => "Need More Info",
            FormStatus::Approved => "Approved",
            FormStatus::PartiallyApproved => "Partially Approved",
            FormStatus::Rejected => "Rejected",
            FormStatus::Completed => "Completed",
            FormStatus::Archived => "Archived",
            FormStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormStatus {
    type Err = String;

    /// Accepts the wire spelling or a compact form (`pending-review`, `on_hold`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        FormStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().replace(' ', "").to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown form status: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: FormStatus,
    pub rejected_reason: Option<String>,
    pub notes: Option<String>,
    pub changed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncingStatus {
    #[serde(default)]
    pub is_done: bool,
    pub last_error: Option<String>,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub html_hosting_id: String,
    #[serde(default)]
    pub form_id: String,
    pub visitor_id: Option<String>,
    #[serde(default)]
    pub numbering: String,
    /// Submitted values keyed by form field name.
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub fields: Vec<String>,
    pub status: FormStatus,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    pub syncing: Option<SyncingStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub numbering: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NextPrevious {
    pub previous: Option<SubmissionRef>,
    pub next: Option<SubmissionRef>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub status: FormStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ChangeStatusRequest {
    pub fn new(status: FormStatus) -> Self {
        Self {
            status,
            rejected_reason: None,
            notes: None,
        }
    }

    pub fn with_rejected_reason(mut self, reason: &str) -> Self {
        self.rejected_reason = Some(reason.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusResult {
    pub message: Option<String>,
    #[serde(default)]
    pub status_history: Vec<Value>,
}

/// Filters for listing submissions. A hosted page id is always required.
#[derive(Debug, Clone)]
pub struct FormSubmissionListParams {
    pub html_hosting_id: String,
    pub form_id: Option<String>,
    pub numbering: Option<String>,
    pub status: Option<FormStatus>,
    pub filtered_fields: Option<String>,
}

impl FormSubmissionListParams {
    pub fn new(html_hosting_id: &str) -> Self {
        Self {
            html_hosting_id: html_hosting_id.to_string(),
            form_id: None,
            numbering: None,
            status: None,
            filtered_fields: None,
        }
    }

    pub fn with_form_id(mut self, form_id: &str) -> Self {
        self.form_id = Some(form_id.to_string());
        self
    }

    pub fn with_status(mut self, status: FormStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Query for FormSubmissionListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push("htmlHostingId", &self.html_hosting_id);
        pairs.push_opt("formId", self.form_id.as_deref());
        pairs.push_opt("numbering", self.numbering.as_deref());
        pairs.push_opt("status", self.status);
        pairs.push_opt("filtredFields", self.filtered_fields.as_deref());
        pairs.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_wire_names() {
        for status in FormStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn status_parses_loose_spellings() {
        assert_eq!("Pending Review".parse::<FormStatus>(), Ok(FormStatus::PendingReview));
        assert_eq!("need-more-info".parse::<FormStatus>(), Ok(FormStatus::NeedMoreInfo));
        assert_eq!("cancelled".parse::<FormStatus>(), Ok(FormStatus::Cancelled));
        assert!("lost".parse::<FormStatus>().is_err());
    }

    #[test]
    fn list_params_always_carry_page_id() {
        let pairs = FormSubmissionListParams::new("page-1")
            .with_status(FormStatus::OnHold)
            .query_pairs();
        assert_eq!(pairs[0], ("htmlHostingId".to_string(), "page-1".to_string()));
        assert_eq!(pairs[1], ("status".to_string(), "On Hold".to_string()));
    }
}
