use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use posty5_core::{FilePayload, Query, QueryPairs, UploadMetadata, UploadTarget};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::CREATED_FROM;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeConfig {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made_for_kids: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_audio_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localization_languages: Option<Vec<String>>,
}

/// TikTok settings. Field names are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TikTokConfig {
    pub caption: String,
    pub disable_duet: bool,
    pub disable_stitch: bool,
    pub disable_comment: bool,
    pub privacy_level: String,
}

impl TikTokConfig {
    /// Public post with duet, stitch and comments enabled.
    pub fn public(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            disable_duet: false,
            disable_stitch: false,
            disable_comment: false,
            privacy_level: "PUBLIC_TO_EVERYONE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookPageConfig {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Instagram settings. Field names are snake_case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstagramConfig {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_to_feed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published_to_both_feed_and_story: Option<bool>,
}

/// A destination platform together with its settings. A platform is enabled
/// exactly when it appears in [`TaskSettings::platforms`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    YouTube(YouTubeConfig),
    TikTok(TikTokConfig),
    FacebookPage(FacebookPageConfig),
    Instagram(InstagramConfig),
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::YouTube(_) => "YouTube",
            Platform::TikTok(_) => "TikTok",
            Platform::FacebookPage(_) => "Facebook page",
            Platform::Instagram(_) => "Instagram",
        }
    }
}

/// When the task runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Now,
    At(DateTime<Utc>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleBody {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scheduled_at: Option<DateTime<Utc>>,
}

impl From<Schedule> for ScheduleBody {
    fn from(schedule: Schedule) -> Self {
        match schedule {
            Schedule::Now => ScheduleBody {
                kind: "now",
                scheduled_at: None,
            },
            Schedule::At(at) => ScheduleBody {
                kind: "schedule",
                scheduled_at: Some(at),
            },
        }
    }
}

/// Everything about a task except its video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSettings {
    pub workspace_id: String,
    pub platforms: Vec<Platform>,
    pub schedule: Option<Schedule>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
}

impl TaskSettings {
    pub fn new(workspace_id: &str) -> Self {
        Self {
            workspace_id: workspace_id.to_string(),
            platforms: Vec::new(),
            schedule: None,
            tag: None,
            ref_id: None,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
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
}

/// Where the video comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Uploaded from local bytes.
    File(FilePayload),
    /// A direct link to a video file.
    Url(String),
    /// Repost of a Facebook reel or video.
    Facebook(String),
    /// Repost of a TikTok video.
    TikTok(String),
    /// Repost of a YouTube Short.
    YouTube(String),
}

impl VideoSource {
    /// Value of the task's `source` field.
    pub fn source_tag(&self) -> &'static str {
        match self {
            VideoSource::File(_) => "video-file",
            VideoSource::Url(_) => "video-url",
            VideoSource::Facebook(_) => "facebook-video",
            VideoSource::TikTok(_) => "tiktok-video",
            VideoSource::YouTube(_) => "youtube-video",
        }
    }
}

/// Body of the task creation call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskBody<'a> {
    workspace_id: &'a str,
    source: &'static str,
    #[serde(rename = "isAllowYouTube")]
    is_allow_youtube: bool,
    is_allow_tiktok: bool,
    is_allow_facebook_page: bool,
    is_allow_instagram: bool,
    #[serde(rename = "youTube", skip_serializing_if = "Option::is_none")]
    youtube: Option<&'a YouTubeConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tiktok: Option<&'a TikTokConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facebook: Option<&'a FacebookPageConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instagram: Option<&'a InstagramConfig>,
    #[serde(rename = "videoURL", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(rename = "thumbURL", skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(rename = "postURL", skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<ScheduleBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ref_id: Option<&'a str>,
    created_from: &'static str,
}

impl<'a> TaskBody<'a> {
    pub(crate) fn new(settings: &'a TaskSettings, source: &'static str) -> Self {
        let mut body = TaskBody {
            workspace_id: &settings.workspace_id,
            source,
            is_allow_youtube: false,
            is_allow_tiktok: false,
            is_allow_facebook_page: false,
            is_allow_instagram: false,
            youtube: None,
            tiktok: None,
            facebook: None,
            instagram: None,
            video_url: None,
            thumb_url: None,
            post_url: None,
            schedule: settings.schedule.map(ScheduleBody::from),
            tag: settings.tag.as_deref(),
            ref_id: settings.ref_id.as_deref(),
            created_from: CREATED_FROM,
        };
        for platform in &settings.platforms {
            match platform {
                Platform::YouTube(config) => {
                    body.is_allow_youtube = true;
                    body.youtube = Some(config);
                }
                Platform::TikTok(config) => {
                    body.is_allow_tiktok = true;
                    body.tiktok = Some(config);
                }
                Platform::FacebookPage(config) => {
                    body.is_allow_facebook_page = true;
                    body.facebook = Some(config);
                }
                Platform::Instagram(config) => {
                    body.is_allow_instagram = true;
                    body.instagram = Some(config);
                }
            }
        }
        body
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateUploadUrlsRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_file_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_file_type: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FormTarget {
    pub url: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl FormTarget {
    fn to_target(&self) -> UploadTarget {
        UploadTarget::form(self.url.clone(), self.fields.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Organization {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Pre-signed storage targets for one task's files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeneratedUploadUrls {
    pub upload_video: Option<FormTarget>,
    pub upload_thumb: Option<FormTarget>,
    // "Uplaod" is the API's spelling.
    #[serde(rename = "videoUplaodFileURL", alias = "videoUploadFileURL")]
    pub video_file_url: Option<String>,
    #[serde(rename = "thumbUploadFileURL")]
    pub thumb_file_url: Option<String>,
    pub organization: Option<Organization>,
    pub task_id: Option<String>,
}

impl GeneratedUploadUrls {
    fn owner(&self) -> &str {
        self.organization
            .as_ref()
            .map(|o| o.id.as_str())
            .or(self.task_id.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn thumb_target(&self) -> Option<UploadTarget> {
        self.upload_thumb.as_ref().map(FormTarget::to_target)
    }

    pub(crate) fn organization_id(&self) -> Option<&str> {
        self.organization.as_ref().map(|o| o.id.as_str())
    }
}

/// The generated URLs, read as a video transfer.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct VideoUpload(pub GeneratedUploadUrls);

impl UploadMetadata for VideoUpload {
    fn resource_id(&self) -> &str {
        self.0.owner()
    }

    fn upload_target(&self) -> Option<UploadTarget> {
        self.0.upload_video.as_ref().map(FormTarget::to_target)
    }

    fn public_url(&self) -> Option<String> {
        self.0.video_file_url.clone()
    }
}

/// The generated URLs, read as a thumbnail transfer.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub(crate) struct ThumbUpload(pub GeneratedUploadUrls);

impl UploadMetadata for ThumbUpload {
    fn resource_id(&self) -> &str {
        self.0.owner()
    }

    fn upload_target(&self) -> Option<UploadTarget> {
        self.0.thumb_target()
    }

    fn public_url(&self) -> Option<String> {
        self.0.thumb_file_url.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    Processing,
    ProcessingInPlatform,
    FailedByPlatform,
    Done,
    Error,
    Canceled,
    NeedsMaintenance,
    #[serde(rename = "invalidVideoURL")]
    InvalidVideoUrl,
    #[serde(rename = "invalidPostVideoURL")]
    InvalidPostVideoUrl,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::ProcessingInPlatform => "processingInPlatform",
            TaskStatus::FailedByPlatform => "failedByPlatform",
            TaskStatus::Done => "done",
            TaskStatus::Error => "error",
            TaskStatus::Canceled => "canceled",
            TaskStatus::NeedsMaintenance => "needsMaintenance",
            TaskStatus::InvalidVideoUrl => "invalidVideoURL",
            TaskStatus::InvalidPostVideoUrl => "invalidPostVideoURL",
            TaskStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub numbering: String,
    pub caption: Option<String>,
    pub current_status: Option<TaskStatus>,
    pub workspace_name: Option<String>,
    #[serde(default)]
    pub is_allow_youtube_channel: bool,
    #[serde(default)]
    pub is_allow_facebook_page: bool,
    #[serde(default)]
    pub is_allow_instagram_account: bool,
    #[serde(default)]
    pub is_allow_tiktok_account: bool,
    pub schedule_type: Option<String>,
    pub schedule_scheduled_at: Option<DateTime<Utc>>,
    pub schedule_executed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceUrls {
    #[serde(rename = "thumbURL")]
    pub thumb_url: Option<String>,
    #[serde(rename = "videoURL")]
    pub video_url: Option<String>,
    #[serde(rename = "postURL")]
    pub post_url: Option<String>,
}

/// Full progress report for one task. Per-platform sections are passed
/// through as the API reports them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusDetails {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub numbering: String,
    pub source: Option<String>,
    #[serde(rename = "sourceURLs", default)]
    pub source_urls: SourceUrls,
    pub current_status: Option<TaskStatus>,
    pub current_error: Option<String>,
    pub current_status_changed_at: Option<DateTime<Utc>>,
    pub youtube_channel: Option<Value>,
    pub tiktok_account: Option<Value>,
    pub facebook_page: Option<Value>,
    pub instagram_account: Option<Value>,
    pub workspace: Option<Value>,
    pub schedule: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNextPrevious {
    pub next_id: Option<String>,
    pub previous_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskListParams {
    pub workspace_id: Option<String>,
    pub current_status: Option<TaskStatus>,
    pub tag: Option<String>,
    pub ref_id: Option<String>,
    /// Any other filter the API accepts, passed through verbatim.
    pub extra: Vec<(String, String)>,
}

impl TaskListParams {
    pub fn with_workspace_id(mut self, workspace_id: &str) -> Self {
        self.workspace_id = Some(workspace_id.to_string());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.current_status = Some(status);
        self
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.extra.push((key.to_string(), value.to_string()));
        self
    }
}

impl Query for TaskListParams {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = QueryPairs::default();
        pairs.push_opt("workspaceId", self.workspace_id.as_deref());
        pairs.push_opt("currentStatus", self.current_status);
        pairs.push_opt("tag", self.tag.as_deref());
        pairs.push_opt("refId", self.ref_id.as_deref());
        let mut pairs = pairs.into_inner();
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}
