use std::collections::HashSet;
use std::mem::discriminant;
use std::sync::Arc;

use posty5_core::{
    Error, FilePayload, FinalizeMode, HttpClient, MetadataCall, Paginated, Pagination,
    RequestOptions, StorageClient, UploadWorkflow,
};
use serde_json::Value;

use super::types::{
    GenerateUploadUrlsRequest, Task, TaskBody, TaskListParams, TaskNextPrevious, TaskSettings,
    TaskStatusDetails, ThumbUpload, VideoSource, VideoUpload,
};
use crate::validation::{self, invalid, MAX_THUMBNAIL_BYTES, MAX_VIDEO_BYTES};

const BASE_PATH: &str = "/api/social-publisher-task";

pub struct SocialTaskClient {
    http: Arc<HttpClient>,
    storage: StorageClient,
    max_video_bytes: u64,
    max_thumbnail_bytes: u64,
}

impl SocialTaskClient {
    pub fn new(http: Arc<HttpClient>, storage: StorageClient) -> Self {
        Self {
            http,
            storage,
            max_video_bytes: MAX_VIDEO_BYTES,
            max_thumbnail_bytes: MAX_THUMBNAIL_BYTES,
        }
    }

    /// Overrides the client-side size limits for video and thumbnail files.
    pub fn with_limits(mut self, max_video_bytes: u64, max_thumbnail_bytes: u64) -> Self {
        self.max_video_bytes = max_video_bytes;
        self.max_thumbnail_bytes = max_thumbnail_bytes;
        self
    }

    pub async fn list(
        &self,
        params: &TaskListParams,
        pagination: &Pagination,
    ) -> Result<Paginated<Task>, Error> {
        let options = RequestOptions::new().query(params).query(pagination);
        self.http.get(BASE_PATH, options).await?.require_result()
    }

    /// Account-level defaults for new tasks, as the API reports them.
    pub async fn default_settings(&self) -> Result<Value, Error> {
        self.http
            .get(&format!("{}/default-settings", BASE_PATH), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn status(&self, id: &str) -> Result<TaskStatusDetails, Error> {
        self.http
            .get(&format!("{}/{}/status", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    pub async fn next_previous(&self, id: &str) -> Result<TaskNextPrevious, Error> {
        self.http
            .get(&format!("{}/{}/next-previous", BASE_PATH, id), RequestOptions::new())
            .await?
            .require_result()
    }

    /// Publishes a short video to every platform in `settings`.
    ///
    /// Every local check runs before the first request, so a rejected input
    /// never reaches the network. For [`VideoSource::File`] the video and
    /// the optional thumbnail are uploaded first; for the URL sources only
    /// the thumbnail is. Creating the task is the final step and returns the
    /// created task as the API reports it.
    pub async fn publish(
        &self,
        settings: &TaskSettings,
        video: &VideoSource,
        thumbnail: Option<&FilePayload>,
    ) -> Result<Value, Error> {
        self.validate(settings, video, thumbnail)?;

        let mut body = TaskBody::new(settings, video.source_tag());
        let mut organization_id = None;
        match video {
            VideoSource::File(file) => {
                let request = GenerateUploadUrlsRequest {
                    video_file_type: Some(file.content_type()),
                    thumb_file_type: thumbnail.map(FilePayload::content_type),
                };
                let path = format!("{}/generate-uplaod-signd-urls", BASE_PATH);
                let uploaded = self
                    .workflow()
                    .run::<VideoUpload, _>(MetadataCall::create(&path, &request), file)
                    .await?;
                let urls = uploaded.metadata.0;
                body.video_url = uploaded.file_url;
                if let (Some(thumb), Some(target)) = (thumbnail, urls.thumb_target()) {
                    let stored_at = self.storage.transfer(&target, thumb).await?;
                    body.thumb_url = Some(urls.thumb_file_url.clone().unwrap_or(stored_at));
                }
                organization_id = urls.organization_id().map(str::to_string);
            }
            VideoSource::Url(url) => {
                body.video_url = Some(url.clone());
                body.thumb_url = self.upload_thumbnail(thumbnail).await?;
            }
            VideoSource::Facebook(url) | VideoSource::TikTok(url) | VideoSource::YouTube(url) => {
                body.post_url = Some(url.clone());
                body.thumb_url = self.upload_thumbnail(thumbnail).await?;
            }
        }

        let path = match organization_id {
            Some(id) => format!("{}/short-video/{}", BASE_PATH, id),
            None => format!("{}/short-video", BASE_PATH),
        };
        tracing::info!(
            "Creating {} task for workspace {}",
            video.source_tag(),
            settings.workspace_id
        );
        self.http
            .post(&path, &body, RequestOptions::new())
            .await?
            .require_result()
    }

    fn workflow(&self) -> UploadWorkflow<'_> {
        UploadWorkflow::new(&self.http, &self.storage, FinalizeMode::NotApplicable)
    }

    async fn upload_thumbnail(&self, thumbnail: Option<&FilePayload>) -> Result<Option<String>, Error> {
        let Some(thumb) = thumbnail else {
            return Ok(None);
        };
        let request = GenerateUploadUrlsRequest {
            thumb_file_type: Some(thumb.content_type()),
            video_file_type: None,
        };
        let path = format!("{}/generate-uplaod-signd-urls", BASE_PATH);
        let uploaded = self
            .workflow()
            .run::<ThumbUpload, _>(MetadataCall::create(&path, &request), thumb)
            .await?;
        Ok(uploaded.file_url)
    }

    fn validate(
        &self,
        settings: &TaskSettings,
        video: &VideoSource,
        thumbnail: Option<&FilePayload>,
    ) -> Result<(), Error> {
        if settings.workspace_id.trim().is_empty() {
            return Err(invalid("workspaceId", "Workspace id is required".to_string()));
        }
        if settings.platforms.is_empty() {
            return Err(invalid(
                "platforms",
                "At least one platform must be selected".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for platform in &settings.platforms {
            if !seen.insert(discriminant(platform)) {
                return Err(invalid(
                    "platforms",
                    format!("{} is listed more than once", platform.name()),
                ));
            }
        }

        match video {
            VideoSource::File(file) => validation::validate_video_file(file, self.max_video_bytes)?,
            VideoSource::Url(url) => validation::validate_video_url(url)?,
            VideoSource::Facebook(url) => validation::validate_facebook_url(url)?,
            VideoSource::TikTok(url) => validation::validate_tiktok_url(url)?,
            VideoSource::YouTube(url) => validation::validate_youtube_url(url)?,
        }
        if let Some(thumb) = thumbnail {
            validation::validate_thumbnail(thumb, self.max_thumbnail_bytes)?;
        }
        Ok(())
    }
}
