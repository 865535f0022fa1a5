use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use posty5_sdk::social_task::{
    FacebookPageConfig, InstagramConfig, Platform, Schedule, TaskListParams, TaskSettings,
    TaskStatus, TikTokConfig, VideoSource, YouTubeConfig,
};
use posty5_sdk::{FilePayload, Posty5};

use super::{print_page_summary, PageArgs};
use crate::output::{print_json, print_tasks_table, OutputFormat};

#[derive(Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List publishing tasks
    List {
        #[arg(long)]
        workspace_id: Option<String>,

        /// Filter by status (e.g. pending, done, failedByPlatform)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a task's progress on every platform
    Status { id: String },
    /// Show the ids of the neighbouring tasks
    Neighbours { id: String },
    /// Show the account's default task settings
    Defaults,
    /// Publish a short video
    Publish(PublishArgs),
}

#[derive(Args, Debug, Default)]
pub struct PublishArgs {
    #[arg(long)]
    pub workspace_id: String,

    #[command(flatten)]
    pub source: VideoArgs,

    /// Thumbnail image to upload
    #[arg(long)]
    pub thumbnail: Option<PathBuf>,

    /// Publish to YouTube with this title
    #[arg(long)]
    pub youtube_title: Option<String>,

    #[arg(long, default_value = "")]
    pub youtube_description: String,

    /// Comma-separated YouTube tags
    #[arg(long, value_delimiter = ',')]
    pub youtube_tags: Vec<String>,

    /// Publish to TikTok with this caption
    #[arg(long)]
    pub tiktok_caption: Option<String>,

    #[arg(long, default_value = "PUBLIC_TO_EVERYONE")]
    pub tiktok_privacy: String,

    /// Publish to the workspace's Facebook page with this description
    #[arg(long)]
    pub facebook_description: Option<String>,

    #[arg(long)]
    pub facebook_title: Option<String>,

    /// Publish to Instagram with this description
    #[arg(long)]
    pub instagram_description: Option<String>,

    /// Schedule for later (RFC 3339, e.g. 2026-03-01T09:30:00Z)
    #[arg(long)]
    pub at: Option<String>,

    #[arg(long)]
    pub tag: Option<String>,

    #[arg(long)]
    pub ref_id: Option<String>,
}

#[derive(Args, Debug, Default)]
#[group(required = true, multiple = false)]
pub struct VideoArgs {
    /// Local video file to upload
    #[arg(long)]
    pub video_file: Option<PathBuf>,

    /// Direct link to a video file
    #[arg(long)]
    pub video_url: Option<String>,

    /// Facebook reel or video to repost
    #[arg(long)]
    pub facebook_url: Option<String>,

    /// TikTok video to repost
    #[arg(long)]
    pub tiktok_url: Option<String>,

    /// YouTube Short to repost
    #[arg(long)]
    pub youtube_url: Option<String>,
}

impl PublishArgs {
    pub fn settings(&self) -> Result<TaskSettings> {
        let mut settings = TaskSettings::new(&self.workspace_id);
        if let Some(title) = &self.youtube_title {
            settings = settings.with_platform(Platform::YouTube(YouTubeConfig {
                title: title.clone(),
                description: self.youtube_description.clone(),
                tags: self.youtube_tags.clone(),
                ..Default::default()
            }));
        }
        if let Some(caption) = &self.tiktok_caption {
            let mut config = TikTokConfig::public(caption);
            config.privacy_level = self.tiktok_privacy.clone();
            settings = settings.with_platform(Platform::TikTok(config));
        }
        if let Some(description) = &self.facebook_description {
            settings = settings.with_platform(Platform::FacebookPage(FacebookPageConfig {
                description: description.clone(),
                title: self.facebook_title.clone(),
            }));
        }
        if let Some(description) = &self.instagram_description {
            settings = settings.with_platform(Platform::Instagram(InstagramConfig {
                description: description.clone(),
                ..Default::default()
            }));
        }
        if let Some(at) = &self.at {
            let at = DateTime::parse_from_rfc3339(at)
                .with_context(|| format!("invalid --at timestamp: {}", at))?;
            settings = settings.with_schedule(Schedule::At(at.with_timezone(&Utc)));
        }
        if let Some(tag) = &self.tag {
            settings = settings.with_tag(tag);
        }
        if let Some(ref_id) = &self.ref_id {
            settings = settings.with_ref_id(ref_id);
        }
        Ok(settings)
    }
}

impl VideoArgs {
    async fn to_source(&self) -> Result<VideoSource> {
        if let Some(path) = &self.video_file {
            return Ok(VideoSource::File(FilePayload::from_path(path, None).await?));
        }
        let source = match (
            &self.video_url,
            &self.facebook_url,
            &self.tiktok_url,
            &self.youtube_url,
        ) {
            (Some(url), _, _, _) => VideoSource::Url(url.clone()),
            (_, Some(url), _, _) => VideoSource::Facebook(url.clone()),
            (_, _, Some(url), _) => VideoSource::TikTok(url.clone()),
            (_, _, _, Some(url)) => VideoSource::YouTube(url.clone()),
            _ => bail!("pass one of --video-file, --video-url, --facebook-url, --tiktok-url, --youtube-url"),
        };
        Ok(source)
    }
}

fn parse_status(input: &str) -> Result<TaskStatus> {
    match serde_json::from_value::<TaskStatus>(serde_json::Value::String(input.to_string()))? {
        TaskStatus::Unknown => bail!("unknown task status: {}", input),
        status => Ok(status),
    }
}

pub async fn run(args: &TasksArgs, client: &Posty5, format: &OutputFormat) -> Result<()> {
    let tasks = client.social_tasks();
    match &args.command {
        TasksCommand::List {
            workspace_id,
            status,
            page,
        } => {
            let mut params = TaskListParams::default();
            if let Some(workspace_id) = workspace_id {
                params = params.with_workspace_id(workspace_id);
            }
            if let Some(status) = status {
                params = params.with_status(parse_status(status)?);
            }
            let resp = tasks.list(&params, &page.pagination()).await?;
            print_page_summary(&resp, "tasks");
            match format {
                OutputFormat::Table => print_tasks_table(&resp.items),
                OutputFormat::Json => print_json(&resp.items),
            }
        }
        TasksCommand::Status { id } => print_json(&tasks.status(id).await?),
        TasksCommand::Neighbours { id } => print_json(&tasks.next_previous(id).await?),
        TasksCommand::Defaults => print_json(&tasks.default_settings().await?),
        TasksCommand::Publish(publish) => {
            let settings = publish.settings()?;
            let source = publish.source.to_source().await?;
            let thumbnail = match &publish.thumbnail {
                Some(path) => Some(FilePayload::from_path(path, None).await?),
                None => None,
            };
            let task = tasks.publish(&settings, &source, thumbnail.as_ref()).await?;
            print_json(&task);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_flags_enable_platforms() {
        let args = PublishArgs {
            workspace_id: "ws-1".to_string(),
            youtube_title: Some("Launch".to_string()),
            youtube_tags: vec!["a".to_string(), "b".to_string()],
            instagram_description: Some("hi".to_string()),
            ..Default::default()
        };
        let settings = args.settings().unwrap();
        assert_eq!(settings.platforms.len(), 2);
        assert_eq!(settings.platforms[0].name(), "YouTube");
        assert_eq!(settings.platforms[1].name(), "Instagram");
        assert!(settings.schedule.is_none());
    }

    #[test]
    fn test_schedule_is_parsed() {
        let args = PublishArgs {
            workspace_id: "ws-1".to_string(),
            at: Some("2026-03-01T11:30:00+02:00".to_string()),
            ..Default::default()
        };
        let settings = args.settings().unwrap();
        let expected = DateTime::parse_from_rfc3339("2026-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(settings.schedule, Some(Schedule::At(expected)));
    }

    #[test]
    fn test_bad_schedule_is_rejected() {
        let args = PublishArgs {
            at: Some("tomorrow".to_string()),
            ..Default::default()
        };
        assert!(args.settings().is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(parse_status("failedByPlatform").unwrap(), TaskStatus::FailedByPlatform);
        assert!(parse_status("nonsense").is_err());
    }
}
