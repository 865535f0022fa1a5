//! Social publisher tasks: `/api/social-publisher-task`.
//!
//! Publishing a short video is a three-step sequence. The client first asks
//! for pre-signed storage URLs, then uploads the video and thumbnail, and
//! finally creates the task that points at the uploaded files. Creating the
//! task is what makes it live; there is no separate publish call.

pub mod client;
pub mod types;

pub use client::SocialTaskClient;
pub use types::{
    FacebookPageConfig, InstagramConfig, Platform, Schedule, SourceUrls, Task, TaskListParams,
    TaskNextPrevious, TaskSettings, TaskStatus, TaskStatusDetails, TikTokConfig, VideoSource,
    YouTubeConfig,
};
