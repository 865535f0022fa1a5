//! Client-side input checks. Every check runs before any network call and
//! fails with a validation error naming the offending field.

use posty5_core::{Error, FilePayload, InvalidField, PathSegment};
use regex::Regex;

/// Required prefix for HTML hosting variable keys.
pub const VARIABLE_KEY_PREFIX: &str = "pst5_";

/// Default ceiling for uploaded videos (1 GiB).
pub const MAX_VIDEO_BYTES: u64 = 1_073_741_824;

/// Default ceiling for uploaded thumbnails (8 MiB).
pub const MAX_THUMBNAIL_BYTES: u64 = 8_388_608;

pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".mkv", ".webm"];

pub(crate) fn invalid(field: &str, message: String) -> Error {
    tracing::debug!("Rejected {}: {}", field, message);
    Error::validation(
        message.clone(),
        vec![InvalidField {
            path: vec![PathSegment::Key(field.to_string())],
            message,
        }],
    )
}

pub fn validate_variable_key(key: &str) -> Result<(), Error> {
    if key.starts_with(VARIABLE_KEY_PREFIX) {
        Ok(())
    } else {
        Err(invalid(
            "key",
            format!(
                "Key must start with '{}', change to {}{}",
                VARIABLE_KEY_PREFIX, VARIABLE_KEY_PREFIX, key
            ),
        ))
    }
}

pub fn validate_video_file(file: &FilePayload, max_bytes: u64) -> Result<(), Error> {
    if file.len() as u64 > max_bytes {
        return Err(invalid(
            "video",
            format!(
                "Video file size ({} bytes) exceeds maximum allowed size ({} bytes)",
                file.len(),
                max_bytes
            ),
        ));
    }
    let allowed = file
        .extension()
        .is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()));
    if !allowed {
        return Err(invalid(
            "video",
            format!(
                "Invalid video file type. Allowed types: {}",
                ALLOWED_VIDEO_EXTENSIONS.join(", ")
            ),
        ));
    }
    Ok(())
}

pub fn validate_thumbnail(file: &FilePayload, max_bytes: u64) -> Result<(), Error> {
    if file.len() as u64 > max_bytes {
        return Err(invalid(
            "thumbnail",
            format!(
                "Thumbnail file size ({} bytes) exceeds maximum allowed size ({} bytes)",
                file.len(),
                max_bytes
            ),
        ));
    }
    Ok(())
}

/// A direct link to a video file: any http(s) URL mentioning a known extension.
pub fn validate_video_url(url: &str) -> Result<(), Error> {
    if !is_match(r"(?i)^https?://.+", url)? {
        return Err(invalid("videoURL", "Invalid video URL format".to_string()));
    }
    let lower = url.to_ascii_lowercase();
    if !ALLOWED_VIDEO_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
        return Err(invalid(
            "videoURL",
            format!(
                "Invalid video URL. Must contain one of: {}",
                ALLOWED_VIDEO_EXTENSIONS.join(", ")
            ),
        ));
    }
    Ok(())
}

pub fn validate_facebook_url(url: &str) -> Result<(), Error> {
    if is_match(r"(?i)^https?://(www\.)?(facebook\.com|fb\.watch)/(reel|watch|.*/videos)/.*", url)? {
        Ok(())
    } else {
        Err(invalid("postURL", "Invalid Facebook video URL".to_string()))
    }
}

pub fn validate_tiktok_url(url: &str) -> Result<(), Error> {
    if is_match(r"(?i)^https?://(www\.)?(tiktok\.com|vm\.tiktok\.com)/@?.*/(video/\d+|.*)", url)? {
        Ok(())
    } else {
        Err(invalid("postURL", "Invalid TikTok video URL".to_string()))
    }
}

pub fn validate_youtube_url(url: &str) -> Result<(), Error> {
    if is_match(r"(?i)^https?://(www\.)?(youtube\.com/shorts/|youtu\.be/)[A-Za-z0-9_-]+", url)? {
        Ok(())
    } else {
        Err(invalid("postURL", "Invalid YouTube Shorts URL".to_string()))
    }
}

fn is_match(pattern: &str, input: &str) -> Result<bool, Error> {
    let re = Regex::new(pattern).map_err(|e| {
        tracing::error!("Failed to compile pattern {}: {}", pattern, e);
        Error::generic(format!("regex compile error: {}", e))
    })?;
    Ok(re.is_match(input))
}
