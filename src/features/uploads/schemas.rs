use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utilities::config::Config;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "application/pdf",
];

/// Objects are grouped by media kind so the bucket stays browsable.
pub fn folder_for(mime: &str) -> &'static str {
    if mime.starts_with("image/") {
        "images"
    } else if mime.starts_with("video/") {
        "videos"
    } else if mime == "application/pdf" {
        "documents"
    } else {
        "uploads"
    }
}

pub fn object_key(mime: &str, extension: &str) -> String {
    format!("{}/{}.{}", folder_for(mime), Uuid::new_v4(), extension)
}

pub fn file_url(config: &Config, bucket: &str, key: &str) -> String {
    match config.s3_endpoint.as_deref() {
        Some(endpoint) => format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/')),
        None => {
            let region = config.s3_region.as_deref().unwrap_or("ap-south-1");
            format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
        }
    }
}

/// Recovers the object key from a public URL, dropping any query
/// string.
pub fn key_from_url(url: &str) -> Option<String> {
    let (_, rest) = url.split_once(".com/")?;
    let key = rest.split('?').next().unwrap_or(rest);
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}

#[derive(Serialize, Debug)]
pub struct UploadedFile {
    pub url: String,
    pub key: String,
    #[serde(rename = "originalName")]
    pub original_name: Option<String>,
    pub mimetype: String,
    pub size: usize,
}

#[derive(Deserialize, Debug)]
pub struct DeleteFileIn {
    pub url: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct DeleteFilesIn {
    pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_follows_media_kind() {
        assert_eq!(folder_for("image/png"), "images");
        assert_eq!(folder_for("video/mp4"), "videos");
        assert_eq!(folder_for("application/pdf"), "documents");
        assert_eq!(folder_for("text/plain"), "uploads");
    }

    #[test]
    fn key_is_recovered_from_bucket_url() {
        let url = "https://deeprealties-storage.s3.ap-south-1.amazonaws.com/images/abc.png";
        assert_eq!(key_from_url(url), Some("images/abc.png".to_string()));
    }

    #[test]
    fn key_recovery_strips_query_string() {
        let url = "https://bucket.s3.ap-south-1.amazonaws.com/videos/clip.mp4?X-Amz-Expires=60";
        assert_eq!(key_from_url(url), Some("videos/clip.mp4".to_string()));
    }

    #[test]
    fn key_recovery_rejects_foreign_urls() {
        assert_eq!(key_from_url("https://example.org/images/abc.png"), None);
        assert_eq!(key_from_url("https://bucket.s3.amazonaws.com/"), None);
    }
}
