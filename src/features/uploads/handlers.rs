use axum::{
    Json,
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::aws::AmazonS3;
use object_store::path::Path as ObjectStorePath;
use serde_json::json;

use crate::{
    features::uploads::schemas::{
        ALLOWED_MIME_TYPES, DeleteFileIn, DeleteFilesIn, MAX_UPLOAD_BYTES, UploadedFile, file_url,
        key_from_url, object_key,
    },
    utilities::{auth::CurrentUser, config::Config, errors::AppError},
};

fn storage<'a>(
    s3: &'a Option<AmazonS3>,
    config: &'a Config,
) -> Result<(&'a AmazonS3, &'a str), AppError> {
    match (s3, config.s3_bucket_name.as_deref()) {
        (Some(s3), Some(bucket)) => Ok((s3, bucket)),
        _ => Err(AppError::InternalError(
            "Object storage is not configured".to_string(),
        )),
    }
}

async fn store_file(
    s3: &AmazonS3,
    config: &Config,
    bucket: &str,
    data: Bytes,
    original_name: Option<String>,
) -> Result<UploadedFile, AppError> {
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge);
    }

    let kind = infer::get(&data)
        .ok_or_else(|| AppError::UnsupportedFileType("unrecognized file content".to_string()))?;
    let mime = kind.mime_type();

    if !ALLOWED_MIME_TYPES.contains(&mime) {
        return Err(AppError::UnsupportedFileType(format!(
            "only images, videos, and PDFs are allowed, got {mime}"
        )));
    }

    let key = object_key(mime, kind.extension());
    let location = ObjectStorePath::from(key.clone());
    s3.put(&location, data.clone().into()).await?;

    Ok(UploadedFile {
        url: file_url(config, bucket, &key),
        key,
        original_name,
        mimetype: mime.to_string(),
        size: data.len(),
    })
}

/// Drains the multipart stream, uploading every field that matches
/// `field_name`.
async fn collect_uploads(
    s3: &AmazonS3,
    config: &Config,
    bucket: &str,
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidFormData("Failed to read multipart stream".to_string()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::InvalidFormData("Failed to read file field".to_string()))?;
        files.push(store_file(s3, config, bucket, data, original_name).await?);
    }

    Ok(files)
}

pub async fn upload_single_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (s3, bucket) = storage(&s3, &config)?;

    let file = collect_uploads(s3, &config, bucket, &mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ValidationError("No file uploaded".to_string()))?;

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "file": file,
    }))
    .into_response())
}

pub async fn upload_multiple_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (s3, bucket) = storage(&s3, &config)?;

    let files = collect_uploads(s3, &config, bucket, &mut multipart, "files").await?;
    if files.is_empty() {
        return Err(AppError::ValidationError("No files uploaded".to_string()));
    }

    Ok(Json(json!({
        "message": format!("{} file(s) uploaded successfully", files.len()),
        "files": files,
    }))
    .into_response())
}

pub async fn upload_property_images_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (s3, bucket) = storage(&s3, &config)?;

    let files = collect_uploads(s3, &config, bucket, &mut multipart, "images").await?;
    if files.is_empty() {
        return Err(AppError::ValidationError("No images uploaded".to_string()));
    }

    let images: Vec<String> = files.into_iter().map(|f| f.url).collect();
    Ok(Json(json!({
        "message": format!("{} image(s) uploaded successfully", images.len()),
        "images": images,
    }))
    .into_response())
}

pub async fn upload_project_files_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (s3, bucket) = storage(&s3, &config)?;

    let mut images = Vec::new();
    let mut gallery = Vec::new();
    let mut videos = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidFormData("Failed to read multipart stream".to_string()))?
    {
        let target = match field.name() {
            Some("images") => &mut images,
            Some("gallery") => &mut gallery,
            Some("videos") => &mut videos,
            _ => continue,
        };

        let original_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::InvalidFormData("Failed to read file field".to_string()))?;
        let file = store_file(s3, &config, bucket, data, original_name).await?;
        target.push(file.url);
    }

    Ok(Json(json!({
        "message": "Files uploaded successfully",
        "files": {
            "images": images,
            "gallery": gallery,
            "videos": videos,
        },
    }))
    .into_response())
}

pub async fn delete_file_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    Json(delete_in): Json<DeleteFileIn>,
) -> Result<Response, AppError> {
    let (s3, _) = storage(&s3, &config)?;

    let url = delete_in
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::ValidationError("File URL is required".to_string()))?;
    url::Url::parse(&url)?;
    let key = key_from_url(&url)
        .ok_or_else(|| AppError::ValidationError("Invalid storage URL".to_string()))?;

    s3.delete(&ObjectStorePath::from(key)).await?;

    Ok(Json(json!({"message": "File deleted successfully"})).into_response())
}

pub async fn delete_files_handler(
    State(s3): State<Option<AmazonS3>>,
    State(config): State<Config>,
    CurrentUser(_): CurrentUser,
    Json(delete_in): Json<DeleteFilesIn>,
) -> Result<Response, AppError> {
    let (s3, _) = storage(&s3, &config)?;

    if delete_in.urls.is_empty() {
        return Err(AppError::ValidationError(
            "File URLs array is required".to_string(),
        ));
    }

    let keys: Vec<String> = delete_in
        .urls
        .iter()
        .filter_map(|url| key_from_url(url))
        .collect();

    if keys.is_empty() {
        return Ok(Json(json!({"message": "No valid files to delete"})).into_response());
    }

    let (deleted, failed) = delete_keys(s3, keys).await;

    let message = if failed == 0 {
        format!("{deleted} file(s) deleted successfully")
    } else {
        format!("{deleted} file(s) deleted, {failed} failed")
    };
    Ok(Json(json!({ "message": message })).into_response())
}

/// Deletes every key, a failed delete is logged and counted instead of
/// aborting the batch. Returns (deleted, failed).
async fn delete_keys<S: ObjectStore>(store: &S, keys: Vec<String>) -> (usize, usize) {
    let mut deleted = 0usize;
    let mut failed = 0usize;
    for key in keys {
        match store.delete(&ObjectStorePath::from(key.as_str())).await {
            Ok(()) => deleted += 1,
            Err(error) => {
                tracing::warn!("Failed to delete {key}: {error}");
                failed += 1;
            }
        }
    }
    (deleted, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    #[tokio::test]
    async fn batch_delete_continues_past_missing_objects() {
        let store = InMemory::new();
        for key in ["images/a.jpg", "images/b.jpg"] {
            store
                .put(&ObjectStorePath::from(key), Bytes::from_static(b"x").into())
                .await
                .unwrap();
        }

        let keys = vec![
            "images/a.jpg".to_string(),
            "images/missing.jpg".to_string(),
            "images/b.jpg".to_string(),
        ];

        let (deleted, failed) = delete_keys(&store, keys).await;
        assert_eq!(deleted, 2);
        assert_eq!(failed, 1);
    }
}
