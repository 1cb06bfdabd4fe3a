use object_store::aws::{AmazonS3, AmazonS3Builder};
use tracing::warn;

use crate::utilities::{config::Config, errors::AppError};

/// Build the S3 client if a bucket is configured. Uploads are disabled
/// otherwise, the rest of the service keeps working.
pub fn build_s3(config: &Config) -> Result<Option<AmazonS3>, AppError> {
    let Some(bucket_name) = &config.s3_bucket_name else {
        warn!("S3_BUCKET_NAME not set, file uploads are disabled");
        return Ok(None);
    };

    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket_name);

    if let Some(region) = &config.s3_region {
        builder = builder.with_region(region);
    }
    if let Some(endpoint) = &config.s3_endpoint {
        builder = builder.with_endpoint(endpoint).with_allow_http(true);
    }
    if let Some(access_key_id) = &config.s3_access_key_id {
        builder = builder.with_access_key_id(access_key_id);
    }
    if let Some(secret_key) = &config.s3_secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    Ok(Some(builder.build()?))
}
