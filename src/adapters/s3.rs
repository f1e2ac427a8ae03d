use crate::config::S3Config;
use crate::utils::error::{Result, WhatsappError};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::time::Duration;

/// Deterministic object key for a document's PDF: spaces in the doctype become
/// underscores, folder prefix trimmed of slashes.
pub fn object_key(doctype: &str, docname: &str, folder: Option<&str>) -> String {
    let safe_doctype = doctype.replace(' ', "_");
    let object_name = format!("{}_{}.pdf", safe_doctype, docname);

    match folder.map(|f| f.trim_matches('/')) {
        Some(folder) if !folder.is_empty() => format!("{}/{}", folder, object_name),
        _ => object_name,
    }
}

/// Credentials are read fresh from config on every call; no client is cached
/// across requests.
fn build_client(cfg: &S3Config) -> S3Client {
    let credentials = Credentials::new(
        cfg.access_key_id.clone(),
        cfg.secret_access_key.clone(),
        None,
        None,
        "whatsapp-s3-config",
    );

    // Explicit regional endpoint so SigV4 host signing matches; path-style when
    // the bucket name contains dots or a custom endpoint is in play.
    let endpoint = cfg
        .endpoint_url
        .clone()
        .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", cfg.region));

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(cfg.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(endpoint)
        .force_path_style(cfg.bucket.contains('.') || cfg.endpoint_url.is_some())
        .build();

    S3Client::from_conf(config)
}

/// Upload PDF bytes and return a presigned GET URL valid for `expiry_seconds`.
pub async fn upload_pdf_and_presign(
    cfg: &S3Config,
    key: &str,
    pdf_bytes: Vec<u8>,
    expiry_seconds: u64,
) -> Result<String> {
    let client = build_client(cfg);

    client
        .put_object()
        .bucket(&cfg.bucket)
        .key(key)
        .body(ByteStream::from(pdf_bytes))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| WhatsappError::UploadError {
            message: format!("Failed to upload to S3: {}", e),
        })?;

    tracing::info!("Uploaded {} to bucket {}", key, cfg.bucket);

    let presigning = PresigningConfig::expires_in(Duration::from_secs(expiry_seconds)).map_err(
        |e| WhatsappError::UploadError {
            message: format!("Invalid presign expiry: {}", e),
        },
    )?;

    let presigned = client
        .get_object()
        .bucket(&cfg.bucket)
        .key(key)
        .presigned(presigning)
        .await
        .map_err(|e| WhatsappError::UploadError {
            message: format!("Failed to generate presigned URL: {}", e),
        })?;

    Ok(presigned.uri().to_string())
}
