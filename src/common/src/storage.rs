use anyhow::Result;
use object_store::{ObjectStore, aws::AmazonS3Builder, local::LocalFileSystem, memory::InMemory};
use std::sync::Arc;
use url::Url;

/// Create an object store from a DSN string
///
/// Supported schemes are `memory://`, `file:///path` and
/// `s3://[access_key:secret_key@]host[:port]/bucket`.
pub fn create_object_store_from_dsn(dsn: &str) -> Result<Arc<dyn ObjectStore>> {
    let url =
        Url::parse(dsn).map_err(|e| anyhow::anyhow!("Invalid storage DSN '{}': {}", dsn, e))?;

    match url.scheme() {
        "file" => {
            let path = url.path();
            if path.is_empty() || path == "/" {
                return Err(anyhow::anyhow!(
                    "File DSN must specify a path: file:///path/to/storage"
                ));
            }
            // file:///.data/store is relative to the working directory
            let path = if path.starts_with("/.") {
                &path[1..]
            } else {
                path
            };
            std::fs::create_dir_all(path)?;
            Ok(Arc::new(LocalFileSystem::new_with_prefix(path)?))
        }
        "memory" => Ok(Arc::new(InMemory::new())),
        "s3" => {
            let builder = create_s3_builder_from_dsn(&url)?;
            Ok(Arc::new(builder.build()?))
        }
        scheme => Err(anyhow::anyhow!(
            "Unsupported storage scheme: {}. Supported: file, memory, s3",
            scheme
        )),
    }
}

/// Create an S3 builder from a DSN
/// DSN format: s3://[access_key:secret_key@]host[:port]/bucket
pub fn create_s3_builder_from_dsn(dsn: &Url) -> Result<AmazonS3Builder> {
    let host = dsn
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Missing S3 host in DSN"))?;
    let port = dsn.port();
    let bucket = dsn.path().trim_start_matches('/');

    if bucket.is_empty() {
        return Err(anyhow::anyhow!(
            "S3 DSN must specify a bucket: s3://host/bucket"
        ));
    }

    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(bucket)
        .with_region("us-east-1");

    let access_key = dsn.username();
    let secret_key = dsn.password().unwrap_or("");

    if !access_key.is_empty() {
        builder = builder
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key);
    } else {
        if let Ok(env_key) = std::env::var("AWS_ACCESS_KEY_ID") {
            builder = builder.with_access_key_id(env_key);
        }
        if let Ok(env_secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            builder = builder.with_secret_access_key(env_secret);
        }
        if let Ok(env_region) = std::env::var("AWS_DEFAULT_REGION") {
            builder = builder.with_region(env_region);
        }
    }

    // S3-compatible endpoints (MinIO and friends) need path-style requests
    if !host.contains("amazonaws.com") {
        let scheme = if port == Some(443) { "https" } else { "http" };
        let endpoint = match port {
            Some(p) => format!("{scheme}://{host}:{p}"),
            None => format!("{scheme}://{host}"),
        };
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(true)
            .with_virtual_hosted_style_request(false);
    }

    Ok(builder)
}
