//! Property photo storage.
//!
//! [`S3PhotoStore`] writes objects with `PutObject` and hands back their
//! public URL. [`MemoryPhotoStore`] keeps uploads in memory for tests.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use futures::future::try_join_all;
use rentwise_core::photos::photo_object_key;
use tokio::sync::Mutex;

/// A photo received from a client, ready to be stored.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    /// Client-supplied file name. Only used to build the object key.
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Errors from the photo storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage backend rejected or failed the upload.
    #[error("Photo upload failed for {key}: {message}")]
    Upload { key: String, message: String },
}

/// Destination for property photos.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Short name used in logs.
    fn backend_tag(&self) -> &'static str;

    /// Store one photo and return its public URL.
    async fn upload(&self, photo: PhotoUpload) -> Result<String, StorageError>;

    /// Store several photos concurrently. URLs come back in input order;
    /// the first failure fails the whole batch.
    async fn upload_all(&self, photos: Vec<PhotoUpload>) -> Result<Vec<String>, StorageError> {
        try_join_all(photos.into_iter().map(|photo| self.upload(photo))).await
    }
}

fn object_key(filename: &str) -> String {
    photo_object_key(chrono::Utc::now().timestamp_millis(), filename)
}

// ---------------------------------------------------------------------------
// S3
// ---------------------------------------------------------------------------

/// Settings for [`S3PhotoStore`].
#[derive(Debug, Clone)]
pub struct S3Config {
    pub region: String,
    pub bucket: String,
    /// Prefix for returned URLs, without a trailing slash.
    pub public_base_url: String,
}

impl S3Config {
    /// Virtual-hosted style URL of the bucket, used when no explicit public
    /// base URL is configured.
    pub fn default_public_base_url(bucket: &str, region: &str) -> String {
        format!("https://{bucket}.s3.{region}.amazonaws.com")
    }
}

/// Stores photos in an S3 bucket.
pub struct S3PhotoStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3PhotoStore {
    /// Build a client from the ambient AWS credential chain.
    pub async fn from_config(config: &S3Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self::with_client(aws_sdk_s3::Client::new(&sdk_config), config)
    }

    /// Reuse an existing S3 client.
    pub fn with_client(client: aws_sdk_s3::Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    fn backend_tag(&self) -> &'static str {
        "s3"
    }

    async fn upload(&self, photo: PhotoUpload) -> Result<String, StorageError> {
        let key = object_key(&photo.filename);
        let size = photo.bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(photo.content_type)
            .body(ByteStream::from(photo.bytes))
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(bucket = %self.bucket, key = %key, size, "Photo uploaded");
        Ok(format!("{}/{key}", self.public_base_url))
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps uploads in memory. Returned URLs use a fixed base.
pub struct MemoryPhotoStore {
    base_url: String,
    /// Stored objects as `(key, upload)` in upload order.
    pub objects: Mutex<Vec<(String, PhotoUpload)>>,
    /// When set, every upload fails.
    pub fail_uploads: bool,
}

impl MemoryPhotoStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Mutex::new(Vec::new()),
            fail_uploads: false,
        }
    }

    /// A store whose uploads always fail.
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    /// Number of objects stored so far.
    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.lock().await.is_empty()
    }
}

impl Default for MemoryPhotoStore {
    fn default() -> Self {
        Self::new("https://photos.test")
    }
}

#[async_trait]
impl PhotoStore for MemoryPhotoStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn upload(&self, photo: PhotoUpload) -> Result<String, StorageError> {
        let key = object_key(&photo.filename);
        if self.fail_uploads {
            return Err(StorageError::Upload {
                key,
                message: "memory store configured to fail".into(),
            });
        }

        let url = format!("{}/{key}", self.base_url);
        self.objects.lock().await.push((key, photo));
        Ok(url)
    }
}
