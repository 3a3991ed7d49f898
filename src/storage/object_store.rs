// Copyright 2025 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.
//
// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use super::config::{StorageConfig, StorageType};
use super::error::{StorageError, StorageResult};
use super::provider::{key_to_path, FileMetadata, StorageProvider, TransferResult};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use object_store::path::Path as ObjectPath;
use object_store::{
    gcp::GoogleCloudStorageBuilder, local::LocalFileSystem, ClientOptions, ObjectStore, PutMode,
    PutPayload, RetryConfig,
};
use std::fmt::{Debug, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Storage provider for one bucket, backed by an `object_store` client
pub struct ObjectStoreProvider {
    pub config: StorageConfig,
    pub bucket: String,
    pub store: Arc<dyn ObjectStore>,
    pub base_path: String,
}

impl ObjectStoreProvider {
    /// Create a provider for `bucket` from configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The bucket name is empty
    /// * Required configuration options are missing
    /// * The storage backend cannot be created (e.g., invalid credentials)
    pub async fn new(config: StorageConfig, bucket: &str) -> StorageResult<Self> {
        if bucket.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "bucket name must not be empty".to_string(),
            ));
        }
        let (store, base_path) = Self::build_store(&config, bucket)?;

        info!(
            "Resolved bucket={} storage_type={} base_path={}",
            bucket,
            config.storage_type_str(),
            base_path
        );

        Ok(Self {
            config,
            bucket: bucket.to_string(),
            store: Arc::from(store),
            base_path,
        })
    }

    /// Wrap an already constructed store, e.g. a shared pooled client.
    pub fn from_store(
        config: StorageConfig,
        bucket: &str,
        store: Arc<dyn ObjectStore>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            config,
            bucket: bucket.to_string(),
            store,
            base_path: base_path.into(),
        }
    }

    fn build_store(
        config: &StorageConfig,
        bucket: &str,
    ) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        match config.storage_type {
            StorageType::Local => Self::build_local_store(config, bucket),
            StorageType::Gcs => Self::build_gcs_store(config, bucket),
        }
    }

    /// Build a local filesystem store rooted at `<path>/<bucket>`.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The 'path' option is missing from configuration
    /// * The bucket directory cannot be canonicalized (doesn't exist or permission denied)
    /// * The bucket path is not a directory
    fn build_local_store(
        config: &StorageConfig,
        bucket: &str,
    ) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let root = config.options.get("path").ok_or_else(|| {
            StorageError::ConfigError("Local storage requires 'path' option".to_string())
        })?;
        let bucket_path = PathBuf::from(root).join(bucket);

        let canonical_path = bucket_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to resolve bucket '{}' under '{}': {} (bucket directory must exist)",
                bucket, root, e
            ))
        })?;

        if !canonical_path.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "Bucket path is not a directory: {}",
                canonical_path.display()
            )));
        }

        let store = LocalFileSystem::new_with_prefix(&canonical_path).map_err(|e| {
            StorageError::ConfigError(format!("Failed to create local store: {}", e))
        })?;

        let base_path_str = canonical_path.to_string_lossy().to_string();
        Ok((Box::new(store), base_path_str))
    }

    /// Build a GCS store for `bucket`.
    ///
    /// Starts from the ambient environment (`GOOGLE_SERVICE_ACCOUNT`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`, ...) and lets explicit options
    /// override it.
    fn build_gcs_store(
        config: &StorageConfig,
        bucket: &str,
    ) -> StorageResult<(Box<dyn ObjectStore>, String)> {
        let mut builder = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .with_client_options(Self::build_connection_options(config))
            .with_retry(Self::build_retry_options(config));

        for (key, value) in &config.options {
            match key.as_str() {
                "service_account_key_path" => builder = builder.with_service_account_path(value),
                "service_account_key" => builder = builder.with_service_account_key(value),
                "application_credentials" => {
                    builder = builder.with_application_credentials(value)
                }
                // Already handled by `build_connection_options` and `build_retry_options`
                "timeout"
                | "connect_timeout"
                | "max_retries"
                | "retry_timeout"
                | "pool_idle_timeout"
                | "pool_max_idle_per_host"
                | "max_workers" => (),
                _ => {
                    tracing::warn!("Unknown GCS option: {}", key);
                }
            }
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create GCS store: {}", e)))?;

        Ok((Box::new(store), format!("gs://{}", bucket)))
    }

    /// Build connection options from configuration.
    fn build_connection_options(config: &StorageConfig) -> ClientOptions {
        let mut client_options = ClientOptions::default();
        if let Some(timeout_str) = config.options.get("timeout") {
            if timeout_str == "0" || timeout_str == "disabled" {
                client_options = client_options.with_timeout_disabled();
            } else if let Ok(sec) = timeout_str.parse::<u64>() {
                client_options = client_options.with_timeout(Duration::from_secs(sec))
            }
        };
        if let Some(connect_timeout_str) = config.options.get("connect_timeout") {
            if connect_timeout_str == "0" || connect_timeout_str == "disabled" {
                client_options = client_options.with_connect_timeout_disabled();
            } else if let Ok(sec) = connect_timeout_str.parse::<u64>() {
                client_options = client_options.with_connect_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_idle_timeout_str) = config.options.get("pool_idle_timeout") {
            if let Ok(sec) = pool_idle_timeout_str.parse::<u64>() {
                client_options = client_options.with_pool_idle_timeout(Duration::from_secs(sec))
            }
        }
        if let Some(pool_max_idle_per_host_str) = config.options.get("pool_max_idle_per_host") {
            if let Ok(max_idle) = pool_max_idle_per_host_str.parse::<usize>() {
                client_options = client_options.with_pool_max_idle_per_host(max_idle)
            }
        }
        client_options
    }

    /// Build the client's retry policy from configuration.
    ///
    /// Retries live entirely inside the `object_store` client; the transfer
    /// operations never retry on their own.
    fn build_retry_options(config: &StorageConfig) -> RetryConfig {
        let mut retry_config = RetryConfig::default();
        if let Some(max_retries) = config
            .options
            .get("max_retries")
            .and_then(|s| s.parse::<usize>().ok())
        {
            retry_config.max_retries = max_retries;
        }
        if let Some(retry_timeout) = config
            .options
            .get("retry_timeout")
            .and_then(|s| s.parse::<u64>().ok())
        {
            retry_config.retry_timeout = Duration::from_secs(retry_timeout);
        }
        retry_config
    }

    /// Write a local file to `key`, optionally create-only.
    async fn put_file(
        store: &Arc<dyn ObjectStore>,
        local: &Path,
        key: &ObjectPath,
        create_only: bool,
    ) -> StorageResult<()> {
        let data = tokio::fs::read(local).await?;
        let payload = PutPayload::from(Bytes::from(data));
        if create_only {
            store.put_opts(key, payload, PutMode::Create.into()).await?;
        } else {
            store.put(key, payload).await?;
        }
        Ok(())
    }

    /// One file of a bulk upload. An existing object short-circuits before
    /// the local file is read; the create-only write still guards the race.
    async fn upload_one(
        store: Arc<dyn ObjectStore>,
        local: PathBuf,
        key: ObjectPath,
        skip_if_exists: bool,
    ) -> StorageResult<()> {
        if skip_if_exists {
            match store.head(&key).await {
                Ok(_) => {
                    return Err(object_store::Error::AlreadyExists {
                        path: key.to_string(),
                        source: Box::new(io::Error::new(
                            io::ErrorKind::AlreadyExists,
                            "object exists, skipped",
                        )),
                    }
                    .into())
                }
                Err(object_store::Error::NotFound { .. }) => (),
                Err(e) => return Err(e.into()),
            }
        }
        Self::put_file(&store, &local, &key, skip_if_exists).await
    }
}

#[async_trait]
impl StorageProvider for ObjectStoreProvider {
    fn base_path(&self) -> &str {
        &self.base_path
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.stat(key).await?.is_some())
    }

    async fn stat(&self, key: &str) -> StorageResult<Option<FileMetadata>> {
        let object_path = key_to_path(key)?;
        match self.store.head(&object_path).await {
            Ok(meta) => Ok(Some(FileMetadata {
                path: meta.location.to_string(),
                size: meta.size,
                last_modified: Some(meta.last_modified),
            })),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn download_to_file(&self, key: &str, destination: &Path) -> StorageResult<u64> {
        let object_path = key_to_path(key)?;
        let result = self.store.get(&object_path).await?;
        let written = stream_into_file(result.into_stream(), destination).await?;

        debug!(
            "Downloaded key={} to={} bytes={}",
            key,
            destination.display(),
            written
        );
        Ok(written)
    }

    async fn upload_from_file(
        &self,
        local: &Path,
        key: &str,
        create_only: bool,
    ) -> StorageResult<()> {
        let object_path = key_to_path(key)?;
        Self::put_file(&self.store, local, &object_path, create_only).await
    }

    async fn upload_many(
        &self,
        source_dir: &Path,
        relative_paths: Vec<String>,
        key_prefix: &str,
        skip_if_exists: bool,
        max_workers: usize,
    ) -> Vec<TransferResult> {
        let max_workers = max_workers.max(1);
        let total = relative_paths.len();

        let results: Vec<TransferResult> = stream::iter(relative_paths)
            .map(|relative| {
                let store = Arc::clone(&self.store);
                let local = source_dir.join(&relative);
                let key = key_to_path(&format!("{}{}", key_prefix, relative));
                async move {
                    let outcome = match key {
                        Ok(key) => {
                            debug!("Uploading path={} key={}", relative, key);
                            Self::upload_one(store, local, key, skip_if_exists).await
                        }
                        Err(e) => Err(e),
                    };
                    TransferResult {
                        path: relative,
                        outcome,
                    }
                }
            })
            .buffer_unordered(max_workers)
            .collect()
            .await;

        info!(
            "Finished bulk upload count={} bucket={} prefix={} max_workers={}",
            total, self.bucket, key_prefix, max_workers
        );

        results
    }

    fn uri_from_path(&self, key: &str) -> String {
        let key = key.trim_start_matches('/');
        match self.config.storage_type {
            StorageType::Gcs => format!("{}/{}", self.base_path.trim_end_matches('/'), key),
            StorageType::Local => {
                // file:///abs/path on Unix, file:///C:/path on Windows
                let base = self.base_path.replace('\\', "/");
                let base = base.strip_prefix("//?/").unwrap_or(&base);
                format!("file:///{}/{}", base.trim_matches('/'), key)
            }
        }
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Write `stream` to `<destination>.part`, then rename it over `destination`.
///
/// On failure the partial file is removed and `destination` is untouched.
async fn stream_into_file(
    stream: BoxStream<'static, object_store::Result<Bytes>>,
    destination: &Path,
) -> StorageResult<u64> {
    let partial = partial_path(destination);
    let written = match write_stream(stream, &partial).await {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
                debug!("Could not remove partial={} err={}", partial.display(), cleanup);
            }
            return Err(e);
        }
    };
    tokio::fs::rename(&partial, destination).await?;
    Ok(written)
}

async fn write_stream(
    mut stream: BoxStream<'static, object_store::Result<Bytes>>,
    path: &Path,
) -> StorageResult<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

impl Debug for ObjectStoreProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StorageProvider(type=object_store, storage_type={}, bucket={}, base_path={})",
            self.config.storage_type_str(),
            self.bucket,
            self.base_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use std::fs;
    use tempfile::TempDir;

    fn local_bucket(bucket: &str) -> (TempDir, StorageConfig) {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join(bucket)).unwrap();
        let config = StorageConfig::local().with_option("path", root.path().to_str().unwrap());
        (root, config)
    }

    fn memory_provider() -> ObjectStoreProvider {
        ObjectStoreProvider::from_store(
            StorageConfig::gcs(),
            "mem-bucket",
            Arc::new(InMemory::new()),
            "gs://mem-bucket",
        )
    }

    #[test]
    fn test_build_connection_options_variants() {
        let configs = [
            StorageConfig::local(),
            StorageConfig::local()
                .with_option("timeout", "disabled")
                .with_option("connect_timeout", "0"),
            StorageConfig::local()
                .with_option("timeout", "invalid")
                .with_option("pool_max_idle_per_host", "not_a_number"),
        ];
        for config in configs {
            // Must not panic on any input
            let _options = ObjectStoreProvider::build_connection_options(&config);
        }
    }

    #[test]
    fn test_build_retry_options_custom() {
        let config = StorageConfig::gcs()
            .with_option("max_retries", "5")
            .with_option("retry_timeout", "300");

        let retry_config = ObjectStoreProvider::build_retry_options(&config);
        assert_eq!(retry_config.max_retries, 5);
        assert_eq!(retry_config.retry_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_build_retry_options_invalid_values() {
        let config = StorageConfig::gcs()
            .with_option("max_retries", "invalid")
            .with_option("retry_timeout", "not_a_number");

        let retry_config = ObjectStoreProvider::build_retry_options(&config);
        let default = RetryConfig::default();
        assert_eq!(retry_config.max_retries, default.max_retries);
        assert_eq!(retry_config.retry_timeout, default.retry_timeout);
    }

    #[tokio::test]
    async fn test_new_local_provider() {
        let (root, config) = local_bucket("media");
        let provider = ObjectStoreProvider::new(config, "media").await.unwrap();

        let canonical = root.path().join("media").canonicalize().unwrap();
        assert_eq!(provider.base_path(), canonical.to_string_lossy());
        assert_eq!(provider.bucket, "media");
    }

    #[tokio::test]
    async fn test_new_local_provider_missing_bucket_dir() {
        let (_root, config) = local_bucket("media");
        match ObjectStoreProvider::new(config, "other").await {
            Err(StorageError::ConfigError(msg)) => {
                assert!(msg.contains("bucket directory must exist"))
            }
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_local_provider_missing_path() {
        match ObjectStoreProvider::new(StorageConfig::local(), "media").await {
            Err(StorageError::ConfigError(msg)) => assert!(msg.contains("path")),
            other => panic!("Expected ConfigError for missing path, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_provider_empty_bucket() {
        let (_root, config) = local_bucket("media");
        let result = ObjectStoreProvider::new(config, "  ").await;
        assert!(matches!(result, Err(StorageError::InvalidArgument(_))));
    }

    #[test]
    fn test_uri_from_path_gcs() {
        let provider = memory_provider();
        assert_eq!(
            provider.uri_from_path("/videos/out.mp4"),
            "gs://mem-bucket/videos/out.mp4"
        );
    }

    #[tokio::test]
    async fn test_stat_and_exists() {
        let (root, config) = local_bucket("media");
        fs::create_dir(root.path().join("media/videos")).unwrap();
        fs::write(root.path().join("media/videos/a.mp4"), b"0123456789").unwrap();

        let provider = ObjectStoreProvider::new(config, "media").await.unwrap();

        let meta = provider.stat("videos/a.mp4").await.unwrap().unwrap();
        assert_eq!(meta.path, "videos/a.mp4");
        assert_eq!(meta.size, 10);
        assert!(meta.last_modified.is_some());

        assert!(provider.exists("videos/a.mp4").await.unwrap());
        assert!(!provider.exists("videos/missing.mp4").await.unwrap());
        assert!(provider.stat("videos/missing.mp4").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_download_to_file() {
        let provider = memory_provider();
        let content = b"frame data".repeat(1000);
        provider
            .store
            .put(&ObjectPath::from("in/clip.bin"), PutPayload::from(content.clone()))
            .await
            .unwrap();

        let out = TempDir::new().unwrap();
        let dest = out.path().join("clip.bin");
        fs::write(&dest, b"stale content that is longer than nothing").unwrap();

        let written = provider.download_to_file("in/clip.bin", &dest).await.unwrap();
        assert_eq!(written, content.len() as u64);
        assert_eq!(fs::read(&dest).unwrap(), content);
        assert!(!out.path().join("clip.bin.part").exists());
    }

    #[tokio::test]
    async fn test_interrupted_stream_keeps_existing_file() {
        let out = TempDir::new().unwrap();
        let dest = out.path().join("clip.bin");
        fs::write(&dest, b"previous download").unwrap();

        let chunks: Vec<object_store::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"first chunk")),
            Err(object_store::Error::Generic {
                store: "GCS",
                source: Box::new(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
            }),
        ];
        let err = stream_into_file(stream::iter(chunks).boxed(), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ObjectStoreError(_)));
        assert_eq!(fs::read(&dest).unwrap(), b"previous download");
        assert!(!out.path().join("clip.bin.part").exists());
    }

    #[tokio::test]
    async fn test_object_keys_are_not_reencoded() {
        let (root, config) = local_bucket("media");
        let provider = ObjectStoreProvider::new(config, "media").await.unwrap();
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("take#1 [final].txt");
        fs::write(&local, b"take").unwrap();

        provider
            .upload_from_file(&local, "out/take#1 [final].txt", true)
            .await
            .unwrap();
        assert!(root.path().join("media/out/take#1 [final].txt").is_file());
        assert!(provider.exists("out/take#1 [final].txt").await.unwrap());

        let err = provider
            .upload_from_file(&local, "out//take.txt", true)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_download_missing_object() {
        let provider = memory_provider();
        let out = TempDir::new().unwrap();
        let err = provider
            .download_to_file("nope.bin", &out.path().join("nope.bin"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!out.path().join("nope.bin").exists());
    }

    #[tokio::test]
    async fn test_upload_create_only_conflict() {
        let provider = memory_provider();
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, b"first").unwrap();
        fs::write(&second, b"second").unwrap();

        provider.upload_from_file(&first, "k.txt", true).await.unwrap();
        let err = provider
            .upload_from_file(&second, "k.txt", true)
            .await
            .unwrap_err();
        assert!(err.is_already_exists(), "unexpected error: {:?}", err);

        let stored = provider
            .store
            .get(&ObjectPath::from("k.txt"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(stored.as_ref(), b"first");
    }

    #[tokio::test]
    async fn test_upload_overwrite_when_not_create_only() {
        let provider = memory_provider();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"v1").unwrap();
        provider.upload_from_file(&file, "k.txt", false).await.unwrap();
        fs::write(&file, b"v2").unwrap();
        provider.upload_from_file(&file, "k.txt", false).await.unwrap();

        let meta = provider.stat("k.txt").await.unwrap().unwrap();
        assert_eq!(meta.size, 2);
    }

    #[tokio::test]
    async fn test_upload_missing_local_file() {
        let provider = memory_provider();
        let err = provider
            .upload_from_file(Path::new("/nonexistent/file.txt"), "k.txt", true)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::IoError(_)));
        assert!(!provider.exists("k.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_many_skips_existing() {
        let provider = memory_provider();
        provider
            .store
            .put(&ObjectPath::from("out/a/x.txt"), PutPayload::from_static(b"remote"))
            .await
            .unwrap();

        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/x.txt"), b"local x").unwrap();
        fs::write(dir.path().join("b/y.txt"), b"local y").unwrap();

        let results = provider
            .upload_many(
                dir.path(),
                vec!["a/x.txt".to_string(), "b/y.txt".to_string()],
                "out/",
                true,
                4,
            )
            .await;

        assert_eq!(results.len(), 2);
        for result in &results {
            match result.path.as_str() {
                "a/x.txt" => assert!(result
                    .outcome
                    .as_ref()
                    .is_err_and(|e| e.is_already_exists())),
                "b/y.txt" => assert!(result.outcome.is_ok()),
                other => panic!("unexpected path {}", other),
            }
        }

        let x = provider
            .store
            .get(&ObjectPath::from("out/a/x.txt"))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(x.as_ref(), b"remote");
        assert!(provider.exists("out/b/y.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_many_reports_missing_files() {
        let provider = memory_provider();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.txt"), b"ok").unwrap();

        let results = provider
            .upload_many(
                dir.path(),
                vec!["ok.txt".to_string(), "gone.txt".to_string()],
                "p/",
                true,
                0,
            )
            .await;

        assert_eq!(results.len(), 2);
        let gone = results.iter().find(|r| r.path == "gone.txt").unwrap();
        assert!(gone.outcome.as_ref().is_err_and(|e| e.is_not_found()));
        let ok = results.iter().find(|r| r.path == "ok.txt").unwrap();
        assert!(ok.outcome.is_ok());
    }

    #[tokio::test]
    async fn test_upload_many_rejects_unrepresentable_key() {
        let provider = memory_provider();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.txt"), b"ok").unwrap();

        let results = provider
            .upload_many(dir.path(), vec!["ok.txt".to_string()], "p//", true, 2)
            .await;

        assert_eq!(results.len(), 1);
        assert!(matches!(
            results[0].outcome,
            Err(StorageError::InvalidArgument(_))
        ));
        assert!(!provider.exists("p/ok.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_uri_from_path_local() {
        let (_root, config) = local_bucket("media");
        let provider = ObjectStoreProvider::new(config, "media").await.unwrap();

        let uri = provider.uri_from_path("/videos/a.mp4");
        assert!(uri.starts_with("file:///"), "got {}", uri);
        assert!(uri.ends_with("/media/videos/a.mp4"), "got {}", uri);
        assert!(!uri.contains('\\'));
        assert!(!uri[8..].contains("//"), "got {}", uri);
    }

    #[tokio::test]
    async fn test_provider_debug_format() {
        let (_root, config) = local_bucket("media");
        let provider = ObjectStoreProvider::new(config, "media").await.unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("StorageProvider"));
        assert!(debug_str.contains("local"));
        assert!(debug_str.contains("bucket=media"));
    }
}
