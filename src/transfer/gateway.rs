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

use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::trigger_file::TriggerFile;
use super::walk::{key_prefix, source_files};
use crate::storage::{
    BucketResolver, ErrorKind, StorageConfig, StorageError, StorageProvider,
    StorageProviderFactory, StorageResult,
};

/// Per-file tally of a directory upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    /// Files written as new objects
    pub uploaded: usize,
    /// Files whose object already existed and was left untouched
    pub skipped: usize,
    /// Files that failed, with the error message
    pub failed: Vec<(String, String)>,
}

impl UploadSummary {
    pub fn total(&self) -> usize {
        self.uploaded + self.skipped + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={} uploaded={} skipped={} failed={}",
            self.total(),
            self.uploaded,
            self.skipped,
            self.failed.len()
        )
    }
}

/// Builder for constructing a `TransferGateway`.
///
/// # Examples
///
/// ```no_run
/// use bucket_transfer::storage::StorageConfig;
/// use bucket_transfer::transfer::TransferGateway;
///
/// let gateway = TransferGateway::builder(StorageConfig::gcs())
///     .with_max_workers(16)
///     .build();
/// ```
pub struct TransferGatewayBuilder {
    config: StorageConfig,
    max_workers: Option<usize>,
    resolver: Option<Arc<dyn BucketResolver>>,
}

impl TransferGatewayBuilder {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            max_workers: None,
            resolver: None,
        }
    }

    /// Sets the number of concurrent transfers used by `upload_gcs_dir`.
    ///
    /// Overrides the `max_workers` configuration option.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// Replaces the default [`StorageProviderFactory`] used to resolve buckets.
    pub fn with_resolver(mut self, resolver: Arc<dyn BucketResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> TransferGateway {
        let max_workers = self
            .max_workers
            .filter(|n| *n > 0)
            .unwrap_or_else(|| self.config.max_workers());
        let resolver: Arc<dyn BucketResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Arc::new(StorageProviderFactory::new(self.config.clone())),
        };

        TransferGateway {
            config: self.config,
            max_workers,
            resolver,
        }
    }
}

/// Moves single objects and whole directories between local disk and buckets.
///
/// Every operation resolves its own provider for the bucket it is given and
/// releases it on return, so one gateway can serve concurrent callers
/// against any number of buckets.
pub struct TransferGateway {
    config: StorageConfig,
    max_workers: usize,
    resolver: Arc<dyn BucketResolver>,
}

impl TransferGateway {
    /// Create a gateway with default settings for `config`.
    pub fn new(config: StorageConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: StorageConfig) -> TransferGatewayBuilder {
        TransferGatewayBuilder::new(config)
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    async fn resolve_bucket(&self, bucket_name: &str) -> StorageResult<Arc<dyn StorageProvider>> {
        if bucket_name.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "bucket name must not be empty".to_string(),
            ));
        }
        self.resolver.resolve(bucket_name).await
    }

    /// Download `file_path` from `bucket_name` into `output_dir`.
    ///
    /// The local file is named after `file_path.file_name_ext` and is
    /// overwritten if present.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` - The object was downloaded to `path`
    /// * `Ok(None)` - The object does not exist; nothing was written
    ///
    /// # Errors
    ///
    /// Backend, credential, network and local I/O failures are returned
    /// unchanged. A missing object is not an error.
    pub async fn download_gcs_file(
        &self,
        file_path: &TriggerFile,
        output_dir: impl AsRef<Path>,
        bucket_name: &str,
    ) -> StorageResult<Option<PathBuf>> {
        if file_path.full_gcs_path.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "object key must not be empty".to_string(),
            ));
        }
        if file_path.file_name_ext.is_empty() {
            return Err(StorageError::InvalidArgument(format!(
                "no local file name for object \"{}\"",
                file_path.full_gcs_path
            )));
        }
        let provider = self.resolve_bucket(bucket_name).await?;

        if provider.stat(&file_path.full_gcs_path).await?.is_none() {
            warn!(
                "Could not find file \"{}\" in bucket \"{}\".",
                file_path.full_gcs_path, bucket_name
            );
            return Ok(None);
        }

        let destination = output_dir.as_ref().join(&file_path.file_name_ext);
        let bytes = provider
            .download_to_file(&file_path.full_gcs_path, &destination)
            .await?;
        debug!(
            "Downloaded uri={} bytes={}",
            provider.uri_from_path(&file_path.full_gcs_path),
            bytes
        );
        info!(
            "Fetched file \"{}\" from bucket \"{}\".",
            file_path.full_gcs_path, bucket_name
        );
        Ok(Some(destination))
    }

    /// Upload the local file `file_path` as `destination_file_name`.
    ///
    /// The write only succeeds if no object exists at the key yet.
    ///
    /// # Errors
    ///
    /// If the object already exists the returned error has kind
    /// [`ErrorKind::AlreadyExists`] and nothing is written. All other
    /// failures are returned unchanged.
    pub async fn upload_gcs_file(
        &self,
        file_path: impl AsRef<Path>,
        destination_file_name: &str,
        bucket_name: &str,
    ) -> StorageResult<()> {
        if destination_file_name.trim().is_empty() {
            return Err(StorageError::InvalidArgument(
                "destination object key must not be empty".to_string(),
            ));
        }
        let provider = self.resolve_bucket(bucket_name).await?;

        provider
            .upload_from_file(file_path.as_ref(), destination_file_name, true)
            .await?;

        info!("UPLOAD - Uploaded path \"{}\".", destination_file_name);
        Ok(())
    }

    /// Upload every file below `source_directory` to `target_dir/<relative path>`.
    ///
    /// Objects that already exist are skipped, never overwritten. Individual
    /// file failures are logged and counted in the summary; they do not fail
    /// the call.
    ///
    /// # Errors
    ///
    /// Only setup failures are returned: an invalid bucket name, a source
    /// path that is not a readable directory, or a bucket that cannot be
    /// resolved.
    pub async fn upload_gcs_dir(
        &self,
        source_directory: impl AsRef<Path>,
        bucket_name: &str,
        target_dir: &str,
    ) -> StorageResult<UploadSummary> {
        let source_directory = source_directory.as_ref();
        let listing = {
            let source = source_directory.to_path_buf();
            tokio::task::spawn_blocking(move || source_files(&source))
                .await
                .map_err(|e| StorageError::IoError(io::Error::other(e)))??
        };
        let provider = self.resolve_bucket(bucket_name).await?;
        let prefix = key_prefix(target_dir);

        info!(
            "Uploading count={} files from={} to bucket={} prefix={}",
            listing.paths.len() + listing.rejected.len(),
            source_directory.display(),
            bucket_name,
            prefix
        );

        let mut results = provider
            .upload_many(
                source_directory,
                listing.paths,
                &prefix,
                true,
                self.max_workers,
            )
            .await;
        results.extend(listing.rejected);

        let mut summary = UploadSummary::default();
        for result in results {
            match result.outcome {
                Ok(()) => {
                    info!("UPLOAD - Uploaded path \"{}\".", result.path);
                    summary.uploaded += 1;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    info!(
                        "UPLOAD - Skipped path \"{}\", object already exists.",
                        result.path
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!(
                        "UPLOAD - Failed to upload path \"{}\" due to exception: {}.",
                        result.path, e
                    );
                    summary.failed.push((result.path, e.to_string()));
                }
            }
        }

        info!("UPLOAD - Finished directory upload {}", summary);
        Ok(summary)
    }
}

impl fmt::Debug for TransferGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransferGateway(storage_type={}, max_workers={})",
            self.config.storage_type_str(),
            self.max_workers
        )
    }
}
