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

use async_trait::async_trait;
use object_store::path::Path as ObjectPath;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

use super::error::{StorageError, StorageResult};

/// Metadata about an object in storage
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Object key
    pub path: String,

    /// Object size in bytes
    pub size: u64,

    /// Last modified timestamp (if available)
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Outcome of one file in a bulk upload.
///
/// `outcome` is `Ok(())` when the object was written. When the upload ran
/// with skip-if-exists and the object was already present, `outcome` is an
/// error whose kind is `AlreadyExists`.
#[derive(Debug)]
pub struct TransferResult {
    /// Path of the file relative to the uploaded directory, `/`-separated
    pub path: String,

    /// Result of the transfer
    pub outcome: StorageResult<()>,
}

/// Storage capability bound to a single bucket.
///
/// Implementations own client construction, credentials, retries and
/// connection reuse. Callers only see keys relative to the bucket.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Get the base path/prefix for this storage provider.
    ///
    /// For GCS this is `gs://<bucket>`, for local storage the bucket directory.
    fn base_path(&self) -> &str;

    /// Check if an object exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The object exists
    /// * `Ok(false)` - The object does not exist
    /// * `Err(StorageError)` - If the existence check fails (not including NotFound)
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get metadata for an object, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Permission denied
    /// * Network or storage access errors occur
    async fn stat(&self, key: &str) -> StorageResult<Option<FileMetadata>>;

    /// Stream an object into a local file, creating or truncating it.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The object does not exist
    /// * The destination cannot be written
    /// * Network or storage access errors occur
    async fn download_to_file(&self, key: &str, destination: &Path) -> StorageResult<u64>;

    /// Upload a local file to `key`.
    ///
    /// With `create_only` the write is conditional on no object existing at
    /// `key`; a lost race or an existing object yields an error whose kind is
    /// `AlreadyExists` and nothing is written.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The local file cannot be read
    /// * `create_only` is set and the object exists
    /// * Network or storage access errors occur
    async fn upload_from_file(&self, local: &Path, key: &str, create_only: bool)
        -> StorageResult<()>;

    /// Upload many files below `source_dir` concurrently.
    ///
    /// Every entry of `relative_paths` is read from `source_dir/<path>` and
    /// written to `<key_prefix><path>`; the prefix is used as given. At most
    /// `max_workers` transfers run at once. Results come back in completion
    /// order, one per input path.
    ///
    /// With `skip_if_exists`, objects that are already present are not
    /// touched and are reported with an `AlreadyExists` error.
    async fn upload_many(
        &self,
        source_dir: &Path,
        relative_paths: Vec<String>,
        key_prefix: &str,
        skip_if_exists: bool,
        max_workers: usize,
    ) -> Vec<TransferResult>;

    /// Get a full provider-specific URL for a key, e.g. `gs://bucket/key`.
    fn uri_from_path(&self, key: &str) -> String;
}

impl Debug for dyn StorageProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StorageProvider(base_path={})", self.base_path())
    }
}

/// Parse an object key without re-encoding it.
///
/// Keys that `object_store` cannot carry byte for byte (empty segments,
/// leading or trailing `/`, control characters, `.` or `..` segments) are
/// rejected rather than rewritten.
pub(crate) fn key_to_path(key: &str) -> StorageResult<ObjectPath> {
    if key.is_empty() {
        return Err(StorageError::InvalidArgument(
            "object key must not be empty".to_string(),
        ));
    }
    let path = ObjectPath::parse(key)
        .map_err(|e| StorageError::InvalidArgument(format!("invalid object key \"{}\": {}", key, e)))?;
    if path.as_ref() != key {
        return Err(StorageError::InvalidArgument(format!(
            "object key \"{}\" cannot be stored verbatim",
            key
        )));
    }
    Ok(path)
}
