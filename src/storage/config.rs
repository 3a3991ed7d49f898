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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::{StorageError, StorageResult};

/// Default number of concurrent transfers for directory uploads.
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Storage provider type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Local filesystem, one directory per bucket
    Local,
    /// Google Cloud Storage
    Gcs,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Local => "local",
            StorageType::Gcs => "gcs",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "file" => Ok(StorageType::Local),
            "gcs" | "gcp" | "gs" => Ok(StorageType::Gcs),
            _ => Err(StorageError::ConfigError(format!(
                "Unknown storage type: {}",
                s
            ))),
        }
    }
}

/// Configuration used to resolve a bucket into a storage provider.
///
/// Options are a flat string map handed to the `object_store` builders, the
/// same way for every bucket. The bucket itself is not part of the
/// configuration; it is supplied per operation.
///
/// # Examples
///
/// ## Google Cloud Storage
/// ```
/// use bucket_transfer::storage::StorageConfig;
///
/// let config = StorageConfig::gcs()
///     .with_option("service_account_key_path", "/path/to/key.json");
/// ```
///
/// ## Local filesystem
/// ```
/// use bucket_transfer::storage::StorageConfig;
///
/// // Bucket "media" lives in /srv/buckets/media
/// let config = StorageConfig::local().with_option("path", "/srv/buckets");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider type
    #[serde(rename = "type")]
    pub storage_type: StorageType,

    /// Provider-specific configuration options
    ///
    /// GCS:
    /// - service_account_key_path: Path to service account JSON key file
    /// - service_account_key: Service account key as JSON string
    /// - application_credentials: Path to application default credentials
    ///
    /// Local:
    /// - path: Root directory holding one sub-directory per bucket
    ///
    /// Shared:
    /// - timeout, connect_timeout, pool_idle_timeout (seconds)
    /// - pool_max_idle_per_host, max_retries, retry_timeout
    /// - max_workers: concurrent transfers for directory uploads
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl StorageConfig {
    /// Create a new storage configuration from a type name such as `"gcs"`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ConfigError` if the type name is unknown.
    pub fn new(storage_type: impl AsRef<str>) -> StorageResult<Self> {
        let storage_type = storage_type.as_ref().parse::<StorageType>()?;
        Ok(Self {
            storage_type,
            options: Self::default_options(),
        })
    }

    /// Create a local filesystem storage configuration.
    pub fn local() -> Self {
        Self {
            storage_type: StorageType::Local,
            options: Self::default_options(),
        }
    }

    /// Create a GCS storage configuration.
    ///
    /// Credentials are picked up from the environment when no explicit
    /// key option is given.
    pub fn gcs() -> Self {
        Self {
            storage_type: StorageType::Gcs,
            options: Self::default_options(),
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// The file has the same shape as the serialized config:
    /// `{"type": "gcs", "options": {"max_workers": "16"}}`. Default options
    /// are filled in for keys the file does not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid config.
    pub fn from_json_file(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: StorageConfig = serde_json::from_str(&content).map_err(|e| {
            StorageError::ConfigError(format!(
                "Invalid storage config '{}': {}",
                path.display(),
                e
            ))
        })?;
        for (key, value) in Self::default_options() {
            config.options.entry(key).or_insert(value);
        }
        Ok(config)
    }

    /// Get default options for all storage types.
    pub fn default_options() -> HashMap<String, String> {
        [
            ("timeout", "1200"),
            ("connect_timeout", "30"),
            ("max_retries", "20"),
            ("retry_timeout", "1200"),
            ("pool_idle_timeout", "15"),
            ("pool_max_idle_per_host", "5"),
            ("max_workers", "8"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    /// Add a configuration option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Add multiple configuration options.
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }

    /// Get a configuration option.
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }

    /// Number of concurrent transfers for directory uploads.
    ///
    /// Falls back to [`DEFAULT_MAX_WORKERS`] when the option is missing,
    /// unparsable or zero.
    pub fn max_workers(&self) -> usize {
        self.options
            .get("max_workers")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_WORKERS)
    }

    /// Get the storage type as a string.
    pub fn storage_type_str(&self) -> &str {
        self.storage_type.as_str()
    }
}
