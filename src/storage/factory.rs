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
use std::sync::Arc;

use super::config::StorageConfig;
use super::error::StorageResult;
use super::object_store::ObjectStoreProvider;
use super::provider::StorageProvider;

/// Turns a bucket name into a storage provider bound to that bucket.
///
/// The transfer gateway calls this once per operation and drops the
/// provider when the operation returns.
#[async_trait]
pub trait BucketResolver: Send + Sync {
    /// Resolve `bucket_name` into a provider.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * The bucket name is empty
    /// * The storage configuration is invalid
    /// * The client cannot be initialized
    async fn resolve(&self, bucket_name: &str) -> StorageResult<Arc<dyn StorageProvider>>;
}

/// Factory for creating storage providers
#[derive(Debug, Clone)]
pub struct StorageProviderFactory {
    config: StorageConfig,
}

impl StorageProviderFactory {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Create a storage provider for one bucket from a configuration.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// * Required configuration options are missing
    /// * The storage provider cannot be initialized
    pub async fn from_config(
        config: StorageConfig,
        bucket_name: &str,
    ) -> StorageResult<Arc<dyn StorageProvider>> {
        let provider = ObjectStoreProvider::new(config, bucket_name).await?;
        Ok(Arc::new(provider))
    }
}

#[async_trait]
impl BucketResolver for StorageProviderFactory {
    async fn resolve(&self, bucket_name: &str) -> StorageResult<Arc<dyn StorageProvider>> {
        Self::from_config(self.config.clone(), bucket_name).await
    }
}
