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

//! Object storage backend layer
//!
//! This module wraps the `object_store` crate behind a small per-bucket
//! [`StorageProvider`] trait. Providers are created through a
//! [`BucketResolver`], by default the [`StorageProviderFactory`], which
//! builds a fresh client for every bucket it is asked for.
//!
//! Supported backends are Google Cloud Storage and a local directory layout
//! (one sub-directory per bucket) used for development and tests.

pub mod config;
pub mod error;
pub mod factory;
pub mod object_store;
pub mod provider;

// Public exports
pub use config::{StorageConfig, StorageType};
pub use error::{ErrorKind, StorageError, StorageResult};
pub use factory::{BucketResolver, StorageProviderFactory};
pub use provider::{FileMetadata, StorageProvider, TransferResult};
