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

//! # Bucket Transfer
//!
//! Moves files between local disk and object storage buckets.
//!
//! Three operations are offered by [`TransferGateway`]:
//!
//! - **download_gcs_file**: fetch one object into a local directory, or get
//!   `None` back when it does not exist
//! - **upload_gcs_file**: upload one file with a create-only precondition;
//!   an existing object is reported as an `AlreadyExists` error and is never
//!   overwritten
//! - **upload_gcs_dir**: upload a whole directory tree under a key prefix,
//!   concurrently, skipping objects that already exist
//!
//! Networking, credentials and retries are handled by the `object_store`
//! client. Each operation builds its own client for the bucket it is given.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bucket_transfer::{StorageConfig, TransferGateway, TriggerFile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! // Credentials come from GOOGLE_APPLICATION_CREDENTIALS & co.
//! let gateway = TransferGateway::new(StorageConfig::gcs());
//!
//! let input = TriggerFile::new("campaign/input.mp4");
//! if let Some(path) = gateway.download_gcs_file(&input, "/tmp", "my-bucket").await? {
//!     println!("downloaded to {}", path.display());
//! }
//!
//! gateway
//!     .upload_gcs_file("/tmp/render.mp4", "campaign/output/render.mp4", "my-bucket")
//!     .await?;
//!
//! let summary = gateway
//!     .upload_gcs_dir("/tmp/frames", "my-bucket", "campaign/frames")
//!     .await?;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`storage`] - Backend configuration, errors and the `object_store` provider
//! - [`transfer`] - The transfer gateway and its data types

pub mod storage;
pub mod transfer;

// Re-export commonly used types
pub use storage::{ErrorKind, StorageConfig, StorageError, StorageResult};
pub use transfer::{TransferGateway, TriggerFile, UploadSummary};
