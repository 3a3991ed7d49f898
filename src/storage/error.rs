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

use std::io;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),
}

/// Coarse classification of a [`StorageError`].
///
/// Callers branch on the kind rather than on backend status codes. A GCS
/// `412 Precondition Failed` on a create-only write and a local
/// `EEXIST` both surface as [`ErrorKind::AlreadyExists`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The object or file does not exist.
    NotFound,
    /// A create-only write found an object already at the key.
    AlreadyExists,
    /// Connection-level failure that may succeed if repeated.
    Transient,
    /// Everything else: auth, permissions, configuration, bad paths.
    Permanent,
}

const TRANSIENT_MARKERS: [&str; 4] = ["ConnectionReset", "BrokenPipe", "Interrupted", "TimedOut"];

fn io_kind(err: &io::Error) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::Interrupted
        | io::ErrorKind::TimedOut => ErrorKind::Transient,
        _ => ErrorKind::Permanent,
    }
}

impl StorageError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::IoError(e) => io_kind(e),
            StorageError::ObjectStoreError(e) => match e {
                object_store::Error::NotFound { .. } => ErrorKind::NotFound,
                object_store::Error::AlreadyExists { .. }
                | object_store::Error::Precondition { .. } => ErrorKind::AlreadyExists,
                object_store::Error::Generic { source, .. } => {
                    let detail = format!("{:?}", source);
                    if TRANSIENT_MARKERS.iter().any(|m| detail.contains(m)) {
                        ErrorKind::Transient
                    } else {
                        ErrorKind::Permanent
                    }
                }
                _ => ErrorKind::Permanent,
            },
            StorageError::WalkError(e) => e.io_error().map(io_kind).unwrap_or(ErrorKind::Permanent),
            StorageError::ConfigError(_) | StorageError::InvalidArgument(_) => {
                ErrorKind::Permanent
            }
        }
    }

    /// Whether a create-only write was refused because the key is taken.
    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }

    /// Whether the target object or file was missing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
