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
use std::fmt;

/// Reference to a remote object and the local name it is downloaded as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerFile {
    /// Object key within the bucket, e.g. `campaign/video/input.mp4`
    pub full_gcs_path: String,

    /// Base file name with extension, e.g. `input.mp4`
    pub file_name_ext: String,
}

impl TriggerFile {
    /// Reference `full_gcs_path`, naming the local file after its last segment.
    pub fn new(full_gcs_path: impl Into<String>) -> Self {
        let full_gcs_path = full_gcs_path.into();
        let file_name_ext = full_gcs_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            full_gcs_path,
            file_name_ext,
        }
    }

    pub fn with_file_name(
        full_gcs_path: impl Into<String>,
        file_name_ext: impl Into<String>,
    ) -> Self {
        Self {
            full_gcs_path: full_gcs_path.into(),
            file_name_ext: file_name_ext.into(),
        }
    }

    /// File name without its extension.
    pub fn file_name(&self) -> &str {
        match self.file_name_ext.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name_ext,
        }
    }

    /// Extension without the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        match self.file_name_ext.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Key prefix holding the object, empty for objects at the bucket root.
    pub fn dir_path(&self) -> &str {
        self.full_gcs_path
            .trim_end_matches('/')
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or_default()
    }
}

impl fmt::Display for TriggerFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_gcs_path)
    }
}
