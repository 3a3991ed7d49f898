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

use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use crate::storage::{StorageError, StorageResult, TransferResult};

/// Files found below a source directory.
#[derive(Debug, Default)]
pub struct SourceFiles {
    /// Paths relative to the source directory, joined with `/`, sorted
    pub paths: Vec<String>,
    /// Files whose name cannot become an object key
    pub rejected: Vec<TransferResult>,
}

/// List every regular file below `source_dir`.
///
/// A symlink to a regular file counts as a file; symlinked directories are
/// not descended into. Files whose relative path is not valid UTF-8 are
/// reported in [`SourceFiles::rejected`] instead of being renamed.
pub fn source_files(source_dir: &Path) -> StorageResult<SourceFiles> {
    if !source_dir.is_dir() {
        return Err(StorageError::InvalidArgument(format!(
            "source directory is not a directory: {}",
            source_dir.display()
        )));
    }

    let mut files = SourceFiles::default();
    for entry in WalkDir::new(source_dir).min_depth(1) {
        let entry = entry?;
        if !is_regular_file(&entry) {
            continue;
        }
        let relative = entry.path().strip_prefix(source_dir).map_err(|e| {
            StorageError::InvalidArgument(format!(
                "{} is outside {}: {}",
                entry.path().display(),
                source_dir.display(),
                e
            ))
        })?;
        match to_key_path(relative) {
            Some(path) => files.paths.push(path),
            None => files.rejected.push(TransferResult {
                path: relative.to_string_lossy().into_owned(),
                outcome: Err(StorageError::InvalidArgument(format!(
                    "file name is not valid UTF-8: {}",
                    entry.path().display()
                ))),
            }),
        }
    }
    files.paths.sort();
    Ok(files)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        // Broken links and links to directories are skipped
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

fn to_key_path(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_str()?);
        }
    }
    Some(parts.join("/"))
}

/// Prefix prepended to every relative path: `target_dir` plus `/`, or
/// nothing when `target_dir` is empty.
pub fn key_prefix(target_dir: &str) -> String {
    let trimmed = target_dir.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_source_files_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/deep/er")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("top.txt"), b"t").unwrap();
        fs::write(dir.path().join("a/x.txt"), b"x").unwrap();
        fs::write(dir.path().join("a/deep/er/z.bin"), b"z").unwrap();
        fs::write(dir.path().join("b/y.txt"), b"y").unwrap();

        let files = source_files(dir.path()).unwrap();
        assert_eq!(
            files.paths,
            vec!["a/deep/er/z.bin", "a/x.txt", "b/y.txt", "top.txt"]
        );
        assert!(files.rejected.is_empty());
    }

    #[test]
    fn test_source_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(source_files(dir.path()).unwrap().paths.is_empty());
    }

    #[test]
    fn test_source_files_not_a_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"f").unwrap();

        let result = source_files(&file);
        assert!(matches!(result, Err(StorageError::InvalidArgument(_))));
        assert!(matches!(
            source_files(&dir.path().join("missing")),
            Err(StorageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_names_are_not_reencoded() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("with space")).unwrap();
        fs::write(dir.path().join("with space/ünï.txt"), b"u").unwrap();
        fs::write(dir.path().join("take#1 [final].txt"), b"t").unwrap();

        let files = source_files(dir.path()).unwrap();
        assert_eq!(files.paths, vec!["take#1 [final].txt", "with space/ünï.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_listed() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::create_dir_all(outside.path().join("other")).unwrap();
        fs::write(outside.path().join("other/real.txt"), b"real").unwrap();
        fs::write(outside.path().join("other/hidden.txt"), b"hidden").unwrap();

        fs::write(dir.path().join("plain.txt"), b"plain").unwrap();
        symlink(outside.path().join("other/real.txt"), dir.path().join("link.txt")).unwrap();
        symlink(outside.path().join("other"), dir.path().join("linked_dir")).unwrap();
        symlink(outside.path().join("gone.txt"), dir.path().join("broken.txt")).unwrap();

        let files = source_files(dir.path()).unwrap();
        assert_eq!(files.paths, vec!["link.txt", "plain.txt"]);
        assert!(files.rejected.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.txt"), b"ok").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.txt")), b"bad").unwrap();

        let files = source_files(dir.path()).unwrap();
        assert_eq!(files.paths, vec!["ok.txt"]);
        assert_eq!(files.rejected.len(), 1);
        assert!(matches!(
            files.rejected[0].outcome,
            Err(StorageError::InvalidArgument(_))
        ));
        assert!(files.rejected[0].path.starts_with("bad"));
    }

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix("out"), "out/");
        assert_eq!(key_prefix("out/"), "out/");
        assert_eq!(key_prefix("out/nested"), "out/nested/");
        assert_eq!(key_prefix(""), "");
        assert_eq!(key_prefix("/"), "");
    }
}
