// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Component;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::storage::STORAGE_FILE_NAME;

/// Read access to the files of a course directory.
#[derive(Clone)]
pub struct CourseFiles {
    /// Absolute path to the course root directory.
    root: PathBuf,
}

#[derive(Debug, PartialEq)]
pub enum CourseFileError {
    /// Path is absolute.
    Absolute,
    /// Path does not exist.
    NotFound,
    /// Path is not a file.
    NotFile,
    /// Path points to a symbolic link.
    SymbolicLink,
    /// Path contains parent (`..`) components.
    ParentComponent,
    /// Path resolves to a location outside the course root.
    OutsideRoot,
    /// Path names the course configuration or the progress database.
    Private,
}

impl CourseFiles {
    /// Construct a new [`CourseFiles`].
    pub fn new(root: PathBuf) -> Self {
        assert!(root.is_absolute());
        Self { root }
    }

    /// Given a course-relative path, check that a file exists at that
    /// location within the course root directory.
    ///
    /// Symbolic links and absolute paths are rejected, as is any path
    /// that resolves outside the root through a linked directory.
    pub fn validate(&self, path: &str) -> Result<PathBuf, CourseFileError> {
        let path: PathBuf = PathBuf::from(path);
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(CourseFileError::ParentComponent);
        }
        if path.is_absolute() {
            return Err(CourseFileError::Absolute);
        }
        let path: PathBuf = self.root.join(path);
        if path.is_symlink() {
            return Err(CourseFileError::SymbolicLink);
        }
        let canonical: PathBuf = path.canonicalize().map_err(|_| CourseFileError::NotFound)?;
        let root: PathBuf = self
            .root
            .canonicalize()
            .map_err(|_| CourseFileError::NotFound)?;
        if !canonical.starts_with(&root) {
            return Err(CourseFileError::OutsideRoot);
        }
        if canonical.parent() == Some(root.as_path()) {
            let name = canonical
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            // SQLite keeps `-journal` and `-wal` files next to the database.
            if name == CONFIG_FILE_NAME || name.starts_with(STORAGE_FILE_NAME) {
                return Err(CourseFileError::Private);
            }
        }
        if !canonical.is_file() {
            return Err(CourseFileError::NotFile);
        }
        Ok(canonical)
    }
}
