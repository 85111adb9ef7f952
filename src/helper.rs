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

use std::fs::copy;
use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use tempfile::tempdir;
use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Create a fresh temporary directory that outlives the `TempDir` guard.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?;
    let path: PathBuf = dir.keep().canonicalize()?;
    Ok(path)
}

/// Copy the `./test` fixture course into a temporary directory, skipping
/// any storage database left behind by a previous run.
pub fn create_tmp_copy_of_test_directory() -> Fallible<PathBuf> {
    let source: PathBuf = PathBuf::from("./test").canonicalize()?;
    let target: PathBuf = create_tmp_directory()?;
    for entry in WalkDir::new(&source) {
        let entry = entry?;
        let path: &Path = entry.path();
        let relative = path
            .strip_prefix(&source)
            .map_err(|_| ErrorReport::new("fixture path outside the fixture root"))?;
        let target_path = target.join(relative);
        if path.is_dir() {
            create_dir_all(&target_path)?;
        } else if path.file_name().is_some_and(|name| name != "coursenav.db") {
            copy(path, &target_path)?;
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_copy_of_test_directory() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        assert!(dir.join("course.toml").exists());
        assert!(dir.join("html/main.html").exists());
        assert!(!dir.join("coursenav.db").exists());
        Ok(())
    }
}
