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

use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::CourseConfig;
use crate::content::files::CourseFiles;
use crate::content::locate::normalize;
use crate::error::Fallible;
use crate::error::fail;
use crate::navigator::LessonFamily;
use crate::sidebar::Sidebar;
use crate::storage::STORAGE_FILE_NAME;
use crate::storage::Storage;

/// A course directory, loaded and validated.
pub struct Course {
    pub directory: PathBuf,
    pub config: CourseConfig,
    /// Course-relative path of the shell page, with `/` separators.
    pub shell_path: String,
    pub sidebar: Sidebar,
    pub storage: Storage,
    pub families: Vec<LessonFamily>,
}

impl Course {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = CourseConfig::load(&directory)?;

        let shell_path = match normalize(Path::new(&config.shell)) {
            Some(path) if !path.as_os_str().is_empty() => path
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            _ => return fail(format!("invalid shell path: {}", config.shell)),
        };

        let sidebar = {
            log::debug!("Loading sidebar from {shell_path}...");
            let start = Instant::now();
            let sidebar = Sidebar::load(&directory.join(&shell_path))?;
            let duration = start.elapsed().as_millis();
            log::debug!(
                "Found {} lessons in {} chapters in {duration}ms.",
                sidebar.lessons.len(),
                sidebar.chapters.len()
            );
            sidebar
        };

        let storage = Storage::open(&directory.join(STORAGE_FILE_NAME))?;

        let families = config
            .families
            .iter()
            .map(LessonFamily::new)
            .collect::<Fallible<Vec<_>>>()?;

        Ok(Self {
            directory,
            config,
            shell_path,
            sidebar,
            storage,
            families,
        })
    }

    pub fn files(&self) -> CourseFiles {
        CourseFiles::new(self.directory.clone())
    }

    /// Course-relative directory of the shell page, against which sidebar
    /// sources resolve.
    pub fn shell_base(&self) -> PathBuf {
        Path::new(&self.shell_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}
