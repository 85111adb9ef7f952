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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::content::ContentLoader;
use crate::content::files::CourseFiles;
use crate::course::Course;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::navigator::LessonFamily;
use crate::shell::controller::CourseShell;
use crate::shell::controller::LoadRequest;
use crate::storage::Storage;

#[derive(Clone)]
pub struct ServerState {
    pub title: String,
    pub files: CourseFiles,
    /// Course-relative path of the shell page.
    pub shell_path: String,
    pub storage: Storage,
    pub families: Arc<Vec<LessonFamily>>,
    pub loader: ContentLoader,
    pub mutable: Arc<Mutex<CourseShell>>,
}

impl ServerState {
    /// Build the server state for a course. The returned request loads the
    /// restored lesson.
    pub fn new(course: Course) -> Fallible<(Self, Option<LoadRequest>)> {
        let files = course.files();
        let loader = ContentLoader::new(files.clone(), course.shell_base());
        let (shell, request) = CourseShell::initialize(
            course.sidebar,
            course.storage.clone(),
            course.config.progress_key(),
        )?;
        let state = Self {
            title: course.config.name,
            files,
            shell_path: course.shell_path,
            storage: course.storage,
            families: Arc::new(course.families),
            loader,
            mutable: Arc::new(Mutex::new(shell)),
        };
        Ok((state, request))
    }

    pub fn shell(&self) -> Fallible<MutexGuard<'_, CourseShell>> {
        self.mutable
            .lock()
            .map_err(|_| ErrorReport::new("course shell lock poisoned."))
    }
}

/// Run a content load in the background and hand the result back to the
/// shell. If the shell has moved on by then, the result is dropped.
pub fn spawn_load(state: &ServerState, request: LoadRequest) {
    let state = state.clone();
    tokio::spawn(async move {
        let content = state.loader.load(request.source.as_deref()).await;
        match state.shell() {
            Ok(mut shell) => {
                shell.finish_load(request.token, content);
            }
            Err(e) => {
                log::error!("{e}");
            }
        }
    });
}
