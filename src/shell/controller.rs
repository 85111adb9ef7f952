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

use crate::content::ContentSlot;
use crate::content::ContentState;
use crate::content::LoadToken;
use crate::error::Fallible;
use crate::shell::keyboard::Shortcut;
use crate::shell::keyboard::shortcut;
use crate::shell::navigation::CourseState;
use crate::sidebar::Sidebar;
use crate::storage::Storage;
use crate::types::lesson::Chapter;
use crate::types::lesson::Lesson;
use crate::types::progress::CourseProgress;

/// A content load the caller has to run. Its outcome goes back through
/// [`CourseShell::finish_load`].
#[derive(Debug, PartialEq)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub source: Option<String>,
}

/// A chapter and whether its lesson list is currently open.
pub struct ChapterState {
    pub chapter: Chapter,
    pub expanded: bool,
}

/// The course shell controller. It owns the lesson list and the navigation
/// state, persists progress after every change, and tracks the purely
/// presentational state of the page (sidebar, chapters, dialog).
pub struct CourseShell {
    lessons: Vec<Lesson>,
    chapters: Vec<ChapterState>,
    state: CourseState,
    storage: Storage,
    progress_key: String,
    sidebar_collapsed: bool,
    dialog_open: bool,
    content: ContentSlot,
}

impl CourseShell {
    /// Build the controller from the shell page's sidebar and restore the
    /// saved progress. The restored lesson is selected without marking
    /// anything complete.
    pub fn initialize(
        sidebar: Sidebar,
        storage: Storage,
        progress_key: String,
    ) -> Fallible<(Self, Option<LoadRequest>)> {
        let lesson_count = sidebar.lessons.len();
        let progress: CourseProgress = match storage.get_item(&progress_key)? {
            Some(payload) => CourseProgress::parse(&payload).unwrap_or_default(),
            None => CourseProgress::default(),
        };
        let state = CourseState::restore(lesson_count, progress);
        let current = state.current();
        let chapters = sidebar
            .chapters
            .into_iter()
            .map(|chapter| ChapterState {
                expanded: chapter.expanded,
                chapter,
            })
            .collect();
        let mut shell = Self {
            lessons: sidebar.lessons,
            chapters,
            state,
            storage,
            progress_key,
            sidebar_collapsed: false,
            dialog_open: false,
            content: ContentSlot::new(),
        };
        log::debug!(
            "Restored progress: lesson {} of {}, {} completed ({}%).",
            current + 1,
            lesson_count,
            shell.state.completed_count(),
            shell.state.percent()
        );
        let request = shell.go(current, false, true)?;
        Ok((shell, request))
    }

    /// Select lesson `target`. Out-of-range targets are ignored.
    pub fn navigate(
        &mut self,
        target: usize,
        mark_previous: bool,
    ) -> Fallible<Option<LoadRequest>> {
        self.go(target, mark_previous, true)
    }

    fn go(
        &mut self,
        target: usize,
        mark_previous: bool,
        persist: bool,
    ) -> Fallible<Option<LoadRequest>> {
        if !self.state.navigate(target, mark_previous) {
            return Ok(None);
        }
        let lesson = &self.lessons[target];
        if let Some(id) = &lesson.chapter {
            if let Some(chapter) = self.chapters.iter_mut().find(|c| &c.chapter.id == id) {
                chapter.expanded = true;
            }
        }
        let request = LoadRequest {
            token: self.content.begin(),
            source: lesson.source.clone(),
        };
        if persist {
            self.save()?;
        }
        Ok(Some(request))
    }

    pub fn retreat(&mut self) -> Fallible<Option<LoadRequest>> {
        match self.state.current().checked_sub(1) {
            Some(target) => self.navigate(target, true),
            None => Ok(None),
        }
    }

    /// Go to the next lesson, or finish the course when on the last one.
    pub fn advance(&mut self) -> Fallible<Option<LoadRequest>> {
        if self.state.is_last() {
            self.complete_course()?;
            Ok(None)
        } else {
            self.navigate(self.state.current() + 1, true)
        }
    }

    /// Mark the last lesson complete and open the completion dialog. Does
    /// nothing anywhere but on the last lesson.
    pub fn complete_course(&mut self) -> Fallible<()> {
        if !self.state.is_last() {
            log::debug!("Ignoring course completion away from the last lesson.");
            return Ok(());
        }
        self.state.complete_current();
        self.save()?;
        self.dialog_open = true;
        Ok(())
    }

    /// Forget all progress and go back to the first lesson. The storage
    /// entry stays deleted until the next navigation.
    pub fn reset(&mut self) -> Fallible<Option<LoadRequest>> {
        self.state.reset();
        self.storage.remove_item(&self.progress_key)?;
        self.dialog_open = false;
        log::debug!("Course progress reset.");
        self.go(0, false, false)
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Returns false if there is no chapter with that id.
    pub fn toggle_chapter(&mut self, id: &str) -> bool {
        match self.chapters.iter_mut().find(|c| c.chapter.id == id) {
            Some(chapter) => {
                chapter.expanded = !chapter.expanded;
                true
            }
            None => false,
        }
    }

    /// Handle a key press. The right arrow only moves forward: it never
    /// finishes the course.
    pub fn key(&mut self, key: &str, focus: Option<&str>) -> Fallible<Option<LoadRequest>> {
        match shortcut(key, focus) {
            Some(Shortcut::Retreat) => self.retreat(),
            Some(Shortcut::Advance) if !self.state.is_last() => self.advance(),
            _ => Ok(None),
        }
    }

    pub fn finish_load(&mut self, token: LoadToken, content: ContentState) -> bool {
        self.content.finish(token, content)
    }

    fn save(&self) -> Fallible<()> {
        let payload = serde_json::to_string(&self.state.progress())?;
        self.storage.set_item(&self.progress_key, &payload)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn chapters(&self) -> &[ChapterState] {
        &self.chapters
    }

    pub fn state(&self) -> &CourseState {
        &self.state
    }

    pub fn content(&self) -> &ContentState {
        self.content.state()
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }
}
