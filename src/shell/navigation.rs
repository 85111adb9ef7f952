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

use std::collections::BTreeSet;

use crate::types::progress::CourseProgress;
use crate::types::progress::progress_percent;

/// The navigation state of the course shell: which lesson is shown and
/// which lessons are done.
///
/// The current index is always a valid lesson index, or zero for an empty
/// course.
#[derive(Clone, Debug, PartialEq)]
pub struct CourseState {
    lesson_count: usize,
    current: usize,
    completed: BTreeSet<usize>,
}

impl CourseState {
    pub fn new(lesson_count: usize) -> Self {
        Self {
            lesson_count,
            current: 0,
            completed: BTreeSet::new(),
        }
    }

    /// Rebuild the state from persisted progress, dropping anything that
    /// does not fit the current lesson list.
    pub fn restore(lesson_count: usize, progress: CourseProgress) -> Self {
        let progress = progress.clamp(lesson_count);
        Self {
            lesson_count,
            current: progress.current_index,
            completed: progress.completed,
        }
    }

    /// Move to `target`. If `mark_previous` is set and the lesson changes,
    /// the lesson being left counts as completed.
    ///
    /// Returns false, leaving the state unchanged, if `target` is out of
    /// range.
    pub fn navigate(&mut self, target: usize, mark_previous: bool) -> bool {
        if target >= self.lesson_count {
            return false;
        }
        if mark_previous && target != self.current {
            self.completed.insert(self.current);
        }
        self.current = target;
        true
    }

    pub fn complete_current(&mut self) {
        if self.lesson_count > 0 {
            self.completed.insert(self.current);
        }
    }

    pub fn reset(&mut self) {
        self.completed.clear();
        self.current = 0;
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.lesson_count > 0 && self.current == self.lesson_count - 1
    }

    pub fn percent(&self) -> u8 {
        progress_percent(self.completed.len(), self.lesson_count)
    }

    pub fn progress(&self) -> CourseProgress {
        CourseProgress {
            completed: self.completed.clone(),
            current_index: self.current,
        }
    }
}
