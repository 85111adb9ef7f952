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

use crate::content::ContentState;
use crate::shell::controller::CourseShell;

/// Everything the shell page displays, derived from the controller.
#[derive(Debug, PartialEq)]
pub struct ShellView {
    pub sidebar_collapsed: bool,
    pub groups: Vec<SidebarGroup>,
    pub previous_disabled: bool,
    pub forward: Forward,
    pub percent: u8,
    pub content: ContentState,
    pub dialog_open: bool,
}

#[derive(Debug, PartialEq)]
pub enum SidebarGroup {
    /// A lesson outside any chapter.
    Lesson(LessonItem),
    Chapter {
        id: String,
        title: String,
        expanded: bool,
        lessons: Vec<LessonItem>,
    },
}

#[derive(Debug, PartialEq)]
pub struct LessonItem {
    pub index: usize,
    pub title: String,
    pub active: bool,
    pub completed: bool,
}

/// What the forward button does.
#[derive(Debug, PartialEq)]
pub enum Forward {
    Next,
    Finish,
}

impl ShellView {
    pub fn new(shell: &CourseShell) -> Self {
        let state = shell.state();
        let mut groups: Vec<SidebarGroup> = Vec::new();
        for lesson in shell.lessons() {
            let item = LessonItem {
                index: lesson.index,
                title: lesson.title.clone(),
                active: lesson.index == state.current(),
                completed: state.is_completed(lesson.index),
            };
            let Some(chapter_id) = &lesson.chapter else {
                groups.push(SidebarGroup::Lesson(item));
                continue;
            };
            if let Some(SidebarGroup::Chapter { id, lessons, .. }) = groups.last_mut() {
                if id == chapter_id {
                    lessons.push(item);
                    continue;
                }
            }
            let chapter = shell
                .chapters()
                .iter()
                .find(|c| &c.chapter.id == chapter_id);
            groups.push(SidebarGroup::Chapter {
                id: chapter_id.clone(),
                title: chapter.map(|c| c.chapter.title.clone()).unwrap_or_default(),
                expanded: chapter.is_some_and(|c| c.expanded),
                lessons: vec![item],
            });
        }
        Self {
            sidebar_collapsed: shell.sidebar_collapsed(),
            groups,
            previous_disabled: state.is_first(),
            forward: if state.is_last() {
                Forward::Finish
            } else {
                Forward::Next
            },
            percent: state.percent(),
            content: shell.content().clone(),
            dialog_open: shell.dialog_open(),
        }
    }
}
