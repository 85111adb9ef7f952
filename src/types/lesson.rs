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

/// One sidebar entry of the course shell.
#[derive(Clone, Debug, PartialEq)]
pub struct Lesson {
    /// Position in sidebar document order, starting from zero.
    pub index: usize,
    /// The link text.
    pub title: String,
    /// Where to load the lesson content from. Relative paths are resolved
    /// against the directory of the shell page.
    pub source: Option<String>,
    /// The chapter this lesson is grouped under, if any.
    pub chapter: Option<ChapterId>,
}

pub type ChapterId = String;

/// A collapsible group of consecutive lessons.
#[derive(Clone, Debug, PartialEq)]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    /// Whether the shell HTML marks the chapter as expanded on load.
    pub expanded: bool,
}
