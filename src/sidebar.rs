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

use std::fs::read_to_string;
use std::path::Path;

use scraper::ElementRef;
use scraper::Html;

use crate::error::Fallible;
use crate::error::fail;
use crate::html::closest;
use crate::html::has_class;
use crate::html::selector;
use crate::html::text_of;
use crate::types::lesson::Chapter;
use crate::types::lesson::Lesson;

/// The lesson structure of a course shell page.
#[derive(Debug, PartialEq)]
pub struct Sidebar {
    pub chapters: Vec<Chapter>,
    pub lessons: Vec<Lesson>,
}

impl Sidebar {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("shell page {} does not exist.", path.display()));
        }
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    /// Enumerate the `.nav-link` entries of the shell page in document
    /// order, together with the `.nav-chapter` groups that contain them.
    pub fn parse(html: &str) -> Fallible<Self> {
        let doc = Html::parse_document(html);
        let root: ElementRef<'_> = match doc.select(&selector("#navList")?).next() {
            Some(list) => list,
            None => doc.root_element(),
        };

        let toggle_selector = selector(".chapter-toggle")?;
        let items_selector = selector(".chapter-items")?;

        let mut chapters = Vec::new();
        let mut groups = Vec::new();
        for (i, group) in root.select(&selector(".nav-chapter")?).enumerate() {
            let toggle = group.select(&toggle_selector).next();
            let id = toggle
                .and_then(|t| t.value().attr("data-chapter"))
                .map(str::to_string)
                .unwrap_or_else(|| (i + 1).to_string());
            let title = toggle.map(text_of).unwrap_or_default();
            let expanded = group
                .select(&items_selector)
                .next()
                .is_some_and(|items| has_class(items, "expanded"));
            groups.push(group.id());
            chapters.push(Chapter {
                id,
                title,
                expanded,
            });
        }

        let mut lessons = Vec::new();
        for (index, link) in root.select(&selector(".nav-link")?).enumerate() {
            let source = link
                .value()
                .attr("data-src")
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .map(str::to_string);
            let chapter = closest(link, "nav-chapter")
                .and_then(|group| groups.iter().position(|id| *id == group.id()))
                .map(|position| chapters[position].id.clone());
            lessons.push(Lesson {
                index,
                title: text_of(link),
                source,
                chapter,
            });
        }

        log::debug!(
            "Sidebar has {} lessons in {} chapters.",
            lessons.len(),
            chapters.len()
        );
        Ok(Self { chapters, lessons })
    }
}
