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

pub mod template;

use crate::config::FamilyConfig;
use crate::error::Fallible;
use crate::storage::Storage;
use crate::types::catalog::Catalog;
use crate::types::catalog::CatalogEntry;
use crate::types::progress::CompletionSet;
use crate::types::progress::progress_percent;

/// The scroll offset, in pixels, past which the scroll-to-top control is
/// shown.
pub const SCROLL_TOP_THRESHOLD: u32 = 300;

/// Whether the scroll-to-top control is visible at a vertical scroll offset.
pub fn scroll_top_visible(offset: u32) -> bool {
    offset > SCROLL_TOP_THRESHOLD
}

/// A family of standalone lesson pages that share a catalog and a
/// completion set.
pub struct LessonFamily {
    name: String,
    home: String,
    catalog: Catalog,
    completed_key: String,
}

/// The navigation bar of one lesson page.
#[derive(Debug, PartialEq)]
pub struct NavBar {
    /// Zero-based position of the page in the catalog.
    pub index: usize,
    pub total: usize,
    /// `None` on the first lesson.
    pub previous: Option<CatalogEntry>,
    pub forward: NavForward,
    pub home: String,
    pub percent: u8,
}

#[derive(Debug, PartialEq)]
pub enum NavForward {
    Next(CatalogEntry),
    /// The last lesson links back to the course overview.
    Finish { href: String },
}

impl LessonFamily {
    pub fn new(config: &FamilyConfig) -> Fallible<Self> {
        Ok(Self {
            name: config.name.clone(),
            home: config.home.clone(),
            catalog: config.catalog()?,
            completed_key: config.completed_key(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn completed_key(&self) -> &str {
        &self.completed_key
    }

    /// Load the completion set. A missing or malformed entry is empty.
    pub fn completed(&self, storage: &Storage) -> Fallible<CompletionSet> {
        Ok(match storage.get_item(&self.completed_key)? {
            Some(payload) => CompletionSet::parse(&payload),
            None => CompletionSet::default(),
        })
    }

    /// Record a view of the page at `path` and build its navigation bar.
    /// Returns `None` if the page is not part of this family.
    pub fn visit(&self, storage: &Storage, path: &str) -> Fallible<Option<NavBar>> {
        let Some(index) = self.catalog.resolve(path) else {
            return Ok(None);
        };
        let mut completed = self.completed(storage)?;
        if completed.insert(index) {
            storage.set_item(&self.completed_key, &completed.to_json())?;
            log::debug!("Marked {} lesson {} as completed.", self.name, index + 1);
        }
        Ok(Some(self.nav_bar(index, &completed)))
    }

    fn nav_bar(&self, index: usize, completed: &CompletionSet) -> NavBar {
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.catalog.get(i))
            .cloned();
        let forward = match self.catalog.get(index + 1) {
            Some(next) => NavForward::Next(next.clone()),
            None => NavForward::Finish {
                href: self.home.clone(),
            },
        };
        NavBar {
            index,
            total: self.catalog.len(),
            previous,
            forward,
            home: self.home.clone(),
            percent: progress_percent(completed.len(), self.catalog.len()),
        }
    }
}
