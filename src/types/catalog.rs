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

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// One entry of a hand-maintained lesson catalog.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CatalogEntry {
    /// Unique within the catalog, and a substring of the lesson's own page
    /// path.
    pub id: String,
    pub title: String,
    /// Link to the lesson page, relative to any other lesson page.
    pub href: String,
}

/// The ordered lesson list of one lesson family.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Fallible<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.id.is_empty() {
                return fail(format!("catalog entry {} has an empty id.", i + 1));
            }
            if entries[..i].iter().any(|other| other.id == entry.id) {
                return fail(format!("duplicate catalog id: {}", entry.id));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// The index of the first entry whose id occurs in `path`.
    pub fn resolve(&self, path: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| path.contains(entry.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: format!("Lesson {id}"),
            href: format!("../{id}/index.html"),
        }
    }

    #[test]
    fn test_resolve() -> Fallible<()> {
        let catalog = Catalog::new(vec![entry("14.1.1"), entry("14.1.2"), entry("14.2.1")])?;
        assert_eq!(catalog.resolve("/course/lessons/14.1.2/index.html"), Some(1));
        assert_eq!(catalog.resolve("/course/lessons/14.2.1/"), Some(2));
        assert_eq!(catalog.resolve("/course/lessons/15.1.1/index.html"), None);
        Ok(())
    }

    #[test]
    fn test_resolve_first_match_wins() -> Fallible<()> {
        let catalog = Catalog::new(vec![entry("intro"), entry("intro-2")])?;
        assert_eq!(catalog.resolve("/lessons/intro-2/index.html"), Some(0));
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![entry("a"), entry("b"), entry("a")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        let result = Catalog::new(vec![entry("")]);
        assert!(result.is_err());
    }
}
