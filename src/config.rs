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

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::catalog::Catalog;
use crate::types::catalog::CatalogEntry;

pub const CONFIG_FILE_NAME: &str = "course.toml";

const DEFAULT_SHELL: &str = "html/main.html";

/// The contents of `course.toml`.
#[derive(Debug, Deserialize)]
pub struct CourseConfig {
    /// Prefix of the course shell's storage key.
    pub name: String,
    /// Course-relative path of the shell page with the sidebar.
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default)]
    pub families: Vec<FamilyConfig>,
}

/// A lesson family: a set of standalone lesson pages sharing one catalog
/// and one completion set.
#[derive(Debug, Deserialize)]
pub struct FamilyConfig {
    /// Prefix of the family's storage key.
    pub name: String,
    /// Where the home and finish links of the navigation bar point to.
    pub home: String,
    pub lessons: Vec<CatalogEntry>,
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

impl CourseConfig {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return fail(format!("{CONFIG_FILE_NAME} not found."));
        }
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: CourseConfig = toml::from_str(content)?;
        if config.name.trim().is_empty() {
            return fail("course name must not be empty.");
        }
        for family in &config.families {
            if family.name == config.name {
                return fail(format!(
                    "family `{}` has the same name as the course.",
                    family.name
                ));
            }
        }
        Ok(config)
    }

    /// The key the course shell persists its progress under.
    pub fn progress_key(&self) -> String {
        format!("{}_progress", self.name)
    }
}

impl FamilyConfig {
    /// The key the lesson navigator persists its completion set under.
    pub fn completed_key(&self) -> String {
        format!("{}_completed", self.name)
    }

    pub fn catalog(&self) -> Fallible<Catalog> {
        Catalog::new(self.lessons.clone())
    }
}
