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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::locate::Location;
use crate::content::locate::locate;
use crate::course::Course;
use crate::error::Fallible;
use crate::error::fail;

/// Something wrong with a course that does not stop it from being served.
#[derive(Debug, PartialEq)]
pub enum Problem {
    /// A sidebar lesson without a `data-src`.
    NoSource { lesson: usize, title: String },
    /// A sidebar source that does not point at a file in the course.
    BadSource { lesson: usize, source: String },
    /// A lesson family without lessons.
    EmptyCatalog { family: String },
    /// A catalog entry whose id occurs in no lesson page path.
    UnmatchedId { family: String, id: String },
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::NoSource { lesson, title } => {
                write!(f, "lesson {lesson} ({title}) has no source.")
            }
            Problem::BadSource { lesson, source } => {
                write!(f, "lesson {lesson} has an unusable source: {source}")
            }
            Problem::EmptyCatalog { family } => {
                write!(f, "{family}: the lesson catalog is empty.")
            }
            Problem::UnmatchedId { family, id } => {
                write!(f, "{family}: no lesson page matches id {id}.")
            }
        }
    }
}

pub fn check_course(directory: Option<String>) -> Fallible<()> {
    let course = Course::open(directory)?;
    let problems = find_problems(&course)?;
    if problems.is_empty() {
        println!("ok");
        return Ok(());
    }
    for problem in &problems {
        println!("{problem}");
    }
    fail(format!("found {} problems.", problems.len()))
}

fn find_problems(course: &Course) -> Fallible<Vec<Problem>> {
    let mut problems = Vec::new();

    let files = course.files();
    let base = course.shell_base();
    for lesson in &course.sidebar.lessons {
        let number = lesson.index + 1;
        let Some(source) = &lesson.source else {
            problems.push(Problem::NoSource {
                lesson: number,
                title: lesson.title.clone(),
            });
            continue;
        };
        let usable = match locate(&base, source) {
            Ok(Location::File(path)) => files.validate(&path).is_ok(),
            // Remote sources are only checked when served.
            Ok(Location::Remote(_)) => true,
            Err(_) => false,
        };
        if !usable {
            problems.push(Problem::BadSource {
                lesson: number,
                source: source.clone(),
            });
        }
    }

    let pages = html_pages(&course.directory)?;
    for family in &course.families {
        if family.catalog().is_empty() {
            problems.push(Problem::EmptyCatalog {
                family: family.name().to_string(),
            });
        }
        for entry in family.catalog().entries() {
            if !pages.iter().any(|page| page.contains(entry.id.as_str())) {
                problems.push(Problem::UnmatchedId {
                    family: family.name().to_string(),
                    id: entry.id.clone(),
                });
            }
        }
    }

    Ok(problems)
}

/// Course-relative paths of every HTML file in the course.
fn html_pages(directory: &Path) -> Fallible<Vec<String>> {
    let mut pages = Vec::new();
    for entry in WalkDir::new(directory) {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !path.extension().is_some_and(|ext| ext == "html") {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(directory) {
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            pages.push(relative);
        }
    }
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::fs::remove_file;
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_non_existent_directory() {
        assert!(check_course(Some("./derpherp".to_string())).is_err());
    }

    #[test]
    fn test_fixture() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let course = Course::open(Some(directory.display().to_string()))?;
        assert_eq!(find_problems(&course)?, Vec::new());
        assert!(check_course(Some(directory.display().to_string())).is_ok());
        Ok(())
    }

    #[test]
    fn test_missing_page() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        remove_file(directory.join("lessons/14.3.2/index.html"))?;
        let course = Course::open(Some(directory.display().to_string()))?;
        let problems = find_problems(&course)?;
        assert_eq!(
            problems,
            vec![
                Problem::BadSource {
                    lesson: 9,
                    source: "../lessons/14.3.2/index.html".to_string(),
                },
                Problem::UnmatchedId {
                    family: "curs14".to_string(),
                    id: "14.3.2".to_string(),
                },
            ]
        );
        assert!(check_course(Some(directory.display().to_string())).is_err());
        Ok(())
    }

    #[test]
    fn test_lesson_without_source() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let shell = directory.join("html/main.html");
        let html = read_to_string(&shell)?.replace(
            r#" data-src="../lessons/14.1.1/index.html""#,
            "",
        );
        write(&shell, html)?;
        let course = Course::open(Some(directory.display().to_string()))?;
        let problems = find_problems(&course)?;
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].to_string(),
            "lesson 1 (Introducere în Ierarhia de Memorie) has no source."
        );
        Ok(())
    }

    #[test]
    fn test_empty_catalog() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        write(
            directory.join("course.toml"),
            "name = \"curs13\"\n\n[[families]]\nname = \"curs15\"\nhome = \"../../html/main.html\"\nlessons = []\n",
        )?;
        let course = Course::open(Some(directory.display().to_string()))?;
        assert_eq!(
            find_problems(&course)?,
            vec![Problem::EmptyCatalog {
                family: "curs15".to_string()
            }]
        );
        Ok(())
    }

    #[test]
    fn test_duplicate_catalog_id() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let config = directory.join("course.toml");
        let toml = read_to_string(&config)?.replace("id = \"14.1.2\"", "id = \"14.1.1\"");
        write(&config, toml)?;
        assert!(check_course(Some(directory.display().to_string())).is_err());
        Ok(())
    }
}
