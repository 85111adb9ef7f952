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

use clap::ValueEnum;
use serde::Serialize;

use crate::course::Course;
use crate::error::Fallible;
use crate::shell::navigation::CourseState;
use crate::types::progress::CourseProgress;
use crate::types::progress::progress_percent;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone)]
pub enum ProgressFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for ProgressFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressFormat::Text => write!(f, "text"),
            ProgressFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_progress(directory: Option<String>, format: ProgressFormat) -> Fallible<()> {
    let course = Course::open(directory)?;
    let report = progress_report(&course)?;
    match format {
        ProgressFormat::Text => print!("{report}"),
        ProgressFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{json}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    course: String,
    lesson_count: usize,
    current_index: usize,
    completed: Vec<usize>,
    percent: u8,
    updated_at: Option<Timestamp>,
    families: Vec<FamilyReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyReport {
    name: String,
    lesson_count: usize,
    completed: Vec<usize>,
    percent: u8,
    updated_at: Option<Timestamp>,
}

fn progress_report(course: &Course) -> Fallible<ProgressReport> {
    let key = course.config.progress_key();
    let lesson_count = course.sidebar.lessons.len();
    let progress = match course.storage.get_item(&key)? {
        Some(payload) => CourseProgress::parse(&payload).unwrap_or_default(),
        None => CourseProgress::default(),
    };
    let state = CourseState::restore(lesson_count, progress);
    let progress = state.progress();

    let mut families = Vec::new();
    for family in &course.families {
        let completed = family.completed(&course.storage)?;
        families.push(FamilyReport {
            name: family.name().to_string(),
            lesson_count: family.catalog().len(),
            completed: completed.indices(),
            percent: progress_percent(completed.len(), family.catalog().len()),
            updated_at: course.storage.updated_at(family.completed_key())?,
        });
    }

    Ok(ProgressReport {
        course: course.config.name.clone(),
        lesson_count,
        current_index: progress.current_index,
        completed: progress.completed.into_iter().collect(),
        percent: state.percent(),
        updated_at: course.storage.updated_at(&key)?,
        families,
    })
}

impl Display for ProgressReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: lesson {} of {}, {} completed ({}%)",
            self.course,
            self.current_index + 1,
            self.lesson_count,
            self.completed.len(),
            self.percent
        )?;
        match &self.updated_at {
            Some(at) => writeln!(f, ", updated {at}")?,
            None => writeln!(f, ", never started")?,
        }
        for family in &self.families {
            write!(
                f,
                "{}: {} of {} completed ({}%)",
                family.name,
                family.completed.len(),
                family.lesson_count,
                family.percent
            )?;
            match &family.updated_at {
                Some(at) => writeln!(f, ", updated {at}")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_empty_progress() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let course = Course::open(Some(directory.display().to_string()))?;
        let report = progress_report(&course)?;
        assert_eq!(report.current_index, 0);
        assert_eq!(report.percent, 0);
        assert!(report.updated_at.is_none());
        assert_eq!(
            report.to_string(),
            "curs13: lesson 1 of 13, 0 completed (0%), never started\ncurs14: 0 of 13 completed (0%)\n"
        );
        Ok(())
    }

    #[test]
    fn test_stored_progress() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let course = Course::open(Some(directory.display().to_string()))?;
        course.storage.set_item(
            "curs13_progress",
            r#"{"completed":[0,1,2],"currentIndex":3}"#,
        )?;
        course.storage.set_item("curs14_completed", "[0,5]")?;
        let report = progress_report(&course)?;
        assert_eq!(report.current_index, 3);
        assert_eq!(report.completed, vec![0, 1, 2]);
        assert_eq!(report.percent, 23);
        assert!(report.updated_at.is_some());
        assert_eq!(report.families[0].completed, vec![0, 5]);
        assert_eq!(report.families[0].percent, 15);

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["currentIndex"], 3);
        assert_eq!(json["families"][0]["name"], "curs14");
        assert_eq!(json["families"][0]["lessonCount"], 13);
        Ok(())
    }

    #[test]
    fn test_print_progress() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        print_progress(Some(directory.display().to_string()), ProgressFormat::Json)?;
        print_progress(Some(directory.display().to_string()), ProgressFormat::Text)?;
        Ok(())
    }
}
