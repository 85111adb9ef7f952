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

use serde::Deserialize;
use serde::Serialize;

/// The persisted form of the course shell's progress, stored as JSON under
/// the `<course>_progress` key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    #[serde(default)]
    pub completed: BTreeSet<usize>,
    #[serde(default)]
    pub current_index: usize,
}

impl CourseProgress {
    /// Parse a stored payload. Anything unparseable is `None`.
    pub fn parse(payload: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(payload) {
            Ok(progress) => Some(progress),
            Err(e) => {
                log::warn!("Could not load saved progress: {e}");
                None
            }
        }
    }

    /// Drop indices that do not fit a course of `lesson_count` lessons.
    pub fn clamp(mut self, lesson_count: usize) -> Self {
        self.completed.retain(|index| *index < lesson_count);
        if self.current_index >= lesson_count {
            self.current_index = 0;
        }
        self
    }
}

/// The set of lesson-page indices viewed so far, stored as a JSON array
/// under the `<family>_completed` key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletionSet(BTreeSet<usize>);

impl CompletionSet {
    pub fn parse(payload: &str) -> Self {
        match serde_json::from_str::<BTreeSet<usize>>(payload) {
            Ok(set) => Self(set),
            Err(e) => {
                log::warn!("Discarding malformed completion set: {e}");
                Self::default()
            }
        }
    }

    /// Returns true if the index was not already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.0.iter().copied().collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.indices()).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Progress as a whole percentage: `round(100 * completed / total)`. An
/// empty course has made no progress.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (completed as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(progress_percent(3, 12), 25);
        assert_eq!(progress_percent(0, 12), 0);
        assert_eq!(progress_percent(12, 12), 100);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(0, 0), 0);
    }

    #[test]
    fn test_progress_json_shape() {
        let progress = CourseProgress {
            completed: BTreeSet::from([0, 2]),
            current_index: 3,
        };
        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(json, r#"{"completed":[0,2],"currentIndex":3}"#);
    }

    #[test]
    fn test_progress_parse() {
        let progress = CourseProgress::parse(r#"{"completed":[1,1,4],"currentIndex":2}"#);
        assert_eq!(
            progress,
            Some(CourseProgress {
                completed: BTreeSet::from([1, 4]),
                current_index: 2,
            })
        );
    }

    #[test]
    fn test_progress_parse_missing_fields() {
        assert_eq!(CourseProgress::parse("{}"), Some(CourseProgress::default()));
    }

    #[test]
    fn test_progress_parse_malformed() {
        assert_eq!(CourseProgress::parse("{not json"), None);
        assert_eq!(CourseProgress::parse(r#"{"completed":"x"}"#), None);
    }

    #[test]
    fn test_progress_clamp() {
        let progress = CourseProgress {
            completed: BTreeSet::from([0, 5, 9]),
            current_index: 7,
        };
        let progress = progress.clamp(6);
        assert_eq!(progress.completed, BTreeSet::from([0, 5]));
        assert_eq!(progress.current_index, 0);
    }

    #[test]
    fn test_completion_set() {
        let mut set = CompletionSet::parse("[3,1]");
        assert_eq!(set.indices(), vec![1, 3]);
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_json(), "[1,3,5]");
    }

    #[test]
    fn test_completion_set_malformed() {
        let set = CompletionSet::parse("nope");
        assert_eq!(set, CompletionSet::default());
    }
}
