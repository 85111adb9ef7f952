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

use crate::course::Course;
use crate::error::Fallible;

/// Forget the course shell's progress. Lesson family completion sets are
/// kept.
pub fn reset_progress(directory: Option<String>) -> Fallible<()> {
    let course = Course::open(directory)?;
    course.storage.remove_item(&course.config.progress_key())?;
    println!("Progress of {} reset.", course.config.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_reset() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        {
            let course = Course::open(Some(directory.display().to_string()))?;
            course
                .storage
                .set_item("curs13_progress", r#"{"completed":[0],"currentIndex":1}"#)?;
            course.storage.set_item("curs14_completed", "[2]")?;
        }
        reset_progress(Some(directory.display().to_string()))?;
        let course = Course::open(Some(directory.display().to_string()))?;
        assert_eq!(course.storage.get_item("curs13_progress")?, None);
        assert_eq!(
            course.storage.get_item("curs14_completed")?,
            Some("[2]".to_string())
        );
        Ok(())
    }
}
