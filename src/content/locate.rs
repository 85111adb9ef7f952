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

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::percent_decode_str;
use percent_encoding::utf8_percent_encode;

/// Characters escaped when a course path is turned into a URL path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where the content of a lesson lives.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    /// A course-relative path with no `.` or `..` components.
    File(String),
    /// An absolute `http` or `https` URL.
    Remote(String),
}

#[derive(Debug, PartialEq)]
pub enum LocateError {
    Empty,
    /// The source climbs above the course root.
    OutsideCourse,
    /// A URL with a scheme other than HTTP, or a protocol-relative URL.
    Unsupported,
}

impl Location {
    /// The address a browser can open directly.
    pub fn link(&self) -> String {
        match self {
            Location::File(path) => course_url(path),
            Location::Remote(url) => url.clone(),
        }
    }
}

/// The server URL of a course-relative path.
pub fn course_url(path: &str) -> String {
    format!("/course/{}", utf8_percent_encode(path, PATH_SEGMENT))
}

/// Resolve a sidebar `data-src` value. Relative sources are interpreted
/// against `base`, the course-relative directory of the shell page. A
/// leading `/` refers to the course root.
pub fn locate(base: &Path, source: &str) -> Result<Location, LocateError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(LocateError::Empty);
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(Location::Remote(source.to_string()));
    }
    if source.contains("://") || source.starts_with("//") {
        return Err(LocateError::Unsupported);
    }
    let (base, source) = match source.strip_prefix('/') {
        Some(rest) => (Path::new(""), rest),
        None => (base, source),
    };
    let path = source.split(['?', '#']).next().unwrap_or(source);
    let path = percent_decode_str(path).decode_utf8_lossy();
    let joined = base.join(&*path);
    let normalized = normalize(&joined).ok_or(LocateError::OutsideCourse)?;
    let normalized = normalized
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if normalized.is_empty() {
        return Err(LocateError::Empty);
    }
    Ok(Location::File(normalized))
}

/// Lexically resolve `.` and `..`. Returns `None` if the path climbs above
/// its starting point.
pub fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
