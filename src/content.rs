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

pub mod extract;
pub mod files;
pub mod locate;

use std::path::PathBuf;

use crate::content::extract::Extracted;
use crate::content::extract::extract_region;
use crate::content::files::CourseFiles;
use crate::content::locate::Location;
use crate::content::locate::locate;
use crate::error::Fallible;
use crate::error::fail;
use crate::markdown::is_markdown;
use crate::markdown::markdown_to_html;

/// What the content area of the shell shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentState {
    /// A load is in flight.
    Loading,
    Ready(Extracted),
    /// The lesson could not be loaded. The link, if any, opens the raw
    /// source directly.
    NotAvailable { link: Option<String> },
}

/// Identifies one content load. Only the most recent token may update the
/// content area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadToken(u64);

/// The content area, with the token of the load that owns it.
pub struct ContentSlot {
    token: u64,
    state: ContentState,
}

impl ContentSlot {
    pub fn new() -> Self {
        Self {
            token: 0,
            state: ContentState::Loading,
        }
    }

    /// Start a new load, invalidating any load still in flight.
    pub fn begin(&mut self) -> LoadToken {
        self.token += 1;
        self.state = ContentState::Loading;
        LoadToken(self.token)
    }

    /// Apply the outcome of a load. Returns false, leaving the slot
    /// untouched, if a newer load has started since.
    pub fn finish(&mut self, token: LoadToken, state: ContentState) -> bool {
        if token.0 != self.token {
            log::debug!(
                "Discarding content of superseded load {} (current is {}).",
                token.0,
                self.token
            );
            return false;
        }
        self.state = state;
        true
    }

    pub fn state(&self) -> &ContentState {
        &self.state
    }
}

impl Default for ContentSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to load lesson content, cheap to clone into a task.
#[derive(Clone)]
pub struct ContentLoader {
    files: CourseFiles,
    /// Course-relative directory of the shell page.
    base: PathBuf,
    client: reqwest::Client,
}

impl ContentLoader {
    pub fn new(files: CourseFiles, base: PathBuf) -> Self {
        Self {
            files,
            base,
            client: reqwest::Client::new(),
        }
    }

    /// Load and extract a lesson. Never fails: every problem degrades to
    /// [`ContentState::NotAvailable`].
    pub async fn load(&self, source: Option<&str>) -> ContentState {
        let Some(source) = source else {
            log::debug!("Lesson has no source.");
            return ContentState::NotAvailable { link: None };
        };
        let location = match locate(&self.base, source) {
            Ok(location) => location,
            Err(e) => {
                log::error!("Error loading content: cannot resolve {source:?}: {e:?}");
                return ContentState::NotAvailable {
                    link: Some(source.to_string()),
                };
            }
        };
        let link = Some(location.link());
        let document = match self.fetch(&location).await {
            Ok(document) => document,
            Err(e) => {
                log::error!("Error loading content from {source:?}: {e}");
                return ContentState::NotAvailable { link };
            }
        };
        match extract_region(&document) {
            Ok(Some(extracted)) => ContentState::Ready(extracted),
            Ok(None) => {
                log::error!("Error loading content from {source:?}: no content region.");
                ContentState::NotAvailable { link }
            }
            Err(e) => {
                log::error!("Error loading content from {source:?}: {e}");
                ContentState::NotAvailable { link }
            }
        }
    }

    async fn fetch(&self, location: &Location) -> Fallible<String> {
        let (name, text) = match location {
            Location::File(path) => {
                let full = match self.files.validate(path) {
                    Ok(full) => full,
                    Err(e) => return fail(format!("{path}: {e:?}")),
                };
                let text = tokio::fs::read_to_string(full).await?;
                (path.as_str(), text)
            }
            Location::Remote(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return fail(format!("HTTP error! status: {}", status.as_u16()));
                }
                (url.as_str(), response.text().await?)
            }
        };
        if is_markdown(name) {
            Ok(markdown_to_html(&text))
        } else {
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use axum::Router;
    use axum::http::StatusCode;
    use tokio::net::TcpListener;

    use super::*;
    use crate::error::ErrorReport;
    use crate::helper::create_tmp_directory;

    fn loader() -> Fallible<ContentLoader> {
        let root = create_tmp_directory()?;
        create_dir_all(root.join("html"))?;
        create_dir_all(root.join("lessons"))?;
        write(
            root.join("lessons/a.html"),
            "<html><body><nav>x</nav><article><h1>A</h1></article></body></html>",
        )?;
        write(root.join("lessons/b.md"), "# B\n")?;
        Ok(ContentLoader::new(
            CourseFiles::new(root),
            PathBuf::from("html"),
        ))
    }

    #[test]
    fn test_slot_discards_stale_loads() {
        let mut slot = ContentSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert_eq!(slot.state(), &ContentState::Loading);
        let stale = ContentState::NotAvailable { link: None };
        assert!(!slot.finish(first, stale));
        assert_eq!(slot.state(), &ContentState::Loading);
        let fresh = ContentState::NotAvailable {
            link: Some("x".to_string()),
        };
        assert!(slot.finish(second, fresh.clone()));
        assert_eq!(slot.state(), &fresh);
    }

    #[test]
    fn test_slot_begin_resets_to_loading() {
        let mut slot = ContentSlot::new();
        let token = slot.begin();
        slot.finish(token, ContentState::NotAvailable { link: None });
        assert_ne!(slot.state(), &ContentState::Loading);
        slot.begin();
        assert_eq!(slot.state(), &ContentState::Loading);
    }

    #[tokio::test]
    async fn test_load_html() -> Fallible<()> {
        let loader = loader()?;
        let state = loader.load(Some("../lessons/a.html")).await;
        match state {
            ContentState::Ready(extracted) => assert_eq!(extracted.html, "<h1>A</h1>"),
            other => panic!("unexpected state: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_load_markdown() -> Fallible<()> {
        let loader = loader()?;
        let state = loader.load(Some("../lessons/b.md")).await;
        match state {
            ContentState::Ready(extracted) => assert_eq!(extracted.html.trim(), "<h1>B</h1>"),
            other => panic!("unexpected state: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_load_without_source() -> Fallible<()> {
        let loader = loader()?;
        assert_eq!(
            loader.load(None).await,
            ContentState::NotAvailable { link: None }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_file() -> Fallible<()> {
        let loader = loader()?;
        assert_eq!(
            loader.load(Some("../lessons/missing.html")).await,
            ContentState::NotAvailable {
                link: Some("/course/lessons/missing.html".to_string())
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_load_outside_course() -> Fallible<()> {
        let loader = loader()?;
        assert_eq!(
            loader.load(Some("../../secret.html")).await,
            ContentState::NotAvailable {
                link: Some("../../secret.html".to_string())
            }
        );
        Ok(())
    }

    fn free_port() -> Fallible<u16> {
        portpicker::pick_unused_port().ok_or_else(|| ErrorReport::new("no free port"))
    }

    /// A remote source answering with an error status is shown as not
    /// available, with a link to the source.
    #[tokio::test]
    async fn test_load_remote_error_status() -> Fallible<()> {
        let port = free_port()?;
        let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
        let app = Router::new().fallback(|| async { StatusCode::NOT_FOUND });
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let loader = loader()?;
        let url = format!("http://127.0.0.1:{port}/lesson.html");
        let state = loader.load(Some(&url)).await;
        assert_eq!(state, ContentState::NotAvailable { link: Some(url) });
        Ok(())
    }

    #[tokio::test]
    async fn test_load_remote_unreachable() -> Fallible<()> {
        let port = free_port()?;
        let loader = loader()?;
        let url = format!("http://127.0.0.1:{port}/lesson.html");
        let state = loader.load(Some(&url)).await;
        assert_eq!(state, ContentState::NotAvailable { link: Some(url) });
        Ok(())
    }
}
