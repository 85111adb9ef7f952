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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::shell::controller::LoadRequest;
use crate::shell::state::ServerState;
use crate::shell::state::spawn_load;

#[derive(Debug, Deserialize)]
enum Action {
    /// Sidebar click.
    Navigate,
    Previous,
    Next,
    Finish,
    Reset,
    CloseDialog,
    ToggleSidebar,
    ToggleChapter,
    /// Key press, forwarded by the page script.
    Key,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    /// Kept as text so that a malformed index is ignored rather than
    /// rejected by the extractor.
    index: Option<String>,
    chapter: Option<String>,
    key: Option<String>,
    /// Tag name of the element that had focus when the key was pressed.
    focus: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form) {
        Ok(Some(request)) => spawn_load(&state, request),
        Ok(None) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<Option<LoadRequest>> {
    let mut shell = state.shell()?;
    match form.action {
        Action::Navigate => {
            let Some(index) = form.index else {
                return fail("navigation without a lesson index.");
            };
            match index.trim().parse::<usize>() {
                Ok(index) => shell.navigate(index, true),
                Err(_) => {
                    log::debug!("Ignoring navigation to lesson index {index:?}.");
                    Ok(None)
                }
            }
        }
        Action::Previous => shell.retreat(),
        Action::Next => shell.advance(),
        Action::Finish => {
            shell.complete_course()?;
            Ok(None)
        }
        Action::Reset => shell.reset(),
        Action::CloseDialog => {
            shell.close_dialog();
            Ok(None)
        }
        Action::ToggleSidebar => {
            shell.toggle_sidebar();
            Ok(None)
        }
        Action::ToggleChapter => {
            let Some(chapter) = form.chapter else {
                return fail("chapter toggle without a chapter.");
            };
            if !shell.toggle_chapter(&chapter) {
                log::debug!("No chapter with id {chapter:?}.");
            }
            Ok(None)
        }
        Action::Key => {
            let key = form.key.unwrap_or_default();
            let focus = form.focus.filter(|tag| !tag.is_empty());
            shell.key(&key, focus.as_deref())
        }
    }
}
