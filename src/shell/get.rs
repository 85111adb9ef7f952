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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::shell::state::ServerState;
use crate::shell::template::render_shell;
use crate::shell::view::ShellView;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let view = match state.shell() {
        Ok(shell) => ShellView::new(&shell),
        Err(e) => {
            log::error!("{e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            );
        }
    };
    let html = render_shell(&state.title, &view);
    (StatusCode::OK, Html(html.into_string()))
}
