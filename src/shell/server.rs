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

use std::path::Path as FilePath;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::course::Course;
use crate::error::Fallible;
use crate::navigator::SCROLL_TOP_THRESHOLD;
use crate::navigator::template::inject;
use crate::navigator::template::render_nav_bar;
use crate::shell::get::get_handler;
use crate::shell::post::post_handler;
use crate::shell::state::ServerState;
use crate::shell::state::spawn_load;

pub async fn start_server(
    directory: Option<String>,
    port: u16,
    open_browser: bool,
) -> Fallible<()> {
    let course = Course::open(directory)?;
    let (state, request) = ServerState::new(course)?;
    if let Some(request) = request {
        spawn_load(&state, request);
    }

    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.route("/navigator.js", get(navigator_script_handler));
    let app = app.route("/course/{*path}", get(course_file_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let bind = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("script.js");
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript"), (CACHE_CONTROL, "no-cache")],
        bytes,
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn navigator_script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    let mut content = String::new();
    content.push_str(&format!(
        "const SCROLL_TOP_THRESHOLD = {SCROLL_TOP_THRESHOLD};\n\n"
    ));
    content.push_str(include_str!("../navigator/navigator.js"));
    (StatusCode::OK, [(CONTENT_TYPE, "text/javascript")], content)
}

/// Serve a file from the course directory. Lesson pages that belong to a
/// lesson family get its navigation bar.
async fn course_file_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> Response {
    if path == state.shell_path {
        return Redirect::to("/").into_response();
    }
    let full = match state.files.validate(&path) {
        Ok(full) => full,
        Err(e) => {
            log::debug!("Refusing to serve {path:?}: {e:?}");
            return not_found_handler().await.into_response();
        }
    };
    let content_type = content_type(&full);
    if content_type != HTML {
        return match tokio::fs::read(&full).await {
            Ok(bytes) => (StatusCode::OK, [(CONTENT_TYPE, content_type)], bytes).into_response(),
            Err(e) => {
                log::error!("Failed to read {path:?}: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        };
    }
    let page = match tokio::fs::read_to_string(&full).await {
        Ok(page) => page,
        Err(e) => {
            log::error!("Failed to read {path:?}: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let url_path = format!("/course/{path}");
    for family in state.families.iter() {
        match family.visit(&state.storage, &url_path) {
            Ok(Some(bar)) => {
                let page = inject(&page, &render_nav_bar(&bar));
                return (StatusCode::OK, Html(page)).into_response();
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to record a visit to {path:?}: {e}");
            }
        }
    }
    (StatusCode::OK, Html(page)).into_response()
}

const HTML: &str = "text/html; charset=utf-8";

fn content_type(path: &FilePath) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") | Some("htm") => HTML,
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("md") | Some("markdown") | Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("woff2") => "font/woff2",
        Some("woff") => "font/woff",
        _ => "application/octet-stream",
    }
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(&PathBuf::from("a/index.html")), HTML);
        assert_eq!(content_type(&PathBuf::from("a/INDEX.HTM")), HTML);
        assert_eq!(content_type(&PathBuf::from("css/style.css")), "text/css");
        assert_eq!(content_type(&PathBuf::from("img/x.PNG")), "image/png");
        assert_eq!(
            content_type(&PathBuf::from("data.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type(&PathBuf::from("Makefile")),
            "application/octet-stream"
        );
    }
}
