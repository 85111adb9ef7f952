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

use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::navigator::NavBar;
use crate::navigator::NavForward;

const ICON_BACK: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M19 12H5M12 19l-7-7 7-7"/></svg>"#;
const ICON_HOME: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/><polyline points="9 22 9 12 15 12 15 22"/></svg>"#;
const ICON_NEXT: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M5 12h14M12 5l7 7-7 7"/></svg>"#;
const ICON_FINISH: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"/></svg>"#;
const ICON_TOP: &str = r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M18 15l-6-6-6 6"/></svg>"#;

/// The navigation bar, the scroll-to-top control, and the script that
/// drives the latter.
pub fn render_nav_bar(bar: &NavBar) -> Markup {
    html! {
        nav.lesson-nav {
            @match &bar.previous {
                Some(previous) => {
                    a.btn-nav href=(previous.href) title=(previous.title) {
                        (PreEscaped(ICON_BACK))
                        span { "Înapoi" }
                    }
                }
                None => {
                    span.btn-nav.disabled { "Înapoi" }
                }
            }
            div.progress-info {
                strong { "Lecția " (bar.index + 1) " / " (bar.total) }
                span { "Progres: " (bar.percent) "%" }
            }
            a.btn-nav.btn-home href=(bar.home) title="Cuprins" {
                (PreEscaped(ICON_HOME))
                span { "Cuprins" }
            }
            @match &bar.forward {
                NavForward::Next(next) => {
                    a.btn-nav href=(next.href) title=(next.title) {
                        span { "Următorul" }
                        (PreEscaped(ICON_NEXT))
                    }
                }
                NavForward::Finish { href } => {
                    a.btn-nav href=(href) title="Finalizare" {
                        span { "Finalizare" }
                        (PreEscaped(ICON_FINISH))
                    }
                }
            }
        }
        button.btn-top type="button" {
            (PreEscaped(ICON_TOP))
        }
        script src="/navigator.js" {}
    }
}

/// Insert `markup` right before the closing body tag of `page`, or at the
/// end if the page has none.
pub fn inject(page: &str, markup: &Markup) -> String {
    let markup = markup.0.as_str();
    let lower = page.to_ascii_lowercase();
    match lower.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(page.len() + markup.len());
            out.push_str(&page[..at]);
            out.push_str(markup);
            out.push_str(&page[at..]);
            out
        }
        None => format!("{page}{markup}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::CatalogEntry;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            href: format!("../{id}/index.html"),
        }
    }

    #[test]
    fn test_render_middle_lesson() {
        let bar = NavBar {
            index: 5,
            total: 13,
            previous: Some(entry("14.2.2", "Mapare Directă")),
            forward: NavForward::Next(entry("14.2.4", "Politici de Înlocuire")),
            home: "../../html/main.html".to_string(),
            percent: 46,
        };
        let html = render_nav_bar(&bar).into_string();
        assert!(html.contains(r#"href="../14.2.2/index.html""#));
        assert!(html.contains(r#"href="../14.2.4/index.html""#));
        assert!(html.contains("Lecția 6 / 13"));
        assert!(html.contains("Progres: 46%"));
        assert!(html.contains("Cuprins"));
        assert!(html.contains("Următorul"));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_render_ends() {
        let bar = NavBar {
            index: 0,
            total: 1,
            previous: None,
            forward: NavForward::Finish {
                href: "../../html/main.html".to_string(),
            },
            home: "../../html/main.html".to_string(),
            percent: 100,
        };
        let html = render_nav_bar(&bar).into_string();
        assert!(html.contains(r#"<span class="btn-nav disabled">Înapoi</span>"#));
        assert!(html.contains(r#"title="Finalizare""#));
        assert!(html.contains("Lecția 1 / 1"));
    }

    #[test]
    fn test_inject() {
        let markup = html! { nav { "x" } };
        assert_eq!(
            inject("<html><body><p>a</p></body></html>", &markup),
            "<html><body><p>a</p><nav>x</nav></body></html>"
        );
        assert_eq!(
            inject("<p>a</p></BODY>", &markup),
            "<p>a</p><nav>x</nav></BODY>"
        );
        assert_eq!(inject("<p>a</p>", &markup), "<p>a</p><nav>x</nav>");
    }
}
