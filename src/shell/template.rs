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

use maud::DOCTYPE;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::content::ContentState;
use crate::shell::view::Forward;
use crate::shell::view::LessonItem;
use crate::shell::view::ShellView;
use crate::shell::view::SidebarGroup;

pub fn page_template(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ro" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
                script src="/script.js" {};
            }
        }
    }
}

pub fn render_shell(title: &str, view: &ShellView) -> Markup {
    let container_class = if view.sidebar_collapsed {
        "app-container sidebar-collapsed"
    } else {
        "app-container"
    };
    let progress_style = format!("width: {}%;", view.percent);
    let body = html! {
        div #appContainer class=(container_class) {
            aside #sidebar .sidebar {
                div.sidebar-header {
                    h1 { (title) }
                    form action="/" method="post" {
                        button #toggleSidebar type="submit" name="action" value="ToggleSidebar" title="Meniu" { "☰" }
                    }
                }
                div.progress {
                    div.progress-track {
                        div #progressBar .progress-bar style=(progress_style) {}
                    }
                    span #progressPercent { (view.percent) "%" }
                }
                ul #navList {
                    @for group in &view.groups {
                        (render_group(group))
                    }
                }
            }
            main.main-content {
                (render_content(&view.content))
                div.content-nav {
                    form action="/" method="post" {
                        @if view.previous_disabled {
                            button #btnPrev type="submit" name="action" value="Previous" disabled { "Înapoi" }
                        } @else {
                            button #btnPrev type="submit" name="action" value="Previous" { "Înapoi" }
                        }
                        @match view.forward {
                            Forward::Next => {
                                button #btnNext type="submit" name="action" value="Next" { "Următorul" }
                            }
                            Forward::Finish => {
                                button #btnNext type="submit" name="action" value="Finish" { "Finalizare" }
                            }
                        }
                    }
                }
            }
        }
        @if view.dialog_open {
            (render_dialog(view.percent))
        }
        form #keyForm action="/" method="post" hidden {
            input type="hidden" name="action" value="Key";
            input type="hidden" name="key";
            input type="hidden" name="focus";
        }
    };
    page_template(title, body)
}

fn render_group(group: &SidebarGroup) -> Markup {
    match group {
        SidebarGroup::Lesson(item) => html! {
            li { (render_lesson(item)) }
        },
        SidebarGroup::Chapter {
            id,
            title,
            expanded,
            lessons,
        } => {
            let (toggle_class, items_class) = if *expanded {
                ("chapter-toggle expanded", "chapter-items expanded")
            } else {
                ("chapter-toggle", "chapter-items")
            };
            html! {
                li.nav-chapter {
                    form action="/" method="post" {
                        input type="hidden" name="action" value="ToggleChapter";
                        button class=(toggle_class) type="submit" name="chapter" value=(id)
                            data-chapter=(id) aria-expanded=(if *expanded { "true" } else { "false" }) {
                            (title)
                        }
                    }
                    ul class=(items_class) id=(format!("chapter{id}")) {
                        @for item in lessons {
                            li { (render_lesson(item)) }
                        }
                    }
                }
            }
        }
    }
}

fn render_lesson(item: &LessonItem) -> Markup {
    let mut class = String::from("nav-link");
    if item.active {
        class.push_str(" active");
    }
    if item.completed {
        class.push_str(" completed");
    }
    html! {
        form action="/" method="post" {
            input type="hidden" name="action" value="Navigate";
            button class=(class) type="submit" name="index" value=(item.index) {
                (item.title)
            }
        }
    }
}

fn render_content(content: &ContentState) -> Markup {
    match content {
        ContentState::Loading => html! {
            div #contentContainer .content-container {
                div.loading-spinner {
                    div.spinner {}
                    p { "Se încarcă..." }
                }
            }
        },
        ContentState::Ready(extracted) => html! {
            div #contentContainer .content-container {
                (PreEscaped(&extracted.html))
            }
        },
        ContentState::NotAvailable { link } => html! {
            div #notAvailable .not-available {
                h2 { "Conținut indisponibil" }
                p { "Lecția nu a putut fi încărcată." }
                @if let Some(link) = link {
                    a #directLink href=(link) target="_blank" { "Deschide lecția direct" }
                }
            }
        },
    }
}

fn render_dialog(percent: u8) -> Markup {
    html! {
        div #congratsModal .modal.active {
            div.modal-content {
                h2 { "Felicitări!" }
                p { "Ai finalizat cursul. Progres: " (percent) "%" }
                form action="/" method="post" {
                    button #btnClose type="submit" name="action" value="CloseDialog" { "Închide" }
                    button #btnRestart type="submit" name="action" value="Reset" { "Reia cursul" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::extract::Extracted;

    fn view() -> ShellView {
        ShellView {
            sidebar_collapsed: false,
            groups: vec![SidebarGroup::Chapter {
                id: "1".to_string(),
                title: "Capitolul 1".to_string(),
                expanded: true,
                lessons: vec![
                    LessonItem {
                        index: 0,
                        title: "A".to_string(),
                        active: false,
                        completed: true,
                    },
                    LessonItem {
                        index: 1,
                        title: "B".to_string(),
                        active: true,
                        completed: false,
                    },
                ],
            }],
            previous_disabled: false,
            forward: Forward::Finish,
            percent: 50,
            content: ContentState::Ready(Extracted {
                html: "<h1>B</h1>".to_string(),
            }),
            dialog_open: false,
        }
    }

    #[test]
    fn test_render_shell() {
        let html = render_shell("Curs 13", &view()).into_string();
        assert!(html.contains("<h1>B</h1>"));
        assert!(html.contains(r#"class="nav-link completed""#));
        assert!(html.contains(r#"class="nav-link active""#));
        assert!(html.contains(r#"value="Finish""#));
        assert!(html.contains("Finalizare"));
        assert!(html.contains("width: 50%;"));
        assert!(html.contains(r#"aria-expanded="true""#));
        assert!(!html.contains("congratsModal"));
    }

    #[test]
    fn test_render_not_available() {
        let mut view = view();
        view.content = ContentState::NotAvailable {
            link: Some("/course/lessons/b.html".to_string()),
        };
        view.dialog_open = true;
        view.forward = Forward::Next;
        let html = render_shell("Curs 13", &view).into_string();
        assert!(html.contains(r#"href="/course/lessons/b.html""#));
        assert!(html.contains("congratsModal"));
        assert!(html.contains("Următorul"));
    }

    #[test]
    fn test_render_loading() {
        let mut view = view();
        view.content = ContentState::Loading;
        view.sidebar_collapsed = true;
        let html = render_shell("Curs 13", &view).into_string();
        assert!(html.contains("loading-spinner"));
        assert!(html.contains("sidebar-collapsed"));
    }
}
