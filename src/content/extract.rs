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

use scraper::Html;

use crate::error::Fallible;
use crate::html::selector;

/// Regions tried in order when pulling the lesson out of a full page.
const REGIONS: [&str; 3] = ["article", "main", "body"];

/// The part of a fetched document that is injected into the shell.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted {
    /// Inner markup of the content region.
    pub html: String,
}

/// Extract the first `article`, else the first `main`, else the `body` of
/// a document. `None` if the document has none of them.
pub fn extract_region(document: &str) -> Fallible<Option<Extracted>> {
    let doc = Html::parse_document(document);
    for region in REGIONS {
        if let Some(element) = doc.select(&selector(region)?).next() {
            return Ok(Some(Extracted {
                html: element.inner_html(),
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_preferred() -> Fallible<()> {
        let doc = r#"<html><body><header>nav</header><main><p>main</p><article><h1>Cache</h1></article></main></body></html>"#;
        let extracted = extract_region(doc)?.unwrap();
        assert_eq!(extracted.html, "<h1>Cache</h1>");
        Ok(())
    }

    #[test]
    fn test_main_fallback() -> Fallible<()> {
        let doc = r#"<html><body><header>nav</header><main><p>main</p></main></body></html>"#;
        let extracted = extract_region(doc)?.unwrap();
        assert_eq!(extracted.html, "<p>main</p>");
        Ok(())
    }

    #[test]
    fn test_body_fallback() -> Fallible<()> {
        let doc = r#"<html><body><p>only body</p></body></html>"#;
        let extracted = extract_region(doc)?.unwrap();
        assert_eq!(extracted.html, "<p>only body</p>");
        Ok(())
    }

    #[test]
    fn test_fragment_lands_in_body() -> Fallible<()> {
        let extracted = extract_region("<h1>Cache</h1>\n<p>text</p>\n")?.unwrap();
        assert!(extracted.html.contains("<h1>Cache</h1>"));
        Ok(())
    }

    #[test]
    fn test_interactive_parts_kept() -> Fallible<()> {
        let doc = r#"
        <article>
          <div class="accordion-header">A</div><div class="accordion-content">a</div>
          <div class="accordion-header">B</div><div class="accordion-content">b</div>
          <div class="tabs"><button class="tab-button">1</button><div class="tab-panel">1</div></div>
        </article>"#;
        let extracted = extract_region(doc)?.unwrap();
        assert_eq!(extracted.html.matches("accordion-header").count(), 2);
        assert!(extracted.html.contains(r#"<div class="tabs">"#));
        Ok(())
    }
}
