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

use scraper::ElementRef;
use scraper::Selector;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub fn selector(css: &str) -> Fallible<Selector> {
    Selector::parse(css).map_err(|e| ErrorReport::new(format!("invalid selector `{css}`: {e:?}")))
}

/// The element's text content with runs of whitespace collapsed.
pub fn text_of(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// The nearest ancestor (not including the element itself) carrying
/// `class`.
pub fn closest<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| has_class(*ancestor, class))
}
