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

/// Navigation triggered from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shortcut {
    Retreat,
    Advance,
}

/// Map a key press to a shortcut. `focus` is the tag name of the focused
/// element; keys typed into text fields are never shortcuts.
pub fn shortcut(key: &str, focus: Option<&str>) -> Option<Shortcut> {
    if let Some(tag) = focus {
        if tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea") {
            return None;
        }
    }
    match key {
        "ArrowLeft" => Some(Shortcut::Retreat),
        "ArrowRight" => Some(Shortcut::Advance),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows() {
        assert_eq!(shortcut("ArrowLeft", None), Some(Shortcut::Retreat));
        assert_eq!(shortcut("ArrowRight", Some("BODY")), Some(Shortcut::Advance));
        assert_eq!(shortcut("ArrowUp", None), None);
        assert_eq!(shortcut("Enter", None), None);
    }

    #[test]
    fn test_suppressed_in_text_fields() {
        assert_eq!(shortcut("ArrowLeft", Some("INPUT")), None);
        assert_eq!(shortcut("ArrowRight", Some("TEXTAREA")), None);
        assert_eq!(shortcut("ArrowRight", Some("textarea")), None);
        assert_eq!(shortcut("ArrowRight", Some("BUTTON")), Some(Shortcut::Advance));
    }
}
