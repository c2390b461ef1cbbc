// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Small helpers over `scraper` shared by the HTML parsers.

use crate::error::ParseError;
use scraper::{ElementRef, Selector};

/// Compiles a selector literal.
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Ok(Selector::parse(css)?)
}

/// All text under an element with whitespace runs collapsed to one space.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Collapsed text of the first match, or `None` when absent or empty.
pub(crate) fn select_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|found| element_text(&found))
        .filter(|text| !text.is_empty())
}

/// Whether the element carries the given class.
pub(crate) fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Extracts the player id from a profile link such as
/// `/en/players/jannik-sinner/s0ag/overview`.
pub(crate) fn player_id_from_href(href: &str) -> Option<String> {
    let segments: Vec<&str> = href.split('/').filter(|s| !s.is_empty()).collect();
    let overview: usize = segments.iter().position(|s| *s == "overview")?;
    let index: usize = overview.checked_sub(1)?;
    segments.get(index).map(|id| (*id).to_string())
}

/// Last non-empty path segment of a link.
pub(crate) fn last_path_segment(href: &str) -> Option<String> {
    href.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .rfind(|s| !s.is_empty())
        .map(String::from)
}
