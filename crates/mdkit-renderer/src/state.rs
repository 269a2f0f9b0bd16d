//! State tracking and text helpers used while walking parser events.

use std::collections::BTreeMap;

use pulldown_cmark::Alignment;

use crate::CellAlignment;

/// Table rendering state.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    body_open: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.body_open = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    /// Start a body row. Returns `true` for the first one, where `<tbody>` opens.
    pub(crate) fn start_row(&mut self) -> bool {
        self.cell_index = 0;
        !std::mem::replace(&mut self.body_open, true)
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// End the table. Returns `true` when `<tbody>` has to be closed.
    pub(crate) fn end(&mut self) -> bool {
        std::mem::take(&mut self.body_open)
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn current_alignment(&self) -> Option<CellAlignment> {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => Some(CellAlignment::Left),
            Some(Alignment::Center) => Some(CellAlignment::Center),
            Some(Alignment::Right) => Some(CellAlignment::Right),
            Some(Alignment::None) | None => None,
        }
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics and collapses whitespace, `-` and `_` runs
/// into single dashes. Other characters are dropped.
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape text for HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Split a fence info string into language and `key=value` attributes.
pub(crate) fn parse_fence_info(info: &str) -> (Option<String>, BTreeMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().map(str::to_owned);

    let attrs = parts
        .filter_map(|part| part.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_owned(), value.to_owned())
        })
        .collect();

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  API_v2 -- Reference  "), "api-v2-reference");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("¿?"), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
        assert_eq!(escape_html("it's"), "it's");
    }

    #[test]
    fn test_parse_fence_info() {
        let (language, attrs) = parse_fence_info("rust title=\"main.rs\" linenos");
        assert_eq!(language.as_deref(), Some("rust"));
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("title").map(String::as_str), Some("main.rs"));

        let (language, attrs) = parse_fence_info("");
        assert_eq!(language, None);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_table_state() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::None, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(state.current_alignment(), Some(CellAlignment::Left));
        state.next_cell();
        assert_eq!(state.current_alignment(), None);
        state.next_cell();
        assert_eq!(state.current_alignment(), Some(CellAlignment::Right));
        state.end_head();

        assert!(state.start_row());
        assert_eq!(state.current_alignment(), Some(CellAlignment::Left));
        assert!(!state.start_row());
        assert!(state.end());
        assert!(!state.end());
    }
}
