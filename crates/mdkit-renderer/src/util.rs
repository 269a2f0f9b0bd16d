//! Shared utility functions for markdown rendering.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pulldown_cmark::HeadingLevel;

use crate::state::escape_html;

/// URL characters left as-is in `href` and `src`; `%` keeps existing escapes intact.
const HREF_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'%')
    .remove(b'&')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'[')
    .remove(b']');

pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Percent-encode `url` and escape it for a double-quoted attribute.
///
/// Spaces, quotes, angle brackets and non-ASCII bytes become `%XX`.
pub fn escape_href(url: &str) -> String {
    escape_html(&utf8_percent_encode(url, HREF_ENCODE_SET).to_string())
}

/// Whether `url` uses a scheme that can execute script or read local files.
///
/// `data:` URLs are unsafe except for common raster image types.
pub fn is_unsafe_link(url: &str) -> bool {
    const UNSAFE_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "file:"];
    const SAFE_DATA: [&str; 4] = [
        "data:image/png",
        "data:image/gif",
        "data:image/jpeg",
        "data:image/webp",
    ];

    let url = url.trim_start().to_ascii_lowercase();
    if UNSAFE_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        return true;
    }
    url.starts_with("data:") && !SAFE_DATA.iter().any(|prefix| url.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }

    #[test]
    fn test_unsafe_schemes() {
        assert!(is_unsafe_link("javascript:alert(1)"));
        assert!(is_unsafe_link("  JavaScript:alert(1)"));
        assert!(is_unsafe_link("vbscript:msgbox"));
        assert!(is_unsafe_link("file:///etc/passwd"));
        assert!(is_unsafe_link("data:text/html;base64,PHNjcmlwdD4="));
    }

    #[test]
    fn test_safe_links() {
        assert!(!is_unsafe_link("https://example.com"));
        assert!(!is_unsafe_link("/relative/path"));
        assert!(!is_unsafe_link("#anchor"));
        assert!(!is_unsafe_link("data:image/png;base64,iVBORw0KGgo="));
    }

    #[test]
    fn test_escape_href_encodes_unsafe_characters() {
        assert_eq!(escape_href("foo bar"), "foo%20bar");
        assert_eq!(escape_href("/ä"), "/%C3%A4");
        assert_eq!(escape_href("http://x/?q=\"y\""), "http://x/?q=%22y%22");
        assert_eq!(escape_href("<a>"), "%3Ca%3E");
    }

    #[test]
    fn test_escape_href_keeps_url_syntax() {
        assert_eq!(
            escape_href("https://example.com/a_b-c.~d?x=1&y=(2)#top"),
            "https://example.com/a_b-c.~d?x=1&amp;y=(2)#top"
        );
        assert_eq!(escape_href("/caf%C3%A9"), "/caf%C3%A9");
    }
}
