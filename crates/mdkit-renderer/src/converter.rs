//! Markdown to HTML conversion over a built environment.

use std::fmt;

use pulldown_cmark::Parser;

use crate::environment::Environment;
use crate::writer::HtmlWriter;

/// Result of converting a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedContent {
    /// Rendered HTML.
    pub html: String,
    /// Problems found during conversion, such as unknown code languages.
    pub warnings: Vec<String>,
}

impl fmt::Display for RenderedContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Converts markdown using a frozen [`Environment`].
///
/// Conversion holds no state between calls, so one converter can serve many
/// documents.
pub struct MarkdownConverter {
    environment: Environment,
}

impl MarkdownConverter {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Convert `markdown` to HTML.
    pub fn convert(&self, markdown: &str) -> RenderedContent {
        let parser = Parser::new_ext(markdown, self.environment.parser_options());
        HtmlWriter::new(&self.environment).run(parser)
    }
}
