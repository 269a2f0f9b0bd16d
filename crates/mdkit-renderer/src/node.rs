//! Document nodes as seen by node renderers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::RenderError;

/// Block-level node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Paragraph,
    Heading,
    BlockQuote,
    CodeBlock,
    HtmlBlock,
    List,
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    ThematicBreak,
}

impl BlockKind {
    /// Every block kind.
    pub const ALL: [Self; 12] = [
        Self::Paragraph,
        Self::Heading,
        Self::BlockQuote,
        Self::CodeBlock,
        Self::HtmlBlock,
        Self::List,
        Self::Item,
        Self::Table,
        Self::TableHead,
        Self::TableRow,
        Self::TableCell,
        Self::ThematicBreak,
    ];

    /// The `snake_case` name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BlockQuote => "block_quote",
            Self::CodeBlock => "code_block",
            Self::HtmlBlock => "html_block",
            Self::List => "list",
            Self::Item => "item",
            Self::Table => "table",
            Self::TableHead => "table_head",
            Self::TableRow => "table_row",
            Self::TableCell => "table_cell",
            Self::ThematicBreak => "thematic_break",
        }
    }
}

/// Inline node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InlineKind {
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
    Code,
    Link,
    Image,
}

impl InlineKind {
    /// Every inline kind.
    pub const ALL: [Self; 8] = [
        Self::Emphasis,
        Self::Strong,
        Self::Strikethrough,
        Self::Superscript,
        Self::Subscript,
        Self::Code,
        Self::Link,
        Self::Image,
    ];

    /// The `snake_case` name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Strikethrough => "strikethrough",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
        }
    }
}

impl FromStr for BlockKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RenderError::UnknownNodeKind(s.to_owned()))
    }
}

impl FromStr for InlineKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RenderError::UnknownNodeKind(s.to_owned()))
    }
}

/// Any node kind a renderer can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Block(BlockKind),
    Inline(InlineKind),
}

impl NodeKind {
    /// Every node kind, blocks first.
    pub fn all() -> impl Iterator<Item = Self> {
        BlockKind::ALL
            .into_iter()
            .map(Self::Block)
            .chain(InlineKind::ALL.into_iter().map(Self::Inline))
    }

    /// The `snake_case` name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Block(kind) => kind.name(),
            Self::Inline(kind) => kind.name(),
        }
    }
}

impl From<BlockKind> for NodeKind {
    fn from(kind: BlockKind) -> Self {
        Self::Block(kind)
    }
}

impl From<InlineKind> for NodeKind {
    fn from(kind: InlineKind) -> Self {
        Self::Inline(kind)
    }
}

impl FromStr for NodeKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<BlockKind>()
            .map(Self::Block)
            .or_else(|_| s.parse::<InlineKind>().map(Self::Inline))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAlignment {
    Left,
    Center,
    Right,
}

impl CellAlignment {
    /// Value of the HTML `align` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Kind-specific data carried by a node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeData {
    #[default]
    None,
    Heading {
        level: u8,
        /// Explicit `{#id}` from heading attributes.
        id: Option<String>,
        classes: Vec<String>,
    },
    CodeBlock {
        /// First word of the fence info string.
        language: Option<String>,
        /// `key=value` pairs following the language.
        attrs: BTreeMap<String, String>,
    },
    List {
        /// Start number of an ordered list, `None` for bullet lists.
        start: Option<u64>,
    },
    Link {
        url: String,
        title: String,
    },
    Image {
        url: String,
        title: String,
    },
    TableCell {
        header: bool,
        alignment: Option<CellAlignment>,
    },
}

/// A fully parsed node handed to a [`NodeRenderer`](crate::NodeRenderer).
///
/// Children are already rendered, so a renderer only decides the markup of
/// the node itself.
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    kind: NodeKind,
    data: &'a NodeData,
    children: &'a str,
    text: &'a str,
}

impl<'a> Node<'a> {
    /// Create a node view.
    pub fn new(kind: NodeKind, data: &'a NodeData, children: &'a str, text: &'a str) -> Self {
        Self {
            kind,
            data,
            children,
            text,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn data(&self) -> &'a NodeData {
        self.data
    }

    /// Rendered HTML of the node's children.
    pub fn children(&self) -> &'a str {
        self.children
    }

    /// Plain text content, unescaped. For code blocks this is the code.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Heading level, for heading nodes.
    pub fn heading_level(&self) -> Option<u8> {
        match self.data {
            NodeData::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Code block language, if the fence named one.
    pub fn language(&self) -> Option<&'a str> {
        match self.data {
            NodeData::CodeBlock { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    /// Destination of a link or image.
    pub fn url(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Link { url, .. } | NodeData::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Title of a link or image, `None` when absent or empty.
    pub fn title(&self) -> Option<&'a str> {
        match self.data {
            NodeData::Link { title, .. } | NodeData::Image { title, .. } if !title.is_empty() => {
                Some(title)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_node_kinds() {
        assert_eq!(
            "heading".parse::<NodeKind>().unwrap(),
            NodeKind::Block(BlockKind::Heading)
        );
        assert_eq!(
            "image".parse::<NodeKind>().unwrap(),
            NodeKind::Inline(InlineKind::Image)
        );
        assert_eq!(
            "code_block".parse::<BlockKind>().unwrap(),
            BlockKind::CodeBlock
        );
    }

    #[test]
    fn test_parse_wrong_family_fails() {
        assert!(matches!(
            "image".parse::<BlockKind>(),
            Err(RenderError::UnknownNodeKind(name)) if name == "image"
        ));
        assert!("heading".parse::<InlineKind>().is_err());
        assert!("Heading".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_names_round_trip_through_display() {
        for kind in NodeKind::all() {
            assert_eq!(kind.to_string().parse::<NodeKind>().unwrap(), kind);
        }
        assert_eq!(NodeKind::all().count(), 20);
    }

    #[test]
    fn test_node_accessors() {
        let data = NodeData::Link {
            url: "https://example.com".to_owned(),
            title: String::new(),
        };
        let node = Node::new(InlineKind::Link.into(), &data, "<em>x</em>", "x");

        assert_eq!(node.url(), Some("https://example.com"));
        assert_eq!(node.title(), None);
        assert_eq!(node.heading_level(), None);
        assert_eq!(node.children(), "<em>x</em>");
        assert_eq!(node.text(), "x");
    }
}
