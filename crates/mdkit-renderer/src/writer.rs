//! Event walker that turns parser events into rendered nodes.
//!
//! Every start tag opens a frame collecting the HTML and plain text of its
//! children. The matching end tag closes the frame and hands the finished
//! [`Node`] to the environment, whose output is appended to the parent frame.

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

use crate::environment::Environment;
use crate::extension::RenderContext;
use crate::state::{TableState, escape_html, parse_fence_info};
use crate::util::heading_level_to_num;
use crate::{BlockKind, HtmlInput, InlineKind, Node, NodeData, NodeKind, RenderedContent};

struct Frame {
    kind: Option<NodeKind>,
    data: NodeData,
    html: String,
    text: String,
}

impl Frame {
    fn new(kind: Option<NodeKind>, data: NodeData) -> Self {
        Self {
            kind,
            data,
            html: String::new(),
            text: String::new(),
        }
    }
}

pub(crate) struct HtmlWriter<'e> {
    environment: &'e Environment,
    context: RenderContext<'e>,
    stack: Vec<Frame>,
    table: TableState,
}

impl<'e> HtmlWriter<'e> {
    pub(crate) fn new(environment: &'e Environment) -> Self {
        Self {
            environment,
            context: RenderContext::new(environment.options()),
            stack: vec![Frame::new(None, NodeData::None)],
            table: TableState::default(),
        }
    }

    pub(crate) fn run<'a, I>(mut self, events: I) -> RenderedContent
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        while self.stack.len() > 1 {
            self.close();
        }

        let html = self.stack.pop().map(|root| root.html).unwrap_or_default();
        RenderedContent {
            html,
            warnings: self.context.into_warnings(),
        }
    }

    fn current(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push(&mut self, html: &str, text: &str) {
        let frame = self.current();
        frame.html.push_str(html);
        frame.text.push_str(text);
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push(&escape_html(&text), &text),
            Event::Code(code) => {
                self.leaf(InlineKind::Code.into(), &escape_html(&code), &code);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => {
                let environment = self.environment;
                self.push(&environment.options().soft_break, " ");
            }
            Event::HardBreak => self.push("<br />\n", " "),
            Event::Rule => self.leaf(BlockKind::ThematicBreak.into(), "", ""),
            Event::TaskListMarker(checked) => {
                let marker = if checked {
                    "<input type=\"checkbox\" checked=\"\" disabled=\"\" /> "
                } else {
                    "<input type=\"checkbox\" disabled=\"\" /> "
                };
                self.push(marker, "");
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let (kind, data) = match tag {
            Tag::Paragraph => (Some(BlockKind::Paragraph.into()), NodeData::None),
            Tag::Heading {
                level, id, classes, ..
            } => (
                Some(BlockKind::Heading.into()),
                NodeData::Heading {
                    level: heading_level_to_num(level),
                    id: id.as_deref().map(str::to_owned),
                    classes: classes.iter().map(ToString::to_string).collect(),
                },
            ),
            Tag::BlockQuote(_) => (Some(BlockKind::BlockQuote.into()), NodeData::None),
            Tag::CodeBlock(kind) => {
                let (language, attrs) = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence_info(&info),
                    CodeBlockKind::Indented => (None, Default::default()),
                };
                (
                    Some(BlockKind::CodeBlock.into()),
                    NodeData::CodeBlock { language, attrs },
                )
            }
            Tag::HtmlBlock => (Some(BlockKind::HtmlBlock.into()), NodeData::None),
            Tag::List(start) => (Some(BlockKind::List.into()), NodeData::List { start }),
            Tag::Item => (Some(BlockKind::Item.into()), NodeData::None),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                (Some(BlockKind::Table.into()), NodeData::None)
            }
            Tag::TableHead => {
                self.table.start_head();
                (Some(BlockKind::TableHead.into()), NodeData::None)
            }
            Tag::TableRow => {
                if self.table.start_row() {
                    self.push("<tbody>\n", "");
                }
                (Some(BlockKind::TableRow.into()), NodeData::None)
            }
            Tag::TableCell => (
                Some(BlockKind::TableCell.into()),
                NodeData::TableCell {
                    header: self.table.is_in_head(),
                    alignment: self.table.current_alignment(),
                },
            ),
            Tag::Emphasis => (Some(InlineKind::Emphasis.into()), NodeData::None),
            Tag::Strong => (Some(InlineKind::Strong.into()), NodeData::None),
            Tag::Strikethrough => (Some(InlineKind::Strikethrough.into()), NodeData::None),
            Tag::Superscript => (Some(InlineKind::Superscript.into()), NodeData::None),
            Tag::Subscript => (Some(InlineKind::Subscript.into()), NodeData::None),
            Tag::Link {
                dest_url, title, ..
            } => (
                Some(InlineKind::Link.into()),
                NodeData::Link {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                },
            ),
            Tag::Image {
                dest_url, title, ..
            } => (
                Some(InlineKind::Image.into()),
                NodeData::Image {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                },
            ),
            Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => (None, NodeData::None),
        };

        if let Some(kind) = kind {
            self.separate_block_in_item(kind);
        }
        self.stack.push(Frame::new(kind, data));
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::TableHead => self.table.end_head(),
            TagEnd::TableCell => self.table.next_cell(),
            TagEnd::Table => {
                if self.table.end() {
                    self.push("</tbody>\n", "");
                }
            }
            _ => {}
        }
        self.close();
    }

    /// Block content inside a list item starts on its own line.
    fn separate_block_in_item(&mut self, kind: NodeKind) {
        if !matches!(kind, NodeKind::Block(_)) {
            return;
        }
        let parent = self.current();
        if parent.kind == Some(NodeKind::Block(BlockKind::Item)) && !parent.html.ends_with('\n') {
            parent.html.push('\n');
        }
    }

    fn close(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };

        let environment = self.environment;
        let html = match frame.kind {
            Some(kind) => environment.render(
                &Node::new(kind, &frame.data, &frame.html, &frame.text),
                &mut self.context,
            ),
            None => frame.html,
        };
        self.push(&html, &frame.text);
    }

    /// Render a node that has no start and end events of its own.
    fn leaf(&mut self, kind: NodeKind, children: &str, text: &str) {
        self.separate_block_in_item(kind);
        let environment = self.environment;
        let data = NodeData::None;
        let html = environment.render(&Node::new(kind, &data, children, text), &mut self.context);
        self.push(&html, text);
    }

    fn raw_html(&mut self, html: &str) {
        let environment = self.environment;
        match environment.options().html_input {
            HtmlInput::Allow => self.push(html, ""),
            HtmlInput::Escape => self.push(&escape_html(html), ""),
            HtmlInput::Strip => {}
        }
    }
}
