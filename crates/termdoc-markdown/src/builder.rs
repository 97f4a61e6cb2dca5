#![forbid(unsafe_code)]

//! Event-stream driven construction of block trees.

use pulldown_cmark::{
    Alignment as CmarkAlignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use termdoc_layout::{
    Alignment, Block, BoxChars, FillerBlock, GridBlock, Inline, InlineSequence, ParagraphBlock,
    PreformattedBlock, SequenceBlock, Style,
};

/// Gutter placed before block quotes and indented code.
const INDENT: &str = "    ";
const BULLET: &str = "• ";
const RULE: &str = "─";

/// Style applied to a heading of the given level.
#[must_use]
pub fn heading_style(level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::BOLD | Style::UNDERLINED | Style::ITALIC,
        HeadingLevel::H2 => Style::UNDERLINED | Style::BOLD,
        HeadingLevel::H3 => Style::UNDERLINED,
        _ => Style::NORMAL,
    }
}

/// Converts markdown into a [`Block`] tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatBuilder {
    box_chars: BoxChars,
}

impl FormatBuilder {
    /// A builder framing tables with [`BoxChars::SQUARE`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame tables with `box_chars`.
    #[must_use]
    pub fn box_chars(mut self, box_chars: BoxChars) -> Self {
        self.box_chars = box_chars;
        self
    }

    /// Parse `markdown` and build its block tree.
    #[must_use]
    pub fn build(&self, markdown: &str) -> Block {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("markdown_build", bytes = markdown.len()).entered();

        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        self.build_events(Parser::new_ext(markdown, options))
    }

    /// Build a block tree from an already parsed event stream.
    #[must_use]
    pub fn build_events<'a>(&self, events: impl IntoIterator<Item = Event<'a>>) -> Block {
        let mut state = BuildState::new(self.box_chars);
        for event in events {
            state.event(event);
        }
        state.finish()
    }
}

/// Open container, innermost last.
#[derive(Debug)]
enum Container {
    Document(Vec<Block>),
    Quote(Vec<Block>),
    List {
        next_number: Option<u64>,
        grid: GridBlock,
        row: usize,
    },
    Item(Vec<Block>),
    Table(TableState),
}

#[derive(Debug)]
struct TableState {
    alignments: Vec<Alignment>,
    grid: GridBlock,
    row: usize,
    column: usize,
    in_head: bool,
    header_has_text: bool,
}

/// Text collected for the paragraph, heading or table cell being built.
#[derive(Debug)]
struct InlineText {
    alignment: Alignment,
    base_style: Style,
    lines: Vec<InlineSequence>,
    current: InlineSequence,
}

impl InlineText {
    fn new(alignment: Alignment, base_style: Style) -> Self {
        Self {
            alignment,
            base_style,
            lines: Vec::new(),
            current: InlineSequence::new(true),
        }
    }

    fn has_text(&self) -> bool {
        self.lines
            .iter()
            .chain(std::iter::once(&self.current))
            .flatten()
            .any(|inline| !inline.is_whitespace() && !inline.is_empty())
    }

    fn break_line(&mut self) {
        let line = std::mem::replace(&mut self.current, InlineSequence::new(true));
        self.lines.push(line);
    }

    fn into_block(mut self) -> Block {
        if self.lines.is_empty() {
            return ParagraphBlock::new(self.alignment, self.current).into();
        }
        self.break_line();
        let alignment = self.alignment;
        SequenceBlock::new(
            self.lines
                .into_iter()
                .map(|line| ParagraphBlock::new(alignment, line).into())
                .collect(),
        )
        .into()
    }
}

#[derive(Debug)]
enum Verbatim {
    Code { indented: bool, text: String },
    Html(String),
}

struct BuildState {
    box_chars: BoxChars,
    stack: Vec<Container>,
    inline: Option<InlineText>,
    styles: Vec<Style>,
    verbatim: Option<Verbatim>,
}

impl BuildState {
    fn new(box_chars: BoxChars) -> Self {
        Self {
            box_chars,
            stack: vec![Container::Document(Vec::new())],
            inline: None,
            styles: Vec::new(),
            verbatim: None,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::InlineHtml(html) => self.inline_code(&html),
            Event::Html(html) => self.html(&html),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                if let Some(inline) = self.inline.as_mut() {
                    inline.break_line();
                }
            }
            Event::Rule => {
                self.flush_inline();
                self.push_block(FillerBlock::new(RULE).into());
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.begin_inline(Alignment::Left, Style::NORMAL),
            Tag::Heading { level, .. } => self.begin_inline(Alignment::Left, heading_style(level)),
            Tag::Emphasis => self.styles.push(Style::ITALIC),
            Tag::Strong => self.styles.push(Style::BOLD),
            Tag::Strikethrough => self.styles.push(Style::STRIKETHROUGH),
            Tag::BlockQuote(_) => {
                self.flush_inline();
                self.stack.push(Container::Quote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_inline();
                self.verbatim = Some(Verbatim::Code {
                    indented: matches!(kind, CodeBlockKind::Indented),
                    text: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.flush_inline();
                self.verbatim = Some(Verbatim::Html(String::new()));
            }
            Tag::List(start) => {
                self.flush_inline();
                self.stack.push(Container::List {
                    next_number: start,
                    grid: GridBlock::new(),
                    row: 0,
                });
            }
            Tag::Item => {
                self.flush_inline();
                self.stack.push(Container::Item(Vec::new()));
            }
            Tag::Table(alignments) => {
                self.flush_inline();
                self.stack.push(Container::Table(TableState {
                    alignments: alignments.into_iter().map(cell_alignment).collect(),
                    grid: GridBlock::new(),
                    row: 0,
                    column: 0,
                    in_head: false,
                    header_has_text: false,
                }));
            }
            Tag::TableHead => self.with_table(|table| {
                table.in_head = true;
                table.column = 0;
            }),
            Tag::TableRow => self.with_table(|table| table.column = 0),
            Tag::TableCell => {
                let mut alignment = Alignment::Left;
                self.with_table(|table| {
                    alignment = table
                        .alignments
                        .get(table.column)
                        .copied()
                        .unwrap_or_default();
                });
                self.begin_inline(alignment, Style::NORMAL);
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Heading(_) => self.flush_inline(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::BlockQuote(_) => {
                self.flush_inline();
                if let Some(Container::Quote(blocks)) = self.pop_container() {
                    let quote = gutter(INDENT, stack_blocks(blocks));
                    self.push_block(quote);
                }
            }
            TagEnd::CodeBlock | TagEnd::HtmlBlock => {
                if let Some(verbatim) = self.verbatim.take() {
                    self.push_block(verbatim_block(verbatim));
                }
            }
            TagEnd::List(_) => {
                self.flush_inline();
                if let Some(Container::List { grid, .. }) = self.pop_container() {
                    self.push_block(grid.into());
                }
            }
            TagEnd::Item => {
                self.flush_inline();
                if let Some(Container::Item(blocks)) = self.pop_container() {
                    let content = stack_blocks(blocks);
                    if let Some(Container::List {
                        next_number,
                        grid,
                        row,
                    }) = self.stack.last_mut()
                    {
                        let marker = match next_number {
                            Some(n) => {
                                let marker = format!("{n}. ");
                                *n += 1;
                                marker
                            }
                            None => BULLET.to_owned(),
                        };
                        grid.set_cell(*row, 0, PreformattedBlock::new([marker]));
                        grid.set_cell(*row, 1, content);
                        *row += 1;
                    }
                }
            }
            TagEnd::Table => {
                self.flush_inline();
                if let Some(Container::Table(table)) = self.pop_container() {
                    let block = self.finish_table(table);
                    self.push_block(block);
                }
            }
            TagEnd::TableHead => self.with_table(|table| {
                table.in_head = false;
                table.row += 1;
            }),
            TagEnd::TableRow => self.with_table(|table| table.row += 1),
            TagEnd::TableCell => {
                let Some(inline) = self.inline.take() else {
                    return;
                };
                let has_text = inline.has_text();
                let cell = inline.into_block();
                self.with_table(move |table| {
                    if table.in_head && has_text {
                        table.header_has_text = true;
                    }
                    table.grid.set_cell(table.row, table.column, cell);
                    table.column += 1;
                });
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(verbatim) = self.verbatim.as_mut() {
            match verbatim {
                Verbatim::Code { text: buf, .. } | Verbatim::Html(buf) => buf.push_str(text),
            }
            return;
        }
        #[cfg(feature = "tracing")]
        if termdoc_text::has_wide_glyphs(text) {
            tracing::debug!(
                text,
                "text contains wide glyphs; columns are counted per char"
            );
        }
        let style = self.current_style();
        self.ensure_inline().current.add_inlines_for_string(text, style);
    }

    /// Inline code and inline HTML stay one unbreakable run.
    fn inline_code(&mut self, code: &str) {
        if code.is_empty() {
            return;
        }
        let style = self.current_style();
        self.ensure_inline()
            .current
            .push(Inline::new(code.to_owned(), style));
    }

    fn html(&mut self, html: &str) {
        match self.verbatim.as_mut() {
            Some(Verbatim::Html(buf) | Verbatim::Code { text: buf, .. }) => buf.push_str(html),
            None => {
                self.flush_inline();
                self.push_block(PreformattedBlock::new([html]).into());
            }
        }
    }

    fn current_style(&self) -> Style {
        let base = self
            .inline
            .as_ref()
            .map_or(Style::NORMAL, |inline| inline.base_style);
        self.styles.iter().fold(base, |acc, style| acc | *style)
    }

    fn begin_inline(&mut self, alignment: Alignment, base_style: Style) {
        self.flush_inline();
        self.inline = Some(InlineText::new(alignment, base_style));
    }

    /// Text outside a paragraph (tight list items) opens an implicit one.
    fn ensure_inline(&mut self) -> &mut InlineText {
        self.inline
            .get_or_insert_with(|| InlineText::new(Alignment::Left, Style::NORMAL))
    }

    fn flush_inline(&mut self) {
        if let Some(inline) = self.inline.take() {
            self.push_block(inline.into_block());
        }
    }

    fn with_table(&mut self, f: impl FnOnce(&mut TableState)) {
        if let Some(Container::Table(table)) = self.stack.last_mut() {
            f(table);
        }
    }

    /// Pop the innermost container, never the document itself.
    fn pop_container(&mut self) -> Option<Container> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Container::Document(blocks) | Container::Quote(blocks)) => {
                if !blocks.is_empty() {
                    blocks.push(Block::blank_line());
                }
                blocks.push(block);
            }
            Some(Container::Item(blocks)) => blocks.push(block),
            // Lists and tables only take items and cells.
            Some(Container::List { .. } | Container::Table(_)) | None => {}
        }
    }

    fn finish_table(&self, table: TableState) -> Block {
        if table.header_has_text {
            return table.grid.into_table_with(true, &self.box_chars).into();
        }
        let body = GridBlock::from_rows(table.grid.into_rows().into_iter().skip(1).collect());
        body.into_table_with(false, &self.box_chars).into()
    }

    fn finish(mut self) -> Block {
        self.flush_inline();
        self.verbatim = None;
        while self.stack.len() > 1 {
            self.close_open_container();
        }
        match self.stack.pop() {
            Some(Container::Document(blocks)) => SequenceBlock::new(blocks).into(),
            _ => Block::empty(),
        }
    }

    /// Close a container left open by a truncated event stream.
    fn close_open_container(&mut self) {
        let end = match self.stack.last() {
            Some(Container::Quote(_)) => TagEnd::BlockQuote(None),
            Some(Container::List { next_number, .. }) => TagEnd::List(next_number.is_some()),
            Some(Container::Item(_)) => TagEnd::Item,
            Some(Container::Table(_)) => TagEnd::Table,
            Some(Container::Document(_)) | None => return,
        };
        self.end_tag(end);
    }
}

fn cell_alignment(alignment: CmarkAlignment) -> Alignment {
    match alignment {
        CmarkAlignment::None | CmarkAlignment::Left => Alignment::Left,
        CmarkAlignment::Center => Alignment::Center,
        CmarkAlignment::Right => Alignment::Right,
    }
}

fn stack_blocks(mut blocks: Vec<Block>) -> Block {
    if blocks.len() == 1 {
        blocks.pop().unwrap_or_default()
    } else {
        SequenceBlock::new(blocks).into()
    }
}

fn gutter(prefix: &'static str, content: Block) -> Block {
    let mut grid = GridBlock::new();
    grid.set_cell(0, 0, FillerBlock::new(prefix));
    grid.set_cell(0, 1, content);
    grid.into()
}

fn verbatim_block(verbatim: Verbatim) -> Block {
    match verbatim {
        Verbatim::Code { indented, text } => {
            let lines = PreformattedBlock::new([text]);
            if indented {
                gutter(INDENT, lines.into())
            } else {
                lines.into()
            }
        }
        Verbatim::Html(html) => PreformattedBlock::new([html]).into(),
    }
}
