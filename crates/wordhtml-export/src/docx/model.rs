//! Intermediate document tree between the OOXML reader and the HTML writer.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub vertical: VerticalAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, format: RunFormat },
    LineBreak,
    PageBreak,
    Link { href: String, children: Vec<Inline> },
    Image { src: String, alt: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMembership {
    pub num_id: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub style_name: Option<String>,
    pub numbering: Option<ListMembership>,
    pub page_break_before: bool,
    pub inlines: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub blocks: Vec<Block>,
    pub colspan: u32,
    pub rowspan: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub header: bool,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}
