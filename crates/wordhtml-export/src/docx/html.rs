use html_escape::{encode_double_quoted_attribute, encode_text};

use super::model::{Block, Cell, Inline, Paragraph, RunFormat, Table, VerticalAlign};
use super::package::Numbering;
use crate::directives::{Directives, StyleMap, StyleTarget};

const PAGE_BREAK: &str = "<div class=\"page-break\"></div>";

pub struct RenderContext<'a> {
    pub directives: &'a Directives,
    pub defaults: &'a StyleMap,
    pub numbering: &'a Numbering,
}

/// Render a block tree as an HTML body fragment.
pub fn render(blocks: &[Block], ctx: &RenderContext<'_>) -> String {
    let mut writer = HtmlWriter::new(ctx);
    writer.write_blocks(blocks);
    writer.finish()
}

struct OpenList {
    ordered: bool,
}

struct HtmlWriter<'a> {
    ctx: &'a RenderContext<'a>,
    out: String,
    /// Open lists, outermost first. Each one has exactly one open `<li>`.
    lists: Vec<OpenList>,
    /// Element left open for a non-fresh style target.
    merged: Option<StyleTarget>,
}

impl<'a> HtmlWriter<'a> {
    fn new(ctx: &'a RenderContext<'a>) -> Self {
        Self {
            ctx,
            out: String::new(),
            lists: Vec::new(),
            merged: None,
        }
    }

    fn finish(mut self) -> String {
        self.close_all();
        self.out
    }

    fn write_blocks(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::Paragraph(paragraph) => self.write_paragraph(paragraph),
                Block::Table(table) => {
                    self.close_all();
                    self.write_table(table);
                }
            }
        }
    }

    fn write_paragraph(&mut self, paragraph: &Paragraph) {
        let directives = self.ctx.directives;
        let target = paragraph
            .style_name
            .as_deref()
            .and_then(|name| directives.resolve(name, self.ctx.defaults));

        let list = paragraph.numbering.filter(|_| {
            directives.lists && target.as_ref().is_none_or(|t| t.tag == "p")
        });

        if directives.page_breaks && paragraph.page_break_before {
            self.close_all();
            self.out.push_str(PAGE_BREAK);
        }

        let segments: Vec<&[Inline]> = if directives.page_breaks {
            paragraph
                .inlines
                .split(|i| matches!(i, Inline::PageBreak))
                .collect()
        } else {
            vec![paragraph.inlines.as_slice()]
        };

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 {
                self.close_all();
                self.out.push_str(PAGE_BREAK);
            }

            let content = render_inlines(segment);
            if content.trim().is_empty() {
                continue;
            }

            if let Some(membership) = list {
                self.close_merged();
                let ordered = self
                    .ctx
                    .numbering
                    .is_ordered(&membership.num_id.to_string(), membership.level)
                    .unwrap_or(false);
                self.push_list_item(membership.level as usize, ordered, &content);
                continue;
            }

            self.close_lists();
            let target = target.clone().unwrap_or_else(|| StyleTarget::fresh("p"));
            let class = target.class.clone().or_else(|| {
                self.style_class(paragraph.style_name.as_deref(), &target)
            });

            if !target.fresh && self.merged.as_ref() == Some(&target) {
                self.out.push_str("<br />");
                self.out.push_str(&content);
                continue;
            }

            self.close_merged();
            open_tag(&mut self.out, &target.tag, class.as_deref());
            self.out.push_str(&content);
            if target.fresh {
                close_tag(&mut self.out, &target.tag);
            } else {
                self.merged = Some(target);
            }
        }
    }

    /// Class for a paragraph whose custom style has no mapping.
    fn style_class(&self, style_name: Option<&str>, target: &StyleTarget) -> Option<String> {
        let name = style_name?;
        if !self.ctx.directives.style_classes
            || name.eq_ignore_ascii_case("Normal")
            || self.ctx.directives.resolve(name, self.ctx.defaults).is_some()
            || target.tag != "p"
        {
            return None;
        }
        let slug = style_slug(name);
        (!slug.is_empty()).then_some(slug)
    }

    fn push_list_item(&mut self, level: usize, ordered: bool, content: &str) {
        while self.lists.len() > level + 1 {
            self.pop_list();
        }

        if self.lists.len() == level + 1 {
            let same_kind = self.lists.last().is_some_and(|l| l.ordered == ordered);
            if same_kind {
                self.out.push_str("</li>");
            } else {
                self.pop_list();
            }
        }

        while self.lists.len() < level + 1 {
            self.out.push_str(list_tag(ordered).0);
            self.lists.push(OpenList { ordered });
            if self.lists.len() < level + 1 {
                // Skipped nesting level: give the inner list a parent item.
                self.out.push_str("<li>");
            }
        }

        self.out.push_str("<li>");
        self.out.push_str(content);
    }

    fn pop_list(&mut self) {
        if let Some(list) = self.lists.pop() {
            self.out.push_str("</li>");
            self.out.push_str(list_tag(list.ordered).1);
        }
    }

    fn close_lists(&mut self) {
        while !self.lists.is_empty() {
            self.pop_list();
        }
    }

    fn close_merged(&mut self) {
        if let Some(target) = self.merged.take() {
            close_tag(&mut self.out, &target.tag);
        }
    }

    fn close_all(&mut self) {
        self.close_lists();
        self.close_merged();
    }

    fn write_table(&mut self, table: &Table) {
        let header_rows = table.rows.iter().take_while(|r| r.header).count();
        let (head, body) = table.rows.split_at(header_rows);

        self.out.push_str("<table>");
        if !head.is_empty() {
            self.out.push_str("<thead>");
            for row in head {
                self.write_row(&row.cells, "th");
            }
            self.out.push_str("</thead>");
        }
        if !body.is_empty() {
            self.out.push_str("<tbody>");
            for row in body {
                self.write_row(&row.cells, "td");
            }
            self.out.push_str("</tbody>");
        }
        self.out.push_str("</table>");
    }

    fn write_row(&mut self, cells: &[Cell], cell_tag: &str) {
        self.out.push_str("<tr>");
        for cell in cells {
            self.out.push('<');
            self.out.push_str(cell_tag);
            if cell.colspan > 1 {
                self.out.push_str(&format!(" colspan=\"{}\"", cell.colspan));
            }
            if cell.rowspan > 1 {
                self.out.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
            }
            self.out.push('>');

            let mut nested = HtmlWriter::new(self.ctx);
            nested.write_blocks(&cell.blocks);
            self.out.push_str(&nested.finish());

            close_tag(&mut self.out, cell_tag);
        }
        self.out.push_str("</tr>");
    }
}

fn list_tag(ordered: bool) -> (&'static str, &'static str) {
    if ordered {
        ("<ol>", "</ol>")
    } else {
        ("<ul>", "</ul>")
    }
}

fn open_tag(out: &mut String, tag: &str, class: Option<&str>) {
    out.push('<');
    out.push_str(tag);
    if let Some(class) = class {
        out.push_str(" class=\"");
        out.push_str(&encode_double_quoted_attribute(class));
        out.push('"');
    }
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// `My Custom Style` → `my-custom-style`.
pub fn style_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn render_inlines(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text { text, format } => wrap_formatted(&mut out, &encode_text(text), *format),
            Inline::LineBreak => out.push_str("<br />"),
            Inline::PageBreak => {}
            Inline::Link { href, children } => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(href));
                out.push_str("\">");
                out.push_str(&render_inlines(children));
                out.push_str("</a>");
            }
            Inline::Image { src, alt } => {
                out.push_str("<img src=\"");
                out.push_str(&encode_double_quoted_attribute(src));
                out.push('"');
                if let Some(alt) = alt {
                    out.push_str(" alt=\"");
                    out.push_str(&encode_double_quoted_attribute(alt));
                    out.push('"');
                }
                out.push_str(" />");
            }
        }
    }
    out
}

fn wrap_formatted(out: &mut String, text: &str, format: RunFormat) {
    let mut tags: Vec<&str> = Vec::new();
    if format.bold {
        tags.push("strong");
    }
    if format.italic {
        tags.push("em");
    }
    if format.underline {
        tags.push("u");
    }
    if format.strike {
        tags.push("s");
    }
    match format.vertical {
        VerticalAlign::Superscript => tags.push("sup"),
        VerticalAlign::Subscript => tags.push("sub"),
        VerticalAlign::Baseline => {}
    }

    for tag in &tags {
        open_tag(out, tag, None);
    }
    out.push_str(text);
    for tag in tags.iter().rev() {
        close_tag(out, tag);
    }
}
