use std::collections::HashMap;
use std::io::{Read, Seek};

use roxmltree::Node;

use super::model::{
    Block, Cell, Inline, ListMembership, Paragraph, Row, RunFormat, Table, VerticalAlign,
};
use super::package::{
    MediaLoader, Relationships, StyleNames, on_off, r_attr, resolve_target, w_attr, w_child,
    w_children, w_name,
};
use crate::directives::{Directives, ImageMode};
use crate::error::ExportError;

/// Walks `word/document.xml` and builds the intermediate block tree.
pub struct BodyReader<'a, R> {
    pub relationships: &'a Relationships,
    pub styles: &'a StyleNames,
    pub directives: &'a Directives,
    pub media: MediaLoader<'a, R>,
}

/// Deepest list level WordprocessingML defines (`w:ilvl` 0 through 8).
const MAX_LIST_LEVEL: u32 = 8;

enum VerticalMerge {
    Restart,
    Continue,
}

impl<R: Read + Seek> BodyReader<'_, R> {
    /// Block-level children of `w:body`, a table cell or a content control.
    pub fn read_blocks(&mut self, parent: Node<'_, '_>) -> Result<Vec<Block>, ExportError> {
        let mut blocks = Vec::new();
        for child in parent.children() {
            match w_name(child) {
                Some("p") => blocks.push(Block::Paragraph(self.read_paragraph(child)?)),
                Some("tbl") => blocks.push(Block::Table(self.read_table(child)?)),
                Some("sdt") => {
                    if let Some(content) = w_child(child, "sdtContent") {
                        blocks.extend(self.read_blocks(content)?);
                    }
                }
                _ => {}
            }
        }
        Ok(blocks)
    }

    fn read_paragraph(&mut self, node: Node<'_, '_>) -> Result<Paragraph, ExportError> {
        let props = w_child(node, "pPr");

        let style_name = props
            .and_then(|p| w_child(p, "pStyle"))
            .and_then(|s| w_attr(s, "val"))
            .map(|id| self.styles.name_for(id));

        let numbering = props.and_then(|p| w_child(p, "numPr")).and_then(|num_pr| {
            let num_id = w_child(num_pr, "numId")
                .and_then(|n| w_attr(n, "val"))
                .and_then(|v| v.parse::<u32>().ok())?;
            let level = w_child(num_pr, "ilvl")
                .and_then(|n| w_attr(n, "val"))
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(0)
                .min(MAX_LIST_LEVEL);
            // numId 0 explicitly removes numbering inherited from the style.
            (num_id != 0).then_some(ListMembership { num_id, level })
        });

        let page_break_before = props
            .and_then(|p| w_child(p, "pageBreakBefore"))
            .is_some_and(on_off);

        let mut inlines = Vec::new();
        self.read_inlines(node, &mut inlines)?;

        Ok(Paragraph {
            style_name,
            numbering,
            page_break_before,
            inlines,
        })
    }

    fn read_inlines(
        &mut self,
        parent: Node<'_, '_>,
        out: &mut Vec<Inline>,
    ) -> Result<(), ExportError> {
        for child in parent.children() {
            match w_name(child) {
                Some("r") => self.read_run(child, out)?,
                Some("hyperlink") => {
                    let mut children = Vec::new();
                    self.read_inlines(child, &mut children)?;
                    match self.hyperlink_href(child) {
                        Some(href) if !self.directives.strip_hyperlinks => {
                            out.push(Inline::Link { href, children })
                        }
                        _ => out.extend(children),
                    }
                }
                Some("ins" | "smartTag" | "customXml" | "fldSimple") => {
                    self.read_inlines(child, out)?
                }
                Some("sdt") => {
                    if let Some(content) = w_child(child, "sdtContent") {
                        self.read_inlines(content, out)?;
                    }
                }
                // w:del, w:pPr, bookmarks and proofing marks carry no output.
                _ => {}
            }
        }
        Ok(())
    }

    fn hyperlink_href(&self, node: Node<'_, '_>) -> Option<String> {
        if let Some(rel) = r_attr(node, "id").and_then(|id| self.relationships.get(id)) {
            let mut href = rel.target.clone();
            if let Some(anchor) = w_attr(node, "anchor") {
                href.push('#');
                href.push_str(anchor);
            }
            return Some(href);
        }
        w_attr(node, "anchor").map(|anchor| format!("#{anchor}"))
    }

    fn read_run(&mut self, node: Node<'_, '_>, out: &mut Vec<Inline>) -> Result<(), ExportError> {
        let format = w_child(node, "rPr")
            .map(run_format)
            .unwrap_or_default();
        self.read_run_content(node, format, out)
    }

    fn read_run_content(
        &mut self,
        node: Node<'_, '_>,
        format: RunFormat,
        out: &mut Vec<Inline>,
    ) -> Result<(), ExportError> {
        for child in node.children().filter(|c| c.is_element()) {
            if child.tag_name().name() == "AlternateContent" {
                if let Some(choice) = child
                    .children()
                    .find(|c| c.is_element() && c.tag_name().name() == "Choice")
                {
                    self.read_run_content(choice, format, out)?;
                }
                continue;
            }

            match w_name(child) {
                Some("t") => push_text(out, child.text().unwrap_or_default(), format),
                Some("tab") => push_text(out, "\t", format),
                Some("noBreakHyphen") => push_text(out, "-", format),
                Some("br") => match w_attr(child, "type") {
                    Some("page") => out.push(Inline::PageBreak),
                    Some("column") => {}
                    _ => out.push(Inline::LineBreak),
                },
                Some("cr") => out.push(Inline::LineBreak),
                Some("drawing") => {
                    let alt = child
                        .descendants()
                        .find(|d| d.is_element() && d.tag_name().name() == "docPr")
                        .and_then(|d| d.attribute("descr"))
                        .filter(|d| !d.is_empty())
                        .map(str::to_string);
                    let blips: Vec<&str> = child
                        .descendants()
                        .filter(|d| d.is_element() && d.tag_name().name() == "blip")
                        .filter_map(|d| r_attr(d, "embed").or_else(|| r_attr(d, "link")))
                        .collect();
                    for rel_id in blips {
                        self.push_image(rel_id, alt.clone(), out)?;
                    }
                }
                Some("pict") => {
                    let images: Vec<(&str, Option<String>)> = child
                        .descendants()
                        .filter(|d| d.is_element() && d.tag_name().name() == "imagedata")
                        .filter_map(|d| {
                            let alt = d.attribute("title").map(str::to_string);
                            r_attr(d, "id").map(|id| (id, alt))
                        })
                        .collect();
                    for (rel_id, alt) in images {
                        self.push_image(rel_id, alt, out)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn push_image(
        &mut self,
        rel_id: &str,
        alt: Option<String>,
        out: &mut Vec<Inline>,
    ) -> Result<(), ExportError> {
        if self.directives.images == ImageMode::Omit {
            return Ok(());
        }

        let Some(rel) = self.relationships.get(rel_id) else {
            tracing::warn!(rel_id, "image relationship not found; skipping image");
            return Ok(());
        };

        if rel.external {
            out.push(Inline::Image {
                src: rel.target.clone(),
                alt,
            });
            return Ok(());
        }

        let part = resolve_target("word", &rel.target);
        match self.media.data_uri(&part)? {
            Some(src) => out.push(Inline::Image { src, alt }),
            None => tracing::warn!(part = %part, "image part missing from package; skipping image"),
        }
        Ok(())
    }

    fn read_table(&mut self, node: Node<'_, '_>) -> Result<Table, ExportError> {
        let mut rows: Vec<Row> = Vec::new();
        // Grid column → (row, cell) of the cell a vertical merge started in.
        let mut merge_origins: HashMap<usize, (usize, usize)> = HashMap::new();

        for tr in w_children(node, "tr") {
            let header = w_child(tr, "trPr")
                .and_then(|p| w_child(p, "tblHeader"))
                .is_some_and(on_off);

            let mut cells = Vec::new();
            let mut column = 0usize;
            for tc in w_children(tr, "tc") {
                let props = w_child(tc, "tcPr");
                let colspan = props
                    .and_then(|p| w_child(p, "gridSpan"))
                    .and_then(|g| w_attr(g, "val"))
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(1)
                    .max(1);
                let merge = props.and_then(|p| w_child(p, "vMerge")).map(|m| {
                    match w_attr(m, "val") {
                        Some("restart") => VerticalMerge::Restart,
                        _ => VerticalMerge::Continue,
                    }
                });

                match merge {
                    Some(VerticalMerge::Continue) => {
                        if let Some(&(row, cell)) = merge_origins.get(&column) {
                            rows[row].cells[cell].rowspan += 1;
                            column += colspan as usize;
                            continue;
                        }
                    }
                    Some(VerticalMerge::Restart) => {
                        merge_origins.insert(column, (rows.len(), cells.len()));
                    }
                    None => {
                        merge_origins.remove(&column);
                    }
                }

                cells.push(Cell {
                    blocks: self.read_blocks(tc)?,
                    colspan,
                    rowspan: 1,
                });
                column += colspan as usize;
            }

            rows.push(Row { header, cells });
        }

        Ok(Table { rows })
    }
}

fn run_format(props: Node<'_, '_>) -> RunFormat {
    let flag = |name: &str| w_child(props, name).is_some_and(on_off);
    let vertical = match w_child(props, "vertAlign").and_then(|v| w_attr(v, "val")) {
        Some("superscript") => VerticalAlign::Superscript,
        Some("subscript") => VerticalAlign::Subscript,
        _ => VerticalAlign::Baseline,
    };
    RunFormat {
        bold: flag("b"),
        italic: flag("i"),
        underline: flag("u"),
        strike: flag("strike") || flag("dstrike"),
        vertical,
    }
}

fn push_text(out: &mut Vec<Inline>, text: &str, format: RunFormat) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text {
        text: previous,
        format: previous_format,
    }) = out.last_mut()
        && *previous_format == format
    {
        previous.push_str(text);
        return;
    }
    out.push(Inline::Text {
        text: text.to_string(),
        format,
    });
}
