mod common;

use common::{DocxBuilder, list_paragraph, paragraph, run, styled_paragraph};
use wordhtml_core::models::options::StyleOptions;
use wordhtml_core::models::preset::Preset;
use wordhtml_export::directives::{Directives, ImageMode};
use wordhtml_export::docx::convert_docx_bytes;
use wordhtml_export::error::ExportError;

fn convert(builder: &DocxBuilder, directives: &Directives) -> String {
    convert_docx_bytes(&builder.build(), directives).unwrap()
}

fn derived(edit: impl FnOnce(&mut StyleOptions)) -> Directives {
    let mut options = Preset::Default.options();
    edit(&mut options);
    Directives::derive(&options).unwrap()
}

#[test]
fn headings_paragraphs_and_run_formatting() {
    let builder = DocxBuilder::new()
        .style("Heading1", "heading 1")
        .body(&styled_paragraph("Heading1", "Intro"))
        .body(&format!(
            r#"<w:p>{}<w:r><w:rPr><w:b/></w:rPr><w:t>wor</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>ld</w:t></w:r></w:p>"#,
            run("Hello ")
        ));

    assert_eq!(
        convert(&builder, &Directives::default()),
        "<h1>Intro</h1><p>Hello <strong>world</strong></p>"
    );
}

#[test]
fn nested_run_formatting_and_escaping() {
    let builder = DocxBuilder::new().body(
        r#"<w:p><w:r><w:rPr><w:b/><w:i/><w:u w:val="single"/></w:rPr><w:t>a &lt; b</w:t></w:r><w:r><w:rPr><w:b w:val="0"/><w:vertAlign w:val="superscript"/></w:rPr><w:t>2</w:t></w:r></w:p>"#,
    );

    assert_eq!(
        convert(&builder, &Directives::default()),
        "<p><strong><em><u>a &lt; b</u></em></strong><sup>2</sup></p>"
    );
}

#[test]
fn empty_paragraphs_are_dropped() {
    let builder = DocxBuilder::new()
        .body("<w:p/>")
        .body(&paragraph("kept"))
        .body("<w:p><w:r><w:t></w:t></w:r></w:p>");

    assert_eq!(convert(&builder, &Directives::default()), "<p>kept</p>");
}

#[test]
fn unmapped_custom_styles_become_classes_only_when_preserving_styles() {
    let builder = DocxBuilder::new()
        .style("Note", "Side Note")
        .body(&styled_paragraph("Note", "careful"));

    let preserving = derived(|o| o.preserve_styles = true);
    assert_eq!(convert(&builder, &preserving), r#"<p class="side-note">careful</p>"#);

    let plain = derived(|o| o.preserve_styles = false);
    assert_eq!(convert(&builder, &plain), "<p>careful</p>");
}

const NUMBERING: &str = r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl><w:lvl w:ilvl="1"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>"#;

fn list_document() -> DocxBuilder {
    DocxBuilder::new()
        .style("ListParagraph", "List Paragraph")
        .numbering(NUMBERING)
        .body(&list_paragraph(1, 0, "A"))
        .body(&list_paragraph(1, 1, "B"))
        .body(&list_paragraph(1, 0, "C"))
        .body(&paragraph("after"))
}

#[test]
fn numbered_paragraphs_become_nested_lists() {
    let directives = derived(|o| o.preserve_lists = true);
    assert_eq!(
        convert(&list_document(), &directives),
        "<ul><li>A<ol><li>B</li></ol></li><li>C</li></ul><p>after</p>"
    );
}

#[test]
fn lists_flatten_to_paragraphs_when_not_preserved() {
    let directives = derived(|o| o.preserve_lists = false);
    assert_eq!(
        convert(&list_document(), &directives),
        "<p>A</p><p>B</p><p>C</p><p>after</p>"
    );
}

#[test]
fn list_depth_is_capped_at_the_deepest_word_level() {
    let builder = DocxBuilder::new()
        .style("ListParagraph", "List Paragraph")
        .numbering(NUMBERING)
        .body(&list_paragraph(1, 5_000_000, "deep"));

    let html = convert(&builder, &Directives::default());

    let expected = format!(
        "{}<ul><li>deep{}",
        "<ul><li>".repeat(8),
        "</li></ul>".repeat(9)
    );
    assert_eq!(html, expected);
}

#[test]
fn numbered_headings_stay_headings() {
    let builder = DocxBuilder::new()
        .style("Heading2", "heading 2")
        .numbering(NUMBERING)
        .body(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p>"#,
        );

    assert_eq!(convert(&builder, &Directives::default()), "<h2>Scope</h2>");
}

#[test]
fn hyperlinks_are_kept_or_unwrapped() {
    let builder = DocxBuilder::new()
        .relationship("rId5", "https://example.com/?a=1&amp;b=2", true)
        .body(&format!(
            r#"<w:p><w:hyperlink r:id="rId5">{}</w:hyperlink>{}<w:hyperlink w:anchor="sec2">{}</w:hyperlink></w:p>"#,
            run("site"),
            run(" and "),
            run("below")
        ));

    let keep = derived(|o| o.preserve_links = true);
    assert_eq!(
        convert(&builder, &keep),
        r##"<p><a href="https://example.com/?a=1&amp;b=2">site</a> and <a href="#sec2">below</a></p>"##
    );

    let strip = derived(|o| o.preserve_links = false);
    assert_eq!(convert(&builder, &strip), "<p>site and below</p>");
}

const DRAWING: &str = r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" descr="Logo"/><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="rId7"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#;

#[test]
fn images_are_inlined_as_data_uris() {
    let builder = DocxBuilder::new()
        .relationship("rId7", "media/image1.png", false)
        .media("word/media/image1.png", &[1, 2, 3])
        .body(DRAWING);

    let directives = derived(|o| o.preserve_images = true);
    assert_eq!(directives.images, ImageMode::Inline);
    assert_eq!(
        convert(&builder, &directives),
        r#"<p><img src="data:image/png;base64,AQID" alt="Logo" /></p>"#
    );
}

#[test]
fn image_alt_text_is_attribute_escaped() {
    let builder = DocxBuilder::new()
        .relationship("rId7", "media/image1.png", false)
        .media("word/media/image1.png", &[1, 2, 3])
        .body(&DRAWING.replace("descr=\"Logo\"", "descr=\"Say &quot;hi&quot; &amp; wave\""));

    assert_eq!(
        convert(&builder, &Directives::default()),
        r#"<p><img src="data:image/png;base64,AQID" alt="Say &quot;hi&quot; &amp; wave" /></p>"#
    );
}

#[test]
fn images_are_dropped_when_not_preserved() {
    let builder = DocxBuilder::new()
        .relationship("rId7", "media/image1.png", false)
        .media("word/media/image1.png", &[1, 2, 3])
        .body(DRAWING)
        .body(&paragraph("caption"));

    let directives = derived(|o| o.preserve_images = false);
    assert_eq!(convert(&builder, &directives), "<p>caption</p>");
}

#[test]
fn missing_image_parts_are_skipped() {
    let builder = DocxBuilder::new()
        .relationship("rId7", "media/gone.png", false)
        .body(DRAWING)
        .body(&paragraph("text"));

    assert_eq!(convert(&builder, &Directives::default()), "<p>text</p>");
}

#[test]
fn tables_with_header_rows_and_merged_cells() {
    let cell = |text: &str, props: &str| {
        format!("<w:tc><w:tcPr>{props}</w:tcPr>{}</w:tc>", paragraph(text))
    };
    let table = format!(
        "<w:tbl>\
         <w:tr><w:trPr><w:tblHeader/></w:trPr>{}{}</w:tr>\
         <w:tr>{}{}</w:tr>\
         <w:tr><w:tc><w:tcPr><w:vMerge/></w:tcPr><w:p/></w:tc>{}</w:tr>\
         <w:tr>{}</w:tr>\
         </w:tbl>",
        cell("Name", ""),
        cell("Score", ""),
        cell("Ann", r#"<w:vMerge w:val="restart"/>"#),
        cell("1", ""),
        cell("2", ""),
        cell("Total", r#"<w:gridSpan w:val="2"/>"#),
    );
    let builder = DocxBuilder::new().body(&table);

    assert_eq!(
        convert(&builder, &Directives::default()),
        concat!(
            "<table>",
            "<thead><tr><th><p>Name</p></th><th><p>Score</p></th></tr></thead>",
            "<tbody>",
            r#"<tr><td rowspan="2"><p>Ann</p></td><td><p>1</p></td></tr>"#,
            "<tr><td><p>2</p></td></tr>",
            r#"<tr><td colspan="2"><p>Total</p></td></tr>"#,
            "</tbody>",
            "</table>"
        )
    );
}

#[test]
fn page_breaks_split_paragraphs_when_enabled() {
    let builder = DocxBuilder::new().body(&format!(
        r#"<w:p>{}<w:r><w:br w:type="page"/></w:r>{}</w:p>"#,
        run("one"),
        run("two")
    ));

    let enabled = derived(|o| o.add_page_breaks = true);
    assert_eq!(
        convert(&builder, &enabled),
        r#"<p>one</p><div class="page-break"></div><p>two</p>"#
    );

    let disabled = derived(|o| o.add_page_breaks = false);
    assert_eq!(convert(&builder, &disabled), "<p>onetwo</p>");
}

#[test]
fn non_fresh_mappings_merge_consecutive_paragraphs() {
    let builder = DocxBuilder::new()
        .style("Code", "Code")
        .body(&styled_paragraph("Code", "let a = 1;"))
        .body(&styled_paragraph("Code", "let b = 2;"))
        .body(&paragraph("done"));

    let directives = derived(|o| o.style_map.push("p[style-name='Code'] => pre".to_string()));
    assert_eq!(
        convert(&builder, &directives),
        "<pre>let a = 1;<br />let b = 2;</pre><p>done</p>"
    );
}

#[test]
fn content_controls_and_insertions_are_read() {
    let builder = DocxBuilder::new().body(&format!(
        "<w:sdt><w:sdtContent><w:p><w:ins>{}</w:ins><w:del><w:r><w:delText>gone</w:delText></w:r></w:del></w:p></w:sdtContent></w:sdt>",
        run("inserted")
    ));

    assert_eq!(convert(&builder, &Directives::default()), "<p>inserted</p>");
}

#[test]
fn non_zip_input_is_rejected() {
    let err = convert_docx_bytes(b"definitely not a zip", &Directives::default()).unwrap_err();
    assert!(matches!(err, ExportError::Archive(_)), "got {err:?}");
}

#[test]
fn missing_document_part_is_reported() {
    let builder = DocxBuilder::new().style("Heading1", "heading 1").without_document();
    let err = convert_docx_bytes(&builder.build(), &Directives::default()).unwrap_err();
    assert!(
        matches!(&err, ExportError::MissingPart(part) if part == "word/document.xml"),
        "got {err:?}"
    );
}

#[test]
fn malformed_xml_is_reported_with_its_part() {
    let builder = DocxBuilder::new().raw_document("<w:document><w:body>");
    let err = convert_docx_bytes(&builder.build(), &Directives::default()).unwrap_err();
    assert!(
        matches!(&err, ExportError::Xml { part, .. } if part == "word/document.xml"),
        "got {err:?}"
    );
}
