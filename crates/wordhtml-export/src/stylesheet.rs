use serde::Serialize;
use tera::{Context, Tera};

use wordhtml_core::models::options::StyleOptions;

use crate::error::ExportError;

const TEMPLATE_NAME: &str = "stylesheet.css";

const TEMPLATE: &str = r#"body {
    font-family: {{ font_family }};
    font-size: {{ font_size }}px;
    line-height: {{ line_height }};
    margin: {{ page_margin }}px;
    color: {{ text_color }};
}

h1, h2, h3, h4, h5, h6 {
    color: {{ heading_color }};
    margin-top: {{ heading_margin }}px;
    margin-bottom: {{ heading_margin_bottom }}px;
{%- if heading_bold %}
    font-weight: bold;
{%- endif %}
{%- if heading_underline %}
    text-decoration: underline;
{%- endif %}
}

p {
    margin-bottom: 15px;
}

table {
    border-collapse: collapse;
    width: 100%;
    margin: 20px 0;
}

th, td {
    border: 1px solid {{ table_border_color }};
    padding: {{ table_padding }}px;
    text-align: left;
}

th {
    background-color: {{ table_header_bg }};
}
{%- if table_striped %}

tr:nth-child(even) {
    background-color: rgba(0,0,0,0.02);
}
{%- endif %}

img {
    max-width: {{ image_max_width }}%;
    height: auto;
{%- if not image_responsive %}
    width: auto;
{%- endif %}
{%- if image_center %}
    display: block;
    margin: 0 auto;
{%- endif %}
}
{%- if add_page_breaks %}

.page-break {
    page-break-before: always;
}
{%- endif %}
{%- if custom_css %}

{{ custom_css }}
{%- endif %}
"#;

/// Template inputs. Numbers are preformatted so that `2.0` renders as `2`
/// and `12.5` keeps its fraction.
#[derive(Serialize)]
struct StylesheetContext<'a> {
    font_family: &'a str,
    font_size: u32,
    line_height: String,
    page_margin: u32,
    text_color: &'a str,
    heading_color: &'a str,
    heading_margin: u32,
    heading_margin_bottom: String,
    heading_bold: bool,
    heading_underline: bool,
    table_border_color: &'a str,
    table_header_bg: &'a str,
    table_padding: u32,
    table_striped: bool,
    image_max_width: u32,
    image_responsive: bool,
    image_center: bool,
    add_page_breaks: bool,
    custom_css: &'a str,
}

impl<'a> From<&'a StyleOptions> for StylesheetContext<'a> {
    fn from(options: &'a StyleOptions) -> Self {
        Self {
            font_family: &options.font_family,
            font_size: options.font_size,
            line_height: css_number(options.line_height),
            page_margin: options.page_margin,
            text_color: &options.text_color,
            heading_color: &options.heading_color,
            heading_margin: options.heading_margin,
            heading_margin_bottom: css_number(f64::from(options.heading_margin) / 2.0),
            heading_bold: options.heading_bold,
            heading_underline: options.heading_underline,
            table_border_color: &options.table_border_color,
            table_header_bg: &options.table_header_bg,
            table_padding: options.table_padding,
            table_striped: options.table_striped,
            image_max_width: options.image_max_width,
            image_responsive: options.image_responsive,
            image_center: options.image_center,
            add_page_breaks: options.add_page_breaks,
            custom_css: &options.custom_css,
        }
    }
}

/// Compile the CSS for a document from its style options.
///
/// Option values are inserted verbatim; nothing is validated, so a bad
/// color only produces an ignored declaration. `custom_css` is appended
/// last, unescaped.
pub fn compile_stylesheet(options: &StyleOptions) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let context = Context::from_serialize(StylesheetContext::from(options))?;
    let css = tera.render(TEMPLATE_NAME, &context)?;
    Ok(css)
}

/// Shortest decimal form of a CSS number (`1.5`, `2`, `12.5`).
pub fn css_number(value: f64) -> String {
    format!("{value}")
}
