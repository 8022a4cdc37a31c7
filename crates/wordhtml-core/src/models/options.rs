use serde::{Deserialize, Serialize};

use super::preset::Preset;
use crate::error::CoreError;

/// Styling and extraction options for one conversion batch.
///
/// Every field is independent; there are no cross-field invariants. A missing
/// field in serialized form falls back to the `default` preset value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    // Typography
    pub font_family: String,
    /// Body font size in px.
    pub font_size: u32,
    /// Unitless line height.
    pub line_height: f64,
    /// Page margin in px, applied on all sides.
    pub page_margin: u32,
    pub text_color: String,

    // Headings
    pub heading_color: String,
    /// Top margin of headings in px; the bottom margin is half of it.
    pub heading_margin: u32,
    pub heading_bold: bool,
    pub heading_underline: bool,

    // Tables
    pub table_border_color: String,
    pub table_header_bg: String,
    /// Cell padding in px.
    pub table_padding: u32,
    pub table_striped: bool,

    // Images
    pub preserve_images: bool,
    /// Maximum image width as a percentage of the container.
    pub image_max_width: u32,
    pub image_responsive: bool,
    pub image_center: bool,

    // Structure
    pub preserve_styles: bool,
    pub preserve_lists: bool,
    pub preserve_links: bool,
    pub add_page_breaks: bool,

    /// Raw CSS appended verbatim after the generated rules.
    pub custom_css: String,

    /// Extra paragraph style mappings, e.g.
    /// `p[style-name='Code'] => pre`. Checked before the derived rules.
    pub style_map: Vec<String>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Preset::Default.options()
    }
}

impl StyleOptions {
    /// Every key accepted by [`StyleOptions::set_field`], in display order.
    pub const FIELDS: &'static [&'static str] = &[
        "font_family",
        "font_size",
        "line_height",
        "page_margin",
        "text_color",
        "heading_color",
        "heading_margin",
        "heading_bold",
        "heading_underline",
        "table_border_color",
        "table_header_bg",
        "table_padding",
        "table_striped",
        "preserve_images",
        "image_max_width",
        "image_responsive",
        "image_center",
        "preserve_styles",
        "preserve_lists",
        "preserve_links",
        "add_page_breaks",
        "custom_css",
        "style_map",
    ];

    /// Overwrite every field with the preset's value.
    pub fn apply_preset(&mut self, preset: Preset) {
        *self = preset.options();
    }

    /// Build options the way the settings form does: start from a preset,
    /// then apply each control value in order.
    pub fn from_form<'a, I>(preset: Preset, values: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = preset.options();
        for (key, value) in values {
            options.set_field(key, value)?;
        }
        Ok(options)
    }

    /// Parse a single textual control value into the named field.
    ///
    /// `style_map` appends one rule per call instead of replacing the list.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let key = key.trim().replace('-', "_");
        match key.as_str() {
            "font_family" => self.font_family = value.to_string(),
            "font_size" => self.font_size = parse_positive_int(&key, value)?,
            "line_height" => self.line_height = parse_line_height(value)?,
            "page_margin" => self.page_margin = parse_int(&key, value)?,
            "text_color" => self.text_color = value.to_string(),
            "heading_color" => self.heading_color = value.to_string(),
            "heading_margin" => self.heading_margin = parse_int(&key, value)?,
            "heading_bold" => self.heading_bold = parse_bool(&key, value)?,
            "heading_underline" => self.heading_underline = parse_bool(&key, value)?,
            "table_border_color" => self.table_border_color = value.to_string(),
            "table_header_bg" => self.table_header_bg = value.to_string(),
            "table_padding" => self.table_padding = parse_int(&key, value)?,
            "table_striped" => self.table_striped = parse_bool(&key, value)?,
            "preserve_images" => self.preserve_images = parse_bool(&key, value)?,
            "image_max_width" => self.image_max_width = parse_int(&key, value)?,
            "image_responsive" => self.image_responsive = parse_bool(&key, value)?,
            "image_center" => self.image_center = parse_bool(&key, value)?,
            "preserve_styles" => self.preserve_styles = parse_bool(&key, value)?,
            "preserve_lists" => self.preserve_lists = parse_bool(&key, value)?,
            "preserve_links" => self.preserve_links = parse_bool(&key, value)?,
            "add_page_breaks" => self.add_page_breaks = parse_bool(&key, value)?,
            "custom_css" => self.custom_css = value.to_string(),
            "style_map" => self.style_map.push(value.to_string()),
            _ => return Err(CoreError::UnknownOption(key)),
        }
        Ok(())
    }

    /// Apply a `KEY=VALUE` assignment, as given on the command line.
    pub fn assign(&mut self, assignment: &str) -> Result<(), CoreError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| CoreError::MalformedAssignment(assignment.to_string()))?;
        self.set_field(key, value)
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> CoreError {
    CoreError::InvalidOptionValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_int(field: &str, value: &str) -> Result<u32, CoreError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid(field, value, &e.to_string()))
}

fn parse_positive_int(field: &str, value: &str) -> Result<u32, CoreError> {
    match parse_int(field, value)? {
        0 => Err(invalid(field, value, "must be greater than zero")),
        n => Ok(n),
    }
}

fn parse_line_height(value: &str) -> Result<f64, CoreError> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid("line_height", value, &e.to_string()))?;
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err(invalid("line_height", value, "must be a positive number"));
    }
    Ok(parsed)
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(field, value, "expected true or false")),
    }
}
