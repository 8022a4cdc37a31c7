use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::options::StyleOptions;
use crate::error::CoreError;

/// Built-in style presets. Each one is a complete [`StyleOptions`] literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Default,
    Clean,
    Professional,
    Print,
    Web,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Default,
        Preset::Clean,
        Preset::Professional,
        Preset::Print,
        Preset::Web,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Clean => "clean",
            Preset::Professional => "professional",
            Preset::Print => "print",
            Preset::Web => "web",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Default => "Balanced sans-serif layout with striped tables",
            Preset::Clean => "Minimal styling, Word styles mapped to plain elements",
            Preset::Professional => "Serif body, navy headings, centered images",
            Preset::Print => "Black-on-white serif with page breaks, links removed",
            Preset::Web => "System fonts, roomy spacing, responsive images",
        }
    }

    pub fn options(self) -> StyleOptions {
        match self {
            Preset::Default => StyleOptions {
                font_family: "Arial, sans-serif".to_string(),
                font_size: 16,
                line_height: 1.6,
                page_margin: 40,
                text_color: "#333333".to_string(),
                heading_color: "#2c3e50".to_string(),
                heading_margin: 20,
                heading_bold: true,
                heading_underline: false,
                table_border_color: "#dddddd".to_string(),
                table_header_bg: "#f5f5f5".to_string(),
                table_padding: 8,
                table_striped: true,
                preserve_images: true,
                image_max_width: 100,
                image_responsive: true,
                image_center: false,
                preserve_styles: true,
                preserve_lists: true,
                preserve_links: true,
                add_page_breaks: false,
                custom_css: String::new(),
                style_map: Vec::new(),
            },
            Preset::Clean => StyleOptions {
                font_family: "'Helvetica Neue', Helvetica, Arial, sans-serif".to_string(),
                font_size: 16,
                line_height: 1.7,
                page_margin: 30,
                text_color: "#222222".to_string(),
                heading_color: "#111111".to_string(),
                heading_margin: 24,
                heading_bold: true,
                heading_underline: false,
                table_border_color: "#eeeeee".to_string(),
                table_header_bg: "#fafafa".to_string(),
                table_padding: 10,
                table_striped: false,
                preserve_images: true,
                image_max_width: 100,
                image_responsive: true,
                image_center: false,
                preserve_styles: false,
                preserve_lists: true,
                preserve_links: true,
                add_page_breaks: false,
                custom_css: String::new(),
                style_map: Vec::new(),
            },
            Preset::Professional => StyleOptions {
                font_family: "Georgia, 'Times New Roman', serif".to_string(),
                font_size: 15,
                line_height: 1.6,
                page_margin: 50,
                text_color: "#2b2b2b".to_string(),
                heading_color: "#1a365d".to_string(),
                heading_margin: 28,
                heading_bold: true,
                heading_underline: false,
                table_border_color: "#cbd5e0".to_string(),
                table_header_bg: "#edf2f7".to_string(),
                table_padding: 10,
                table_striped: true,
                preserve_images: true,
                image_max_width: 90,
                image_responsive: true,
                image_center: true,
                preserve_styles: true,
                preserve_lists: true,
                preserve_links: true,
                add_page_breaks: false,
                custom_css: String::new(),
                style_map: Vec::new(),
            },
            Preset::Print => StyleOptions {
                font_family: "'Times New Roman', Times, serif".to_string(),
                font_size: 12,
                line_height: 1.5,
                page_margin: 20,
                text_color: "#000000".to_string(),
                heading_color: "#000000".to_string(),
                heading_margin: 18,
                heading_bold: true,
                heading_underline: false,
                table_border_color: "#000000".to_string(),
                table_header_bg: "#e0e0e0".to_string(),
                table_padding: 6,
                table_striped: false,
                preserve_images: true,
                image_max_width: 100,
                image_responsive: false,
                image_center: true,
                preserve_styles: true,
                preserve_lists: true,
                preserve_links: false,
                add_page_breaks: true,
                custom_css: "@media print { body { margin: 0; } }".to_string(),
                style_map: Vec::new(),
            },
            Preset::Web => StyleOptions {
                font_family: "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif"
                    .to_string(),
                font_size: 17,
                line_height: 1.75,
                page_margin: 24,
                text_color: "#1f2933".to_string(),
                heading_color: "#0b7285".to_string(),
                heading_margin: 32,
                heading_bold: true,
                heading_underline: false,
                table_border_color: "#d9e2ec".to_string(),
                table_header_bg: "#f0f4f8".to_string(),
                table_padding: 12,
                table_striped: true,
                preserve_images: true,
                image_max_width: 100,
                image_responsive: true,
                image_center: true,
                preserve_styles: false,
                preserve_lists: true,
                preserve_links: true,
                add_page_breaks: false,
                custom_css: String::new(),
                style_map: Vec::new(),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownPreset(wanted.to_string()))
    }
}
