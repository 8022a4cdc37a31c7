use std::str::FromStr;

use wordhtml_core::models::options::StyleOptions;

use crate::error::ExportError;

/// HTML element a Word paragraph style is rendered as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTarget {
    pub tag: String,
    pub class: Option<String>,
    /// A fresh target always opens a new element. Consecutive paragraphs
    /// sharing a non-fresh target are merged into one element.
    pub fresh: bool,
}

impl StyleTarget {
    pub fn fresh(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: None,
            fresh: true,
        }
    }
}

/// One `p[style-name='Name'] => tag.class:fresh` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub style_name: String,
    pub target: StyleTarget,
}

impl StyleRule {
    pub fn paragraph(style_name: &str, target: StyleTarget) -> Self {
        Self {
            style_name: style_name.to_string(),
            target,
        }
    }

    pub fn matches(&self, style_name: &str) -> bool {
        self.style_name.eq_ignore_ascii_case(style_name)
    }
}

impl FromStr for StyleRule {
    type Err = ExportError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ExportError::InvalidStyleMapping {
            rule: rule.to_string(),
            reason: reason.to_string(),
        };

        let (selector, target) = rule
            .split_once("=>")
            .ok_or_else(|| invalid("expected `selector => element`"))?;

        let style_name = parse_selector(selector.trim()).ok_or_else(|| {
            invalid("only `p[style-name='...']` selectors are supported")
        })?;

        let mut target = target.trim();
        let fresh = match target.strip_suffix(":fresh") {
            Some(rest) => {
                target = rest;
                true
            }
            None => false,
        };
        if target.contains(':') {
            return Err(invalid("unknown modifier; only `:fresh` is supported"));
        }

        let (tag, class) = match target.split_once('.') {
            Some((tag, class)) => (tag, Some(class)),
            None => (target, None),
        };
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("element name must be alphanumeric"));
        }
        if let Some(class) = class
            && (class.is_empty()
                || !class
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            return Err(invalid("class name must be alphanumeric, `-` or `_`"));
        }

        Ok(StyleRule {
            style_name,
            target: StyleTarget {
                tag: tag.to_ascii_lowercase(),
                class: class.map(str::to_string),
                fresh,
            },
        })
    }
}

/// `p[style-name='Heading 1']` → `Heading 1`.
fn parse_selector(selector: &str) -> Option<String> {
    let inner = selector.strip_prefix("p[")?.strip_suffix(']')?;
    let value = inner.trim().strip_prefix("style-name")?.trim_start();
    let value = value.strip_prefix('=')?.trim();
    let quote = value.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let name = value.strip_prefix(quote)?.strip_suffix(quote)?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Ordered style rules; the first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    pub rules: Vec<StyleRule>,
}

impl StyleMap {
    pub fn lookup(&self, style_name: &str) -> Option<&StyleTarget> {
        self.rules
            .iter()
            .find(|r| r.matches(style_name))
            .map(|r| &r.target)
    }

    /// Mappings the reader applies when no directive rule matches.
    pub fn defaults() -> Self {
        let mut rules: Vec<StyleRule> = (1..=6)
            .map(|n| {
                StyleRule::paragraph(&format!("Heading {n}"), StyleTarget::fresh(&format!("h{n}")))
            })
            .collect();
        rules.push(StyleRule::paragraph("Title", StyleTarget::fresh("h1")));
        rules.push(StyleRule::paragraph("Subtitle", StyleTarget::fresh("h2")));
        rules.push(StyleRule::paragraph("Quote", StyleTarget::fresh("blockquote")));
        rules.push(StyleRule::paragraph(
            "Intense Quote",
            StyleTarget::fresh("blockquote"),
        ));
        Self { rules }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Embed image bytes as base64 `data:` URIs.
    Inline,
    Omit,
}

/// Extraction instructions handed to a [`crate::converter::DocumentConverter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directives {
    /// Rules checked before the reader's defaults.
    pub style_map: StyleMap,
    /// Emit `class="<style>"` on paragraphs whose custom style has no mapping.
    pub style_classes: bool,
    /// Render numbered paragraphs as nested `ul`/`ol` lists.
    pub lists: bool,
    /// Replace hyperlinks with their text.
    pub strip_hyperlinks: bool,
    pub images: ImageMode,
    /// Turn Word page breaks into `<div class="page-break"></div>`.
    pub page_breaks: bool,
}

impl Default for Directives {
    fn default() -> Self {
        Self {
            style_map: StyleMap::default(),
            style_classes: true,
            lists: true,
            strip_hyperlinks: false,
            images: ImageMode::Inline,
            page_breaks: false,
        }
    }
}

impl Directives {
    /// Derive directives from the extraction-related style options.
    ///
    /// Fails only when one of `options.style_map` cannot be parsed.
    pub fn derive(options: &StyleOptions) -> Result<Self, ExportError> {
        let mut rules = options
            .style_map
            .iter()
            .map(|r| r.parse::<StyleRule>())
            .collect::<Result<Vec<_>, _>>()?;

        if !options.preserve_styles {
            for n in 1..=6 {
                rules.push(StyleRule::paragraph(
                    &format!("Heading {n}"),
                    StyleTarget::fresh(&format!("h{n}")),
                ));
            }
            rules.push(StyleRule::paragraph("Normal", StyleTarget::fresh("p")));
        }

        if !options.preserve_lists {
            rules.push(StyleRule::paragraph(
                "List Paragraph",
                StyleTarget::fresh("p"),
            ));
        }

        Ok(Self {
            style_map: StyleMap { rules },
            style_classes: options.preserve_styles,
            lists: options.preserve_lists,
            strip_hyperlinks: !options.preserve_links,
            // Unpreserved images are dropped outright, not inlined.
            images: if options.preserve_images {
                ImageMode::Inline
            } else {
                ImageMode::Omit
            },
            page_breaks: options.add_page_breaks,
        })
    }

    /// Target for a paragraph style: directive rules first, then defaults.
    pub fn resolve(&self, style_name: &str, defaults: &StyleMap) -> Option<StyleTarget> {
        self.style_map
            .lookup(style_name)
            .or_else(|| defaults.lookup(style_name))
            .cloned()
    }
}
