use std::collections::HashMap;
use std::io::{Read, Seek};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use roxmltree::{Document, Node};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::ExportError;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const W_STRICT_NS: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const R_STRICT_NS: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships";

/// Local name of a WordprocessingML element (transitional or strict).
pub fn w_name<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    if !node.is_element() {
        return None;
    }
    let tag = node.tag_name();
    match tag.namespace() {
        Some(W_NS) | Some(W_STRICT_NS) => Some(tag.name()),
        _ => None,
    }
}

pub fn w_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| w_name(*c) == Some(name))
}

pub fn w_children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| w_name(*c) == Some(name))
}

pub fn w_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((W_NS, name))
        .or_else(|| node.attribute((W_STRICT_NS, name)))
}

/// `r:id` / `r:embed` style relationship attributes.
pub fn r_attr<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((R_NS, name))
        .or_else(|| node.attribute((R_STRICT_NS, name)))
}

/// OOXML on/off property: present without `w:val`, or with a truthy value.
pub fn on_off(node: Node<'_, '_>) -> bool {
    !matches!(w_attr(node, "val"), Some("0" | "false" | "off" | "none"))
}

pub fn parse_xml<'input>(part: &str, xml: &'input str) -> Result<Document<'input>, ExportError> {
    Document::parse(xml).map_err(|source| ExportError::Xml {
        part: part.to_string(),
        source,
    })
}

/// Read a text part; `Ok(None)` when the package does not contain it.
pub fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ExportError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    tracing::debug!(part = name, bytes = contents.len(), "read package part");
    Ok(Some(contents))
}

fn read_binary_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, ExportError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(Some(contents))
}

#[derive(Debug, Clone)]
pub struct Relationship {
    pub target: String,
    pub external: bool,
}

/// Relationship id → target, from a `.rels` part.
#[derive(Debug, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    pub fn parse(xml: &str) -> Result<Self, ExportError> {
        let doc = parse_xml(DOCUMENT_RELS_PART, xml)?;
        let by_id = doc
            .root_element()
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Relationship")
            .filter_map(|n| {
                let id = n.attribute("Id")?;
                let target = n.attribute("Target")?;
                Some((
                    id.to_string(),
                    Relationship {
                        target: target.to_string(),
                        external: n.attribute("TargetMode") == Some("External"),
                    },
                ))
            })
            .collect();
        Ok(Self { by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }
}

/// Style id → display name, from `word/styles.xml`.
#[derive(Debug, Default)]
pub struct StyleNames {
    by_id: HashMap<String, String>,
}

impl StyleNames {
    pub fn parse(xml: &str) -> Result<Self, ExportError> {
        let doc = parse_xml(STYLES_PART, xml)?;
        let by_id = w_children(doc.root_element(), "style")
            .filter_map(|style| {
                let id = w_attr(style, "styleId")?;
                let name = w_child(style, "name").and_then(|n| w_attr(n, "val"))?;
                Some((id.to_string(), name.to_string()))
            })
            .collect();
        Ok(Self { by_id })
    }

    /// Display name for a style id, or the id itself when undeclared.
    pub fn name_for(&self, id: &str) -> String {
        self.by_id
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }
}

/// List definitions from `word/numbering.xml`.
#[derive(Debug, Default)]
pub struct Numbering {
    abstract_for_num: HashMap<String, String>,
    /// (abstract id, level) → number format, e.g. `bullet`, `decimal`.
    formats: HashMap<(String, u32), String>,
}

impl Numbering {
    pub fn parse(xml: &str) -> Result<Self, ExportError> {
        let doc = parse_xml(NUMBERING_PART, xml)?;
        let root = doc.root_element();

        let abstract_for_num = w_children(root, "num")
            .filter_map(|num| {
                let num_id = w_attr(num, "numId")?;
                let abstract_id = w_child(num, "abstractNumId").and_then(|a| w_attr(a, "val"))?;
                Some((num_id.to_string(), abstract_id.to_string()))
            })
            .collect();

        let mut formats = HashMap::new();
        for abstract_num in w_children(root, "abstractNum") {
            let Some(abstract_id) = w_attr(abstract_num, "abstractNumId") else {
                continue;
            };
            for level in w_children(abstract_num, "lvl") {
                let Some(ilvl) = w_attr(level, "ilvl").and_then(|v| v.parse::<u32>().ok()) else {
                    continue;
                };
                if let Some(format) = w_child(level, "numFmt").and_then(|f| w_attr(f, "val")) {
                    formats.insert((abstract_id.to_string(), ilvl), format.to_string());
                }
            }
        }

        Ok(Self {
            abstract_for_num,
            formats,
        })
    }

    /// Whether a list level is numbered (`ol`) rather than bulleted.
    /// `None` when the numbering is not defined.
    pub fn is_ordered(&self, num_id: &str, level: u32) -> Option<bool> {
        let abstract_id = self.abstract_for_num.get(num_id)?;
        let format = self.formats.get(&(abstract_id.clone(), level))?;
        Some(format != "bullet" && format != "none")
    }
}

/// Resolve a relationship target against the directory of its source part.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let (base, path) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base_dir, target),
    };

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

pub fn mime_type(part: &str) -> &'static str {
    let ext = part
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

/// Reads media parts on demand and turns them into `data:` URIs.
pub struct MediaLoader<'a, R> {
    archive: &'a mut ZipArchive<R>,
    cache: HashMap<String, Option<String>>,
}

impl<'a, R: Read + Seek> MediaLoader<'a, R> {
    pub fn new(archive: &'a mut ZipArchive<R>) -> Self {
        Self {
            archive,
            cache: HashMap::new(),
        }
    }

    /// `Ok(None)` when the part is missing from the package.
    pub fn data_uri(&mut self, part: &str) -> Result<Option<String>, ExportError> {
        if let Some(cached) = self.cache.get(part) {
            return Ok(cached.clone());
        }
        let uri = read_binary_part(self.archive, part)?
            .map(|bytes| format!("data:{};base64,{}", mime_type(part), STANDARD.encode(bytes)));
        self.cache.insert(part.to_string(), uri.clone());
        Ok(uri)
    }
}
