//! Size optimization for the assembled sprite.
//!
//! A streaming pass over the document that drops bytes browsers never need:
//! prolog, comments, editor metadata, inter-tag whitespace, long hex colours.
//! Passes are toggled by [`OptimizeOptions`], loaded from
//! `iconsheet.optimize.yaml` when present.

use std::path::Path;

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::error::{IconsheetError, Result};

/// Attribute prefixes written by vector editors.
const EDITOR_PREFIXES: [&str; 4] = ["inkscape:", "sodipodi:", "sketch:", "serif:"];

/// Attributes that hold a paint or colour value.
const COLOR_ATTRIBUTES: [&str; 6] = ["fill", "stroke", "stop-color", "color", "flood-color", "lighting-color"];

/// Elements whose whitespace is rendered.
const TEXT_ELEMENTS: [&[u8]; 5] = [b"text", b"tspan", b"textPath", b"title", b"desc"];

/// Optimizer passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Remove the `<?xml ...?>` declaration
    pub remove_xml_declaration: bool,
    /// Remove DOCTYPE
    pub remove_doctype: bool,
    /// Remove comments
    pub remove_comments: bool,
    /// Remove `<metadata>` elements
    pub remove_metadata: bool,
    /// Remove Inkscape/Sodipodi/Sketch/Affinity attributes
    pub remove_editor_data: bool,
    /// Remove attributes with empty values
    pub remove_empty_attrs: bool,
    /// Remove whitespace-only text between tags
    pub collapse_whitespace: bool,
    /// Shorten colours (#ffffff -> #fff)
    pub minify_colors: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            remove_xml_declaration: true,
            remove_doctype: true,
            remove_comments: true,
            remove_metadata: true,
            remove_editor_data: true,
            remove_empty_attrs: true,
            collapse_whitespace: true,
            minify_colors: true,
        }
    }
}

impl OptimizeOptions {
    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IconsheetError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read optimizer configuration: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load from `path` if given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse options from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| IconsheetError::Parse {
            message: format!("Invalid optimizer configuration: {}", e),
            help: Some("Options are booleans, e.g. `remove_comments: false`".to_string()),
        })
    }
}

/// Run the enabled passes over an SVG document.
pub fn optimize_svg(document: &str, options: &OptimizeOptions) -> Result<String> {
    let mut reader = Reader::from_str(document);
    let mut writer = Writer::new(Vec::new());
    // Depth inside a dropped <metadata> subtree
    let mut skipping = 0usize;
    // Depth inside elements whose whitespace is significant
    let mut text_depth = 0usize;
    // Blank text held until we know whether character data follows it
    let mut pending: Option<BytesText<'static>> = None;
    // The last written event was character data
    let mut after_chars = false;

    loop {
        let event = reader.read_event().map_err(|e| IconsheetError::Optimize {
            message: format!("XML error at byte {}: {}", reader.error_position(), e),
        })?;

        if skipping > 0 {
            match event {
                Event::Start(_) => skipping += 1,
                Event::End(_) => skipping -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        let event = match event {
            Event::Eof => break,
            Event::Decl(_) if options.remove_xml_declaration => continue,
            Event::DocType(_) if options.remove_doctype => continue,
            Event::Comment(_) if options.remove_comments => continue,
            Event::Text(t) if options.collapse_whitespace && text_depth == 0 && !after_chars && is_blank(&t) => {
                pending = Some(t.into_owned());
                continue;
            }
            Event::Start(ref e) if options.remove_metadata && is_metadata(e) => {
                skipping = 1;
                continue;
            }
            Event::Empty(ref e) if options.remove_metadata && is_metadata(e) => continue,
            Event::Start(e) => {
                if is_text_element(e.local_name().as_ref()) {
                    text_depth += 1;
                }
                Event::Start(rewrite_attributes(&e, options)?)
            }
            Event::End(e) => {
                if text_depth > 0 && is_text_element(e.local_name().as_ref()) {
                    text_depth -= 1;
                }
                Event::End(e)
            }
            Event::Empty(e) => Event::Empty(rewrite_attributes(&e, options)?),
            other => other,
        };

        // Blank text survives only when it separates character data, as in `&lt; &gt;`
        let is_chars = matches!(event, Event::Text(_) | Event::GeneralRef(_) | Event::CData(_));
        if let Some(blank) = pending.take() {
            if is_chars {
                write_event(&mut writer, Event::Text(blank))?;
            }
        }
        after_chars = is_chars;

        write_event(&mut writer, event)?;
    }

    let mut out = String::from_utf8(writer.into_inner()).map_err(|e| IconsheetError::Optimize {
        message: e.to_string(),
    })?;
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    Ok(out)
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| IconsheetError::Optimize {
        message: e.to_string(),
    })
}

fn is_text_element(name: &[u8]) -> bool {
    TEXT_ELEMENTS.iter().any(|element| *element == name)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}

fn is_metadata(e: &BytesStart<'_>) -> bool {
    e.local_name().as_ref() == b"metadata"
}

fn rewrite_attributes(e: &BytesStart<'_>, options: &OptimizeOptions) -> Result<BytesStart<'static>> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| IconsheetError::Optimize {
            message: err.to_string(),
        })?
        .to_string();
    let mut out = BytesStart::new(name);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| IconsheetError::Optimize {
            message: format!("invalid attribute: {}", err),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();

        if options.remove_editor_data && EDITOR_PREFIXES.iter().any(|p| key.starts_with(p)) {
            continue;
        }
        if options.remove_editor_data && key.starts_with("xmlns:") && is_editor_namespace(&key) {
            continue;
        }
        if options.remove_empty_attrs && attr.value.is_empty() && key != "id" {
            continue;
        }

        if options.minify_colors && COLOR_ATTRIBUTES.contains(&key.as_str()) {
            if let Some(short) = std::str::from_utf8(&attr.value).ok().and_then(shorten_color) {
                out.push_attribute((key.as_str(), short.as_str()));
                continue;
            }
        }

        out.push_attribute(attr);
    }

    Ok(out.into_owned())
}

fn is_editor_namespace(key: &str) -> bool {
    EDITOR_PREFIXES
        .iter()
        .any(|p| key.strip_prefix("xmlns:") == Some(p.trim_end_matches(':')))
}

/// Shorten `#aabbcc` to `#abc` and lowercase hex colours.
///
/// Returns `None` when the value is not a hex colour or is already minimal.
pub fn shorten_color(value: &str) -> Option<String> {
    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let lower = hex.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let shortened = if bytes.len() == 6 && bytes[0] == bytes[1] && bytes[2] == bytes[3] && bytes[4] == bytes[5] {
        format!("#{}{}{}", bytes[0] as char, bytes[2] as char, bytes[4] as char)
    } else if bytes.len() == 3 || bytes.len() == 6 {
        format!("#{}", lower)
    } else {
        return None;
    };

    (shortened != value).then_some(shortened)
}
