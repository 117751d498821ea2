//! Rewrites a standalone SVG document into a `<symbol>` fragment.

use std::path::Path;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{IconsheetError, Result};
use crate::icon::IconName;

/// Attributes dropped from the root element. Sizing belongs to the consumer
/// and the namespaces are declared once on the sprite root.
pub const STRIPPED_ATTRIBUTES: [&[u8]; 5] = [b"xmlns", b"xmlns:xlink", b"version", b"width", b"height"];

/// Turn the first `<svg>` element in `source` into `<symbol id="{name}">`.
///
/// Everything outside that element (XML declaration, doctype, comments) is
/// discarded and the result is trimmed. `path` names the source file in
/// [`IconsheetError::MalformedSvg`].
pub fn normalize_symbol(source: &str, name: &IconName, path: &Path) -> Result<String> {
    let malformed = |message: String| IconsheetError::MalformedSvg {
        path: path.to_path_buf(),
        message,
    };
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(format!("XML error at byte {}: {}", reader.error_position(), e)))?;

        if depth == 0 {
            match event {
                Event::Start(e) if e.local_name().as_ref() == b"svg" => {
                    let start = to_symbol(&e, name).map_err(malformed)?;
                    write(&mut writer, Event::Start(start), path)?;
                    depth = 1;
                }
                Event::Empty(e) if e.local_name().as_ref() == b"svg" => {
                    let start = to_symbol(&e, name).map_err(malformed)?;
                    write(&mut writer, Event::Empty(start), path)?;
                    break;
                }
                Event::Eof => return Err(malformed("no <svg> element found".to_string())),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                depth += 1;
                write(&mut writer, Event::Start(e), path)?;
            }
            Event::End(e) => {
                depth -= 1;
                if depth == 0 {
                    write(&mut writer, Event::End(BytesEnd::new("symbol")), path)?;
                    break;
                }
                write(&mut writer, Event::End(e), path)?;
            }
            Event::Eof => return Err(malformed("unexpected end of file inside <svg>".to_string())),
            other => write(&mut writer, other, path)?,
        }
    }

    let fragment = String::from_utf8(writer.into_inner()).map_err(|e| malformed(e.to_string()))?;
    Ok(fragment.trim().to_string())
}

/// Copy the root element's attributes onto a new `symbol` start tag.
fn to_symbol(root: &BytesStart<'_>, name: &IconName) -> std::result::Result<BytesStart<'static>, String> {
    let mut symbol = BytesStart::new("symbol");
    symbol.push_attribute(("id", name.as_str()));

    for attr in root.attributes() {
        let attr = attr.map_err(|e| format!("invalid attribute: {}", e))?;
        let key = attr.key.as_ref();
        if key == b"id" || STRIPPED_ATTRIBUTES.iter().any(|stripped| *stripped == key) {
            continue;
        }
        symbol.push_attribute(attr);
    }

    Ok(symbol.into_owned())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>, path: &Path) -> Result<()> {
    writer.write_event(event).map_err(|e| IconsheetError::MalformedSvg {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
