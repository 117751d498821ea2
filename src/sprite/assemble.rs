//! Sprite document assembly.

/// Comment placed at the top of every generated file.
pub const GENERATED_NOTICE: &str = "This file is generated by iconsheet. Do not edit.";

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Wrap symbol fragments in a zero-sized sprite document.
///
/// The root is `width="0" height="0"` so the sprite renders nothing when
/// inlined; symbols only appear through `<use href="sprite.svg#name">`.
pub fn assemble_sprite<S: AsRef<str>>(symbols: &[S]) -> String {
    let mut out = String::new();

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<!-- {} -->\n", GENERATED_NOTICE));
    out.push_str(&format!(
        "<svg xmlns=\"{}\" xmlns:xlink=\"{}\" width=\"0\" height=\"0\">\n",
        SVG_NS, XLINK_NS
    ));
    out.push_str("\t<defs>\n");
    for symbol in symbols {
        out.push_str("\t\t");
        out.push_str(symbol.as_ref());
        out.push('\n');
    }
    out.push_str("\t</defs>\n");
    out.push_str("</svg>\n");

    out
}
