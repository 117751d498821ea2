//! Type manifest (name.d.ts) generation.

use crate::icon::IconName;
use crate::sprite::GENERATED_NOTICE;

/// File name of the type manifest.
pub const MANIFEST_FILENAME: &str = "name.d.ts";

/// Render the `IconName` union type.
///
/// Names keep their input order and are not deduplicated.
pub fn render_type_manifest(names: &[IconName]) -> String {
    let mut out = format!("// {}\n\n", GENERATED_NOTICE);

    if names.is_empty() {
        out.push_str("export type IconName = never;\n");
        return out;
    }

    out.push_str("export type IconName =");
    for name in names {
        out.push_str("\n\t| ");
        out.push_str(&quote(name.as_str()));
    }
    out.push_str(";\n");

    out
}

/// Quote a name as a TypeScript string literal.
pub fn quote(name: &str) -> String {
    // serde_json escapes exactly what a TS double-quoted literal needs
    serde_json::to_string(name).unwrap_or_else(|_| format!("\"{}\"", name))
}
