//! Icon source files and the names derived from them.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Punctuation in collation order. Anything listed here sorts before digits,
/// which sort before letters.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// One SVG source file, addressed relative to the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconFile {
    /// Forward-slash path relative to the input root, ending in `.svg`.
    pub relative: String,
    /// Path used to read the file.
    pub source: PathBuf,
}

impl IconFile {
    /// Build an icon file from a path under `root`.
    ///
    /// Returns `None` if `path` is not inside `root` or is not valid UTF-8.
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
        let relative = parts?.join("/");

        if relative.is_empty() {
            return None;
        }

        Some(Self {
            relative,
            source: path.to_path_buf(),
        })
    }

    /// The icon name: the relative path without its `.svg` suffix.
    pub fn name(&self) -> IconName {
        IconName::from_relative(&self.relative)
    }
}

/// Identifier of an icon, shared by the sprite symbol `id` and the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconName(String);

impl IconName {
    /// Derive a name from a relative file path.
    ///
    /// Backslashes are normalized to `/` and exactly one trailing `.svg` is removed.
    pub fn from_relative(relative: &str) -> Self {
        let normalized = relative.replace('\\', "/");
        let name = normalized
            .strip_suffix(".svg")
            .map(str::to_string)
            .unwrap_or(normalized);
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IconName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compare two strings the way a root-locale collator would.
///
/// Punctuation sorts first, then digits, then letters without regard to
/// case. Strings that only differ by case put lowercase first.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight));

    primary
        .then_with(|| a.chars().map(case_weight).cmp(b.chars().map(case_weight)))
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, u32) {
    if let Some(pos) = PUNCTUATION_ORDER.find(c) {
        return (1, pos as u32);
    }
    if c.is_whitespace() {
        return (0, c as u32);
    }
    if c.is_ascii_digit() {
        return (3, c as u32);
    }
    if c.is_alphabetic() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        return (4, lower as u32);
    }
    (2, c as u32)
}

fn case_weight(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_strips_suffix() {
        assert_eq!(IconName::from_relative("arrow.svg").as_str(), "arrow");
        assert_eq!(IconName::from_relative("social/github.svg").as_str(), "social/github");
    }

    #[test]
    fn test_name_strips_only_one_suffix() {
        assert_eq!(IconName::from_relative("odd.svg.svg").as_str(), "odd.svg");
    }

    #[test]
    fn test_name_normalizes_separators() {
        assert_eq!(IconName::from_relative("brand\\logo.svg").as_str(), "brand/logo");
    }

    #[test]
    fn test_icon_file_relative_path() {
        let root = Path::new("/project/icons");
        let file = IconFile::from_path(root, &root.join("nav").join("menu.svg")).unwrap();

        assert_eq!(file.relative, "nav/menu.svg");
        assert_eq!(file.name().as_str(), "nav/menu");
    }

    #[test]
    fn test_icon_file_outside_root() {
        assert!(IconFile::from_path(Path::new("/a"), Path::new("/b/c.svg")).is_none());
    }

    #[test]
    fn test_collate_case_insensitive() {
        let mut names = vec!["Zoom.svg", "arrow.svg", "Bell.svg"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(names, vec!["arrow.svg", "Bell.svg", "Zoom.svg"]);
    }

    #[test]
    fn test_collate_lowercase_first() {
        assert_eq!(collate("a.svg", "A.svg"), Ordering::Less);
    }

    #[test]
    fn test_collate_punctuation_before_letters() {
        let mut names = vec!["arrow.svg", "arrow-left.svg", "arrow_up.svg", "arrow2.svg"];
        names.sort_by(|a, b| collate(a, b));
        assert_eq!(
            names,
            vec!["arrow_up.svg", "arrow-left.svg", "arrow.svg", "arrow2.svg"]
        );
    }
}
