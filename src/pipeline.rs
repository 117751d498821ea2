//! The sprite build pipeline.
//!
//! discover → up-to-date check → normalize (parallel) → assemble →
//! optimize (optional) → write changed files.
//!
//! The pipeline takes literal [`BuildOptions`] and never prints; callers
//! render the returned [`BuildReport`].

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use rayon::prelude::*;

use crate::discovery::discover_icons;
use crate::error::{IconsheetError, Result};
use crate::icon::{IconFile, IconName};
use crate::manifest::{quote, render_type_manifest, MANIFEST_FILENAME};
use crate::sprite::{assemble_sprite, normalize_symbol, optimize_svg, OptimizeOptions, SPRITE_FILENAME};
use crate::writer::{ensure_dir, read_existing, write_if_changed};

/// File name of the README written next to the sprite.
pub const README_FILENAME: &str = "README.md";

/// Static README placed next to the sprite.
pub const README_CONTENT: &str = "# Icons

This directory is generated by iconsheet. Do not edit files here by hand.

`sprite.svg` bundles every icon as a `<symbol>`. Reference an icon by its
name, which is its path in the source directory without `.svg`:

```html
<svg width=\"24\" height=\"24\">
  <use href=\"/path/to/sprite.svg#arrow-left\" />
</svg>
```

Valid names are listed in the `IconName` type in `name.d.ts`. To add an
icon, drop an SVG into the source directory and run `iconsheet build`.
";

/// Fully resolved build settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Directory scanned for `.svg` files.
    pub input: PathBuf,
    /// Directory for the type manifest.
    pub output: PathBuf,
    /// Directory for the sprite and README, if different from `output`.
    pub sprite_dir: Option<PathBuf>,
    /// Run the optimizer over the assembled sprite.
    pub optimize: bool,
    /// Optimizer configuration; built-in defaults when `None`.
    pub optimize_config: Option<PathBuf>,
    /// Exclude patterns applied during discovery.
    pub excludes: Vec<String>,
    /// Skip the up-to-date check.
    pub force: bool,
}

impl BuildOptions {
    /// Options with no sprite dir, optimizer, excludes, or force.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            sprite_dir: None,
            optimize: false,
            optimize_config: None,
            excludes: Vec::new(),
            force: false,
        }
    }

    /// Directory receiving sprite.svg and the README.
    pub fn sprite_output_dir(&self) -> &Path {
        self.sprite_dir.as_deref().unwrap_or(&self.output)
    }

    pub fn sprite_path(&self) -> PathBuf {
        self.sprite_output_dir().join(SPRITE_FILENAME)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.sprite_output_dir().join(README_FILENAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output.join(MANIFEST_FILENAME)
    }
}

/// One output file and whether this build rewrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub changed: bool,
}

/// Outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// Existing outputs already reference every icon; nothing was parsed or written.
    UpToDate,
    /// Outputs were regenerated; each file reports whether it changed.
    Built { files: Vec<WrittenFile>, optimized: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Icon names in manifest order.
    pub icons: Vec<IconName>,
    pub status: BuildStatus,
}

impl BuildReport {
    /// Number of files rewritten by this build.
    pub fn changed_count(&self) -> usize {
        match &self.status {
            BuildStatus::UpToDate => 0,
            BuildStatus::Built { files, .. } => files.iter().filter(|f| f.changed).count(),
        }
    }
}

/// Run a full build.
pub fn build(options: &BuildOptions) -> Result<BuildReport> {
    let files = discover_icons(&options.input, &options.excludes)?;
    let icons: Vec<IconName> = files.iter().map(IconFile::name).collect();

    let sprite_path = options.sprite_path();
    let manifest_path = options.manifest_path();

    if !options.force {
        let sprite = read_existing(&sprite_path)?;
        let manifest = read_existing(&manifest_path)?;
        if is_up_to_date(&icons, &sprite, &manifest) {
            return Ok(BuildReport {
                icons,
                status: BuildStatus::UpToDate,
            });
        }
    }

    let symbols = normalize_all(&files)?;
    let mut sprite = assemble_sprite(&symbols);

    if options.optimize {
        let optimize_options = OptimizeOptions::load_or_default(options.optimize_config.as_deref())?;
        sprite = optimize_svg(&sprite, &optimize_options)?;
    }

    let manifest = render_type_manifest(&icons);

    ensure_dir(&options.output)?;
    ensure_dir(options.sprite_output_dir())?;

    let readme_path = options.readme_path();
    let mut written = Vec::with_capacity(3);
    for (path, content) in [
        (sprite_path, sprite.as_str()),
        (manifest_path, manifest.as_str()),
        (readme_path, README_CONTENT),
    ] {
        let changed = write_if_changed(&path, content)?;
        written.push(WrittenFile { path, changed });
    }

    Ok(BuildReport {
        icons,
        status: BuildStatus::Built {
            files: written,
            optimized: options.optimize,
        },
    })
}

/// Cheap check that existing outputs already mention every icon.
///
/// This is a substring test: it does not notice icons that were removed
/// from the input, and a name can match inside a longer identifier. Names
/// are searched in the form each file writes them: XML-escaped in the
/// sprite, as a string literal in the manifest.
pub fn is_up_to_date(icons: &[IconName], sprite: &str, manifest: &str) -> bool {
    icons.iter().all(|name| {
        sprite.contains(&format!("id=\"{}\"", escape(name.as_str()))) && manifest.contains(&quote(name.as_str()))
    })
}

/// Read and normalize every file in parallel, keeping discovery order.
///
/// Any failure aborts the whole batch.
fn normalize_all(files: &[IconFile]) -> Result<Vec<String>> {
    let mut results: Vec<(usize, Result<String>)> = files
        .par_iter()
        .enumerate()
        .map(|(index, file)| (index, normalize_file(file)))
        .collect();

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

fn normalize_file(file: &IconFile) -> Result<String> {
    let source = fs::read_to_string(&file.source).map_err(|e| IconsheetError::Io {
        path: file.source.clone(),
        message: format!("Failed to read icon: {}", e),
    })?;

    normalize_symbol(&source, &file.name(), &file.source)
}
