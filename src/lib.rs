//! iconsheet - SVG sprite sheet generator
//!
//! Merges a directory of SVG icons into a single `sprite.svg` of `<symbol>`
//! definitions and emits a TypeScript `IconName` union listing every icon.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod icon;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod sprite;
pub mod watch;
pub mod writer;

pub use config::{resolve, Overrides, ProjectConfig};
pub use discovery::discover_icons;
pub use error::{IconsheetError, Result};
pub use icon::{IconFile, IconName};
pub use manifest::render_type_manifest;
pub use pipeline::{build, is_up_to_date, BuildOptions, BuildReport, BuildStatus};
pub use sprite::{assemble_sprite, normalize_symbol, optimize_svg, OptimizeOptions};
pub use writer::write_if_changed;
