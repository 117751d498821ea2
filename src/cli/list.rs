//! List command implementation.
//!
//! Prints icon names in the same order the manifest uses.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::{ProjectConfig, CONFIG_FILENAME};
use crate::discovery::discover_icons;
use crate::error::{IconsheetError, Result};
use crate::icon::IconName;
use crate::output::{display_path, plural, Printer};

/// List icon names in manifest order
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory containing the source SVG files (default: `input` from iconsheet.yaml)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Print a JSON array instead of one name per line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let root = PathBuf::from(".");
    let config = ProjectConfig::load_from_root(&root)?;
    let input = match args.input {
        Some(input) => input,
        None => config.input.as_ref().map(|p| root.join(p)).ok_or_else(|| IconsheetError::Config {
            message: "No input directory configured".to_string(),
            help: Some(format!("Pass --input or set `input` in {}", CONFIG_FILENAME)),
        })?,
    };

    let files = discover_icons(&input, &config.excludes)?;
    let names: Vec<IconName> = files.iter().map(|f| f.name()).collect();

    let rendered = render(&names, args.json)?;
    io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .map_err(|e| IconsheetError::Io {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })?;

    printer.info(
        "Listed",
        &format!("{} in {}", plural(names.len(), "icon", "icons"), display_path(&input)),
    );

    Ok(())
}

fn render(names: &[IconName], json: bool) -> Result<String> {
    if json {
        let list: Vec<&str> = names.iter().map(IconName::as_str).collect();
        let mut out = serde_json::to_string_pretty(&list).map_err(|e| IconsheetError::Io {
            path: PathBuf::from("<stdout>"),
            message: e.to_string(),
        })?;
        out.push('\n');
        return Ok(out);
    }

    Ok(names.iter().map(|n| format!("{}\n", n)).collect())
}
