//! Init command implementation.
//!
//! Writes an `iconsheet.yaml` so later builds need no flags.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{ProjectConfig, CONFIG_FILENAME};
use crate::discovery::discover_icons;
use crate::error::{IconsheetError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a project by generating an iconsheet.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Directory containing the source SVG files, relative to the project
    #[arg(long, short, default_value = "icons")]
    pub input: PathBuf,

    /// Directory for generated files, relative to the project
    #[arg(long, short, default_value = "src/icons")]
    pub output: PathBuf,

    /// Separate directory for sprite.svg, relative to the project
    #[arg(long)]
    pub sprite_dir: Option<PathBuf>,

    /// Enable sprite optimization
    #[arg(long)]
    pub optimize: bool,

    /// Overwrite existing iconsheet.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(IconsheetError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let config = ProjectConfig {
        input: Some(args.input.clone()),
        output: Some(args.output.clone()),
        sprite_dir: args.sprite_dir.clone(),
        optimize: args.optimize.then_some(true),
        ..Default::default()
    };

    fs::write(&config_path, config.to_yaml()?).map_err(|e| IconsheetError::WriteFailure {
        path: config_path.clone(),
        message: e.to_string(),
    })?;

    // An empty or missing input directory is fine here; build will complain later
    let input_dir = args.path.join(&args.input);
    match discover_icons(&input_dir, &[]) {
        Ok(files) => printer.info(
            "Discovered",
            &format!(
                "{} in {}",
                plural(files.len(), "icon", "icons"),
                display_path(&input_dir)
            ),
        ),
        Err(_) => printer.warning("Empty", &format!("no SVG files in {} yet", display_path(&input_dir))),
    }

    printer.status("Created", &display_path(&config_path));

    Ok(())
}
