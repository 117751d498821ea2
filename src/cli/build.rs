//! Build command implementation.
//!
//! Resolves options from flags and iconsheet.yaml, runs the pipeline, and
//! reports which outputs changed. With `--watch`, keeps rebuilding as icons
//! are added, edited, or removed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;

use crate::config::{resolve, Overrides, ProjectConfig};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{build, BuildOptions, BuildReport, BuildStatus};
use crate::watch::IconWatcher;

/// Build sprite.svg and name.d.ts from a directory of SVG icons
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Directory containing the source SVG files
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Directory for name.d.ts (and sprite.svg unless --sprite-dir is set)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Separate directory for sprite.svg and its README
    #[arg(long)]
    pub sprite_dir: Option<PathBuf>,

    /// Optimize the generated sprite
    #[arg(long, overrides_with = "no_optimize")]
    pub optimize: bool,

    /// Skip optimization even if iconsheet.yaml enables it
    #[arg(long, overrides_with = "optimize")]
    pub no_optimize: bool,

    /// Optimizer configuration file
    #[arg(long)]
    pub optimize_config: Option<PathBuf>,

    /// Project configuration file (default: ./iconsheet.yaml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Regenerate even if the outputs look up to date
    #[arg(long)]
    pub force: bool,

    /// Rebuild whenever an icon changes
    #[arg(long, short)]
    pub watch: bool,
}

impl BuildArgs {
    fn overrides(&self) -> Overrides {
        let optimize = if self.optimize {
            Some(true)
        } else if self.no_optimize {
            Some(false)
        } else {
            None
        };

        Overrides {
            input: self.input.clone(),
            output: self.output.clone(),
            sprite_dir: self.sprite_dir.clone(),
            optimize,
            optimize_config: self.optimize_config.clone(),
            force: self.force,
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let options = resolve_options(&args)?;

    run_once(&options, printer)?;

    if args.watch {
        watch(options, printer)?;
    }

    Ok(())
}

/// Load project configuration and merge it with the flags.
fn resolve_options(args: &BuildArgs) -> Result<BuildOptions> {
    let (config, root) = match &args.config {
        Some(path) => {
            let root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (ProjectConfig::load(path)?, root)
        }
        None => {
            let root = PathBuf::from(".");
            (ProjectConfig::load_from_root(&root)?, root)
        }
    };

    resolve(args.overrides(), &config, &root)
}

fn run_once(options: &BuildOptions, printer: &Printer) -> Result<BuildReport> {
    let started = Instant::now();
    let report = build(options)?;
    print_report(&report, options, printer);
    printer.status(
        "Finished",
        &format!(
            "{} in {:.2}s",
            plural(report.icons.len(), "icon", "icons"),
            started.elapsed().as_secs_f64()
        ),
    );
    Ok(report)
}

fn print_report(report: &BuildReport, options: &BuildOptions, printer: &Printer) {
    printer.status(
        "Scanning",
        &format!(
            "{} ({} found)",
            display_path(&options.input),
            plural(report.icons.len(), "icon", "icons")
        ),
    );

    match &report.status {
        BuildStatus::UpToDate => {
            printer.info("Fresh", &display_path(&options.sprite_path()));
        }
        BuildStatus::Built { files, optimized } => {
            if *optimized {
                printer.status("Optimized", &display_path(&options.sprite_path()));
            }
            for file in files {
                if file.changed {
                    printer.status("Writing", &display_path(&file.path));
                } else {
                    printer.info("Unchanged", &printer.dim(&display_path(&file.path)));
                }
            }
        }
    }
}

fn watch(mut options: BuildOptions, printer: &Printer) -> Result<()> {
    let watcher = IconWatcher::new(&options.input)?;
    // The up-to-date check cannot see removals, so every observed change rebuilds
    options.force = true;
    printer.info("Watching", &display_path(&options.input));

    while let Some(changed) = watcher.next_batch() {
        printer.status("Rebuilding", &plural(changed.len(), "change", "changes"));
        if let Err(e) = run_once(&options, printer) {
            printer.error("Error", &e.to_string());
        }
    }

    Ok(())
}
