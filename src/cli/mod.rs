pub mod build;
pub mod completions;
pub mod init;
pub mod list;

use clap::{Parser, Subcommand};

/// iconsheet - SVG sprite sheet and icon name manifest generator
#[derive(Parser, Debug)]
#[command(name = "iconsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build sprite.svg and name.d.ts from a directory of SVG icons
    Build(build::BuildArgs),

    /// Initialize a project (generates iconsheet.yaml)
    Init(init::InitArgs),

    /// List icon names in manifest order
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
