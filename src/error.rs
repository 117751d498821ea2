use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for iconsheet operations
#[derive(Error, Diagnostic, Debug)]
pub enum IconsheetError {
    #[error("No SVG files found in {}", path.display())]
    #[diagnostic(
        code(iconsheet::input_not_found),
        help("Check the input directory, or pass --input")
    )]
    InputNotFound { path: PathBuf },

    #[error("Malformed SVG in {}: {message}", path.display())]
    #[diagnostic(code(iconsheet::malformed_svg))]
    MalformedSvg { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    #[diagnostic(code(iconsheet::write))]
    WriteFailure { path: PathBuf, message: String },

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(iconsheet::io))]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(iconsheet::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(iconsheet::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Optimize error: {message}")]
    #[diagnostic(code(iconsheet::optimize))]
    Optimize { message: String },

    #[error("Watch error: {message}")]
    #[diagnostic(code(iconsheet::watch))]
    Watch { message: String },
}

pub type Result<T> = std::result::Result<T, IconsheetError>;
