//! Library side of the `yaml-blend` command.
//!
//! The binary is a thin shell over these modules: [`cli`] parses arguments,
//! [`options`] layers blend options from a config file, the environment, and
//! flags, and [`fs`] reads and writes documents through `cap-std`.

pub mod cli;
pub mod error;
pub mod fs;
pub mod logging;
pub mod options;

use std::io::Write;

use yaml_blend::Blender;

use crate::cli::Args;
use crate::error::CliError;

/// Run a parsed invocation end to end.
///
/// # Errors
///
/// Returns a [`CliError`] when option resolution, file access, or the blend
/// itself fails.
pub fn run(args: &Args) -> Result<(), CliError> {
    let options = options::resolve(&args.options)?;
    tracing::debug!(?options, "resolved blend options");

    let base = fs::read_document(&args.base)?;
    let overrides = fs::read_document(&args.overrides)?;
    let merged = Blender::new(options)
        .blend(&base, &overrides)
        .map_err(|source| CliError::Blend {
            base: args.base.clone(),
            overrides: args.overrides.clone(),
            source,
        })?;

    match &args.output {
        Some(path) => fs::write_document(path, &merged),
        None => std::io::stdout()
            .lock()
            .write_all(&merged)
            .map_err(CliError::Stdout),
    }
}
