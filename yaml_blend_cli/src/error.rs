//! Error types for the `yaml-blend` command.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `yaml-blend` pipeline.
#[derive(Debug, Error)]
pub enum CliError {
    /// A path did not name a file.
    #[error("'{0}' does not name a file")]
    NotAFile(Utf8PathBuf),

    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Writing the merged document to standard output failed.
    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] std::io::Error),

    /// Blend options could not be resolved from their sources.
    #[error("failed to resolve blend options: {0}")]
    Options(#[from] Box<figment::Error>),

    /// The blend itself failed.
    #[error("failed to blend '{overrides}' onto '{base}': {source}")]
    Blend {
        /// Base document path.
        base: Utf8PathBuf,
        /// Override document path.
        overrides: Utf8PathBuf,
        /// Underlying blend failure.
        #[source]
        source: yaml_blend::BlendError,
    },
}
