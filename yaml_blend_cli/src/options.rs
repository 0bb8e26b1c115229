//! Layered resolution of [`BlendOptions`].
//!
//! Sources, lowest precedence first: built-in defaults, the optional
//! `--config` TOML file, `YAML_BLEND_*` environment variables, then explicit
//! flags.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::Serialize;
use yaml_blend::{BlendOptions, DuplicateKeys};

use crate::cli::OptionArgs;
use crate::error::CliError;
use crate::fs;

/// Prefix for environment variables read during resolution.
pub const ENV_PREFIX: &str = "YAML_BLEND_";

/// Flag values that were explicitly set; unset fields are skipped so lower
/// layers show through.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
struct FlagLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicate_keys: Option<DuplicateKeys>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strict_booleans: Option<bool>,
}

impl From<&OptionArgs> for FlagLayer {
    fn from(args: &OptionArgs) -> Self {
        Self {
            duplicate_keys: args.duplicate_keys,
            strict_booleans: args.is_strict_booleans.then_some(true),
        }
    }
}

/// Resolve blend options from every source.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the config file cannot be read and
/// [`CliError::Options`] when a source holds an invalid value.
pub fn resolve(args: &OptionArgs) -> Result<BlendOptions, CliError> {
    let mut figment = Figment::from(Serialized::defaults(BlendOptions::default()));
    if let Some(path) = &args.config {
        let contents = fs::read_text(path)?;
        tracing::debug!(%path, "loading blend options file");
        figment = figment.merge(Toml::string(&contents));
    }
    figment
        .merge(
            Env::prefixed(ENV_PREFIX)
                .only(&["duplicate_keys", "strict_booleans"])
                .map(|key| key.as_str().replace('_', "-").into()),
        )
        .merge(Serialized::defaults(FlagLayer::from(args)))
        .extract()
        .map_err(|err| CliError::Options(Box::new(err)))
}
