//! Command-line interface definitions for `yaml-blend`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args as ClapArgs, Parser};
use yaml_blend::DuplicateKeys;

/// Parsed CLI arguments for `yaml-blend`.
#[derive(Debug, Parser)]
#[command(name = "yaml-blend")]
#[command(about = "Layer a YAML override document onto a YAML template")]
#[command(version)]
pub struct Args {
    /// Template document whose keys and order define the result.
    #[arg(value_name = "BASE")]
    pub base: Utf8PathBuf,
    /// Document whose values replace matching template entries.
    #[arg(value_name = "OVERRIDE")]
    pub overrides: Utf8PathBuf,
    /// Write the merged document here instead of standard output.
    #[arg(short, long, value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Option flags layered over config file and environment values.
    #[command(flatten)]
    pub options: OptionArgs,
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Flags controlling how documents are decoded.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct OptionArgs {
    /// TOML file providing default blend options.
    #[arg(long, value_name = "path")]
    pub config: Option<Utf8PathBuf>,
    /// Duplicate key policy: `reject` or `tolerate`.
    #[arg(long, value_name = "policy")]
    pub duplicate_keys: Option<DuplicateKeys>,
    /// Only treat `true` and `false` as booleans.
    #[arg(long = "strict-booleans")]
    pub is_strict_booleans: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;
    use rstest::rstest;
    use yaml_blend::DuplicateKeys;

    #[rstest]
    fn parses_positional_documents() {
        let args = Args::try_parse_from(["yaml-blend", "base.yaml", "override.yaml"])
            .expect("parse");
        assert_eq!(args.base.as_str(), "base.yaml");
        assert_eq!(args.overrides.as_str(), "override.yaml");
        assert!(args.output.is_none());
        assert!(args.options.duplicate_keys.is_none());
        assert!(!args.options.is_strict_booleans);
    }

    #[rstest]
    fn parses_option_flags() {
        let args = Args::try_parse_from([
            "yaml-blend",
            "a.yaml",
            "b.yaml",
            "--duplicate-keys",
            "tolerate",
            "--strict-booleans",
            "-o",
            "out.yaml",
            "-vv",
        ])
        .expect("parse");
        assert_eq!(args.options.duplicate_keys, Some(DuplicateKeys::Tolerate));
        assert!(args.options.is_strict_booleans);
        assert_eq!(args.output.as_deref().map(|p| p.as_str()), Some("out.yaml"));
        assert_eq!(args.verbose, 2);
    }

    #[rstest]
    fn rejects_unknown_policy() {
        let result = Args::try_parse_from([
            "yaml-blend",
            "a.yaml",
            "b.yaml",
            "--duplicate-keys",
            "merge",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn requires_both_documents() {
        assert!(Args::try_parse_from(["yaml-blend", "a.yaml"]).is_err());
    }
}
