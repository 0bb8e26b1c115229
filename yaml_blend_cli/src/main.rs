//! `yaml-blend` entry point: parse arguments, blend, report failures.

use clap::Parser;

use yaml_blend_cli::cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    yaml_blend_cli::logging::init(args.verbose);
    yaml_blend_cli::run(&args).map_err(color_eyre::eyre::Report::from)
}
