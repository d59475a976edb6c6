use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{DecodeOptions, ErrorPolicy, NodeParams, SourceConfig};
use crate::constants::defaults::{DEFAULT_ENCODING, DEFAULT_EXTENSIONS};
use crate::node::{NodeHost, NodeKind};
use crate::selector::TextSelection;

const CLI_SITE: &str = "cli";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Classic,
    Seed,
    Shuffle,
}

impl From<ModeArg> for NodeKind {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Classic => NodeKind::Classic,
            ModeArg::Seed => NodeKind::Seed,
            ModeArg::Shuffle => NodeKind::ShuffleBag,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "textdraw",
    disable_help_subcommand = true,
    about = "Pick a text file from a folder",
    long_about = "Pick a text file from a folder by uniform, seeded, or shuffle-bag selection and print its contents.",
    after_help = "Shuffle-bag state lives for one process; --count draws several times from the same bag."
)]
/// CLI for `textdraw`.
///
/// Common usage:
/// - One uniform pick: `textdraw prompts/ --mode classic`
/// - Reproducible pick: `textdraw prompts/ --mode seed --seed 42`
/// - A full non-repeating pass over five files: `textdraw prompts/ --count 5 --paths-only`
struct TextDrawCli {
    #[arg(value_name = "FOLDER", help = "Folder to pick text files from")]
    folder: PathBuf,
    #[arg(long, value_enum, default_value_t = ModeArg::Shuffle, help = "Selection policy")]
    mode: ModeArg,
    #[arg(long, default_value_t = 0, help = "Seed used by --mode seed")]
    seed: u64,
    #[arg(long, help = "Descend into subdirectories")]
    recursive: bool,
    #[arg(
        long,
        default_value = DEFAULT_EXTENSIONS,
        help = "Comma-separated, case-insensitive filename suffixes"
    )]
    extensions: String,
    #[arg(long, default_value = DEFAULT_ENCODING, help = "Text encoding label")]
    encoding: String,
    #[arg(
        long = "errors",
        value_name = "POLICY",
        value_parser = parse_error_policy,
        default_value = "replace",
        help = "Malformed-input policy: strict, replace, or ignore"
    )]
    error_policy: ErrorPolicy,
    #[arg(
        long,
        default_value_t = 1,
        value_parser = parse_positive_usize,
        help = "Number of draws to make"
    )]
    count: usize,
    #[arg(
        long = "no-reshuffle-on-wrap",
        help = "Repeat the same shuffle-bag order after each completed cycle"
    )]
    no_reshuffle_on_wrap: bool,
    #[arg(long = "follow-links", help = "Follow symlinked directories when recursing")]
    follow_links: bool,
    #[arg(long, help = "Print a summary line for each draw")]
    debug: bool,
    #[arg(long = "paths-only", help = "Print selected paths without file contents")]
    paths_only: bool,
}

impl TextDrawCli {
    fn node_params(&self) -> NodeParams {
        NodeParams::new(&self.folder)
            .with_source(
                SourceConfig::new(&self.folder)
                    .with_recursive(self.recursive)
                    .with_extensions(self.extensions.clone())
                    .with_follow_links(self.follow_links),
            )
            .with_decode(
                DecodeOptions::default()
                    .with_encoding(self.encoding.clone())
                    .with_error_policy(self.error_policy),
            )
            .with_debug(self.debug)
            .with_seed(self.seed)
            .with_reshuffle_on_wrap(!self.no_reshuffle_on_wrap)
    }
}

/// Parse `args_iter` (without the program name) and run the requested draws.
pub fn run_textdraw<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let Some(cli) =
        parse_cli::<TextDrawCli, _>(std::iter::once("textdraw".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let kind = NodeKind::from(cli.mode);
    let params = cli.node_params();
    let mut host = NodeHost::new();
    for draw in 0..cli.count {
        let selection = host.invoke(CLI_SITE, kind, &params)?;
        print_selection(draw, &selection, cli.paths_only);
    }
    Ok(())
}

fn print_selection(draw: usize, selection: &TextSelection, paths_only: bool) {
    if paths_only {
        println!("{}", selection.selected_path.display());
    } else {
        println!("=== draw {} :: {}", draw + 1, selection.selected_path.display());
        println!("{}", selection.text);
    }
    if !selection.debug_summary.is_empty() {
        println!("{}", selection.debug_summary);
    }
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --count value '{raw}' as a positive integer"))?;
    if parsed == 0 {
        return Err("--count must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_error_policy(raw: &str) -> Result<ErrorPolicy, String> {
    raw.parse::<ErrorPolicy>().map_err(|err| err.to_string())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Result<Option<TextDrawCli>, Box<dyn Error>> {
        parse_cli::<TextDrawCli, _>(
            std::iter::once("textdraw").chain(args.iter().copied()),
        )
    }

    #[test]
    fn defaults_map_to_shuffle_bag_params() {
        let cli = parse(&["/prompts"]).unwrap().unwrap();
        assert_eq!(NodeKind::from(cli.mode), NodeKind::ShuffleBag);
        let params = cli.node_params();
        assert_eq!(params, NodeParams::new("/prompts"));
    }

    #[test]
    fn flags_map_onto_node_params() {
        let cli = parse(&[
            "/prompts",
            "--mode",
            "seed",
            "--seed",
            "42",
            "--recursive",
            "--extensions",
            ".md",
            "--errors",
            "STRICT",
            "--no-reshuffle-on-wrap",
            "--debug",
        ])
        .unwrap()
        .unwrap();
        assert_eq!(NodeKind::from(cli.mode), NodeKind::Seed);
        let params = cli.node_params();
        assert_eq!(params.seed, 42);
        assert!(params.source.recursive);
        assert_eq!(params.source.extensions, ".md");
        assert_eq!(params.decode.error_policy, ErrorPolicy::Strict);
        assert!(!params.reshuffle_on_wrap);
        assert!(params.debug);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["/prompts", "--count", "0"]).is_err());
        assert!(parse(&["/prompts", "--errors", "backslashreplace"]).is_err());
        assert!(parse(&["/prompts", "--mode", "weighted"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn help_returns_none() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn run_draws_requested_count_and_surfaces_errors() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha").unwrap();
        fs::write(temp.path().join("b.txt"), "bravo").unwrap();
        let folder = temp.path().to_string_lossy().into_owned();

        run_textdraw(
            [folder.clone(), "--count".into(), "3".into(), "--paths-only".into()].into_iter(),
        )
        .unwrap();

        let missing = temp.path().join("absent").to_string_lossy().into_owned();
        assert!(run_textdraw([missing].into_iter()).is_err());
    }
}
