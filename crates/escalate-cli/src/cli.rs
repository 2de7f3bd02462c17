//! One-shot command line surface

use crate::render::Renderer;
use crate::repl::Repl;
use anyhow::{anyhow, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use escalate_core::{Classifier, ImportProfile, ImportSelection, Session, TrackerConfig};
use std::io::{BufRead, Write};
use std::path::Path;

/// Terminal facts decided by the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Emit ANSI color
    pub color: bool,
    /// Stdin is a terminal, so the session shows a prompt
    pub interactive: bool,
}

/// Top-level command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("escalate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Customer escalation tracker")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
        .subcommand(
            Command::new("classify")
                .about("Classify issue text without logging it")
                .arg(
                    Arg::new("text")
                        .required(true)
                        .num_args(1..)
                        .help("Issue description"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Import a spreadsheet and show the resulting board")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Spreadsheet path (.csv, .xlsx, .xls)"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Require every tracker column"),
                )
                .arg(
                    Arg::new("row")
                        .long("row")
                        .value_parser(value_parser!(usize))
                        .help("Import only this data row (1-based)"),
                )
                .arg(
                    Arg::new("export")
                        .long("export")
                        .value_name("OUT")
                        .help("Export the imported cases to this file"),
                ),
        )
        .subcommand(
            Command::new("session")
                .about("Interactive session reading commands from stdin")
                .arg(
                    Arg::new("export-on-exit")
                        .long("export-on-exit")
                        .value_name("OUT")
                        .help("Export all cases when the session ends"),
                ),
        )
}

/// Load the tracker config, falling back to defaults without `--config`
///
/// # Errors
/// Returns error if the file cannot be read, parsed or validated
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::new());
    };
    let config = TrackerConfig::load(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Execute parsed arguments
///
/// # Errors
/// Returns the first error surfaced by the chosen command
pub fn run<R: BufRead, W: Write>(
    matches: &ArgMatches,
    options: Options,
    input: R,
    out: &mut W,
) -> Result<()> {
    let config_path = matches.get_one::<std::path::PathBuf>("config");
    let config = load_config(config_path.map(std::path::PathBuf::as_path))?;
    let renderer = Renderer::new(options.color);

    match matches.subcommand() {
        Some(("classify", args)) => {
            let text = args
                .get_many::<String>("text")
                .map(|v| v.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let classifier = Classifier::new(&config.vocabulary)?;
            let assessment = classifier.classify(&text);
            if args.get_flag("json") {
                writeln!(out, "{}", serde_json::to_string_pretty(&assessment)?)?;
            } else {
                write!(out, "{}", renderer.assessment(&assessment))?;
            }
        }
        Some(("import", args)) => {
            let path = args
                .get_one::<String>("file")
                .ok_or_else(|| anyhow!("missing argument <FILE>"))?;
            let table =
                escalate_sheet::read_table(path).with_context(|| format!("reading {path}"))?;

            let mut session = Session::new(config)?;
            let profile = if args.get_flag("strict") {
                ImportProfile::Strict
            } else {
                session.config().import.profile()
            };
            let selection = args
                .get_one::<usize>("row")
                .map_or(ImportSelection::All, |row| ImportSelection::Row(*row));
            let report = session
                .import(&table, &profile, selection)
                .with_context(|| format!("importing {path}"))?;

            write!(out, "{}", renderer.import_report(&report, session.store()))?;
            write!(out, "{}", renderer.board(&session.board()))?;

            if let Some(target) = args.get_one::<String>("export") {
                let rows = session.store().export_rows();
                escalate_sheet::write_export(target, &rows)
                    .with_context(|| format!("exporting to {target}"))?;
                writeln!(out, "Exported {} case(s) to {target}", rows.len())?;
            }
        }
        Some(("session", args)) => {
            let session = Session::new(config)?;
            let mut repl = Repl::new(session, renderer).with_prompt(options.interactive);
            repl.run(input, out)?;

            if let Some(target) = args.get_one::<String>("export-on-exit") {
                let count = repl.export(target)?;
                writeln!(out, "Exported {count} case(s) to {target}")?;
            }
        }
        _ => return Err(anyhow!("no command given")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_table_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["escalate", "classify", "-vv", "--no-color", "late"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
        assert!(matches.get_flag("no-color"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(format!("{err:#}").contains("loading config"));
    }
}
