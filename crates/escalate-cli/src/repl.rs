//! Interactive session loop
//!
//! Each input line is split with `shlex` and parsed by a multicall `clap`
//! command, so every interaction gets the same argument handling and help
//! output as the one-shot subcommands. A failed line is reported and the
//! loop carries on with the session untouched.

use crate::render::Renderer;
use anyhow::{anyhow, Context, Result};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use escalate_core::{
    parse_date, Criticality, ImportProfile, ImportSelection, ManualEntry, Session, Status,
};
use escalate_sheet::{default_codecs, read_table_with, write_export_with, CodecRegistry};
use std::io::{BufRead, Write};

const PARSER_TEMPLATE: &str = "{all-args}";
const COMMAND_TEMPLATE: &str = "{about-with-newline}\n{usage-heading}\n    {usage}\n\n{all-args}";

fn text_arg(help: &'static str) -> Arg {
    Arg::new("text")
        .required(true)
        .num_args(1..)
        .trailing_var_arg(true)
        .help(help)
}

fn file_arg() -> Arg {
    Arg::new("file").required(true).help("Spreadsheet path (.csv, .xlsx, .xls)")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Case id, e.g. CESI-000001 or 1")
}

/// Commands accepted inside a session
#[must_use]
pub fn session_command() -> Command {
    Command::new("escalate")
        .multicall(true)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand_value_name("COMMAND")
        .subcommand_help_heading("COMMANDS")
        .help_template(PARSER_TEMPLATE)
        .subcommand(
            Command::new("log")
                .about("Classify and log an issue with default fields")
                .arg(text_arg("Issue description"))
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("add")
                .about("Log an issue with explicit fields; options come before the text")
                .arg(Arg::new("customer").long("customer").help("Customer name"))
                .arg(Arg::new("owner").long("owner").help("Case owner"))
                .arg(
                    Arg::new("criticality")
                        .long("criticality")
                        .help("Low, Medium or High"),
                )
                .arg(Arg::new("date").long("date").help("Reported date, e.g. 2024-03-01"))
                .arg(text_arg("Issue description"))
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("import")
                .about("Import cases from a spreadsheet")
                .arg(file_arg())
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
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("preview")
                .about("Show one spreadsheet row and how it would classify")
                .arg(file_arg())
                .arg(
                    Arg::new("row")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Data row (1-based)"),
                )
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("status")
                .about("Move a case to Open, In Progress or Resolved")
                .arg(id_arg())
                .arg(
                    Arg::new("status")
                        .required(true)
                        .num_args(1..)
                        .trailing_var_arg(true)
                        .help("New status"),
                )
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("action")
                .about("Record the action taken on a case")
                .arg(id_arg())
                .arg(text_arg("Action text"))
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("board")
                .about("Show the status board")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("list")
                .about("List every case in creation order")
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("export")
                .about("Export all cases to a spreadsheet")
                .arg(file_arg())
                .help_template(COMMAND_TEMPLATE),
        )
        .subcommand(
            Command::new("quit")
                .alias("exit")
                .about("End the session")
                .help_template(COMMAND_TEMPLATE),
        )
}

fn joined(args: &ArgMatches, id: &str) -> String {
    args.get_many::<String>(id)
        .map(|values| values.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn required<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a String> {
    args.get_one::<String>(id)
        .ok_or_else(|| anyhow!("missing argument <{id}>"))
}

/// Whether the loop keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Output of one interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub flow: Flow,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flow: Flow::Continue,
        }
    }
}

/// Session loop state
#[derive(Debug)]
pub struct Repl {
    session: Session,
    renderer: Renderer,
    codecs: CodecRegistry,
    prompt: bool,
}

impl Repl {
    /// Create loop over an existing session
    #[must_use]
    pub fn new(session: Session, renderer: Renderer) -> Self {
        Self {
            session,
            renderer,
            codecs: default_codecs(),
            prompt: false,
        }
    }

    /// With a `> ` prompt before each line
    #[inline]
    #[must_use]
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one input line
    ///
    /// # Errors
    /// Returns error for bad quoting, unknown commands or arguments, and any
    /// failure of the requested operation
    pub fn respond(&mut self, line: &str) -> Result<Reply> {
        let args = shlex::split(line).ok_or_else(|| anyhow!("invalid quoting"))?;
        if args.is_empty() {
            return Ok(Reply::text(String::new()));
        }

        let matches = match session_command().try_get_matches_from(args) {
            Ok(matches) => matches,
            Err(err) if err.kind() == ErrorKind::DisplayHelp => {
                return Ok(Reply::text(err.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        match matches.subcommand() {
            Some(("log", args)) => self.log(ManualEntry::new(joined(args, "text"))),
            Some(("add", args)) => {
                let mut entry = ManualEntry::new(joined(args, "text"));
                entry.customer = args.get_one::<String>("customer").cloned();
                entry.owner = args.get_one::<String>("owner").cloned();
                entry.criticality = args
                    .get_one::<String>("criticality")
                    .map(|text| text.parse::<Criticality>())
                    .transpose()?;
                entry.reported = match args.get_one::<String>("date") {
                    Some(text) => parse_date(text)?,
                    None => None,
                };
                self.log(entry)
            }
            Some(("import", args)) => {
                let path = required(args, "file")?;
                let profile = if args.get_flag("strict") {
                    ImportProfile::Strict
                } else {
                    self.session.config().import.profile()
                };
                let selection = args
                    .get_one::<usize>("row")
                    .map_or(ImportSelection::All, |row| ImportSelection::Row(*row));
                self.import(path, &profile, selection)
            }
            Some(("preview", args)) => {
                let path = required(args, "file")?;
                let row = args
                    .get_one::<usize>("row")
                    .copied()
                    .ok_or_else(|| anyhow!("missing argument <row>"))?;
                let table = read_table_with(&self.codecs, path)
                    .with_context(|| format!("reading {path}"))?;
                let preview = self.session.preview(&table, row)?;
                Ok(Reply::text(self.renderer.preview(&preview)))
            }
            Some(("status", args)) => {
                let id = self.session.store().parse_id(required(args, "id")?)?;
                let status: Status = joined(args, "status").parse()?;
                let board = self.session.board();
                match board.card(id) {
                    Some(card) => card.change_status(self.session.store_mut(), status)?,
                    None => self.session.store_mut().update_status(id, status)?,
                }
                let label = self.session.store().render_id(id);
                Ok(Reply::text(self.renderer.status_changed(&label, status)))
            }
            Some(("action", args)) => {
                let id = self.session.store().parse_id(required(args, "id")?)?;
                self.session
                    .store_mut()
                    .update_action_taken(id, joined(args, "text"))?;
                Ok(Reply::text(format!(
                    "Recorded action on {}\n",
                    self.session.store().render_id(id)
                )))
            }
            Some(("board", _)) => Ok(Reply::text(self.renderer.board(&self.session.board()))),
            Some(("list", _)) => Ok(Reply::text(self.renderer.case_list(self.session.store()))),
            Some(("export", args)) => {
                let path = required(args, "file")?;
                let count = self.export(path)?;
                Ok(Reply::text(format!("Exported {count} case(s) to {path}\n")))
            }
            Some(("quit", _)) => Ok(Reply {
                text: String::new(),
                flow: Flow::Quit,
            }),
            Some((name, _)) => Err(anyhow!("unhandled command '{name}'")),
            None => Ok(Reply::text(String::new())),
        }
    }

    fn log(&mut self, entry: ManualEntry) -> Result<Reply> {
        let receipt = self.session.log_manual(entry)?;
        Ok(Reply::text(self.renderer.receipt(&receipt)))
    }

    fn import(
        &mut self,
        path: &str,
        profile: &ImportProfile,
        selection: ImportSelection,
    ) -> Result<Reply> {
        let table =
            read_table_with(&self.codecs, path).with_context(|| format!("reading {path}"))?;
        let report = self
            .session
            .import(&table, profile, selection)
            .with_context(|| format!("importing {path}"))?;
        let mut text = self.renderer.import_report(&report, self.session.store());
        text.push_str(&self.renderer.board(&self.session.board()));
        Ok(Reply::text(text))
    }

    /// Write all cases to `path`, returning how many were written
    ///
    /// # Errors
    /// Returns error for unknown extensions or write failures
    pub fn export(&self, path: &str) -> Result<usize> {
        let rows = self.session.store().export_rows();
        write_export_with(&self.codecs, path, &rows)
            .with_context(|| format!("exporting to {path}"))?;
        Ok(rows.len())
    }

    /// Read lines until end of input or `quit`
    ///
    /// # Errors
    /// Returns error only when reading input or writing output fails
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line.context("reading input")?;

            match self.respond(&line) {
                Ok(reply) => {
                    out.write_all(reply.text.as_bytes())?;
                    if reply.flow == Flow::Quit {
                        break;
                    }
                }
                Err(err) => {
                    tracing::debug!(line = %line, error = %err, "command failed");
                    match err.downcast_ref::<clap::Error>() {
                        Some(usage) => write!(out, "{usage}")?,
                        None => writeln!(out, "error: {err:#}")?,
                    }
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
