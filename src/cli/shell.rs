//! Interactive/script command loop dispatching user intents into the engine.

use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::warn;

use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::cli::{CliError, CommandError};
use crate::config::{Config, ConfigManager};
use crate::core::Session;
use crate::errors::LedgerError;
use crate::ledger::{HighlightSelector, Ledger};
use crate::storage::CsvDirSource;

const SCRIPT_ENV: &str = "SPENDVIEW_CLI_SCRIPT";
const CSV_DIR_ENV: &str = "SPENDVIEW_CSV_DIR";

const COMMANDS: [&str; 9] = [
    "files",
    "load",
    "show",
    "toggle",
    "summary",
    "breakdown",
    "help",
    "exit",
    "quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new()?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(&COMMANDS)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::info("spendview — type `help` for commands.");

    loop {
        let line = editor.readline("spendview> ");
        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = split(line).map_err(|err| CommandError::usage(err.to_string()))?;
    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }
    let command = tokens[0].to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.dispatch(&command, &args)
}

/// Shell state: the session that owns the ledger, plus config handling.
pub struct ShellContext {
    session: Session,
    config: Config,
    config_manager: Option<ConfigManager>,
}

impl ShellContext {
    /// Builds the context from the saved config, or from the
    /// `SPENDVIEW_CSV_DIR` override (which skips config persistence).
    pub fn new() -> Result<Self, CliError> {
        let (config, config_manager) = match std::env::var_os(CSV_DIR_ENV) {
            Some(dir) => {
                let config = Config {
                    csv_dir: dir.into(),
                    ..Config::default()
                };
                (config, None)
            }
            None => {
                let manager = ConfigManager::new()?;
                let config = manager.load()?;
                (config, Some(manager))
            }
        };
        let source = CsvDirSource::new(config.csv_dir.clone());
        let session = Session::new(Box::new(source), config.known_prefixes.clone());
        Ok(Self {
            session,
            config,
            config_manager,
        })
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "files" => self.cmd_files()?,
            "load" => self.cmd_load(args)?,
            "show" => self.cmd_show(args)?,
            "toggle" => self.cmd_toggle(args)?,
            "summary" => self.cmd_summary()?,
            "breakdown" => self.cmd_breakdown()?,
            "help" => print_help(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => {
                return Err(CommandError::usage(format!(
                    "unknown command `{other}`; type `help`"
                )))
            }
        }
        Ok(LoopControl::Continue)
    }

    /// Maps each error kind to a non-crashing notice and keeps the loop
    /// alive; only the shell's own IO failures are fatal.
    fn report_error(&self, err: CommandError) {
        match err {
            CommandError::Usage(message) => output::warning(message),
            CommandError::Core(core) if core.is_recoverable() => output::warning(core),
            CommandError::Core(core) => output::error(core),
        }
    }

    fn ledger(&self) -> Result<&Ledger, CommandError> {
        self.session
            .ledger()
            .ok_or_else(|| CommandError::usage("no export loaded; run `files` then `load <name>`"))
    }

    fn cmd_files(&self) -> Result<(), CommandError> {
        let files = self.session.available_files().map_err(CommandError::Core)?;
        if files.is_empty() {
            output::info(format!(
                "No .csv files in {}.",
                self.config.csv_dir.display()
            ));
            return Ok(());
        }
        for name in files {
            output::info(name);
        }
        Ok(())
    }

    fn cmd_load(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [name] = args else {
            return Err(CommandError::usage("usage: load <file.csv>"));
        };
        let ledger = self.session.load(name).map_err(CommandError::Core)?;
        output::success(format!(
            "Loaded {} ({} transactions).",
            name,
            ledger.len()
        ));

        self.config.last_opened_file = Some(name.to_string());
        if let Some(manager) = &self.config_manager {
            if let Err(err) = manager.save(&self.config) {
                warn!(%err, "Could not persist config.");
            }
        }
        self.cmd_summary()
    }

    fn cmd_toggle(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let [raw] = args else {
            return Err(CommandError::usage("usage: toggle <row>"));
        };
        let index: usize = raw
            .parse()
            .map_err(|_| CommandError::usage(format!("`{raw}` is not a row number")))?;
        let ledger = self
            .session
            .ledger_mut()
            .ok_or_else(|| CommandError::usage("no export loaded; run `files` then `load <name>`"))?;
        let ignored = ledger.toggle_ignore(index).map_err(CommandError::Core)?;
        output::success(format!(
            "Row {index} is now {}.",
            if ignored { "ignored" } else { "counted" }
        ));
        // Pull model: re-read the totals after every mutation.
        self.cmd_summary()
    }

    fn cmd_show(&self, args: &[&str]) -> Result<(), CommandError> {
        let ledger = self.ledger()?;
        let selector = match args {
            [] => HighlightSelector::IgnoreState,
            [label] => HighlightSelector::Category(*label),
            _ => return Err(CommandError::usage("usage: show [category]")),
        };

        let mut table = Table::new(vec![
            TableColumn::right("#"),
            TableColumn::left("Date"),
            TableColumn::left("Description"),
            TableColumn::right("Amount"),
            TableColumn::left("Type"),
            TableColumn::left("Category"),
            TableColumn::left("Ignored"),
        ]);
        for txn in ledger.transactions() {
            table.push_row(vec![
                txn.id.to_string(),
                txn.date.to_string(),
                txn.description.clone(),
                output::money(txn.amount),
                txn.kind.to_string(),
                txn.category.clone(),
                if txn.ignored { "x".into() } else { String::new() },
            ]);
        }

        for line in table.render_header() {
            output::info(line);
        }
        let highlights = ledger.highlights(selector);
        for (line, (_, highlight)) in table.render_rows().into_iter().zip(highlights) {
            output::info(output::paint_row(&line, highlight));
        }
        Ok(())
    }

    fn cmd_summary(&self) -> Result<(), CommandError> {
        let ledger = self.ledger()?;
        output::info(format!(
            "Total spent: {}   Total received: {}",
            output::money(ledger.total_counted_debits()),
            output::money(ledger.total_counted_credits())
        ));
        match ledger.date_range() {
            Ok((min, max)) => output::info(format!("Dates: {min} - {max}")),
            Err(LedgerError::EmptyLedger) => output::info("Dates: (no transactions)"),
            Err(err) => return Err(CommandError::Core(err)),
        }
        Ok(())
    }

    fn cmd_breakdown(&self) -> Result<(), CommandError> {
        let ledger = self.ledger()?;
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Sum"),
        ]);
        for aggregate in ledger.category_breakdown() {
            table.push_row(vec![aggregate.label.clone(), output::money(aggregate.sum)]);
        }
        for line in table.render_header() {
            output::info(line);
        }
        for line in table.render_rows() {
            output::info(line);
        }
        Ok(())
    }
}

fn print_help() {
    output::info("Commands:");
    output::info("  files             list export files in the configured directory");
    output::info("  load <file.csv>   load an export, replacing the current ledger");
    output::info("  show [category]   list transactions, colored by ignore state or category");
    output::info("  toggle <row>      flip a transaction between counted and ignored");
    output::info("  summary           counted totals and date range");
    output::info("  breakdown         per-category sums, ascending");
    output::info("  exit              leave the shell");
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: &[&'static str]) -> Self {
        let mut commands: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        // Only the first word is a command; no completion past it.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((start, Vec::new()));
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}
