use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use std::process::ExitCode;
use tracing::info;

use crate::calendar;
use crate::cheat::CheatSheet;
use crate::config::Config;
use crate::entry::{Entry, EntryKind, parse_tag_list};
use crate::error::DailyError;
use crate::exec::SystemEditor;
use crate::fs::DailyStore;
use crate::search::{self, SearchOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "daily",
    author,
    version,
    about = "CLI for daily work logging",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log completed work (Done section)
    Did(LogArgs),

    /// Plan work (To Do section)
    Plan(LogArgs),

    /// Log a blocker (Blockers section)
    Block(LogArgs),

    /// Log a meeting (Meetings section)
    Meeting(LogArgs),

    /// Show cheat sheet for daily standup (reads yesterday's entries by default)
    Cheat(CheatArgs),

    /// Search and open daily files interactively
    Search {
        /// Filter by tags (comma-separated)
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Entry text
    pub text: String,

    /// Comma-separated tags
    #[arg(short, long)]
    pub tags: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CheatArgs {
    /// Filter by tags (comma-separated)
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Plain text output (no colors)
    #[arg(short, long)]
    pub plain: bool,

    /// Show today's file instead of yesterday's
    #[arg(long)]
    pub today: bool,

    /// Skip weekends when looking for yesterday's file
    #[arg(long, conflicts_with = "no_workdays")]
    pub workdays: bool,

    /// Use the literal previous day, even on a weekend
    #[arg(long)]
    pub no_workdays: bool,
}

impl CheatArgs {
    /// Flag override for weekend skipping, `None` to use the config
    pub fn workdays_override(&self) -> Option<bool> {
        match (self.workdays, self.no_workdays) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// How a command finished, mapped onto the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Normal empty result, e.g. no note for the requested day
    NothingFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NothingFound => ExitCode::FAILURE,
        }
    }
}

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    let config = Config::load()?;

    execute(cli.command, &config, calendar::today())
}

/// Dispatch one command against `config` as of `today`
pub fn execute(command: Commands, config: &Config, today: NaiveDate) -> Result<Outcome> {
    let store = DailyStore::new(&config.dailies_dir);

    let (kind, args) = match command {
        Commands::Did(args) => (EntryKind::Done, args),
        Commands::Plan(args) => (EntryKind::Plan, args),
        Commands::Block(args) => (EntryKind::Block, args),
        Commands::Meeting(args) => (EntryKind::Meeting, args),
        Commands::Cheat(args) => return show_cheat(&store, today, &args, config.skip_weekends),
        Commands::Search { tags } => return search_notes(&store, config, tags.as_deref()),
        Commands::Config => {
            println!("{}", describe_config(config));
            return Ok(Outcome::Success);
        }
    };

    println!("{}", log_entry(&store, today, kind, &args)?);
    Ok(Outcome::Success)
}

fn show_cheat(
    store: &DailyStore,
    today: NaiveDate,
    args: &CheatArgs,
    skip_weekends: bool,
) -> Result<Outcome> {
    let colored = !args.plain && atty::is(atty::Stream::Stdout);

    let err = match cheat_sheet(store, today, args, skip_weekends) {
        Ok(sheet) => {
            print_cheat(&sheet, colored);
            return Ok(Outcome::Success);
        }
        Err(err) => err,
    };

    match err.downcast_ref::<DailyError>() {
        Some(DailyError::NoteNotFound { date }) => {
            let hint = if args.today {
                "Use 'daily did' to get started."
            } else {
                "Use 'daily cheat --today' to see today's file."
            };
            println!("No entries found for {}. {}", date, hint);
            Ok(Outcome::NothingFound)
        }
        _ => Err(err),
    }
}

fn search_notes(store: &DailyStore, config: &Config, tags: Option<&str>) -> Result<Outcome> {
    let filter = tags.map(parse_tag_list).unwrap_or_default();
    let selector = search::selector_for(config.finder, store);
    let editor = SystemEditor::from_env();

    match search::run(store, &filter, selector.as_ref(), &editor)? {
        SearchOutcome::NoFiles if filter.is_empty() => {
            println!("{}", "No daily files found.".yellow());
        }
        SearchOutcome::NoFiles => {
            let message = format!("No daily files found with tags: {}", filter.join(", "));
            println!("{}", message.as_str().yellow());
        }
        SearchOutcome::Cancelled | SearchOutcome::Opened(_) => {}
    }
    Ok(Outcome::Success)
}

/// Validate and append an entry for `today`; returns the confirmation line
pub fn log_entry(
    store: &DailyStore,
    today: NaiveDate,
    kind: EntryKind,
    args: &LogArgs,
) -> Result<String> {
    let text = clean_text(&args.text)?;
    let tags = args.tags.as_deref().map(parse_tag_list).unwrap_or_default();
    let entry = Entry::new(text, &tags);

    store.append(today, kind, &entry)?;

    Ok(format!("✓ Added to {}: {}", kind.section().name(), entry.body()))
}

/// Trimmed single-line text; blank input is rejected
fn clean_text(raw: &str) -> Result<String> {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(DailyError::EmptyText.into());
    }
    Ok(text)
}

/// Load and filter the note the cheat sheet should show
pub fn cheat_sheet(
    store: &DailyStore,
    today: NaiveDate,
    args: &CheatArgs,
    skip_weekends_default: bool,
) -> Result<CheatSheet> {
    let skip_weekends = args.workdays_override().unwrap_or(skip_weekends_default);
    let target = calendar::resolve_target(today, args.today, skip_weekends);
    info!(%today, %target, skip_weekends, "resolved cheat sheet date");

    let content = store.read(target)?;
    let filter = args.tags.as_deref().map(parse_tag_list).unwrap_or_default();
    Ok(CheatSheet::build(target, &content, &filter))
}

fn print_cheat(sheet: &CheatSheet, colored: bool) {
    if colored {
        println!("{}", sheet.render_colored());
    } else if !sheet.is_empty() {
        println!("{}", sheet.render_plain());
    }

    if sheet.is_empty() {
        eprintln!("No matching entries.");
    }
}

fn describe_config(config: &Config) -> String {
    let source = config
        .source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none, using defaults)".to_string());

    format!(
        "config file:   {}\ndailies_dir:   {}\nskip_weekends: {}\nfinder:        {}",
        source,
        config.dailies_dir.display(),
        config.skip_weekends,
        config.finder
    )
}
