mod alert;
mod app;
mod attachment;
mod catalogue;
mod claim;
mod help;
mod listing;
mod logging;
mod picker;
mod range;
mod report;
mod session;
mod theme;
use crate::app::App;
use crate::claim::MemorySink;
use crate::report::{Reporter, TracingReporter};
use crate::session::Session;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};
use tracing::info;

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

static DEFAULT_USER: &str = "member@cpd.local";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        today: Option<Date>,
        user: Option<String>,
        log_file: Option<PathBuf>,
        demo: bool,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut today = None;
        let mut user = None;
        let mut log_file = None;
        let mut demo = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("user") => user = Some(parser.value()?.string()?),
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("demo") => demo = true,
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            today,
            user,
            log_file,
            demo,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                today,
                user,
                log_file,
                demo,
            } => {
                if let Some(path) = log_file {
                    logging::init(&path)?;
                }
                let today = match today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let session = Session::from_email(user.as_deref().unwrap_or(DEFAULT_USER))?;
                let mut reporter = TracingReporter::new();
                reporter.set_user(Some(&session));
                info!(user = session.email(), %today, demo, "starting claim form");
                let sink = if demo {
                    MemorySink::with_sample_history(today)
                } else {
                    MemorySink::new()
                };
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(today, session, sink, reporter).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                let log_env = logging::LOG_ENV_VAR;
                println!("Usage: cpdclaim [options]");
                println!();
                println!("Terminal form for claiming CPD points");
                println!();
                println!("Options:");
                println!("  --today YYYY-MM-DD  Treat the given date as today");
                println!("  --user EMAIL        Sign in as the given member");
                println!("                      [default: {DEFAULT_USER}]");
                println!("  --log-file PATH     Append logs to PATH");
                println!("                      (filter with ${log_env})");
                println!("  --demo              Start with a sample claim history");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
