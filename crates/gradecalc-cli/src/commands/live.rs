//! The `gradecalc live` command.
//!
//! Reads one edit per line from stdin and prints the refreshed summary after
//! each one. Bad input is reported inline and the session carries on.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use gradecalc_core::config::{load_config_from, GradecalcConfig};
use gradecalc_core::display::LiveDisplay;
use gradecalc_core::model::{Mode, SemesterMode};
use gradecalc_core::report::DetailedReport;
use gradecalc_core::sheet::{parse_count, Edit, Sheet, SubjectField};
use gradecalc_core::traits::Calculator;
use gradecalc_core::CalcError;
use gradecalc_report::{copy_result, export_report, FileSink, StdoutSink};

use super::export::snapshot_export;

const GENERIC_FAULT: &str = "An error occurred. Please try again.";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Edit),
    Calculate,
    Copy,
    Export(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

fn index(arg: Option<&str>, what: &str) -> Result<usize, CalcError> {
    match arg.and_then(parse_count) {
        Some(n) if n >= 1 => Ok(n - 1),
        _ => Err(CalcError::validation(format!(
            "Expected a {what} number starting at 1."
        ))),
    }
}

fn count(arg: Option<&str>) -> usize {
    arg.and_then(parse_count).unwrap_or(0)
}

fn rest(args: &[&str], from: usize) -> String {
    args.get(from..).map(|a| a.join(" ")).unwrap_or_default()
}

fn subject_field(word: &str) -> Option<SubjectField> {
    match word {
        "name" => Some(SubjectField::Name),
        "marks" => Some(SubjectField::Marks),
        "credits" => Some(SubjectField::Credits),
        _ => None,
    }
}

/// Parse one input line for the given calculator.
pub fn parse_command(line: &str, mode: Mode) -> Result<Command, CalcError> {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, tail)) = args.split_first() else {
        return Ok(Command::Show);
    };
    let arg = |i: usize| tail.get(i).copied();
    let head = head.to_lowercase();

    if let Some(field) = subject_field(&head) {
        let edit = match mode {
            Mode::Gpa => Edit::Subject {
                semester: None,
                row: index(arg(0), "row")?,
                field,
                value: rest(tail, 1),
            },
            Mode::Cgpa => Edit::Subject {
                semester: Some(index(arg(0), "semester")?),
                row: index(arg(1), "row")?,
                field,
                value: rest(tail, 2),
            },
        };
        return Ok(Command::Edit(edit));
    }

    let command = match (head.as_str(), mode) {
        ("generate", _) => Command::Edit(Edit::Generate { count: count(arg(0)) }),
        ("reset", _) => Command::Edit(Edit::Reset),
        ("calculate" | "calc", _) => Command::Calculate,
        ("copy", _) => Command::Copy,
        ("export", _) => Command::Export(arg(0).map(PathBuf::from)),
        ("show", _) => Command::Show,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        ("subjects", Mode::Cgpa) => Command::Edit(Edit::GenerateSubjects {
            semester: index(arg(0), "semester")?,
            count: count(arg(1)),
        }),
        ("mode", Mode::Cgpa) => {
            let semester = index(arg(0), "semester")?;
            let mode = arg(1)
                .unwrap_or_default()
                .parse::<SemesterMode>()
                .map_err(CalcError::validation)?;
            Command::Edit(Edit::SetMode { semester, mode })
        }
        ("gpa", Mode::Cgpa) => Command::Edit(Edit::SemesterGpa {
            semester: index(arg(0), "semester")?,
            value: rest(tail, 1),
        }),
        ("semcredits", Mode::Cgpa) => Command::Edit(Edit::SemesterCredits {
            semester: index(arg(0), "semester")?,
            value: rest(tail, 1),
        }),

        (other, _) => {
            return Err(CalcError::validation(format!(
                "Unknown command `{other}`. Type `help` for a list."
            )))
        }
    };
    Ok(command)
}

/// Run `f`, turning a panic into the generic retry message.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| {
        tracing::error!("recovered from a fault while handling a command");
        GENERIC_FAULT.to_string()
    })
}

fn help(mode: Mode) -> &'static str {
    match mode {
        Mode::Gpa => {
            "Commands:\n  generate N            create N blank subject rows (1-20)\n  name ROW TEXT         set a subject name\n  marks ROW VALUE       set marks (0-100)\n  credits ROW VALUE     set credit hours\n  calculate             show the full result\n  copy | export [DIR]   copy or export the current summary\n  reset | show | quit"
        }
        Mode::Cgpa => {
            "Commands:\n  generate N                  create N blank semesters (1-10)\n  mode SEM direct|subjects    choose how a semester is entered\n  gpa SEM VALUE               set a semester GPA (0-4)\n  semcredits SEM VALUE        set a semester's credit hours\n  subjects SEM N              create N subject rows in a semester (1-15)\n  name|marks|credits SEM ROW VALUE\n  calculate                   show the full result\n  copy | export [DIR]         copy or export the current summary\n  reset | show | quit"
        }
    }
}

/// A live session over one sheet.
pub struct Session {
    sheet: Sheet,
    config: GradecalcConfig,
}

/// What a session wants printed after handling a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Summary(String),
    Panel(String),
    Message(String),
    Deferred(Command),
    Quit,
}

impl Session {
    pub fn new(mode: Mode, config: GradecalcConfig) -> Self {
        Self {
            sheet: Sheet::empty(mode),
            config,
        }
    }

    fn summary(&self) -> String {
        LiveDisplay::new(&self.sheet).refresh().to_string()
    }

    /// Handle every synchronous command. Copy and export come back as
    /// [`Outcome::Deferred`] for the caller to await.
    pub fn handle(&mut self, line: &str) -> Vec<Outcome> {
        let mode = self.sheet.as_calculator().mode();
        let command = match parse_command(line, mode) {
            Ok(c) => c,
            Err(e) => return vec![Outcome::Message(e.to_string())],
        };

        match command {
            Command::Edit(edit) => match guarded(|| self.sheet.apply(edit)) {
                Ok(Ok(())) => vec![Outcome::Summary(self.summary())],
                Ok(Err(e)) => vec![
                    Outcome::Message(e.to_string()),
                    Outcome::Summary(self.summary()),
                ],
                Err(fault) => vec![Outcome::Message(fault)],
            },
            Command::Calculate => {
                match guarded(|| DetailedReport::calculate(self.sheet.as_calculator())) {
                    Ok(Ok(report)) => vec![
                        Outcome::Panel(report.render_text()),
                        Outcome::Summary(self.summary()),
                    ],
                    Ok(Err(e)) => vec![Outcome::Message(e.to_string())],
                    Err(fault) => vec![Outcome::Message(fault)],
                }
            }
            Command::Show => vec![Outcome::Summary(self.summary())],
            Command::Help => vec![Outcome::Message(help(mode).to_string())],
            Command::Quit => vec![Outcome::Quit],
            deferred @ (Command::Copy | Command::Export(_)) => vec![Outcome::Deferred(deferred)],
        }
    }

    async fn run_deferred(&self, command: Command) -> String {
        let report = match snapshot_export(self.sheet.as_calculator(), &self.config) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("could not stamp export: {e:#}");
                return GENERIC_FAULT.to_string();
            }
        };
        let note = match command {
            Command::Copy => copy_result(&StdoutSink, &report).await,
            Command::Export(dir) => {
                let sink = FileSink::new(dir.unwrap_or_else(|| self.config.output_dir.clone()));
                export_report(&sink, &report).await
            }
            _ => return GENERIC_FAULT.to_string(),
        };
        note.to_string()
    }
}

pub async fn execute(mode: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mode = match mode {
        Some(m) => m.parse::<Mode>().map_err(|e| anyhow::anyhow!("{e}"))?,
        None => config.default_mode,
    };

    println!("{} calculator. Type `help` for commands.", mode.label());
    let mut session = Session::new(mode, config);
    println!("{}", session.summary());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        for outcome in session.handle(&line) {
            match outcome {
                Outcome::Summary(s) => println!("{s}"),
                Outcome::Panel(p) => print!("{p}"),
                Outcome::Message(m) => println!("! {m}"),
                Outcome::Deferred(c) => println!("{}", session.run_deferred(c).await),
                Outcome::Quit => return Ok(()),
            }
        }
    }

    Ok(())
}
