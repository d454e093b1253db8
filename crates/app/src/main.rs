mod command;
mod render;

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use quiz_core::model::{DEFAULT_PASS_THRESHOLD, DEFAULT_TIME_LIMIT_SECS, QuizSettings};
use services::{QuizBank, QuizSession, SessionError, SessionPhase, SubmitReason};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use command::{Command, HELP};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeLimit { raw: String },
    InvalidPassThreshold { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeLimit { raw } => write!(f, "invalid --time-limit value: {raw}"),
            ArgsError::InvalidPassThreshold { raw } => {
                write!(f, "invalid --pass-threshold value: {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--time-limit <secs>] [--pass-threshold <percent>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --time-limit {DEFAULT_TIME_LIMIT_SECS}");
    eprintln!("  --pass-threshold {DEFAULT_PASS_THRESHOLD}");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace session transitions.");
}

struct Args {
    time_limit_secs: u32,
    pass_threshold: f64,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut time_limit_secs = DEFAULT_TIME_LIMIT_SECS;
        let mut pass_threshold = DEFAULT_PASS_THRESHOLD;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--time-limit" => {
                    let value = require_value(args, "--time-limit")?;
                    time_limit_secs = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidTimeLimit { raw: value.clone() })?;
                }
                "--pass-threshold" => {
                    let value = require_value(args, "--pass-threshold")?;
                    pass_threshold = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPassThreshold { raw: value.clone() })?;
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            time_limit_secs,
            pass_threshold,
        }))
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Owns the session and serializes user commands and timer ticks into it.
struct Driver {
    session: QuizSession,
    last_announced: Option<u64>,
}

impl Driver {
    fn new(session: QuizSession) -> Self {
        Self {
            session,
            last_announced: None,
        }
    }

    fn on_tick(&mut self) -> Result<(), SessionError> {
        if self.session.phase() != SessionPhase::InProgress {
            return Ok(());
        }

        let reading = self.session.tick(Utc::now())?;
        if render::should_announce(&reading) && self.last_announced != Some(reading.remaining_secs)
        {
            self.last_announced = Some(reading.remaining_secs);
            println!("{}", render::countdown(&reading));
        }

        if reading.expired {
            let report = self.session.submit(SubmitReason::Timeout)?;
            println!("{}", render::summary(report));
        }
        Ok(())
    }

    fn on_line(&mut self, line: &str) -> Flow {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Flow::Continue;
            }
        };

        if let Err(err) = self.apply(command) {
            log::warn!("rejected {command:?}: {err}");
            println!("{err}");
        }

        if command == Command::Quit {
            Flow::Quit
        } else {
            Flow::Continue
        }
    }

    fn apply(&mut self, command: Command) -> Result<(), SessionError> {
        match command {
            Command::Start => {
                self.session.start()?;
                self.last_announced = None;
                println!("{}", render::screen(&self.session));
            }
            Command::Answer { question, option } => {
                let index = question - 1;
                let Some(text) = self.session.question(index)?.options().get(option - 1).cloned()
                else {
                    println!("Q{question} has no option {option}.");
                    return Ok(());
                };
                self.session.record_answer(index, &text)?;
                println!("{}", render::questions(&self.session));
            }
            Command::Clear { question } => {
                self.session.clear_answer(question - 1)?;
                println!("{}", render::questions(&self.session));
            }
            Command::Submit => {
                if self.session.phase() == SessionPhase::InProgress && !self.session.all_answered()
                {
                    println!("Answer every question before submitting.");
                    return Ok(());
                }
                let report = self.session.submit(SubmitReason::Manual)?;
                println!("{}", render::summary(report));
            }
            Command::Restart => {
                self.session.restart();
                println!("{}", render::screen(&self.session));
            }
            Command::Show => {
                println!("{}", render::screen(&self.session));
                if let Ok(reading) = self.session.tick(Utc::now()) {
                    println!("{}", render::countdown(&reading));
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }
}

fn configure(args: &Args) -> Result<(QuizSettings, QuizBank), quiz_core::Error> {
    let settings = QuizSettings::new(args.time_limit_secs, args.pass_threshold)?;
    let bank = QuizBank::reference()?;
    Ok((settings, bank))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).inspect_err(|_| print_usage())? else {
        print_usage();
        return Ok(());
    };

    let (settings, bank) = configure(&args)?;
    log::info!(
        "loaded {} questions ({}s limit, pass at {}%)",
        bank.len(),
        settings.time_limit_secs(),
        settings.pass_threshold()
    );

    let mut driver = Driver::new(QuizSession::new(bank, settings));
    println!("{}", render::intro(&settings));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => driver.on_tick()?,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = driver.on_line(&line) {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
