mod script;
mod session;

use anyhow::{Context, Error};
use clap::Parser;
use pagestack_core::logging::{get_run_id, init_logging, shutdown_logging};
use pagestack_core::settings::{NavigationSettings, Settings, SETTINGS_PATH};
use session::Session;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Drive a navigation stack from a script and print the events it raises.
#[derive(Parser, Debug)]
#[command(name = "pagestack", version)]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = SETTINGS_PATH)]
    settings: PathBuf,

    /// Script to run; reads standard input when omitted
    script: Option<PathBuf>,

    /// Stop at the first failing line instead of reporting it and continuing
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("can't load settings from {}", cli.settings.display()))?;

    init_logging(&settings.logging)?;
    tracing::info!(run_id = get_run_id(), script = ?cli.script, "starting");

    let result = run(&cli, &settings);

    if let Err(ref e) = result {
        tracing::error!(error = %e, "run failed");
    }

    shutdown_logging();

    result
}

fn run(cli: &Cli, settings: &Settings) -> Result<(), Error> {
    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("can't open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_script(input, &mut out, &settings.navigation, cli.strict)
}

/// Runs every line of `input` against a fresh navigation stack.
///
/// Event reports and line errors are written to `out`.
///
/// # Arguments
///
/// * `input` - Script source, one command per line
/// * `out` - Destination for event reports and skipped-line messages
/// * `settings` - Appearance and back-button behavior of the stack
/// * `strict` - Stop at the first failing line instead of skipping it
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails, or, when
/// `strict` is set, the first line error with its line number as context.
fn run_script<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    settings: &NavigationSettings,
    strict: bool,
) -> Result<(), Error> {
    let mut session = Session::new(settings);

    for (index, line) in input.lines().enumerate() {
        let line = line.context("can't read script line")?;
        let line_number = index + 1;

        let outcome = script::parse_line(&line)
            .map_err(Error::from)
            .and_then(|command| match command {
                Some(command) => session.apply(command, out),
                None => Ok(()),
            });

        if let Err(e) = outcome {
            if strict {
                return Err(e.context(format!("line {}", line_number)));
            }

            tracing::warn!(line = line_number, error = %e, "skipping line");
            writeln!(out, "line {}: {:#}", line_number, e)?;
        }
    }

    out.flush()?;

    Ok(())
}
