mod command;
mod consts;
mod game;
mod options;
mod tty;
use crate::game::{format_elapsed, Game, Grid};
use crate::options::{Invocation, Options};
use crate::tty::Tty;
use anyhow::Context;
use log::{error, info};
use simplelog::WriteLogger;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let opts = match Options::from_env() {
        Ok(Invocation::Run(opts)) => opts,
        Ok(Invocation::Help) => {
            print!("{}", options::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("snaketerm: {e}");
            return ExitCode::from(2);
        }
    };
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("snaketerm: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(opts: &Options) -> anyhow::Result<()> {
    if opts.log {
        init_logging()?;
    }
    let (width, height) = Tty::size().context("failed to query terminal size")?;
    anyhow::ensure!(
        width >= consts::MIN_TERM_WIDTH && height >= consts::MIN_TERM_HEIGHT,
        "terminal is too small to play in ({width}x{height})"
    );
    let mut game = Game::new(Grid::new(width, height), opts);
    let started = Instant::now();
    let mut tty = Tty::open().context("failed to set up the terminal")?;
    let result = game.run(&mut tty);
    // The terminal must be restored and the summary printed on every exit
    // path, including I/O failures mid-game.
    let restored = tty.close();
    let summary = game.summary(started.elapsed());
    match &result {
        Ok(outcome) => info!("{outcome}"),
        Err(e) => error!("unexpected failure: {e}"),
    }
    info!(
        "game over! final score: {} | final snake size: {}",
        summary.score, summary.length
    );
    info!(
        "loops: {} | time played: {}",
        summary.loops,
        format_elapsed(summary.elapsed)
    );
    println!("{summary}");
    restored.context("failed to restore the terminal")?;
    result.context("game interrupted by an I/O failure")?;
    Ok(())
}

fn init_logging() -> anyhow::Result<()> {
    let file = fs_err::File::create(consts::LOG_FILE)
        .with_context(|| format!("failed to create {}", consts::LOG_FILE))?;
    WriteLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        file,
    )
    .context("failed to install the gameplay logger")?;
    Ok(())
}
