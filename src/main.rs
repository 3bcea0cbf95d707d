use std::io::stdout;

use anyhow::Result;
use clap::Parser;

mod cli;
mod engine;
mod error;
mod game;
mod scores;
mod tui;

use cli::Cli;
use game::Game;
use tui::colors::Theme;
use tui::crossterm::{Crossterm, CrosstermEvents};
use tui::frame::{Layout, Margins};

fn init_logging(cli: &Cli) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file(&cli.log_file)?)
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    // fail on bad settings before the terminal is taken over
    let board = cli.board()?;
    let layout = Layout::new(Margins::default(), Theme::new(cli.mode));

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();
    let game = Game::new(board, cli.score_store(), layout, renderer, event_source);

    // the renderer is dropped with the game, so this prints to the regular screen
    let summary = game.run()?;
    println!(
        "{}  Score: {}  Best: {}",
        summary.outcome.message(),
        summary.score,
        summary.best_score
    );

    Ok(())
}
