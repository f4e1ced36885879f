use clap::{Parser, Subcommand};
use dotfall_engine::{BoardConfig, BoardEngine, BoardLayout, BoardSeed};

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run seeded headless sessions and report statistics
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}

/// Board shape and palette options shared by all modes.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Board width in cells
    #[clap(long, default_value_t = 8)]
    width: usize,
    /// Board height in cells
    #[clap(long, default_value_t = 8)]
    height: usize,
    /// Number of piece colors in play
    #[clap(long, default_value_t = 6)]
    colors: usize,
    /// Board seed as 32 hex characters (random when omitted)
    #[clap(long)]
    seed: Option<BoardSeed>,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            colors: 6,
            seed: None,
        }
    }
}

impl BoardArg {
    /// Builds an engine from the arguments, drawing a random seed if none was
    /// given. Returns the seed alongside so every mode can report it.
    pub(crate) fn build_engine(&self) -> anyhow::Result<(BoardEngine, BoardSeed)> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let config = BoardConfig {
            width: self.width,
            height: self.height,
            palette: self.colors,
            ..BoardConfig::default()
        };
        let engine = BoardEngine::with_seed(config, &BoardLayout::default(), seed)?;
        Ok((engine, seed))
    }
}
