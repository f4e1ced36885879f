use std::{path::PathBuf, time::Duration};

use dotfall_engine::{BoardSeed, BoardStats, find_legal_move};
use serde::Serialize;

use crate::{command::BoardArg, util::Output};

/// Coarse step size for headless play; resolution only cares that enough
/// time passes, not how finely it is sliced.
const STEP: Duration = Duration::from_millis(100);

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Maximum number of swaps to play
    #[clap(long, default_value_t = 200)]
    moves: usize,
    /// Emit the report as JSON
    #[clap(long)]
    json: bool,
    /// Output file path (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: BoardSeed,
    swaps_played: usize,
    deadlocked: bool,
    stats: BoardStats,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        board,
        moves,
        json,
        output,
    } = arg;

    let (mut engine, seed) = board.build_engine()?;
    eprintln!("Simulating up to {moves} swaps with seed {seed}...");

    let mut swaps_played = 0;
    let mut deadlocked = false;
    for _ in 0..*moves {
        let Some((from, to)) = find_legal_move(engine.grid()) else {
            deadlocked = true;
            break;
        };
        if !engine.request_swap(from, to) {
            break;
        }
        while !engine.phase().is_move() {
            engine.tick(STEP);
        }
        engine.drain_events().for_each(drop);
        swaps_played += 1;
    }

    let report = SimulationReport {
        seed,
        swaps_played,
        deadlocked,
        stats: *engine.stats(),
    };

    if *json {
        Output::save_json(&report, output.clone())?;
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    let stats = &report.stats;
    println!("seed:                  {}", report.seed);
    println!("swaps played:          {}", report.swaps_played);
    println!("deadlocked:            {}", report.deadlocked);
    println!("pieces destroyed:      {}", stats.pieces_destroyed());
    println!("specials created:      {}", stats.specials_created());
    println!("breakables destroyed:  {}", stats.breakables_destroyed());
    println!("cascades:              {}", stats.cascades());
    println!("resolutions completed: {}", stats.resolutions_completed());
}
