use crate::command::{BoardArg, play::app::PlayApp};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    board: BoardArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { board } = arg;

    let (engine, seed) = board.build_engine()?;
    let mut app = PlayApp::new(engine, seed);

    ratatui::run(|terminal| app.run(terminal))?;

    eprintln!("board seed: {seed}");

    Ok(())
}
