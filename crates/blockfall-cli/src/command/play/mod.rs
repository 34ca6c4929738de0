use blockfall_engine::Game;

use self::app::PlayApp;
use super::engine_arg::EngineArg;
use crate::tui::Runtime;

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    engine: EngineArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.engine.to_config()?;
    let game = Game::with_config(&config)?;
    let mut app = PlayApp::new(game);

    Runtime::new().run(&mut app)?;

    let stats = app.game().stats();
    eprintln!(
        "score: {}  lines: {}  level: {}  pieces: {}",
        stats.score(),
        stats.total_cleared_lines(),
        stats.level(),
        stats.completed_pieces()
    );
    Ok(())
}
