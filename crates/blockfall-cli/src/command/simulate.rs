use std::io::{self, Write as _};

use anyhow::Context as _;
use blockfall_engine::{Action, Game};

use super::engine_arg::EngineArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Action script: L/R move, D soft drop, U rotate, H hard drop, P pause, N new game.
    /// Whitespace is ignored.
    #[clap(long)]
    pub(crate) actions: String,
    /// Print the final state as text instead of JSON
    #[clap(long)]
    pub(crate) text: bool,
    /// Print every action and its outcome to stderr
    #[clap(long)]
    pub(crate) trace: bool,
    #[clap(flatten)]
    pub(crate) engine: EngineArg,
}

/// Error for a character in an action script that is not an action code.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown action code {code:?} at position {position}")]
pub(crate) struct ParseScriptError {
    code: char,
    position: usize,
}

fn action_from_code(code: char) -> Option<Action> {
    let action = match code.to_ascii_uppercase() {
        'L' => Action::Left,
        'R' => Action::Right,
        'D' => Action::SoftDrop,
        'U' => Action::Rotate,
        'H' => Action::HardDrop,
        'P' => Action::TogglePause,
        'N' => Action::Reset,
        _ => return None,
    };
    Some(action)
}

pub(crate) fn parse_script(script: &str) -> Result<Vec<Action>, ParseScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, code)| {
            action_from_code(code).ok_or(ParseScriptError { code, position })
        })
        .collect()
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        actions,
        text,
        trace,
        engine,
    } = arg;

    let actions = parse_script(actions).context("Invalid action script")?;
    let config = engine.to_config()?;
    let mut game = Game::with_config(&config)?;

    for (step, action) in actions.into_iter().enumerate() {
        let outcome = game.apply(action);
        if *trace {
            let outcome = serde_json::to_string(&outcome)?;
            eprintln!("[{step}] {action:?}: {outcome}");
        }
    }

    let snapshot = game.snapshot();
    let mut stdout = io::stdout().lock();
    if *text {
        write!(stdout, "{snapshot}").context("Failed to write snapshot")?;
    } else {
        serde_json::to_writer_pretty(&mut stdout, &snapshot)
            .context("Failed to write snapshot JSON")?;
        writeln!(stdout).context("Failed to write snapshot JSON")?;
    }
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
