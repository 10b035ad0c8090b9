use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use super::{Game, GameError};

/// Prompt asking for the table size.
pub const PLAYER_PROMPT: &str = "Please enter the number of players: ";
/// Reply to a table size that is not a number.
pub const BAD_PLAYER_INPUT_ERR_MSG: &str =
    "Bad value received for number of players, please try again with a number";
/// Reply to a winner line that does not follow `<Name> wins`.
pub const BAD_WINNER_INPUT_MSG: &str = "invalid winner input, expect format of 'PlayerName wins'";

const WINS_SUFFIX: &str = " wins";

/// Failures that end a CLI session abnormally.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
    /// The game could not be finished.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Line-oriented front end for a [`Game`].
pub struct Cli<R, W, G> {
    input: R,
    output: W,
    game: G,
}

impl<R, W, G> Cli<R, W, G>
where
    R: BufRead,
    W: Write,
    G: Game,
{
    /// Create a session reading from `input` and replying on `output`.
    pub fn new(input: R, output: W, game: G) -> Self {
        Self {
            input,
            output,
            game,
        }
    }

    /// Run one game: ask for the table size, then wait for `<Name> wins`.
    ///
    /// Malformed input is reported on the output and ends the session
    /// without touching the league.
    pub fn play_poker(&mut self) -> Result<(), CliError> {
        write!(self.output, "{PLAYER_PROMPT}")?;
        self.output.flush()?;

        let Ok(players) = self.read_line()?.trim().parse::<u32>() else {
            write!(self.output, "{BAD_PLAYER_INPUT_ERR_MSG}")?;
            return Ok(());
        };

        self.game.start(players);

        let line = self.read_line()?;
        let Some(winner) = extract_winner(&line) else {
            debug!(input = %line, "rejected winner line");
            write!(self.output, "{BAD_WINNER_INPUT_MSG}")?;
            return Ok(());
        };

        self.game.finish(&winner)?;
        Ok(())
    }

    /// Unwrap the session, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pull the winner's name out of a `<Name> wins` line.
pub fn extract_winner(input: &str) -> Option<String> {
    if !input.contains(WINS_SUFFIX) {
        return None;
    }
    Some(input.replacen(WINS_SUFFIX, "", 1))
}
