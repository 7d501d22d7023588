use crate::consts;
use lexopt::prelude::*;
use thiserror::Error;

pub(crate) static USAGE: &str = "\
Usage: snaketerm [options]

Steer the snake with the arrow keys (or wasd/hjkl), eat the food, and don't
hit the walls or yourself.  Press q, Esc, or Ctrl-C to give up.

Options:
  -l, --log         Log gameplay events to snake.log
      --length <N>  Initial snake length  [default: 3]
      --reward <N>  Score awarded per food  [default: 1]
  -h, --help        Show this help and exit
";

/// Command-line options
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Options {
    /// Write gameplay events to [`consts::LOG_FILE`]
    pub(crate) log: bool,
    pub(crate) length: usize,
    pub(crate) reward: u32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            log: false,
            length: consts::INITIAL_SNAKE_LENGTH,
            reward: consts::SCORE_PER_FOOD,
        }
    }
}

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Options),
    Help,
}

impl Options {
    pub(crate) fn from_env() -> Result<Invocation, OptionsError> {
        Options::from_parser(lexopt::Parser::from_env())
    }

    fn from_parser(mut parser: lexopt::Parser) -> Result<Invocation, OptionsError> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Short('l') | Long("log") => opts.log = true,
                Long("length") => {
                    opts.length = parser.value()?.parse()?;
                    if opts.length == 0 {
                        return Err(OptionsError::ZeroLength);
                    }
                }
                Long("reward") => {
                    opts.reward = parser.value()?.parse()?;
                    if opts.reward == 0 {
                        return Err(OptionsError::ZeroReward);
                    }
                }
                Short('h') | Long("help") => return Ok(Invocation::Help),
                _ => return Err(arg.unexpected().into()),
            }
        }
        Ok(Invocation::Run(opts))
    }
}

#[derive(Debug, Error)]
pub(crate) enum OptionsError {
    #[error(transparent)]
    Parse(#[from] lexopt::Error),
    #[error("--length must be at least 1")]
    ZeroLength,
    #[error("--reward must be at least 1")]
    ZeroReward,
}
