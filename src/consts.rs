//! Assorted constants & hard-coded configuration

/// Initial delay between ticks, in milliseconds.  The higher, the easier the
/// game is.
pub(crate) const INITIAL_TIMEOUT_MS: u64 = 500;

/// The tick delay never drops below this
pub(crate) const MIN_TIMEOUT_MS: u64 = 10;

/// How much the tick delay shrinks on each difficulty bump
pub(crate) const TIMEOUT_STEP_MS: u64 = 5;

/// Snake length before any food has been eaten
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for each food cell eaten
pub(crate) const SCORE_PER_FOOD: u32 = 1;

/// Glyph for the snake's head & body
pub(crate) const SNAKE_SYMBOL: char = '█';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '♦';

/// Gameplay events are written here when `--log` is given
pub(crate) const LOG_FILE: &str = "snake.log";

/// Smallest terminal the game is willing to start in
pub(crate) const MIN_TERM_WIDTH: u16 = 16;

/// See [`MIN_TERM_WIDTH`]
pub(crate) const MIN_TERM_HEIGHT: u16 = 8;
