mod cell;
mod direction;
mod snake;
pub(crate) use self::cell::{Cell, Grid};
pub(crate) use self::direction::Direction;
use self::snake::Snake;
use crate::command::Command;
use crate::consts;
use crate::options::Options;
use log::info;
use rand::Rng;
use std::fmt;
use std::io;
use std::time::Duration;

/// Where the game draws.  The game only ever touches single cells: the food
/// when it is placed, the head each tick, and the vacated tail.
pub(crate) trait RenderSink {
    fn draw_cell(&mut self, cell: Cell, glyph: char) -> io::Result<()>;

    fn clear_cell(&mut self, cell: Cell) -> io::Result<()> {
        self.draw_cell(cell, ' ')
    }
}

/// Where the game reads keys from.  `poll_key` blocks for up to `timeout`
/// and returns `None` if no key arrived, which doubles as the tick clock.
pub(crate) trait InputSource {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Boundary,
    SelfCollision,
    UserQuit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Boundary => write!(f, "the snake hit the wall"),
            Outcome::SelfCollision => write!(f, "the snake ran into itself"),
            Outcome::UserQuit => write!(f, "user quit"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Running,
    Over(Outcome),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    direction: Direction,
    food: Cell,
    score: u32,
    reward: u32,
    /// Tick counter used to gate self-collision checking; stops counting once
    /// it has exceeded the grace period.
    ticks: usize,
    /// Number of initial ticks during which self-collision is not checked,
    /// giving the head time to separate from the freshly-built body.
    grace: usize,
    /// Current delay between ticks, in milliseconds
    timeout: u64,
    state: State,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(grid: Grid, options: &Options) -> Self {
        Game::new_with_rng(grid, options, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(grid: Grid, options: &Options, mut rng: R) -> Game<R> {
        let direction = Direction::Right;
        let snake = Snake::new(grid.start_cell(), direction, options.length);
        let food = sample_food_cell(grid, &snake, &mut rng);
        Game {
            rng,
            grid,
            snake,
            direction,
            food,
            score: 0,
            reward: options.reward,
            ticks: 0,
            grace: options.length,
            timeout: consts::INITIAL_TIMEOUT_MS,
            state: State::Running,
        }
    }

    /// Drive the game to completion against the given terminal.  Returns the
    /// reason the game ended, or the I/O error that interrupted it.
    pub(crate) fn run<T: InputSource + RenderSink>(&mut self, term: &mut T) -> io::Result<Outcome> {
        info!("game starting!");
        info!("initial food @ {}", self.food);
        info!("initial snake: {:?}", self.snake.body);
        term.draw_cell(self.food, consts::FOOD_SYMBOL)?;
        loop {
            let key = term.poll_key(Duration::from_millis(self.timeout))?;
            self.tick(key, term)?;
            if let State::Over(outcome) = self.state {
                return Ok(outcome);
            }
        }
    }

    /// One simulation step: resolve input, test the cell the head is about to
    /// occupy for collisions, then either end the game or commit the move and
    /// resolve food, score, and difficulty.
    fn tick<S: RenderSink>(&mut self, key: Option<Command>, render: &mut S) -> io::Result<()> {
        if key == Some(Command::Quit) {
            info!("user quit!");
            self.state = State::Over(Outcome::UserQuit);
            return Ok(());
        }
        self.direction = self.direction.steer(key.and_then(Command::direction));
        if self.ticks <= self.grace {
            self.ticks += 1;
        }
        let next = self.snake.next_head(self.direction);
        let hit_boundary = self.grid.is_boundary(next);
        let hit_self = self.ticks > self.grace && self.snake.is_self_collision(next);
        if hit_boundary || hit_self {
            info!("hit something! boundary: {hit_boundary} | self: {hit_self}");
            self.state = State::Over(if hit_boundary {
                Outcome::Boundary
            } else {
                Outcome::SelfCollision
            });
            return Ok(());
        }
        let head = self.snake.advance(self.direction);
        if head == self.food {
            self.score += self.reward;
            info!(
                "got food! score is now {} and the snake is {} cells long",
                self.score,
                self.snake.len()
            );
            self.food = sample_food_cell(self.grid, &self.snake, &mut self.rng);
            info!("next food will be placed @ {}", self.food);
            render.draw_cell(self.food, consts::FOOD_SYMBOL)?;
            // Every second food eaten makes the game faster.
            if self.score % 2 == 0 {
                self.timeout = maybe_speed_up(self.timeout);
            }
        } else {
            let tail = self.snake.pop_tail();
            render.clear_cell(tail)?;
        }
        render.draw_cell(head, consts::SNAKE_SYMBOL)?;
        Ok(())
    }
}

impl<R> Game<R> {
    pub(crate) fn summary(&self, elapsed: Duration) -> Summary {
        Summary {
            score: self.score,
            length: self.snake.len(),
            loops: self.ticks,
            elapsed,
        }
    }
}

/// Rejection-sample an interior cell not occupied by the snake.  Termination
/// rests on the snake covering only a fraction of the grid; a snake that has
/// nearly filled the screen would spin here, but the player has long since
/// won at that point.
fn sample_food_cell<R: Rng>(grid: Grid, snake: &Snake, rng: &mut R) -> Cell {
    loop {
        let cell = grid.random_interior(rng);
        if !snake.contains(cell) {
            return cell;
        }
    }
}

/// Drop the tick delay by one step, bottoming out at the floor.  Never
/// increases and never returns less than [`consts::MIN_TIMEOUT_MS`].
fn maybe_speed_up(current: u64) -> u64 {
    let next = current.saturating_sub(consts::TIMEOUT_STEP_MS);
    if next < consts::MIN_TIMEOUT_MS {
        current
    } else {
        next
    }
}

/// End-of-game report, printed to stdout after the terminal is restored
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Summary {
    pub(crate) score: u32,
    pub(crate) length: usize,
    pub(crate) loops: usize,
    pub(crate) elapsed: Duration,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "######################## Game Over! #############################"
        )?;
        writeln!(f, "Score: {:010}", self.score)?;
        writeln!(f, "Snake size: {}", self.length)?;
        writeln!(f, "Time playing: {}", format_elapsed(self.elapsed))?;
        write!(
            f,
            "#################################################################"
        )
    }
}

pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    let (secs, millis) = (ms / 1000, ms % 1000);
    let (mins, secs) = (secs / 60, secs % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    format!("{hours}:{mins:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[derive(Clone, Debug, Eq, PartialEq)]
    enum Drawn {
        Cell(Cell, char),
        Cleared(Cell),
    }

    #[derive(Debug, Default)]
    struct FakeScreen {
        events: Vec<Drawn>,
    }

    impl RenderSink for FakeScreen {
        fn draw_cell(&mut self, cell: Cell, glyph: char) -> io::Result<()> {
            self.events.push(Drawn::Cell(cell, glyph));
            Ok(())
        }

        fn clear_cell(&mut self, cell: Cell) -> io::Result<()> {
            self.events.push(Drawn::Cleared(cell));
            Ok(())
        }
    }

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(
            Grid::new(20, 20),
            &Options::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    #[test]
    fn initial_state() {
        let game = new_game();
        assert_eq!(
            game.snake.body,
            VecDeque::from([Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3)])
        );
        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.score, 0);
        assert_eq!(game.timeout, 500);
        assert_eq!(game.state, State::Running);
        assert!(!game.snake.contains(game.food));
        assert!(!game.grid.is_boundary(game.food));
    }

    #[test]
    fn plain_moves_then_eat() {
        let mut game = new_game();
        game.food = Cell::new(15, 15);
        let mut screen = FakeScreen::default();
        for _ in 0..3 {
            game.tick(None, &mut screen).unwrap();
        }
        assert_eq!(game.snake.head(), Cell::new(5, 8));
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.score, 0);

        game.food = Cell::new(5, 9);
        screen.events.clear();
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.state, State::Running);
        assert_eq!(game.snake.head(), Cell::new(5, 9));
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.score, 1);
        assert_ne!(game.food, Cell::new(5, 9));
        assert!(!game.snake.contains(game.food));
        // Growth tick: the new food and the new head are drawn, nothing is
        // cleared.
        pretty_assertions::assert_eq!(
            screen.events,
            vec![
                Drawn::Cell(game.food, consts::FOOD_SYMBOL),
                Drawn::Cell(Cell::new(5, 9), consts::SNAKE_SYMBOL),
            ]
        );
    }

    #[test]
    fn plain_move_draws_head_and_clears_tail() {
        let mut game = new_game();
        game.food = Cell::new(15, 15);
        let mut screen = FakeScreen::default();
        game.tick(None, &mut screen).unwrap();
        pretty_assertions::assert_eq!(
            screen.events,
            vec![
                Drawn::Cleared(Cell::new(5, 3)),
                Drawn::Cell(Cell::new(5, 6), consts::SNAKE_SYMBOL),
            ]
        );
        assert_eq!(game.snake.len(), 3);
    }

    #[test]
    fn boundary_collision_ends_game_without_moving() {
        let mut game = new_game();
        game.food = Cell::new(15, 15);
        let mut screen = FakeScreen::default();
        game.tick(Some(Command::Up), &mut screen).unwrap();
        for _ in 0..3 {
            game.tick(None, &mut screen).unwrap();
        }
        assert_eq!(game.snake.head(), Cell::new(1, 5));
        assert_eq!(game.state, State::Running);

        screen.events.clear();
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.state, State::Over(Outcome::Boundary));
        // No mutation after the collision is detected
        assert_eq!(game.snake.head(), Cell::new(1, 5));
        assert_eq!(game.snake.len(), 3);
        assert_eq!(screen.events, vec![]);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = new_game();
        game.food = Cell::new(15, 15);
        let mut screen = FakeScreen::default();
        game.tick(Some(Command::Left), &mut screen).unwrap();
        assert_eq!(game.direction, Direction::Right);
        assert_eq!(game.snake.head(), Cell::new(5, 6));
    }

    fn looped_snake() -> Snake {
        // Head pointed right at (5, 5) with the body curling back through
        // (5, 6), so the next step lands on a cell that stays occupied.
        Snake {
            body: VecDeque::from([
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
                Cell::new(6, 6),
            ]),
        }
    }

    #[test]
    fn self_collision_suppressed_during_grace() {
        let mut game = new_game();
        game.snake = looped_snake();
        game.food = Cell::new(15, 15);
        game.ticks = 0;
        let mut screen = FakeScreen::default();
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.state, State::Running);
        assert_eq!(game.snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn self_collision_after_grace() {
        let mut game = new_game();
        game.snake = looped_snake();
        game.food = Cell::new(15, 15);
        game.ticks = game.grace + 1;
        let mut screen = FakeScreen::default();
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.state, State::Over(Outcome::SelfCollision));
        assert_eq!(game.snake.head(), Cell::new(5, 5));
        assert_eq!(game.snake.len(), 5);
        assert_eq!(screen.events, vec![]);
    }

    #[test]
    fn chasing_the_tail_is_survivable() {
        let mut game = new_game();
        // Same curl as looped_snake(), but here (5, 6) is the tail itself,
        // and it vacates on the very tick the head arrives.
        game.snake = Snake {
            body: VecDeque::from([
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
            ]),
        };
        game.food = Cell::new(15, 15);
        game.ticks = game.grace + 1;
        let mut screen = FakeScreen::default();
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.state, State::Running);
        assert_eq!(game.snake.head(), Cell::new(5, 6));
        assert_eq!(game.snake.len(), 4);
        pretty_assertions::assert_eq!(
            screen.events,
            vec![
                Drawn::Cleared(Cell::new(5, 6)),
                Drawn::Cell(Cell::new(5, 6), consts::SNAKE_SYMBOL),
            ]
        );
    }

    #[test]
    fn quit_command_ends_game() {
        let mut game = new_game();
        game.food = Cell::new(15, 15);
        let mut screen = FakeScreen::default();
        game.tick(None, &mut screen).unwrap();
        let head = game.snake.head();
        game.tick(Some(Command::Quit), &mut screen).unwrap();
        assert_eq!(game.state, State::Over(Outcome::UserQuit));
        // State reflects the last completed tick
        assert_eq!(game.snake.head(), head);
        assert_eq!(game.summary(Duration::ZERO).length, 3);
    }

    #[test]
    fn difficulty_steps_on_even_scores_only() {
        let mut game = new_game();
        let mut screen = FakeScreen::default();
        assert_eq!(game.timeout, 500);

        game.food = game.snake.next_head(game.direction);
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.score, 1);
        assert_eq!(game.timeout, 500);

        game.food = game.snake.next_head(game.direction);
        game.tick(None, &mut screen).unwrap();
        assert_eq!(game.score, 2);
        assert_eq!(game.timeout, 495);
    }

    #[test]
    fn speed_up_steps_down_to_floor() {
        assert_eq!(maybe_speed_up(500), 495);
        assert_eq!(maybe_speed_up(15), 10);
        // A step that would undershoot the floor is a no-op
        assert_eq!(maybe_speed_up(14), 14);
        assert_eq!(maybe_speed_up(10), 10);
    }

    #[test]
    fn speed_up_is_monotone_and_floored() {
        let mut timeout = consts::INITIAL_TIMEOUT_MS;
        for _ in 0..200 {
            let next = maybe_speed_up(timeout);
            assert!(next <= timeout, "timeout increased: {timeout} -> {next}");
            assert!(next >= consts::MIN_TIMEOUT_MS, "timeout below floor: {next}");
            timeout = next;
        }
        assert_eq!(timeout, consts::MIN_TIMEOUT_MS);
    }

    #[test]
    fn food_never_lands_on_snake() {
        let grid = Grid::new(12, 12);
        let snake = Snake::new(Cell::new(6, 10), Direction::Right, 9);
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..500 {
            let cell = sample_food_cell(grid, &snake, &mut rng);
            assert!(!snake.contains(cell), "food placed on the snake: {cell}");
            assert!(!grid.is_boundary(cell), "food placed on the wall: {cell}");
        }
    }

    #[test]
    fn summary_format() {
        let summary = Summary {
            score: 123,
            length: 7,
            loops: 4,
            elapsed: Duration::from_millis(102_512),
        };
        pretty_assertions::assert_eq!(
            summary.to_string(),
            "\
######################## Game Over! #############################
Score: 0000000123
Snake size: 7
Time playing: 0:01:42.512
#################################################################"
        );
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(Duration::ZERO), "0:00:00.000");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "0:00:59.999");
        assert_eq!(format_elapsed(Duration::from_secs(3_600)), "1:00:00.000");
        assert_eq!(
            format_elapsed(Duration::from_millis(7_515_042)),
            "2:05:15.042"
        );
    }
}
