#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Resolve the direction to move in this tick.  `requested` is adopted
    /// unless no key arrived or it would steer the snake straight back into
    /// its own neck, in which case the snake keeps going the way it was
    /// already going.
    pub(crate) fn steer(self, requested: Option<Direction>) -> Direction {
        match requested {
            Some(next) if next != self.opposite() => next,
            _ => self,
        }
    }
}
