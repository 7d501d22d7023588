use super::cell::Cell;
use super::direction::Direction;
use std::collections::VecDeque;

/// Snake state: an ordered sequence of cells, head first.
///
/// The body is never empty; construction requires at least one part and every
/// tick that removes the tail first prepends a head.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake `num_parts` cells long with its head at `head` and the
    /// rest of the body trailing behind it, opposite to `direction`.
    pub(crate) fn new(head: Cell, direction: Direction, num_parts: usize) -> Snake {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |&c| Some(c.step(back)))
            .take(num_parts.max(1))
            .collect();
        Snake { body }
    }

    pub(crate) fn head(&self) -> Cell {
        *self.body.front().expect("snake body should never be empty")
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// The cell the head will occupy after a step in `direction`
    pub(crate) fn next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Prepend the cell ahead of the head and return it.  The caller decides
    /// whether to also pop the tail (plain movement) or keep it (growth).
    pub(crate) fn advance(&mut self, direction: Direction) -> Cell {
        let head = self.next_head(direction);
        self.body.push_front(head);
        head
    }

    pub(crate) fn pop_tail(&mut self) -> Cell {
        self.body.pop_back().expect("snake body should never be empty")
    }

    /// Would moving the head to `next_head` land it on a body cell that is
    /// still occupied after the move?
    ///
    /// The current head is skipped (a unit step can never coincide with it),
    /// and so is the tail, which vacates its cell on the same tick the head
    /// arrives: chasing the tail at one cell's distance is survivable.  On a
    /// growth tick the tail stays put, but then the new head is on the food
    /// cell, which is never placed on the body.
    pub(crate) fn is_self_collision(&self, next_head: Cell) -> bool {
        let interior = self.body.len().saturating_sub(1);
        self.body
            .iter()
            .take(interior)
            .skip(1)
            .any(|&c| c == next_head)
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}
