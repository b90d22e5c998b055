//! Generation-stamped memo slots for per-piece move data
//!
//! A piece remembers its capturing positions and possible moves together with
//! the board generation, origin and context they were computed for. Any board
//! write produces a new generation, so a stale entry is simply never matched.

use crate::moves::Move;
use crate::types::Position;
use std::cell::RefCell;

#[derive(Debug)]
struct Stamped<T> {
    generation: u64,
    origin: Position,
    context: u64,
    value: T,
}

impl<T: Clone> Stamped<T> {
    fn get(&self, generation: u64, origin: Position, context: u64) -> Option<T> {
        (self.generation == generation && self.origin == origin && self.context == context)
            .then(|| self.value.clone())
    }
}

/// Memoized capturing positions and possible moves of one piece
#[derive(Debug, Default)]
pub struct MoveCache {
    capturing: RefCell<Option<Stamped<Vec<Position>>>>,
    possible: RefCell<Option<Stamped<Vec<Move>>>>,
}

impl MoveCache {
    pub fn capturing_or_insert_with(
        &self,
        generation: u64,
        origin: Position,
        compute: impl FnOnce() -> Vec<Position>,
    ) -> Vec<Position> {
        if let Some(hit) = self
            .capturing
            .borrow()
            .as_ref()
            .and_then(|entry| entry.get(generation, origin, 0))
        {
            return hit;
        }
        let value = compute();
        *self.capturing.borrow_mut() = Some(Stamped {
            generation,
            origin,
            context: 0,
            value: value.clone(),
        });
        value
    }

    pub fn possible_or_insert_with(
        &self,
        generation: u64,
        origin: Position,
        context: u64,
        compute: impl FnOnce() -> Vec<Move>,
    ) -> Vec<Move> {
        if let Some(hit) = self
            .possible
            .borrow()
            .as_ref()
            .and_then(|entry| entry.get(generation, origin, context))
        {
            return hit;
        }
        let value = compute();
        *self.possible.borrow_mut() = Some(Stamped {
            generation,
            origin,
            context,
            value: value.clone(),
        });
        value
    }

    pub fn clear(&self) {
        self.capturing.borrow_mut().take();
        self.possible.borrow_mut().take();
    }

    pub fn is_empty(&self) -> bool {
        self.capturing.borrow().is_none() && self.possible.borrow().is_none()
    }
}

// A copied piece lands on a different board; it starts cold.
impl Clone for MoveCache {
    fn clone(&self) -> Self {
        Self::default()
    }
}
