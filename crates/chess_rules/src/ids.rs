//! Piece identity generation
//!
//! Ids are produced by an injected [`IdGenerator`] so that tests and replays
//! can supply deterministic ids while live play uses random UUIDs.

use crate::types::PieceId;
use uuid::Uuid;

/// Source of fresh piece ids
pub trait IdGenerator {
    fn next_id(&mut self) -> PieceId;
}

/// Random v4 UUID ids, used in live play
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> PieceId {
        PieceId(Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic `<prefix><n>` ids
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("p")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> PieceId {
        let id = PieceId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
