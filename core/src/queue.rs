use serde::{Deserialize, Serialize};

use crate::*;

/// Number of pending pieces offered at once.
pub const QUEUE_SLOTS: usize = 3;

/// The ready queue: three slots, refilled only as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceQueue {
    slots: [Option<Piece>; QUEUE_SLOTS],
}

impl PieceQueue {
    /// A full queue of freshly drawn pieces.
    pub fn drawn<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut queue = Self::default();
        queue.refill(rng);
        queue
    }

    pub fn from_slots(slots: [Option<Piece>; QUEUE_SLOTS]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<Piece>; QUEUE_SLOTS] {
        &self.slots
    }

    /// Piece in `slot`, or `None` if the slot is empty or out of range.
    pub fn get(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn piece(&self, slot: usize) -> Result<&Piece> {
        self.get(slot).ok_or(GameError::InvalidQueueIndex)
    }

    /// Non-empty slots with their index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, piece)| piece.as_ref().map(|piece| (slot, piece)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|piece| piece.is_some()).count()
    }

    /// All slots are empty.
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_empty(&self) -> bool {
        self.is_exhausted()
    }

    /// Empties `slot` and returns its piece.
    pub fn take(&mut self, slot: usize) -> Result<Piece> {
        self.slots
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or(GameError::InvalidQueueIndex)
    }

    /// Rotates the piece in `slot` a quarter turn clockwise.
    pub fn rotate(&mut self, slot: usize) -> Result<()> {
        let piece = self
            .slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or(GameError::InvalidQueueIndex)?;
        piece.shape = piece.shape.rotated();
        Ok(())
    }

    /// Replaces every slot with a new piece, discarding whatever was there.
    pub fn refill<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for slot in &mut self.slots {
            *slot = Some(draw_piece(rng));
        }
    }

    /// Refills only when every slot is empty. Returns whether a refill happened.
    pub fn refill_if_exhausted<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.is_exhausted() {
            return false;
        }
        self.refill(rng);
        true
    }
}
