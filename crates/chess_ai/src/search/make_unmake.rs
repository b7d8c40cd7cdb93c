//! Scoped move application for search
//!
//! [`MoveGuard`] applies a move on construction and undoes it when dropped,
//! so every exit path of a search node (normal return, cutoff, `?`) restores
//! the position in LIFO order.

use crate::error::ChessEngineResult;
use crate::rules::RulesEngine;
use crate::types::ChessMove;
use std::ops::{Deref, DerefMut};
use tracing::error;

/// A move applied to a position for the lifetime of the guard
pub struct MoveGuard<'a, R: RulesEngine + ?Sized> {
    rules: &'a mut R,
    mv: ChessMove,
}

impl<'a, R: RulesEngine + ?Sized> MoveGuard<'a, R> {
    /// Apply `mv` and return a guard that reverts it on drop
    ///
    /// # Errors
    ///
    /// Propagates the rules engine's rejection of an illegal move; nothing
    /// is applied in that case.
    pub fn apply(rules: &'a mut R, mv: &ChessMove) -> ChessEngineResult<Self> {
        rules.apply_move(mv)?;
        Ok(Self { rules, mv: *mv })
    }

    /// The move this guard applied
    pub fn applied(&self) -> &ChessMove {
        &self.mv
    }
}

impl<R: RulesEngine + ?Sized> Deref for MoveGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: RulesEngine + ?Sized> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: RulesEngine + ?Sized> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        let result = self.rules.undo_move();
        if let Err(e) = &result {
            error!(mv = %self.mv, error = %e, "undo failed; position history is out of sync");
        }
        debug_assert!(result.is_ok(), "undo of {} failed", self.mv);
    }
}
