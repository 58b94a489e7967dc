//! An unbounded, lazily grown tape over the integers.

use crate::types::{Symbol, BLANK};

/// A tape that is blank everywhere except the cells that have been written.
///
/// Non-negative positions live in `fwd`, negative positions in `bwd` indexed by
/// `-position - 1`. Both sides grow on write and are zero-filled, so any position
/// that was never written reads as [`BLANK`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tape {
    fwd: Vec<Symbol>,
    bwd: Vec<Symbol>,
}

impl Tape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol at `position`.
    pub fn read(&self, position: i64) -> Symbol {
        let (side, index) = self.locate(position);
        side.get(index).copied().unwrap_or(BLANK)
    }

    /// Writes `symbol` at `position`, growing the tape if needed.
    pub fn write(&mut self, position: i64, symbol: Symbol) {
        let (side, index) = if position >= 0 {
            (&mut self.fwd, position as usize)
        } else {
            (&mut self.bwd, (-(position + 1)) as usize)
        };

        if side.len() <= index {
            side.resize(index + 1, BLANK);
        }
        side[index] = symbol;
    }

    /// Checks whether every materialised cell holds the blank symbol.
    pub fn is_blank(&self) -> bool {
        self.fwd.iter().chain(self.bwd.iter()).all(|&s| s == BLANK)
    }

    /// Number of cells materialised on both sides.
    pub fn len(&self) -> usize {
        self.fwd.len() + self.bwd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locate(&self, position: i64) -> (&[Symbol], usize) {
        if position >= 0 {
            (self.fwd.as_slice(), position as usize)
        } else {
            (self.bwd.as_slice(), (-(position + 1)) as usize)
        }
    }
}
