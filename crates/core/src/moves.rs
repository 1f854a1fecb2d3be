use crate::{Board, PileId};

/// A reversible unit of change over the board. Undo is derived from the
/// command's own data: index commands swap their endpoints, counter commands
/// negate their delta, composite commands run their parts backwards.
#[derive(Debug, Clone)]
pub enum Move {
    /// Extract `count` cards from `source`, append them to `dest`, then run
    /// the nested actions.
    Transfer {
        source: PileId,
        dest: PileId,
        count: usize,
        actions: Vec<Move>,
    },
    /// Same, but the slice is reversed before it lands. Used when source and
    /// destination iterate in opposite orders, e.g. dealing from a shuffled
    /// tail into a pile built bottom-up.
    ReversedTransfer {
        source: PileId,
        dest: PileId,
        count: usize,
        actions: Vec<Move>,
    },
    /// A batch of independent single-card transfers, one per destination per
    /// round, built eagerly at construction time.
    Distribute { moves: Vec<Move> },
    /// One reversed transfer per destination, each sized to that
    /// destination's initial count, all drawing from one shared source.
    InitialFill { moves: Vec<Move> },
    SetPartitionIndex { pile: PileId, from: i32, to: i32 },
    SetAvailableIndex { pile: PileId, from: i32, to: i32 },
    AdjustRestockCount { pile: PileId, delta: i32 },
}

impl Move {
    pub fn execute(&self, board: &mut Board) {
        match self {
            Move::Transfer {
                source,
                dest,
                count,
                actions,
            } => {
                let cards = board.pile_mut(*source).cards.extract(*count);
                board.pile_mut(*dest).cards.add(cards);
                for action in actions {
                    action.execute(board);
                }
            }
            Move::ReversedTransfer {
                source,
                dest,
                count,
                actions,
            } => {
                let mut cards = board.pile_mut(*source).cards.extract(*count);
                cards.reverse();
                board.pile_mut(*dest).cards.add(cards);
                for action in actions {
                    action.execute(board);
                }
            }
            Move::Distribute { moves } | Move::InitialFill { moves } => {
                for nested in moves {
                    nested.execute(board);
                }
            }
            Move::SetPartitionIndex { pile, to, .. } => {
                board.pile_mut(*pile).set_partition_index(*to);
            }
            Move::SetAvailableIndex { pile, to, .. } => {
                board.pile_mut(*pile).set_available_index(*to);
            }
            Move::AdjustRestockCount { pile, delta } => {
                board.pile_mut(*pile).adjust_restock_count(*delta);
            }
        }
    }

    /// Exact inverse of [`Move::execute`]. Nested actions unwind strictly
    /// before the primary mutation is reversed, composite parts in reverse
    /// construction order.
    pub fn undo(&self, board: &mut Board) {
        match self {
            Move::Transfer {
                source,
                dest,
                count,
                actions,
            } => {
                for action in actions.iter().rev() {
                    action.undo(board);
                }
                let cards = board.pile_mut(*dest).cards.extract(*count);
                board.pile_mut(*source).cards.add(cards);
            }
            Move::ReversedTransfer {
                source,
                dest,
                count,
                actions,
            } => {
                for action in actions.iter().rev() {
                    action.undo(board);
                }
                let mut cards = board.pile_mut(*dest).cards.extract(*count);
                cards.reverse();
                board.pile_mut(*source).cards.add(cards);
            }
            Move::Distribute { moves } | Move::InitialFill { moves } => {
                for nested in moves.iter().rev() {
                    nested.undo(board);
                }
            }
            Move::SetPartitionIndex { pile, from, .. } => {
                board.pile_mut(*pile).set_partition_index(*from);
            }
            Move::SetAvailableIndex { pile, from, .. } => {
                board.pile_mut(*pile).set_available_index(*from);
            }
            Move::AdjustRestockCount { pile, delta } => {
                board.pile_mut(*pile).adjust_restock_count(-delta);
            }
        }
    }
}

/// A move plus an integer weight for the session's statistics: 0 for
/// auxiliary bookkeeping, 1 for a meaningful play. The weight never changes
/// execution semantics.
#[derive(Debug, Clone)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: u32,
}

impl ScoredMove {
    pub fn new(mv: Move, score: u32) -> Self {
        Self { mv, score }
    }

    pub fn auxiliary(mv: Move) -> Self {
        Self::new(mv, 0)
    }

    pub fn meaningful(mv: Move) -> Self {
        Self::new(mv, 1)
    }

    pub fn execute(&self, board: &mut Board) {
        self.mv.execute(board);
    }

    pub fn undo(&self, board: &mut Board) {
        self.mv.undo(board);
    }
}
