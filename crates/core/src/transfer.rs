use crate::{Card, Move, PileId};

/// Everything needed to perform one proposed transfer: where the slice comes
/// from, its leading card and length, and the bookkeeping moves collected
/// along the way.
///
/// Built by the source's peek, then extended by the source's extraction hook
/// and the destination's addition hook. Hooks only ever append actions; the
/// descriptor itself never touches pile state, so a rejected transfer has no
/// observable effect.
#[derive(Debug)]
pub struct TransferData {
    pub source: PileId,
    /// Leading card of the candidate slice.
    pub first: Card,
    pub count: usize,
    /// Side-effect moves, run after the primary mutation in order, undone in
    /// reverse.
    pub actions: Vec<Move>,
}

impl TransferData {
    pub fn new(source: PileId, first: Card, count: usize) -> Self {
        Self {
            source,
            first,
            count,
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: Move) {
        self.actions.push(action);
    }
}
