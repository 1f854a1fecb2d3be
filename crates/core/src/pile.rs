use crate::{BuildStrategy, CardView, IdentToken, Sequence, Suit, TransferData};
use serde::{Deserialize, Serialize};

/// Stable handle into the board's pile arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub(crate) u32);

impl PileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The closed set of pile variants. Per-variant behavior is dispatched by
/// exhaustive matching on this tag.
#[derive(Debug, Clone)]
pub enum PileKind {
    /// Holds at most one card of any kind.
    Cell,
    /// Tableau column with a hidden prefix and a moveable tail run.
    File {
        partition_index: i32,
        available_index: i32,
    },
    /// A file that relocates a completed run to an associated pile.
    FileAutowaste {
        partition_index: i32,
        available_index: i32,
        waste: IdentToken,
        auto_move_threshold: usize,
    },
    Foundation {
        suit: Option<Suit>,
    },
    /// Deals a fixed amount to one associated destination, with bounded or
    /// unlimited restocks.
    Stock {
        dest: Option<IdentToken>,
        flip_amount: usize,
        total_restock: Option<u32>,
        restock_count: u32,
    },
    /// Fans a fixed per-destination count out to several destinations.
    StockDealer {
        dests: Vec<IdentToken>,
        deal_count: usize,
    },
    Waste {
        shown_count: usize,
    },
}

#[derive(Debug, Clone)]
pub struct SolitairePile {
    pub(crate) cards: Sequence,
    initial_count: usize,
    strategy: BuildStrategy,
    pub(crate) kind: PileKind,
}

impl SolitairePile {
    pub(crate) fn new(kind: PileKind, strategy: BuildStrategy, initial_count: usize) -> Self {
        Self {
            cards: Sequence::new(),
            initial_count,
            strategy,
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards this pile receives before its build rules take effect.
    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    pub fn strategy(&self) -> &BuildStrategy {
        &self.strategy
    }

    pub fn kind(&self) -> &PileKind {
        &self.kind
    }

    /// Index of the first face-up card; `-1` on an empty waste. Dealer piles
    /// hide everything, so theirs sits at `len`.
    pub fn partition_index(&self) -> i32 {
        match &self.kind {
            PileKind::Cell | PileKind::Foundation { .. } => 0,
            PileKind::File {
                partition_index, ..
            }
            | PileKind::FileAutowaste {
                partition_index, ..
            } => *partition_index,
            PileKind::Stock { .. } | PileKind::StockDealer { .. } => self.len() as i32,
            PileKind::Waste { shown_count } => {
                if self.is_empty() {
                    -1
                } else {
                    (self.len() as i32 - *shown_count as i32).max(0)
                }
            }
        }
    }

    /// Index of the first card eligible for outward transfer; `-1` when
    /// nothing is.
    pub fn available_index(&self) -> i32 {
        match &self.kind {
            PileKind::File {
                available_index, ..
            }
            | PileKind::FileAutowaste {
                available_index, ..
            } => *available_index,
            PileKind::Cell
            | PileKind::Foundation { .. }
            | PileKind::Stock { .. }
            | PileKind::StockDealer { .. }
            | PileKind::Waste { .. } => self.len() as i32 - 1,
        }
    }

    /// Whether the pile has a capacity notion.
    pub fn fillable(&self) -> bool {
        matches!(self.kind, PileKind::Cell | PileKind::Foundation { .. })
    }

    /// Whether the pile looks forward to holding no cards.
    pub fn clearable(&self) -> bool {
        matches!(
            self.kind,
            PileKind::Stock { .. } | PileKind::StockDealer { .. } | PileKind::Waste { .. }
        )
    }

    pub fn is_foundation(&self) -> bool {
        matches!(self.kind, PileKind::Foundation { .. })
    }

    pub fn is_dealer(&self) -> bool {
        matches!(self.kind, PileKind::Stock { .. } | PileKind::StockDealer { .. })
    }

    /// Card at `index` as the rest of the game may see it: hidden below the
    /// partition, `Empty` only at index 0 of an empty pile.
    pub fn get_card(&self, index: usize) -> CardView {
        if self.is_empty() && index == 0 {
            return CardView::Empty;
        }
        if index >= self.len() {
            return CardView::OutOfRange;
        }
        if (index as i32) < self.partition_index() {
            return CardView::FaceDown;
        }
        match self.cards.get(index) {
            Some(card) => CardView::Up(card),
            None => CardView::OutOfRange,
        }
    }

    /// Card at `index` with real data regardless of facing. Run
    /// re-evaluation needs to read through the partition.
    pub(crate) fn force_get_card(&self, index: usize) -> CardView {
        match self.cards.get(index) {
            Some(card) => CardView::Up(card),
            None => self.get_card(index),
        }
    }

    pub fn top_card(&self) -> CardView {
        if self.is_empty() {
            self.get_card(0)
        } else {
            self.get_card(self.len() - 1)
        }
    }

    /// Pile-level gate for an incoming transfer. The default is the build
    /// strategy against the current top; capacity-one piles add their own
    /// constraints.
    pub(crate) fn allow_transfer(&self, data: &TransferData) -> bool {
        let builds = self.strategy.can_pile(self.top_card(), data.first);
        match &self.kind {
            PileKind::Cell => data.count == 1 && self.is_empty() && builds,
            PileKind::Foundation { .. } => data.count == 1 && builds,
            _ => builds,
        }
    }

    /// Walks downward from `start` while consecutive cards keep satisfying
    /// the build strategy, stopping at the partition or the first break.
    /// Re-derives the length of the currently moveable run.
    pub fn evaluate_available_index(&self, start: i32) -> i32 {
        let mut index = start;
        while index > self.partition_index() && index > 0 {
            let rear = self.force_get_card(index as usize - 1);
            let Some(front) = self.force_get_card(index as usize).card() else {
                break;
            };
            if !self.strategy.can_pile(rear, front) {
                break;
            }
            index -= 1;
        }
        index
    }

    /// Whether the restock allowance is spent. Piles that never restock are
    /// always out of stock.
    pub fn out_of_stock(&self) -> bool {
        match &self.kind {
            PileKind::Stock {
                total_restock,
                restock_count,
                ..
            } => total_restock.map_or(false, |total| *restock_count >= total),
            _ => true,
        }
    }

    pub fn restock_count(&self) -> u32 {
        match &self.kind {
            PileKind::Stock { restock_count, .. } => *restock_count,
            _ => 0,
        }
    }

    pub(crate) fn set_partition_index(&mut self, to: i32) {
        match &mut self.kind {
            PileKind::File {
                partition_index, ..
            }
            | PileKind::FileAutowaste {
                partition_index, ..
            } => *partition_index = to,
            _ => {}
        }
    }

    pub(crate) fn set_available_index(&mut self, to: i32) {
        match &mut self.kind {
            PileKind::File {
                available_index, ..
            }
            | PileKind::FileAutowaste {
                available_index, ..
            } => *available_index = to,
            _ => {}
        }
    }

    pub(crate) fn adjust_restock_count(&mut self, delta: i32) {
        if let PileKind::Stock { restock_count, .. } = &mut self.kind {
            *restock_count = restock_count.saturating_add_signed(delta);
        }
    }
}
