use crate::{
    Card, EventBus, IdentToken, Move, PileId, PileKind, SolitairePile, TransferData,
};
use log::{debug, trace};
use std::collections::HashMap;

/// Arena of piles plus the association table that resolves tokens to
/// handles. All transactional operations are probes: they return a [`Move`]
/// (or `None`) and change no state until that move is executed.
#[derive(Debug, Default)]
pub struct Board {
    piles: Vec<SolitairePile>,
    associations: HashMap<IdentToken, PileId>,
    pub events: EventBus,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pile(&mut self, pile: SolitairePile) -> PileId {
        let id = PileId(self.piles.len() as u32);
        self.piles.push(pile);
        id
    }

    /// Registers a token in the resolution table. Assembly-time only: all
    /// piles exist before any token is resolved, which is what lets mutually
    /// referencing piles be built in any order.
    pub fn register(&mut self, token: IdentToken, pile: PileId) {
        self.associations.insert(token, pile);
    }

    /// `None` if the token was never registered on this board.
    pub fn resolve(&self, token: &IdentToken) -> Option<PileId> {
        self.associations.get(token).copied()
    }

    pub fn pile(&self, id: PileId) -> &SolitairePile {
        &self.piles[id.index()]
    }

    pub(crate) fn pile_mut(&mut self, id: PileId) -> &mut SolitairePile {
        &mut self.piles[id.index()]
    }

    pub fn pile_count(&self) -> usize {
        self.piles.len()
    }

    pub fn piles(&self) -> impl Iterator<Item = (PileId, &SolitairePile)> {
        self.piles
            .iter()
            .enumerate()
            .map(|(index, pile)| (PileId(index as u32), pile))
    }

    pub fn card_count(&self) -> usize {
        self.piles.iter().map(|pile| pile.len()).sum()
    }

    /// Proposes moving the top `count` cards of `source` onto `dest`,
    /// gated by the source's availability and the destination's rules.
    ///
    /// Returns `None` whenever the transfer is not currently possible.
    pub fn create_transfer(&self, source: PileId, dest: PileId, count: usize) -> Option<Move> {
        let data = self.prepare_transfer(source, dest, count)?;
        if !self.pile(dest).allow_transfer(&data) {
            trace!(
                "transfer of {count} from pile {} to pile {} rejected by destination",
                source.index(),
                dest.index()
            );
            return None;
        }
        Some(Move::Transfer {
            source,
            dest,
            count,
            actions: data.actions,
        })
    }

    /// Like [`Board::create_transfer`], but the destination's build gate is
    /// not consulted. This is how piles that reject normal builds (a waste,
    /// or a foundation receiving a completed run) are filled; source-side
    /// bookkeeping still applies.
    pub fn create_forced_transfer(
        &self,
        source: PileId,
        dest: PileId,
        count: usize,
    ) -> Option<Move> {
        let data = self.prepare_transfer(source, dest, count)?;
        Some(Move::Transfer {
            source,
            dest,
            count,
            actions: data.actions,
        })
    }

    fn prepare_transfer(
        &self,
        source: PileId,
        dest: PileId,
        count: usize,
    ) -> Option<TransferData> {
        if source == dest || count == 0 {
            return None;
        }
        let src = self.pile(source);
        if count > src.len() {
            return None;
        }
        let index = src.len() as i32 - count as i32;
        if index < src.available_index() {
            trace!(
                "transfer of {count} from pile {} blocked below available index",
                source.index()
            );
            return None;
        }
        let first = src.cards.peek(count)[0];
        let mut data = TransferData::new(source, first, count);
        self.on_extraction(source, &mut data);
        self.on_addition(dest, &mut data);
        Some(data)
    }

    /// Source-side hook: when the removed slice touches a tracked boundary,
    /// append the index bookkeeping that commits alongside the transfer.
    fn on_extraction(&self, source: PileId, data: &mut TransferData) {
        let pile = self.pile(source);
        let (partition_index, available_index) = match pile.kind {
            PileKind::File {
                partition_index,
                available_index,
            }
            | PileKind::FileAutowaste {
                partition_index,
                available_index,
                ..
            } => (partition_index, available_index),
            _ => return,
        };
        let boundary = pile.len() as i32 - data.count as i32;
        if available_index == boundary {
            data.add_action(Move::SetAvailableIndex {
                pile: source,
                from: available_index,
                to: pile.evaluate_available_index(available_index - 1),
            });
        }
        if partition_index == boundary {
            data.add_action(Move::SetPartitionIndex {
                pile: source,
                from: partition_index,
                to: partition_index - 1,
            });
        }
    }

    /// Destination-side hook: file variants keep their tracked indices
    /// honest, and an autowaste file chains the relocation of a completed
    /// run into the same transaction.
    fn on_addition(&self, dest: PileId, data: &mut TransferData) {
        let pile = self.pile(dest);
        let (partition_index, available_index) = match pile.kind {
            PileKind::File {
                partition_index,
                available_index,
            }
            | PileKind::FileAutowaste {
                partition_index,
                available_index,
                ..
            } => (partition_index, available_index),
            _ => return,
        };

        if pile.is_empty() {
            if partition_index != 0 {
                data.add_action(Move::SetPartitionIndex {
                    pile: dest,
                    from: partition_index,
                    to: 0,
                });
            }
            if available_index != 0 {
                data.add_action(Move::SetAvailableIndex {
                    pile: dest,
                    from: available_index,
                    to: 0,
                });
            }
        } else if !pile.strategy().can_pile(pile.top_card(), data.first) {
            // A forced addition starts a new run at the incoming card.
            let to = pile.len() as i32;
            if available_index != to {
                data.add_action(Move::SetAvailableIndex {
                    pile: dest,
                    from: available_index,
                    to,
                });
            }
        }

        if let PileKind::FileAutowaste {
            available_index,
            ref waste,
            auto_move_threshold,
            ..
        } = pile.kind
        {
            if pile.len() as i32 - available_index >= auto_move_threshold as i32 {
                if let Some(waste_id) = self.resolve(waste) {
                    if let Some(cascade) =
                        self.create_forced_transfer(dest, waste_id, auto_move_threshold)
                    {
                        debug!(
                            "completed run on pile {} cascades to pile {}",
                            dest.index(),
                            waste_id.index()
                        );
                        data.add_action(cascade);
                    }
                }
            }
        }
    }

    /// Stock: a reversed flip of up to `flip_amount` cards to the associated
    /// destination. StockDealer: one composite batch giving every
    /// destination `deal_count` cards, truncated when the stock runs dry.
    ///
    /// `None` on an empty stock, an unresolved association, or a pile that
    /// does not deal.
    pub fn create_deal_move(&self, stock: PileId) -> Option<Move> {
        let pile = self.pile(stock);
        match &pile.kind {
            PileKind::Stock {
                dest, flip_amount, ..
            } => {
                if pile.is_empty() {
                    return None;
                }
                let dest = self.resolve(dest.as_ref()?)?;
                let count = (*flip_amount).min(pile.len());
                debug!(
                    "dealing {count} from pile {} to pile {}",
                    stock.index(),
                    dest.index()
                );
                Some(Move::ReversedTransfer {
                    source: stock,
                    dest,
                    count,
                    actions: Vec::new(),
                })
            }
            PileKind::StockDealer { dests, deal_count } => {
                if pile.is_empty() {
                    return None;
                }
                let mut resolved = Vec::with_capacity(dests.len());
                for token in dests {
                    resolved.push(self.resolve(token)?);
                }
                let mut remaining = pile.len();
                let mut moves = Vec::new();
                'rounds: for _ in 0..*deal_count {
                    for &dest in &resolved {
                        if remaining == 0 {
                            break 'rounds;
                        }
                        moves.push(Move::Transfer {
                            source: stock,
                            dest,
                            count: 1,
                            actions: Vec::new(),
                        });
                        remaining -= 1;
                    }
                }
                debug!(
                    "distributing {} cards from pile {} over {} piles",
                    moves.len(),
                    stock.index(),
                    resolved.len()
                );
                Some(Move::Distribute { moves })
            }
            _ => None,
        }
    }

    /// Returns the destination's cards to an empty stock, reversed, and
    /// bumps the restock counter through an undoable bookkeeping command.
    ///
    /// `None` while the stock still holds cards, once the allowance is
    /// spent, or for piles that never restock.
    pub fn create_restock_move(&self, stock: PileId) -> Option<Move> {
        let pile = self.pile(stock);
        match &pile.kind {
            PileKind::Stock { dest, .. } => {
                if !pile.is_empty() || pile.out_of_stock() {
                    return None;
                }
                let dest_id = self.resolve(dest.as_ref()?)?;
                let dest_pile = self.pile(dest_id);
                if dest_pile.is_empty() {
                    return None;
                }
                debug!(
                    "restocking pile {} with {} cards from pile {}",
                    stock.index(),
                    dest_pile.len(),
                    dest_id.index()
                );
                Some(Move::ReversedTransfer {
                    source: dest_id,
                    dest: stock,
                    count: dest_pile.len(),
                    actions: vec![Move::AdjustRestockCount {
                        pile: stock,
                        delta: 1,
                    }],
                })
            }
            _ => None,
        }
    }

    /// One-shot deck intake for a dealer pile, straight into storage.
    pub fn receive_deck(&mut self, dealer: PileId, cards: Vec<Card>) {
        debug_assert!(self.pile(dealer).is_dealer());
        self.pile_mut(dealer).cards.add(cards);
    }

    /// The opening deal: every destination draws its initial count from the
    /// shared dealer, in sequence, reversed so a shuffled tail lands
    /// bottom-up. Undo runs in reverse construction order.
    pub fn create_initial_deal(&self, dealer: PileId, destinations: &[PileId]) -> Move {
        let moves = destinations
            .iter()
            .map(|&dest| Move::ReversedTransfer {
                source: dealer,
                dest,
                count: self.pile(dest).initial_count(),
                actions: Vec::new(),
            })
            .collect();
        Move::InitialFill { moves }
    }
}
