use crate::{Card, CardView, Rank, Suit};
use serde::{Deserialize, Serialize};

/// Rank-side constraints of a build. `None` fields are unconstrained.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildSetting {
    /// Rank admitted onto an empty pile.
    #[serde(default)]
    pub initial_rank: Option<Rank>,
    /// Signed rank step between a card and the one placed on it.
    #[serde(default)]
    pub rank_gap: Option<i8>,
    /// Whether the step may wrap around the King/Ace boundary.
    #[serde(default)]
    pub allow_wrapping: bool,
}

impl BuildSetting {
    /// Any rank, any order.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build down by one, no wrapping. The usual tableau setting.
    pub fn descending() -> Self {
        Self {
            initial_rank: None,
            rank_gap: Some(-1),
            allow_wrapping: false,
        }
    }

    /// Build up by one from a fixed starting rank. The usual foundation
    /// setting.
    pub fn ascending_from(rank: Rank) -> Self {
        Self {
            initial_rank: Some(rank),
            rank_gap: Some(1),
            allow_wrapping: false,
        }
    }

    fn admits_first(self, front: Rank) -> bool {
        self.initial_rank.map_or(true, |rank| rank == front)
    }

    fn admits_step(self, rear: Rank, front: Rank) -> bool {
        let Some(gap) = self.rank_gap else {
            return true;
        };
        if self.allow_wrapping {
            rear.gap_to(front) == gap.rem_euclid(Rank::COUNT)
        } else {
            front.value() - rear.value() == gap
        }
    }
}

/// Suit-side constraint layered over the rank rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SuitRule {
    Any,
    /// No building at all.
    Forbidden,
    /// All cards share one suit; `anchor` fixes the suit the first card must
    /// have, if any.
    SameSuit { anchor: Option<Suit> },
    SameColor,
    AlternatingColor,
    DifferentSuit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildStrategy {
    pub setting: BuildSetting,
    pub suits: SuitRule,
}

impl BuildStrategy {
    pub fn any() -> Self {
        Self {
            setting: BuildSetting::any(),
            suits: SuitRule::Any,
        }
    }

    pub fn no_build() -> Self {
        Self {
            setting: BuildSetting::any(),
            suits: SuitRule::Forbidden,
        }
    }

    pub fn same_suit(setting: BuildSetting, anchor: Option<Suit>) -> Self {
        Self {
            setting,
            suits: SuitRule::SameSuit { anchor },
        }
    }

    pub fn same_color(setting: BuildSetting) -> Self {
        Self {
            setting,
            suits: SuitRule::SameColor,
        }
    }

    pub fn alternating_color(setting: BuildSetting) -> Self {
        Self {
            setting,
            suits: SuitRule::AlternatingColor,
        }
    }

    pub fn different_suit(setting: BuildSetting) -> Self {
        Self {
            setting,
            suits: SuitRule::DifferentSuit,
        }
    }

    /// Whether `front` may be stacked on `rear`. `rear` may legitimately be
    /// `Empty`; a hidden or out-of-range rear never accepts.
    pub fn can_pile(&self, rear: CardView, front: Card) -> bool {
        if matches!(self.suits, SuitRule::Forbidden) {
            return false;
        }
        match rear {
            CardView::FaceDown | CardView::OutOfRange => false,
            CardView::Empty => {
                let anchor_ok = match self.suits {
                    SuitRule::SameSuit { anchor } => anchor.map_or(true, |suit| suit == front.suit),
                    _ => true,
                };
                anchor_ok && self.setting.admits_first(front.rank)
            }
            CardView::Up(rear) => {
                self.suit_allows(rear, front) && self.setting.admits_step(rear.rank, front.rank)
            }
        }
    }

    fn suit_allows(&self, rear: Card, front: Card) -> bool {
        match self.suits {
            SuitRule::Any | SuitRule::Forbidden => true,
            SuitRule::SameSuit { .. } => rear.suit == front.suit,
            SuitRule::SameColor => rear.color() == front.color(),
            SuitRule::AlternatingColor => rear.color() != front.color(),
            SuitRule::DifferentSuit => rear.suit != front.suit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up(suit: Suit, rank: Rank) -> CardView {
        CardView::Up(Card::new(suit, rank))
    }

    #[test]
    fn descending_rejects_wrap_without_wrapping() {
        let strategy = BuildStrategy {
            setting: BuildSetting::descending(),
            suits: SuitRule::Any,
        };
        assert!(strategy.can_pile(up(Suit::Hearts, Rank::Five), Card::new(Suit::Clubs, Rank::Four)));
        assert!(!strategy.can_pile(up(Suit::Hearts, Rank::Ace), Card::new(Suit::Clubs, Rank::King)));
    }

    #[test]
    fn descending_wraps_when_enabled() {
        let strategy = BuildStrategy {
            setting: BuildSetting {
                allow_wrapping: true,
                ..BuildSetting::descending()
            },
            suits: SuitRule::Any,
        };
        assert!(strategy.can_pile(up(Suit::Hearts, Rank::Ace), Card::new(Suit::Clubs, Rank::King)));
    }

    #[test]
    fn hidden_rear_never_accepts() {
        let strategy = BuildStrategy::any();
        assert!(!strategy.can_pile(CardView::FaceDown, Card::new(Suit::Clubs, Rank::Four)));
        assert!(!strategy.can_pile(CardView::OutOfRange, Card::new(Suit::Clubs, Rank::Four)));
    }

    #[test]
    fn same_suit_anchor_gates_empty_pile() {
        let strategy = BuildStrategy::same_suit(BuildSetting::any(), Some(Suit::Spades));
        assert!(strategy.can_pile(CardView::Empty, Card::new(Suit::Spades, Rank::Nine)));
        assert!(!strategy.can_pile(CardView::Empty, Card::new(Suit::Hearts, Rank::Nine)));
    }
}
