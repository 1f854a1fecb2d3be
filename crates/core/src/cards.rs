use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn is_red(self) -> bool {
        self.color() == Color::Red
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const COUNT: i8 = 13;

    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Ace is 1, King is 13.
    pub fn value(self) -> i8 {
        self as i8 + 1
    }

    /// Cyclic distance from `self` up to `front`, in 0..13.
    pub fn gap_to(self, front: Rank) -> i8 {
        (front.value() - self.value()).rem_euclid(Self::COUNT)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn color(self) -> Color {
        self.suit.color()
    }
}

/// What a pile query yields. A real card only ever appears as `Up`, so the
/// distinguished non-values can never be mistaken for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    /// Query at index 0 of an empty pile.
    Empty,
    /// The card exists but its data is hidden.
    FaceDown,
    /// Query past the end of the pile.
    OutOfRange,
    Up(Card),
}

impl CardView {
    pub fn card(self) -> Option<Card> {
        match self {
            CardView::Up(card) => Some(card),
            _ => None,
        }
    }

    pub fn is_up(self) -> bool {
        matches!(self, CardView::Up(_))
    }
}
