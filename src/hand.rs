//! Player and dealer hands, and blackjack scoring.

use alloc::vec::Vec;

use crate::card::Card;

/// Highest total that does not bust.
pub const BLACKJACK: u32 = 21;

fn card_value(rank: u8) -> u32 {
    match rank {
        1 => 11,
        2..=10 => u32::from(rank),
        11..=13 => 10,
        _ => 0,
    }
}

fn evaluate_cards(cards: &[Card]) -> (u32, bool) {
    let mut value: u32 = 0;
    let mut aces: u32 = 0;

    for card in cards {
        if card.is_ace() {
            aces = aces.saturating_add(1);
        }
        value = value.saturating_add(card_value(card.rank));
    }

    // Downgrade soft aces one at a time.
    while value > BLACKJACK && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= BLACKJACK;
    (value, is_soft)
}

/// Computes the blackjack total of `cards`.
///
/// Aces count 11 and are downgraded to 1 one at a time while the total is
/// over 21. The result may exceed 21 when no ace is left to downgrade.
///
/// ```
/// use bjsolo::{Card, Suit, score};
///
/// let hand = [Card::new(Suit::Spades, 1), Card::new(Suit::Hearts, 13)];
/// assert_eq!(score(&hand), 21);
/// ```
#[must_use]
pub fn score(cards: &[Card]) -> u32 {
    evaluate_cards(cards).0
}

/// Returns whether `cards` count at least one ace as 11.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// A player's hand and the wager riding on it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    cards: Vec<Card>,
    bet: usize,
}

impl Hand {
    /// Creates a new empty hand with the given wager.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
        }
    }

    /// Creates a hand holding one card of a split pair.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            bet,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the wager for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Doubles the wager.
    pub const fn double_bet(&mut self) {
        self.bet = self.bet.saturating_mul(2);
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u32 {
        score(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Returns whether the hand is a pair that can be split.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The dealer's hand.
///
/// The first card dealt is the hole card; it stays hidden until the dealer
/// plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand, hole card included.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the cards as the table sees them: the hole card is `None`
    /// until revealed.
    #[must_use]
    pub fn visible_cards(&self) -> Vec<Option<Card>> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, &card)| (i > 0 || self.hole_revealed).then_some(card))
            .collect()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Returns the score once the hole card is revealed.
    #[must_use]
    pub fn visible_value(&self) -> Option<u32> {
        self.hole_revealed.then(|| self.value())
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u32 {
        score(&self.cards)
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
