//! A single 52-card deck.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::DeckError;

/// An ordered deck of cards. Cards are drawn from the top (the end of the
/// internal vector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds every rank and suit combination in construction order, unshuffled.
    #[must_use]
    pub fn ordered() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for suit in Suit::ALL {
            for rank in 1..=13 {
                cards.push(Card::new(suit, rank));
            }
        }

        Self { cards }
    }

    /// Creates a full deck and applies a uniform Fisher-Yates permutation.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::Deck;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let deck = Deck::shuffled(&mut rng);
    /// assert_eq!(deck.len(), 52);
    /// ```
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        // Walks from the last index down, swapping with a uniform index in [0, i].
        deck.cards.shuffle(rng);
        deck
    }

    /// Creates a deck that yields `draws` in order: `draws[0]` is drawn first.
    ///
    /// Useful for replaying a recorded round.
    #[must_use]
    pub fn from_draws(draws: &[Card]) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self { cards }
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Empty)?;
        log::trace!("drew {card}, {} left", self.cards.len());
        Ok(card)
    }

    /// Returns the remaining cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
