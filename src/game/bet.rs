use crate::deck::Deck;
use crate::error::BetError;
use crate::event::{Event, Seat};
use crate::hand::{DealerHand, Hand};
use crate::ledger::KeyValueStore;
use crate::options::BetPreset;

use super::{RoundEngine, RoundState};

/// Cards drawn by the opening deal.
const INITIAL_DEAL: usize = 4;

impl<S: KeyValueStore> RoundEngine<S> {
    fn check_bet(&self, amount: usize) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        if self.state != RoundState::Betting {
            return Err(BetError::InvalidState);
        }

        if amount > self.ledger.balance {
            return Err(BetError::InsufficientFunds);
        }

        Ok(())
    }

    /// Places a bet and deals a fresh round from a newly shuffled deck.
    ///
    /// The dealer receives the first two cards (the first one face down),
    /// the player the next two.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not betting, the amount is zero, or
    /// the amount exceeds the balance. Nothing changes on error.
    pub fn place_bet(&mut self, amount: usize) -> Result<(), BetError> {
        self.check_bet(amount).inspect_err(|e| {
            log::warn!("bet of {amount} rejected: {e}");
        })?;

        let deck = Deck::shuffled(&mut self.rng);
        self.start_round(amount, deck)
    }

    /// Places a bet sized by `preset` against the current balance.
    ///
    /// # Errors
    ///
    /// Same as [`RoundEngine::place_bet`].
    pub fn place_preset(&mut self, preset: BetPreset) -> Result<(), BetError> {
        self.place_bet(preset.amount(self.ledger.balance))
    }

    /// Places a bet and deals from `deck` instead of a shuffled one.
    ///
    /// # Errors
    ///
    /// Same as [`RoundEngine::place_bet`], and [`BetError::EmptyDeck`] if the
    /// deck holds fewer than four cards.
    pub fn place_bet_with_deck(&mut self, amount: usize, deck: Deck) -> Result<(), BetError> {
        self.check_bet(amount).inspect_err(|e| {
            log::warn!("bet of {amount} rejected: {e}");
        })?;

        if deck.len() < INITIAL_DEAL {
            log::error!("deck of {} cards cannot cover the deal", deck.len());
            return Err(BetError::EmptyDeck);
        }

        self.start_round(amount, deck)
    }

    fn start_round(&mut self, amount: usize, mut deck: Deck) -> Result<(), BetError> {
        let mut dealer = DealerHand::new();
        let mut hand = Hand::new(amount);
        for _ in 0..2 {
            dealer.add_card(deck.draw().map_err(|_| BetError::EmptyDeck)?);
        }
        for _ in 0..2 {
            hand.add_card(deck.draw().map_err(|_| BetError::EmptyDeck)?);
        }

        self.ledger.balance -= amount;
        self.pending_bet = amount;
        self.last_result = None;
        self.emit(Event::BetPlaced {
            amount,
            balance: self.ledger.balance,
        });
        log::info!("bet {amount} placed, balance {}", self.ledger.balance);

        for (i, &card) in dealer.cards().iter().enumerate() {
            self.emit(Event::CardDealt {
                seat: Seat::Dealer,
                card: (i > 0).then_some(card),
            });
        }
        for &card in hand.cards() {
            self.emit(Event::CardDealt {
                seat: Seat::Player(0),
                card: Some(card),
            });
        }

        self.deck = deck;
        self.dealer_hand = dealer;
        self.hands.clear();
        self.hands.push(hand);
        self.active_hand = 0;
        self.state = RoundState::PlayerActing;
        log::debug!(
            "dealt player {:?} ({}), dealer shows {:?}",
            self.hands[0].cards(),
            self.hands[0].value(),
            self.dealer_hand.cards().get(1)
        );

        Ok(())
    }
}
