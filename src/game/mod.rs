//! Round engine and state management.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{ActionError, RoundError, StoreError};
use crate::event::Event;
use crate::hand::{DealerHand, Hand};
use crate::ledger::{KeyValueStore, Ledger, MAX_BALANCE};
use crate::options::GameOptions;
use crate::result::RoundResult;

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{HandView, RoundState, Snapshot};

/// A single-player blackjack engine.
///
/// The engine owns the round in progress (deck, dealer hand, player hands)
/// and the [`Ledger`], which is loaded from the store on creation and saved
/// after every settled round. All mutation goes through its command methods;
/// each command either completes or is rejected with state left untouched.
pub struct RoundEngine<S: KeyValueStore> {
    /// Table options.
    options: GameOptions,
    /// Where the ledger is persisted.
    store: S,
    /// Balance and record.
    ledger: Ledger,
    /// Current round state.
    state: RoundState,
    /// Deck for the round in progress.
    deck: Deck,
    /// Dealer's hand.
    dealer_hand: DealerHand,
    /// Player hands; two only after a split.
    hands: Vec<Hand>,
    /// Index of the hand taking actions.
    active_hand: usize,
    /// The bet placed for this round.
    pending_bet: usize,
    /// Result of the last settled round, until the next reset.
    last_result: Option<RoundResult>,
    /// Events not yet drained.
    events: Vec<Event>,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl<S: KeyValueStore> RoundEngine<S> {
    /// Creates an engine, loading the ledger from `store`.
    ///
    /// `seed` drives every shuffle, so two engines with the same seed and
    /// the same commands play identical rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsolo::{GameOptions, MemoryStore, RoundEngine, RoundState};
    ///
    /// let engine = RoundEngine::new(GameOptions::default(), MemoryStore::new(), 42).unwrap();
    /// assert_eq!(engine.state(), RoundState::Betting);
    /// assert_eq!(engine.balance(), 500);
    /// ```
    pub fn new(options: GameOptions, store: S, seed: u64) -> Result<Self, StoreError> {
        let ledger = Ledger::load(&store, options.starting_balance)?;
        Ok(Self::with_ledger(options, store, ledger, seed))
    }

    /// Creates an engine with an explicit ledger instead of loading one.
    ///
    /// A balance above [`MAX_BALANCE`] is capped.
    #[must_use]
    pub fn with_ledger(options: GameOptions, store: S, ledger: Ledger, seed: u64) -> Self {
        Self {
            options,
            store,
            ledger: Ledger {
                balance: ledger.balance.min(MAX_BALANCE),
                ..ledger
            },
            state: RoundState::Betting,
            deck: Deck::from_draws(&[]),
            dealer_hand: DealerHand::new(),
            hands: Vec::new(),
            active_hand: 0,
            pending_bet: 0,
            last_result: None,
            events: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the table options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current round state.
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the ledger.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the current balance.
    pub const fn balance(&self) -> usize {
        self.ledger.balance
    }

    /// Returns the lifetime win count.
    pub const fn wins(&self) -> u32 {
        self.ledger.wins
    }

    /// Returns the lifetime loss count.
    pub const fn losses(&self) -> u32 {
        self.ledger.losses
    }

    /// Returns the bet placed for the current round.
    pub const fn pending_bet(&self) -> usize {
        self.pending_bet
    }

    /// Returns the player's hands.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the index of the hand taking actions.
    pub const fn active_hand_index(&self) -> usize {
        self.active_hand
    }

    /// Returns the hand taking actions, if a round is in progress.
    pub fn active_hand(&self) -> Option<&Hand> {
        self.hands.get(self.active_hand)
    }

    /// Returns the dealer's hand.
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer_hand
    }

    /// Returns the number of cards left in the round's deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Returns the result of the last settled round.
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Returns the store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the engine, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    /// Returns the observable state of the table.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            dealer_cards: self.dealer_hand.visible_cards(),
            dealer_score: self.dealer_hand.visible_value(),
            hands: self
                .hands
                .iter()
                .map(|hand| HandView {
                    cards: hand.cards().to_vec(),
                    bet: hand.bet(),
                    score: hand.value(),
                })
                .collect(),
            active_hand: self.active_hand,
            pending_bet: self.pending_bet,
            total_bet: self.hands.iter().map(Hand::bet).sum(),
            balance: self.ledger.balance,
            wins: self.ledger.wins,
            losses: self.ledger.losses,
            outcomes: self
                .last_result
                .as_ref()
                .map(|result| result.hands.iter().map(|h| h.outcome).collect())
                .unwrap_or_default(),
        }
    }

    /// Returns the status line for the table.
    pub fn status(&self) -> String {
        match self.state {
            RoundState::Betting => "Place your bet!".to_string(),
            RoundState::PlayerActing if self.active_hand > 0 => "Second Hand...".to_string(),
            RoundState::PlayerActing if self.hands.len() > 1 => "Split!".to_string(),
            RoundState::PlayerActing => "Good luck!".to_string(),
            RoundState::DealerActing => "Dealer plays...".to_string(),
            RoundState::Settled => self
                .last_result
                .as_ref()
                .map(RoundResult::message)
                .unwrap_or_default(),
        }
    }

    /// Clears the settled round and returns to betting.
    ///
    /// Calling this while already betting does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is still being played.
    pub fn next_round(&mut self) -> Result<(), RoundError> {
        match self.state {
            RoundState::Betting => Ok(()),
            RoundState::Settled => {
                self.clear_round();
                self.emit(Event::RoundReset);
                log::debug!("ready for next round, balance {}", self.ledger.balance);
                Ok(())
            }
            RoundState::PlayerActing | RoundState::DealerActing => Err(RoundError::InvalidState),
        }
    }

    /// Clears the store and restores the starting balance and an empty record.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the store cannot be
    /// cleared. The ledger is left untouched on failure.
    pub fn reset_stats(&mut self) -> Result<(), RoundError> {
        if self.state != RoundState::Betting {
            return Err(RoundError::InvalidState);
        }

        self.store.clear()?;
        self.ledger = Ledger::new(self.options.starting_balance);
        self.emit(Event::StatsReset {
            balance: self.ledger.balance,
        });
        log::info!("stats reset, balance {}", self.ledger.balance);

        Ok(())
    }

    /// Saves the ledger to the store.
    ///
    /// Settlement saves automatically; use this to retry after a failed save.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn persist(&mut self) -> Result<(), RoundError> {
        self.save_ledger()?;
        Ok(())
    }

    fn save_ledger(&mut self) -> Result<(), StoreError> {
        self.ledger.save(&mut self.store).inspect_err(|e| {
            log::error!("failed to save ledger: {e}");
        })
    }

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Draws a card, aborting the round if the deck is exhausted.
    fn draw_or_abort(&mut self) -> Result<Card, ActionError> {
        match self.deck.draw() {
            Ok(card) => Ok(card),
            Err(e) => {
                log::error!("{e} during {:?}; aborting round", self.state);
                self.abort_round();
                Err(ActionError::EmptyDeck)
            }
        }
    }

    /// Refunds every wager still at risk and returns to betting.
    fn abort_round(&mut self) {
        let refunded: usize = self.hands.iter().map(Hand::bet).sum();
        self.ledger.balance = self.ledger.balance.saturating_add(refunded);
        self.clear_round();
        self.emit(Event::RoundAborted { refunded });
        log::warn!("round aborted, refunded {refunded}");
    }

    fn clear_round(&mut self) {
        self.deck = Deck::from_draws(&[]);
        self.dealer_hand = DealerHand::new();
        self.hands.clear();
        self.active_hand = 0;
        self.pending_bet = 0;
        self.last_result = None;
        self.state = RoundState::Betting;
    }
}
