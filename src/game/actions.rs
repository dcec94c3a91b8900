use crate::card::Card;
use crate::error::ActionError;
use crate::event::{Event, Seat};
use crate::hand::{BLACKJACK, Hand};
use crate::ledger::KeyValueStore;

use super::{RoundEngine, RoundState};

impl<S: KeyValueStore> RoundEngine<S> {
    fn ensure_player_turn(&self) -> Result<(), ActionError> {
        if self.state != RoundState::PlayerActing {
            log::warn!("player action rejected in {:?}", self.state);
            return Err(ActionError::InvalidState);
        }

        Ok(())
    }

    fn active_bet(&self) -> usize {
        self.hands.get(self.active_hand).map_or(0, Hand::bet)
    }

    fn deal_to_active(&mut self, card: Card) {
        let index = self.active_hand;
        if let Some(hand) = self.hands.get_mut(index) {
            hand.add_card(card);
        }
        self.emit(Event::CardDealt {
            seat: Seat::Player(index),
            card: Some(card),
        });
    }

    /// Player action: Hit (draw a card into the active hand).
    ///
    /// A bust moves play on to the next hand, or to the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not acting, the deck is exhausted
    /// (the round is aborted), or the round settles but cannot be saved.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        let card = self.draw_or_abort()?;
        self.deal_to_active(card);

        let value = self.active_value();
        log::debug!("hand {} hits {card}, now {value}", self.active_hand);
        if value > BLACKJACK {
            self.next_hand_or_dealer()?;
        }

        Ok(card)
    }

    /// Player action: Stand (keep the active hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not acting, or if finishing the
    /// round fails (see [`RoundEngine::hit`]).
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        log::debug!("hand {} stands", self.active_hand);
        self.next_hand_or_dealer()
    }

    /// Player action: Double down (double the wager, take exactly one card,
    /// then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not acting, doubling is disabled,
    /// the balance does not cover the wager, the deck is exhausted, or the
    /// round settles but cannot be saved. A rejected double changes nothing.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        self.ensure_player_turn()?;

        if !self.options.allow_double {
            return Err(ActionError::CannotDouble);
        }

        let bet = self.active_bet();
        if self.ledger.balance < bet {
            log::warn!("double rejected: balance {} < {bet}", self.ledger.balance);
            return Err(ActionError::InsufficientFunds);
        }

        let card = self.draw_or_abort()?;

        self.ledger.balance -= bet;
        let index = self.active_hand;
        if let Some(hand) = self.hands.get_mut(index) {
            hand.double_bet();
        }
        let doubled = bet.saturating_mul(2);
        self.emit(Event::Doubled {
            hand_index: index,
            bet: doubled,
            balance: self.ledger.balance,
        });
        log::info!("hand {index} doubled to {doubled}");
        self.deal_to_active(card);

        self.next_hand_or_dealer()?;

        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// Each card of the pair starts a new hand carrying the original wager
    /// and receives one fresh card. Only the opening hand can be split, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not acting, splitting is disabled,
    /// the hand is not a pair or was already split, the balance does not
    /// cover the wager, or the deck is exhausted. A rejected split changes
    /// nothing.
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_player_turn()?;

        if !self.options.allow_split || self.hands.len() != 1 {
            return Err(ActionError::CannotSplit);
        }

        let Some(hand) = self.hands.first() else {
            return Err(ActionError::CannotSplit);
        };

        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }

        let bet = hand.bet();
        let (left, right) = (hand.cards()[0], hand.cards()[1]);
        if self.ledger.balance < bet {
            log::warn!("split rejected: balance {} < {bet}", self.ledger.balance);
            return Err(ActionError::InsufficientFunds);
        }

        let first_card = self.draw_or_abort()?;
        let second_card = self.draw_or_abort()?;

        self.ledger.balance -= bet;
        let mut first = Hand::from_split(left, bet);
        let mut second = Hand::from_split(right, bet);
        first.add_card(first_card);
        second.add_card(second_card);

        self.hands.clear();
        self.hands.push(first);
        self.hands.push(second);
        self.active_hand = 0;

        self.emit(Event::HandSplit {
            bet,
            balance: self.ledger.balance,
        });
        self.emit(Event::CardDealt {
            seat: Seat::Player(0),
            card: Some(first_card),
        });
        self.emit(Event::CardDealt {
            seat: Seat::Player(1),
            card: Some(second_card),
        });
        log::info!("split into two hands of {bet}, balance {}", self.ledger.balance);

        Ok(())
    }

    fn active_value(&self) -> u32 {
        self.hands.get(self.active_hand).map_or(0, Hand::value)
    }

    /// Moves to the second split hand, or hands play to the dealer.
    fn next_hand_or_dealer(&mut self) -> Result<(), ActionError> {
        if self.hands.len() > 1 && self.active_hand == 0 {
            self.active_hand = 1;
            self.emit(Event::HandAdvanced { hand_index: 1 });
            log::debug!("moving to second hand");
            return Ok(());
        }

        self.state = RoundState::DealerActing;
        self.dealer_play()?;
        self.settle()
    }
}
