use alloc::vec::Vec;

use crate::error::ActionError;
use crate::event::{Event, Seat};
use crate::hand::{BLACKJACK, Hand};
use crate::ledger::{KeyValueStore, MAX_BALANCE};
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{RoundEngine, RoundState};

/// Resolves one player hand against the dealer's final value.
///
/// Returns the outcome and the amount credited back: twice the wager on a
/// win, the wager on a push, nothing otherwise.
const fn resolve(player_value: u32, dealer_value: u32, bet: usize) -> (HandOutcome, usize) {
    if player_value > BLACKJACK {
        (HandOutcome::Bust, 0)
    } else if dealer_value > BLACKJACK || player_value > dealer_value {
        (HandOutcome::Win, bet.saturating_mul(2))
    } else if player_value < dealer_value {
        (HandOutcome::Lose, 0)
    } else {
        (HandOutcome::Push, bet)
    }
}

impl<S: KeyValueStore> RoundEngine<S> {
    /// Dealer reveals the hole card and draws while below the stand value.
    ///
    /// There is no soft-17 rule: any total at or above the stand value
    /// stands. When every player hand has busted the dealer keeps the two
    /// dealt cards and draws nothing, so such a round consumes fewer cards
    /// than always drawing to the stand value would.
    pub(super) fn dealer_play(&mut self) -> Result<(), ActionError> {
        if self.state != RoundState::DealerActing {
            return Err(ActionError::InvalidState);
        }

        self.dealer_hand.reveal_hole();
        if let Some(&hole) = self.dealer_hand.cards().first() {
            self.emit(Event::DealerRevealed {
                hole,
                value: self.dealer_hand.value(),
            });
        }

        if self.hands.iter().all(Hand::is_bust) {
            log::debug!("all hands bust, dealer stays on {}", self.dealer_hand.value());
            return Ok(());
        }

        while self.dealer_hand.value() < self.options.dealer_stands_on {
            let card = self.draw_or_abort()?;
            self.dealer_hand.add_card(card);
            self.emit(Event::CardDealt {
                seat: Seat::Dealer,
                card: Some(card),
            });
            log::debug!("dealer draws {card}, now {}", self.dealer_hand.value());
        }

        Ok(())
    }

    /// Resolves every hand, credits payouts, updates the record, and saves
    /// the ledger.
    ///
    /// Credits stop at [`MAX_BALANCE`].
    ///
    /// The round is settled even when the save fails; the error is returned
    /// so the caller can retry with [`RoundEngine::persist`].
    pub(super) fn settle(&mut self) -> Result<(), ActionError> {
        if self.state != RoundState::DealerActing {
            return Err(ActionError::InvalidState);
        }

        let dealer_value = self.dealer_hand.value();
        let mut results = Vec::with_capacity(self.hands.len());

        for (hand_index, hand) in self.hands.iter().enumerate() {
            let bet = hand.bet();
            let player_value = hand.value();
            let (outcome, payout) = resolve(player_value, dealer_value, bet);

            results.push(HandResult {
                hand_index,
                outcome,
                bet,
                payout,
                player_value,
                dealer_value,
            });
        }

        for result in &results {
            self.ledger.balance = self
                .ledger
                .balance
                .saturating_add(result.payout)
                .min(MAX_BALANCE);
            if result.outcome.is_win() {
                self.ledger.wins = self.ledger.wins.saturating_add(1);
            } else if result.outcome.is_loss() {
                self.ledger.losses = self.ledger.losses.saturating_add(1);
            }
            self.emit(Event::HandSettled {
                hand_index: result.hand_index,
                outcome: result.outcome,
                payout: result.payout,
            });
        }

        let round = RoundResult {
            hands: results,
            dealer_value,
            dealer_bust: dealer_value > BLACKJACK,
        };
        log::info!(
            "round settled: {} (dealer {dealer_value}), net {}, balance {}",
            round.message(),
            round.net(),
            self.ledger.balance
        );

        self.last_result = Some(round);
        self.state = RoundState::Settled;
        self.emit(Event::RoundSettled {
            balance: self.ledger.balance,
            wins: self.ledger.wins,
            losses: self.ledger.losses,
        });

        self.save_ledger().map_err(ActionError::Persist)
    }
}
