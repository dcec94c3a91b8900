//! Events emitted by the round engine for a presentation layer.

use crate::card::Card;
use crate::result::HandOutcome;

/// Who received a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    /// The dealer.
    Dealer,
    /// A player hand, by index.
    Player(usize),
}

/// A state change, in the order it happened.
///
/// The dealer's hole card is reported as `None` when dealt and shown in
/// [`Event::DealerRevealed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A bet was accepted and debited.
    BetPlaced {
        /// The wager.
        amount: usize,
        /// Balance after the debit.
        balance: usize,
    },
    /// A card was dealt.
    CardDealt {
        /// Recipient.
        seat: Seat,
        /// The card, `None` for the face-down hole card.
        card: Option<Card>,
    },
    /// The pair was split into two hands.
    HandSplit {
        /// Wager on each hand.
        bet: usize,
        /// Balance after the extra debit.
        balance: usize,
    },
    /// The active hand was doubled.
    Doubled {
        /// Hand index.
        hand_index: usize,
        /// The doubled wager.
        bet: usize,
        /// Balance after the extra debit.
        balance: usize,
    },
    /// Play moved to another player hand.
    HandAdvanced {
        /// The new active hand index.
        hand_index: usize,
    },
    /// The dealer turned over the hole card.
    DealerRevealed {
        /// The hole card.
        hole: Card,
        /// Dealer score with the hole card counted.
        value: u32,
    },
    /// A hand was resolved against the dealer.
    HandSettled {
        /// Hand index.
        hand_index: usize,
        /// Result.
        outcome: HandOutcome,
        /// Amount credited.
        payout: usize,
    },
    /// Every hand was resolved and the ledger updated.
    RoundSettled {
        /// Balance after payouts.
        balance: usize,
        /// Lifetime wins.
        wins: u32,
        /// Lifetime losses.
        losses: u32,
    },
    /// The deck ran out mid-round; wagers were refunded.
    RoundAborted {
        /// Amount refunded.
        refunded: usize,
    },
    /// The table is ready for a new bet.
    RoundReset,
    /// The ledger was reset to its starting values.
    StatsReset {
        /// The restored balance.
        balance: usize,
    },
}
