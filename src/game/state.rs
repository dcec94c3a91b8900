//! Round state and observable snapshots.

use alloc::vec::Vec;

use crate::card::Card;
use crate::result::HandOutcome;

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundState {
    /// Waiting for a bet.
    Betting,
    /// Waiting for player actions on the active hand.
    PlayerActing,
    /// Dealer plays out their hand.
    DealerActing,
    /// Every hand has been resolved; waiting for the next round.
    Settled,
}

/// A player hand as the table shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandView {
    /// Cards in the hand.
    pub cards: Vec<Card>,
    /// Wager on the hand.
    pub bet: usize,
    /// Current score.
    pub score: u32,
}

/// Everything a presentation layer needs after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Round phase.
    pub state: RoundState,
    /// Dealer cards; the hole card is `None` while hidden.
    pub dealer_cards: Vec<Option<Card>>,
    /// Dealer score, hidden while the player acts.
    pub dealer_score: Option<u32>,
    /// Player hands in order.
    pub hands: Vec<HandView>,
    /// Index of the hand taking actions.
    pub active_hand: usize,
    /// The bet placed for this round.
    pub pending_bet: usize,
    /// Sum of the wagers on all hands.
    pub total_bet: usize,
    /// Current balance.
    pub balance: usize,
    /// Lifetime wins.
    pub wins: u32,
    /// Lifetime losses.
    pub losses: u32,
    /// Per-hand outcomes, filled once settled.
    pub outcomes: Vec<HandOutcome>,
}
