//! Settlement result types.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Player went over 21.
    Bust,
    /// Dealer busted or the player scored higher.
    Win,
    /// Dealer scored higher.
    Lose,
    /// Equal scores; the stake is returned.
    Push,
}

impl HandOutcome {
    /// Returns the table label for this outcome.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bust => "Bust!",
            Self::Win => "Win!",
            Self::Lose => "Lost.",
            Self::Push => "Push.",
        }
    }

    /// Returns whether the outcome counts as a win in the ledger.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }

    /// Returns whether the outcome counts as a loss in the ledger.
    #[must_use]
    pub const fn is_loss(self) -> bool {
        matches!(self, Self::Bust | Self::Lose)
    }
}

impl fmt::Display for HandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandResult {
    /// The hand index (1 only for the second hand of a split).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The wager carried by this hand.
    pub bet: usize,
    /// The amount credited back to the balance.
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u32,
    /// The dealer's hand value.
    pub dealer_value: u32,
}

/// Result of a settled round.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// Results for each hand, in hand order.
    pub hands: Vec<HandResult>,
    /// The dealer's final hand value.
    pub dealer_value: u32,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
}

impl RoundResult {
    /// Total wagered across all hands.
    #[must_use]
    pub fn total_bet(&self) -> usize {
        self.hands.iter().map(|h| h.bet).sum()
    }

    /// Total credited back across all hands.
    #[must_use]
    pub fn total_payout(&self) -> usize {
        self.hands.iter().map(|h| h.payout).sum()
    }

    /// Net result of the round (positive = profit).
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "chip amounts fit in isize")]
    pub fn net(&self) -> isize {
        self.total_payout() as isize - self.total_bet() as isize
    }

    /// Returns the per-hand labels joined by spaces, e.g. `"Win! Bust!"`.
    #[must_use]
    pub fn message(&self) -> String {
        let labels: Vec<&str> = self.hands.iter().map(|h| h.outcome.label()).collect();
        labels.join(" ")
    }
}
