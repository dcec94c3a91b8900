//! Error types for engine operations.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur when drawing from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    Empty,
}

/// Errors reported by a key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reading from the store failed.
    #[error("store read failed: {0}")]
    Read(String),
    /// Writing to the store failed.
    #[error("store write failed: {0}")]
    Write(String),
}

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bets are only accepted between rounds.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Bet amount exceeds the balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The deck cannot cover the initial deal.
    #[error("not enough cards in the deck")]
    EmptyDeck,
}

impl BetError {
    /// Returns whether the bet amount itself was rejected.
    #[must_use]
    pub const fn is_invalid_bet(self) -> bool {
        matches!(self, Self::ZeroBet | Self::InsufficientFunds)
    }
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The player is not acting.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Double down is disabled for this table.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// The active hand is not a splittable pair, or a split already happened.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Balance does not cover the extra wager.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// The deck ran out; the round was aborted and wagers refunded.
    #[error("no cards left in the deck")]
    EmptyDeck,
    /// The round settled but the ledger could not be saved.
    #[error("round settled but the ledger was not saved: {0}")]
    Persist(StoreError),
}

/// Errors that can occur at round boundaries (reset, stats, persistence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The operation is not valid in the current round state.
    #[error("invalid game state for this operation")]
    InvalidState,
    /// The ledger store failed.
    #[error(transparent)]
    Persist(#[from] StoreError),
}
