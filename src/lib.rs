//! A single-player blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`RoundEngine`] that runs one betting round at a
//! time: placing a bet, dealing, player actions (hit, stand, double down,
//! split), dealer play, and settlement against a persistent [`Ledger`].
//!
//! # Example
//!
//! ```
//! use bjsolo::{GameOptions, MemoryStore, RoundEngine, RoundState};
//!
//! let mut engine = RoundEngine::new(GameOptions::default(), MemoryStore::new(), 42).unwrap();
//! engine.place_bet(50).unwrap();
//! assert_eq!(engine.balance(), 450);
//!
//! engine.stand().unwrap();
//! assert_eq!(engine.state(), RoundState::Settled);
//! println!("{}", engine.status());
//!
//! engine.next_round().unwrap();
//! assert_eq!(engine.state(), RoundState::Betting);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod ledger;
pub mod options;
pub mod result;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use deck::Deck;
pub use error::{ActionError, BetError, DeckError, RoundError, StoreError};
pub use event::{Event, Seat};
pub use game::{HandView, RoundEngine, RoundState, Snapshot};
pub use hand::{BLACKJACK, DealerHand, Hand, is_soft, score};
#[cfg(feature = "json-store")]
pub use ledger::JsonFileStore;
pub use ledger::{KeyValueStore, Ledger, MAX_BALANCE, MemoryStore};
pub use options::{BetPreset, GameOptions};
pub use result::{HandOutcome, HandResult, RoundResult};
