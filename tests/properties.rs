//! Property tests for shuffling, scoring, and money conservation.

use std::collections::HashSet;

use bjsolo::{
    BLACKJACK, Card, DECK_SIZE, Deck, GameOptions, MemoryStore, RoundEngine, RoundState, Suit,
    is_soft, score,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy)]
enum Action {
    Hit,
    Stand,
    Double,
    Split,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Hit),
        Just(Action::Stand),
        Just(Action::Double),
        Just(Action::Split),
    ]
}

fn cards(max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(
        (0..4usize, 1..=13u8).prop_map(|(suit, rank)| Card::new(Suit::ALL[suit], rank)),
        0..max,
    )
}

proptest! {
    #[test]
    fn shuffle_keeps_every_card_once(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);

        let seen: HashSet<Card> = deck.cards().iter().copied().collect();
        let full: HashSet<Card> = Deck::ordered().cards().iter().copied().collect();
        prop_assert_eq!(deck.len(), DECK_SIZE);
        prop_assert_eq!(seen, full);
    }

    #[test]
    fn score_ignores_card_order(mut hand in cards(12)) {
        let forward = score(&hand);
        hand.reverse();
        prop_assert_eq!(score(&hand), forward);
    }

    #[test]
    fn bust_hands_are_never_soft(hand in cards(12)) {
        if score(&hand) > BLACKJACK {
            prop_assert!(!is_soft(&hand));
        }
    }

    #[test]
    fn round_conserves_money(
        seed in any::<u64>(),
        bet in 1..=500usize,
        actions in prop::collection::vec(action(), 0..12),
    ) {
        let mut game = RoundEngine::new(GameOptions::default(), MemoryStore::new(), seed).unwrap();
        let before = game.balance();
        let record_before = game.wins() + game.losses();

        game.place_bet(bet).unwrap();
        prop_assert_eq!(game.balance(), before - bet);

        for action in actions {
            if game.state() != RoundState::PlayerActing {
                break;
            }
            let wagers_before: usize = game.hands().iter().map(|h| h.bet()).sum();
            let balance_before = game.balance();
            let active = game.active_hand_index();
            let cards_before = game.active_hand().map(|h| h.len());

            let accepted = match action {
                Action::Hit => game.hit().is_ok(),
                Action::Stand => game.stand().is_ok(),
                Action::Double => {
                    let prior = game.active_hand().map(|h| h.bet());
                    let ok = game.double_down().is_ok();
                    if ok {
                        prop_assert_eq!(Some(game.hands()[active].bet()), prior.map(|b| b * 2));
                        prop_assert_eq!(Some(game.hands()[active].len()), cards_before.map(|n| n + 1));
                    }
                    ok
                }
                Action::Split => game.split().is_ok(),
            };

            if !accepted {
                let wagers_after: usize = game.hands().iter().map(|h| h.bet()).sum();
                prop_assert_eq!(game.balance(), balance_before);
                prop_assert_eq!(wagers_after, wagers_before);
            }
        }

        while game.state() == RoundState::PlayerActing {
            game.stand().unwrap();
        }
        prop_assert_eq!(game.state(), RoundState::Settled);

        let result = game.last_result().unwrap().clone();
        prop_assert_eq!(game.balance() + result.total_bet(), before + result.total_payout());

        let resolved = game.wins() + game.losses() - record_before;
        prop_assert!(resolved as usize <= result.hands.len());

        let dealer = game.dealer_hand();
        if game.hands().iter().any(|h| !h.is_bust()) {
            prop_assert!(dealer.value() >= 17);
        }
        if dealer.len() > 2 {
            let before_last = score(&dealer.cards()[..dealer.len() - 1]);
            prop_assert!(before_last < 17);
        }
    }
}
