//! Property tests for bags and the turn/score invariants of the engine.

use proptest::prelude::*;

use word_wars::core::{BagError, GameConfig, GameRng, Letter, LetterBag, PlayerId, Seat};
use word_wars::rules::{Direction, GameEngine, GameMode};

fn letters() -> impl Strategy<Value = String> {
    "[a-z]{0,40}"
}

/// A turn: `None` skips, `Some((x, y, across, len))` tries a word built
/// from the front of the acting player's rack.
fn turns() -> impl Strategy<Value = Vec<Option<(usize, usize, bool, usize)>>> {
    prop::collection::vec(
        prop::option::weighted(0.7, (0usize..10, 0usize..10, any::<bool>(), 1usize..4)),
        0..40,
    )
}

proptest! {
    #[test]
    fn bag_string_round_trip(s in letters()) {
        let bag = LetterBag::from_letters(&s).unwrap();
        let back = LetterBag::from_letters(&bag.as_string()).unwrap();
        prop_assert_eq!(back, bag);
    }

    #[test]
    fn remove_random_conserves_tiles(s in letters(), n in 0usize..60, seed in any::<u64>()) {
        let mut bag = LetterBag::from_letters(&s).unwrap();
        let before = bag.content_count();
        let mut rng = GameRng::new(seed);

        let drawn = bag.remove_random(n, &mut rng);

        prop_assert_eq!(drawn.content_count(), n.min(before));
        prop_assert_eq!(drawn.content_count() + bag.content_count(), before);
        for letter in Letter::all() {
            prop_assert!(drawn.count(letter) <= LetterBag::from_letters(&s).unwrap().count(letter));
        }
    }

    #[test]
    fn removing_absent_letter_fails(s in "[a-y]{0,20}") {
        let mut bag = LetterBag::from_letters(&s).unwrap();
        let z = Letter::from_char('z').unwrap();
        prop_assert_eq!(bag.remove(z), Err(BagError::Depleted(z)));
        prop_assert_eq!(bag.content_count(), s.len());
    }

    /// Turns cycle in seat order, scores never drop, and the game ends
    /// exactly when a full round of consecutive skips happens.
    #[test]
    fn turn_and_score_invariants(player_count in 1usize..5, seed in any::<u64>(), plan in turns()) {
        let players: Vec<PlayerId> =
            (0..player_count).map(|i| PlayerId::new(format!("p{i}"))).collect();
        let mut game = GameEngine::create(&GameConfig::default().with_seed(seed)).unwrap();
        for p in &players {
            game.enroll(p.clone()).unwrap();
        }
        game.start().unwrap();

        let mut expected_seat = 0usize;
        let mut skips_in_a_row = 0usize;

        for turn in plan {
            if game.mode() != GameMode::InProgress {
                break;
            }
            prop_assert_eq!(game.turn(), Some(Seat::new(expected_seat as u8)));
            let p = players[expected_seat].clone();
            let scores_before: Vec<u32> = game.players().iter().map(|s| s.score()).collect();

            let acted = match turn {
                None => {
                    game.skip_turn(&p).unwrap();
                    skips_in_a_row += 1;
                    true
                }
                Some((x, y, across, len)) => {
                    let word: String = game
                        .rack_for(&p)
                        .unwrap()
                        .tiles()
                        .take(len)
                        .map(Letter::as_char)
                        .collect();
                    let direction = Direction::from_across(across);
                    let ok = !word.is_empty() && game.play_word(&p, x, y, direction, &word).is_ok();
                    if ok {
                        skips_in_a_row = 0;
                    }
                    ok
                }
            };

            for (before, state) in scores_before.iter().zip(game.players()) {
                prop_assert!(state.score() >= *before);
            }
            if acted {
                expected_seat = (expected_seat + 1) % player_count;
            }
            prop_assert_eq!(game.mode() == GameMode::Completed, skips_in_a_row >= player_count);
        }
    }
}
