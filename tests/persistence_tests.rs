//! Persistence round trips through snapshots and the repository.

use word_wars::core::{GameConfig, LetterBag, PlayerId};
use word_wars::rules::{Direction, GameEngine, GameMode, GameSnapshot};
use word_wars::store::{GameRepository, InMemoryRepository};

fn mid_game() -> GameEngine {
    let joe = PlayerId::new("joe");
    let steve = PlayerId::new("steve");
    let mut game = GameEngine::create(&GameConfig::default().with_seed(1311)).unwrap();
    game.enroll(joe.clone()).unwrap();
    game.enroll(steve.clone()).unwrap();
    game.start().unwrap();
    for p in [&joe, &steve] {
        game.set_rack(p, LetterBag::from_letters("catgegae").unwrap()).unwrap();
    }
    game.play_word(&joe, 0, 0, Direction::Across, "cat").unwrap();
    game.play_word(&steve, 0, 0, Direction::Down, "cage").unwrap();
    game.skip_turn(&joe).unwrap();
    game
}

#[test]
fn test_repository_round_trip_keeps_everything() {
    let game = mid_game();
    let mut repo = InMemoryRepository::new();
    let id = repo.register(&game).unwrap();

    let loaded = repo.find(id).unwrap();
    assert_eq!(loaded.board(), game.board());
    assert_eq!(loaded.pool(), game.pool());
    assert_eq!(loaded.mode(), GameMode::InProgress);
    assert_eq!(loaded.turn(), game.turn());
    assert_eq!(loaded.consecutive_passes(), 1);
    assert_eq!(loaded.created_at(), game.created_at());
    assert_eq!(loaded.last_update(), game.last_update());
    for (a, b) in loaded.players().iter().zip(game.players()) {
        assert_eq!(a.player(), b.player());
        assert_eq!(a.seat(), b.seat());
        assert_eq!(a.rack(), b.rack());
        assert_eq!(a.score(), b.score());
    }
}

#[test]
fn test_loaded_game_plays_on() {
    let mut repo = InMemoryRepository::new();
    let id = repo.register(&mid_game()).unwrap();

    // steve skips in the stored copy, completing the game.
    let mut game = repo.find(id).unwrap();
    game.skip_turn(&PlayerId::new("steve")).unwrap();
    repo.update(id, &game).unwrap();

    let done = repo.find(id).unwrap();
    assert!(done.is_completed());
    assert_eq!(done.leader().unwrap().player(), &PlayerId::new("steve"));
}

#[test]
fn test_restored_draws_match_original() {
    let mut original = mid_game();
    let mut restored = GameEngine::restore(&original.snapshot()).unwrap();
    let steve = PlayerId::new("steve");

    let a = original.play_word(&steve, 1, 1, Direction::Across, "t").unwrap();
    let b = restored.play_word(&steve, 1, 1, Direction::Across, "t").unwrap();
    assert_eq!(a.drawn, b.drawn);
    assert_eq!(original.snapshot().pool, restored.snapshot().pool);
}

#[test]
fn test_snapshot_wire_format() {
    let snap = mid_game().snapshot();
    let json = serde_json::to_value(&snap).unwrap();

    let board = json["board"].as_str().unwrap();
    assert_eq!(board.len(), 100);
    assert!(board.starts_with("cat_______a_________g_________e"));

    let pool = json["pool"].as_str().unwrap();
    let parsed = LetterBag::from_letters(pool).unwrap();
    assert_eq!(parsed.as_string(), pool);

    assert_eq!(json["players"][0]["player"], "joe");
    assert_eq!(json["players"][1]["score"], 7);

    let back: GameSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snap);
}
