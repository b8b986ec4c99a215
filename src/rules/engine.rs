//! The game-state engine.
//!
//! `GameEngine` owns the board, the shared draw pool, the seated players,
//! the turn cursor and the lifecycle mode of one game. It is synchronous
//! and single-threaded: callers serialize access to a given game.
//!
//! ## Turn flow
//!
//! - `enroll` seats players while the game is `Unstarted`
//! - `start` hands the first turn to seat 0
//! - `play_word` / `skip_turn` act for the player at the turn cursor and
//!   pass the turn on
//! - the game completes when every player has skipped in a row
//!
//! ## Scoring
//!
//! Every letter of a played word scores its value, including letters that
//! already sat on the board. Only letters landing on empty cells cost the
//! player a rack tile, and a word must land at least one of them.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::core::{Board, GameConfig, GameRng, LetterBag, PlayerId, PlayerState, Seat};

use super::error::{GameError, StateConflict};
use super::mode::GameMode;
use super::moves::Move;
use super::placement::{parse_word, Direction, PlacementPlan};

/// Most players a game can seat.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Result of a successful `play_word`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Points added to the player's score.
    pub score: u32,
    /// Tiles the word put on the board.
    pub new_tiles: usize,
    /// Tiles drawn from the pool to refill the rack.
    pub drawn: LetterBag,
    /// History record of this turn.
    pub record: Move,
}

/// State of one game.
///
/// ## Example
///
/// ```
/// use word_wars::core::{GameConfig, PlayerId};
/// use word_wars::rules::{Direction, GameEngine};
///
/// let mut game = GameEngine::create(&GameConfig::default().with_seed(1)).unwrap();
/// let joe = PlayerId::new("joe");
/// game.enroll(joe.clone()).unwrap();
/// game.start().unwrap();
///
/// game.set_rack(&joe, "cat".parse().unwrap()).unwrap();
/// let placed = game.play_word(&joe, 0, 0, Direction::Across, "cat").unwrap();
/// assert_eq!(placed.score, 4);
/// assert_eq!(game.board().rows()[0], "cat_______");
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub(crate) board: Board,
    pub(crate) pool: LetterBag,
    pub(crate) players: Vec<PlayerState>,
    pub(crate) turn: Option<Seat>,
    pub(crate) consecutive_passes: u32,
    pub(crate) mode: GameMode,
    pub(crate) rack_size: usize,
    pub(crate) rng: GameRng,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_update: DateTime<Utc>,
}

impl GameEngine {
    /// Create an unstarted game with an empty board and the standard pool.
    #[instrument(level = "debug")]
    pub fn create(config: &GameConfig) -> Result<Self, GameError> {
        config
            .validate()
            .map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        let board = Board::new(config.width, config.height)?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let now = Utc::now();
        Ok(Self {
            board,
            pool: LetterBag::standard_set(),
            players: Vec::new(),
            turn: None,
            consecutive_passes: 0,
            mode: GameMode::Unstarted,
            rack_size: config.rack_size,
            rng,
            created_at: now,
            last_update: now,
        })
    }

    /// Create an unstarted game with the given board size and default settings.
    pub fn create_with(width: usize, height: usize) -> Result<Self, GameError> {
        Self::create(&GameConfig::default().with_board(width, height))
    }

    // === Lifecycle ===

    /// Seat a player, dealing a full rack from the pool.
    #[instrument(skip(self, player), fields(player = %player))]
    pub fn enroll(&mut self, player: PlayerId) -> Result<Seat, GameError> {
        if self.mode != GameMode::Unstarted {
            return Err(GameError::invalid_state("enroll", StateConflict::Mode(self.mode)));
        }
        if self.players.iter().any(|p| p.is(&player)) {
            return Err(GameError::AlreadyEnrolled(player));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::invalid_state(
                "enroll",
                StateConflict::TableFull(MAX_PLAYERS),
            ));
        }

        let seat = Seat::new(self.players.len() as u8);
        let state = PlayerState::draw(player, seat, &mut self.pool, self.rack_size, &mut self.rng);
        debug!(%seat, rack = %state.rack(), "player enrolled");
        self.players.push(state);
        self.touch();
        Ok(seat)
    }

    /// Begin play. No more players may enroll afterwards.
    ///
    /// Returns the player holding the first turn.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<&PlayerState, GameError> {
        if self.mode != GameMode::Unstarted {
            return Err(GameError::invalid_state("start", StateConflict::Mode(self.mode)));
        }
        if self.players.is_empty() {
            return Err(GameError::invalid_state("start", StateConflict::NoPlayers));
        }

        self.mode = GameMode::InProgress;
        self.turn = Some(Seat::new(0));
        self.touch();
        info!(players = self.players.len(), "game started");
        Ok(&self.players[0])
    }

    /// Abandon the game. There is no winner.
    ///
    /// Cancelling a game that already ended is an error.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> Result<(), GameError> {
        if self.mode.is_terminal() {
            return Err(GameError::invalid_state("cancel", StateConflict::Mode(self.mode)));
        }
        self.mode = GameMode::Cancelled;
        self.touch();
        info!("game cancelled");
        Ok(())
    }

    // === Turns ===

    /// Play `word` starting at `(x, y)`.
    ///
    /// On any error the board, the pool, and every player's rack and
    /// score are exactly as they were before the call.
    #[instrument(skip(self, player), fields(player = %player))]
    pub fn play_word(
        &mut self,
        player: &PlayerId,
        x: usize,
        y: usize,
        direction: Direction,
        word: &str,
    ) -> Result<Placement, GameError> {
        let seat = self.acting_seat("play", player)?;
        let letters = parse_word(word)?;

        let plan = PlacementPlan::plan(
            &self.board,
            &self.players[seat.index()].rack,
            player,
            x,
            y,
            direction,
            &letters,
        )
        .inspect_err(|e| debug!(error = %e, "play rejected"))?;

        if plan.new_tiles() == 0 {
            debug!("play rejected: no new letters");
            return Err(GameError::NoNewLetters {
                word: word.to_string(),
                x,
                y,
                direction,
            });
        }

        plan.commit(&mut self.board)?;

        let drawn = self.pool.remove_random(plan.new_tiles(), &mut self.rng);
        if drawn.content_count() < plan.new_tiles() {
            warn!(
                wanted = plan.new_tiles(),
                drawn = drawn.content_count(),
                "letter pool exhausted"
            );
        }

        let state = &mut self.players[seat.index()];
        state.rack = plan.rack_after.clone();
        state.rack.add_all(&drawn);
        state.score += plan.score;

        self.consecutive_passes = 0;
        self.advance_turn();
        self.touch();

        info!(
            word,
            %direction,
            x,
            y,
            score = plan.score,
            total = state_score(&self.players, seat),
            "word played"
        );

        Ok(Placement {
            score: plan.score,
            new_tiles: plan.new_tiles(),
            drawn,
            record: Move::played(player.clone(), x, y, direction, word, plan.score, self.last_update),
        })
    }

    /// Pass the turn without playing.
    ///
    /// Completes the game once every player has passed in a row.
    #[instrument(skip(self, player), fields(player = %player))]
    pub fn skip_turn(&mut self, player: &PlayerId) -> Result<Move, GameError> {
        self.acting_seat("skip", player)?;

        self.consecutive_passes += 1;
        if self.consecutive_passes as usize >= self.players.len() {
            self.mode = GameMode::Completed;
            info!(passes = self.consecutive_passes, "game completed");
        }
        self.advance_turn();
        self.touch();
        debug!(passes = self.consecutive_passes, "turn skipped");

        Ok(Move::skipped(player.clone(), self.last_update))
    }

    /// Seat of `player`, if the game is in progress and it is their turn.
    fn acting_seat(&self, operation: &'static str, player: &PlayerId) -> Result<Seat, GameError> {
        if self.mode != GameMode::InProgress {
            return Err(GameError::invalid_state(operation, StateConflict::Mode(self.mode)));
        }
        let state = self
            .player_state(player)
            .ok_or_else(|| GameError::UnknownPlayer(player.clone()))?;
        let current = self.current_player().ok_or_else(|| {
            GameError::invalid_state(operation, StateConflict::NoPlayers)
        })?;
        if state.seat() != current.seat() {
            debug!(expected = %current.player(), "wrong turn");
            return Err(GameError::WrongTurn {
                player: player.clone(),
                expected: current.player().clone(),
            });
        }
        Ok(state.seat())
    }

    fn advance_turn(&mut self) {
        if let Some(seat) = self.turn {
            self.turn = Some(seat.next(self.players.len()));
        }
    }

    fn touch(&mut self) {
        self.last_update = Utc::now();
    }

    /// Replace a player's rack, returning the old one.
    ///
    /// The old tiles are not returned to the pool. Intended for seeding
    /// fixed racks in tests and tutorials.
    pub fn set_rack(&mut self, player: &PlayerId, rack: LetterBag) -> Result<LetterBag, GameError> {
        let state = self
            .players
            .iter_mut()
            .find(|p| p.is(player))
            .ok_or_else(|| GameError::UnknownPlayer(player.clone()))?;
        Ok(std::mem::replace(&mut state.rack, rack))
    }

    // === Queries ===

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Has `start` been called?
    #[must_use]
    pub fn started(&self) -> bool {
        self.mode != GameMode::Unstarted
    }

    /// Completed or cancelled.
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.mode.is_terminal()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.mode == GameMode::Completed
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.mode == GameMode::Cancelled
    }

    /// Seat holding the turn, while the game is in progress.
    #[must_use]
    pub fn turn(&self) -> Option<Seat> {
        if self.mode == GameMode::InProgress {
            self.turn
        } else {
            None
        }
    }

    /// Player whose turn it is, while the game is in progress.
    #[must_use]
    pub fn current_player(&self) -> Option<&PlayerState> {
        self.turn().and_then(|seat| self.players.get(seat.index()))
    }

    /// Player with the strictly highest score; the earliest seat wins ties.
    #[must_use]
    pub fn leader(&self) -> Option<&PlayerState> {
        let mut players = self.players.iter();
        let first = players.next()?;
        Some(players.fold(first, |leader, p| if p.score() > leader.score() { p } else { leader }))
    }

    /// Cumulative score of `player`.
    pub fn score_for(&self, player: &PlayerId) -> Result<u32, GameError> {
        self.player_state(player)
            .map(PlayerState::score)
            .ok_or_else(|| GameError::UnknownPlayer(player.clone()))
    }

    /// Rack of `player`.
    pub fn rack_for(&self, player: &PlayerId) -> Result<&LetterBag, GameError> {
        self.player_state(player)
            .map(PlayerState::rack)
            .ok_or_else(|| GameError::UnknownPlayer(player.clone()))
    }

    #[must_use]
    pub fn player_state(&self, player: &PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.is(player))
    }

    /// Seated players in turn order.
    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Shared draw pool.
    #[must_use]
    pub fn pool(&self) -> &LetterBag {
        &self.pool
    }

    #[must_use]
    pub fn rack_size(&self) -> usize {
        self.rack_size
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last successful mutation.
    #[must_use]
    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }
}

fn state_score(players: &[PlayerState], seat: Seat) -> u32 {
    players.get(seat.index()).map_or(0, PlayerState::score)
}

impl std::fmt::Display for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board:")?;
        write!(f, "{}", self.board)?;
        for p in &self.players {
            writeln!(f, "{p}")?;
        }
        match (self.mode, self.leader(), self.current_player()) {
            (GameMode::Completed, Some(leader), _) => {
                write!(f, "Game over.  {} is the winner.", leader.player())
            }
            (GameMode::Cancelled, _, _) => write!(f, "Game cancelled."),
            (_, _, Some(next)) => write!(f, "Next turn belongs to {}", next.player()),
            _ => write!(f, "Waiting for players."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    fn two_player_game() -> GameEngine {
        let mut game = GameEngine::create(&GameConfig::default().with_seed(42)).unwrap();
        game.enroll(player("joe")).unwrap();
        game.enroll(player("steve")).unwrap();
        game.start().unwrap();
        for name in ["joe", "steve"] {
            game.set_rack(&player(name), "catgegae".parse().unwrap()).unwrap();
        }
        game
    }

    #[test]
    fn test_create_defaults() {
        let game = GameEngine::create(&GameConfig::default()).unwrap();
        assert_eq!(game.mode(), GameMode::Unstarted);
        assert_eq!(game.board().width(), 10);
        assert_eq!(game.board().height(), 10);
        assert_eq!(game.pool().content_count(), 144);
        assert!(game.current_player().is_none());
        assert!(game.leader().is_none());
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let err = GameEngine::create_with(0, 10).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert_eq!(err.code(), "INVALID_CONFIG");

        assert!(matches!(
            GameEngine::create_with(usize::MAX, 2),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameEngine::create(&GameConfig::default().with_rack_size(0)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_enroll_deals_rack() {
        let mut game = GameEngine::create(&GameConfig::default().with_seed(1)).unwrap();
        assert_eq!(game.enroll(player("joe")).unwrap(), Seat::new(0));
        assert_eq!(game.enroll(player("steve")).unwrap(), Seat::new(1));

        assert_eq!(game.rack_for(&player("joe")).unwrap().content_count(), 7);
        assert_eq!(game.pool().content_count(), 144 - 14);
    }

    #[test]
    fn test_enroll_twice_rejected() {
        let mut game = GameEngine::create_with(10, 10).unwrap();
        game.enroll(player("joe")).unwrap();
        assert_eq!(
            game.enroll(player("joe")),
            Err(GameError::AlreadyEnrolled(player("joe")))
        );
        assert_eq!(game.player_count(), 1);
    }

    #[test]
    fn test_start_requires_players() {
        let mut game = GameEngine::create_with(10, 10).unwrap();
        let err = game.start().unwrap_err();
        assert_eq!(err, GameError::invalid_state("start", StateConflict::NoPlayers));
        assert_eq!(game.mode(), GameMode::Unstarted);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut game = two_player_game();
        assert!(matches!(game.start(), Err(GameError::InvalidState { .. })));
    }

    #[test]
    fn test_start_hands_turn_to_first_seat() {
        let mut game = GameEngine::create_with(10, 10).unwrap();
        game.enroll(player("joe")).unwrap();
        game.enroll(player("steve")).unwrap();
        let first = game.start().unwrap().player().clone();
        assert_eq!(first, player("joe"));
        assert_eq!(game.turn(), Some(Seat::new(0)));
    }

    #[test]
    fn test_play_scores_and_refills() {
        let mut game = two_player_game();
        let pool_before = game.pool().content_count();

        let placed = game.play_word(&player("joe"), 0, 0, Direction::Across, "cat").unwrap();

        assert_eq!(placed.score, 4);
        assert_eq!(placed.new_tiles, 3);
        assert_eq!(placed.drawn.content_count(), 3);
        assert_eq!(game.score_for(&player("joe")).unwrap(), 4);
        assert_eq!(game.rack_for(&player("joe")).unwrap().content_count(), 8);
        assert_eq!(game.pool().content_count(), pool_before - 3);
        assert_eq!(game.current_player().unwrap().player(), &player("steve"));
        assert_eq!(placed.record.word(), "cat");
        assert_eq!(placed.record.score(), 4);
    }

    #[test]
    fn test_overlap_scores_without_rack_cost() {
        let mut game = two_player_game();
        game.play_word(&player("joe"), 0, 0, Direction::Across, "cat").unwrap();

        let placed = game.play_word(&player("steve"), 0, 0, Direction::Down, "cage").unwrap();
        assert_eq!(placed.score, 7);
        assert_eq!(placed.new_tiles, 3);
    }

    #[test]
    fn test_no_new_letters_rejected() {
        let mut game = two_player_game();
        game.play_word(&player("joe"), 0, 0, Direction::Across, "cat").unwrap();
        let rack_before = game.rack_for(&player("steve")).unwrap().clone();

        let err = game.play_word(&player("steve"), 0, 0, Direction::Across, "cat").unwrap_err();
        assert!(matches!(err, GameError::NoNewLetters { .. }));
        assert_eq!(game.score_for(&player("steve")).unwrap(), 0);
        assert_eq!(game.rack_for(&player("steve")).unwrap(), &rack_before);
        assert_eq!(game.current_player().unwrap().player(), &player("steve"));
    }

    #[test]
    fn test_rack_shortage_rolls_back() {
        let mut game = two_player_game();
        let board_before = game.board().clone();

        let err = game.play_word(&player("joe"), 0, 0, Direction::Across, "cattle").unwrap_err();
        assert!(matches!(err, GameError::RackShortage { .. }));
        assert_eq!(game.rack_for(&player("joe")).unwrap().as_string(), "aaceeggt");
        assert_eq!(game.score_for(&player("joe")).unwrap(), 0);
        assert_eq!(game.board(), &board_before);
    }

    #[test]
    fn test_off_board_rejected() {
        let mut game = two_player_game();
        let err = game.play_word(&player("joe"), 8, 0, Direction::Across, "cat").unwrap_err();
        assert_eq!(err.code(), "OUT_OF_BOUNDS");
        assert_eq!(game.board().filled_count(), 0);
    }

    #[test]
    fn test_wrong_turn() {
        let mut game = two_player_game();
        let err = game.play_word(&player("steve"), 0, 0, Direction::Across, "cat").unwrap_err();
        assert_eq!(
            err,
            GameError::WrongTurn {
                player: player("steve"),
                expected: player("joe"),
            }
        );
        assert!(matches!(
            game.skip_turn(&player("steve")),
            Err(GameError::WrongTurn { .. })
        ));
        assert_eq!(game.consecutive_passes(), 0);
    }

    #[test]
    fn test_unknown_player() {
        let mut game = two_player_game();
        assert_eq!(
            game.skip_turn(&player("mallory")),
            Err(GameError::UnknownPlayer(player("mallory")))
        );
        assert_eq!(
            game.score_for(&player("mallory")),
            Err(GameError::UnknownPlayer(player("mallory")))
        );
    }

    #[test]
    fn test_play_before_start() {
        let mut game = GameEngine::create_with(10, 10).unwrap();
        game.enroll(player("joe")).unwrap();
        let err = game.play_word(&player("joe"), 0, 0, Direction::Across, "a").unwrap_err();
        assert_eq!(
            err,
            GameError::invalid_state("play", StateConflict::Mode(GameMode::Unstarted))
        );
    }

    #[test]
    fn test_skips_complete_game() {
        let mut game = two_player_game();
        game.skip_turn(&player("joe")).unwrap();
        assert_eq!(game.mode(), GameMode::InProgress);
        game.skip_turn(&player("steve")).unwrap();
        assert_eq!(game.mode(), GameMode::Completed);
        assert!(game.game_over());
        assert!(game.current_player().is_none());
        assert!(matches!(
            game.skip_turn(&player("joe")),
            Err(GameError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_play_resets_passes() {
        let mut game = two_player_game();
        game.skip_turn(&player("joe")).unwrap();
        game.play_word(&player("steve"), 0, 0, Direction::Across, "cat").unwrap();
        assert_eq!(game.consecutive_passes(), 0);
        game.skip_turn(&player("joe")).unwrap();
        assert_eq!(game.mode(), GameMode::InProgress);
    }

    #[test]
    fn test_cancel() {
        let mut game = two_player_game();
        game.cancel().unwrap();
        assert!(game.is_cancelled());
        assert!(game.game_over());
        assert!(matches!(game.cancel(), Err(GameError::InvalidState { .. })));
        assert!(matches!(game.start(), Err(GameError::InvalidState { .. })));
    }

    #[test]
    fn test_cancel_unstarted() {
        let mut game = GameEngine::create_with(10, 10).unwrap();
        game.cancel().unwrap();
        assert_eq!(game.mode(), GameMode::Cancelled);
    }

    #[test]
    fn test_leader_prefers_first_on_tie() {
        let game = two_player_game();
        assert_eq!(game.leader().unwrap().player(), &player("joe"));
    }

    #[test]
    fn test_display() {
        let mut game = two_player_game();
        game.play_word(&player("joe"), 0, 0, Direction::Across, "cat").unwrap();
        let shown = game.to_string();
        assert!(shown.starts_with("Board:\ncat_______\n"));
        assert!(shown.ends_with("Next turn belongs to steve"));
    }
}
