//! Game service: one request at a time against a repository and a move
//! history.
//!
//! Every operation loads the game, applies one engine operation, and
//! writes the game back only when the operation succeeded. A rejected
//! request leaves both the stored game and the history untouched.

mod reminder;
mod view;

pub use reminder::{Notification, NotificationLog, Reminder};
pub use view::{last_play_description, GameView, MoveRequest, RankingRecord, TurnReport};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::{GameConfig, GameRng, PlayerId, ReminderConfig, Seat, WordWarsConfig};
use crate::history::MoveHistory;
use crate::rules::{GameEngine, GameError, GameMode, Move};
use crate::store::{GameId, GameRepository, StoreError};

/// Errors returned by `GameService`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Machine-readable code for transport layers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Game(e) => e.code(),
            ServiceError::Store(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ServiceError::Game(e) => e.is_recoverable(),
            ServiceError::Store(e) => e.is_recoverable(),
        }
    }
}

/// Orchestrates games stored in `R`, logging moves to `H`.
#[derive(Debug)]
pub struct GameService<R, H> {
    games: R,
    history: H,
    game_config: GameConfig,
    reminders: ReminderConfig,
    notifications: NotificationLog,
    /// Derives per-game seeds when the configuration fixes a seed.
    seeds: Option<GameRng>,
}

impl<R: GameRepository, H: MoveHistory> GameService<R, H> {
    pub fn new(games: R, history: H, config: &WordWarsConfig) -> Self {
        Self {
            games,
            history,
            game_config: config.game.clone(),
            reminders: config.reminders.clone(),
            notifications: NotificationLog::new(),
            seeds: config.game.seed.map(GameRng::new),
        }
    }

    // === Game lifecycle ===

    /// Create and store an unstarted game.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<GameId, ServiceError> {
        let mut config = self.game_config.clone();
        config.seed = self.seeds.as_mut().map(GameRng::next_seed);
        let game = GameEngine::create(&config)?;
        let id = self.games.register(&game)?;
        info!(%id, "game created");
        Ok(id)
    }

    #[instrument(skip(self, player), fields(player = %player))]
    pub fn add_player(&mut self, id: GameId, player: PlayerId) -> Result<Seat, ServiceError> {
        let mut game = self.games.find(id)?;
        let seat = game.enroll(player)?;
        self.games.update(id, &game)?;
        Ok(seat)
    }

    /// Start a game; no more players may join.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, id: GameId) -> Result<GameView, ServiceError> {
        let mut game = self.games.find(id)?;
        game.start()?;
        self.games.update(id, &game)?;
        Ok(GameView::of(id, &game))
    }

    /// Mark a game cancelled, with no winner.
    #[instrument(skip(self))]
    pub fn cancel_game(&mut self, id: GameId) -> Result<(), ServiceError> {
        let mut game = self.games.find(id)?;
        game.cancel()?;
        self.games.update(id, &game)?;
        Ok(())
    }

    /// Play or skip for `player`.
    #[instrument(skip(self, player, request), fields(player = %player, word = %request.word))]
    pub fn make_move(
        &mut self,
        id: GameId,
        player: &PlayerId,
        request: &MoveRequest,
    ) -> Result<TurnReport, ServiceError> {
        let mut game = self.games.find(id)?;
        let before = game.score_for(player)?;

        let record = if request.is_skip() {
            game.skip_turn(player)?
        } else {
            game.play_word(player, request.x, request.y, request.direction, &request.word)?
                .record
        };

        self.games.update(id, &game)?;
        self.history.record(id, record);

        let total = game.score_for(player)?;
        let delta = total - before;
        debug!(delta, total, "move applied");
        Ok(TurnReport {
            view: GameView::of(id, &game),
            delta,
            total,
            description: last_play_description(delta, total),
        })
    }

    // === Queries ===

    pub fn game_view(&self, id: GameId) -> Result<GameView, ServiceError> {
        let game = self.games.find(id)?;
        Ok(GameView::of(id, &game))
    }

    /// Load a game for read-only inspection.
    pub fn game(&self, id: GameId) -> Result<GameEngine, ServiceError> {
        Ok(self.games.find(id)?)
    }

    /// Moves of a game, oldest first.
    pub fn game_history(&self, id: GameId) -> Result<Vec<Move>, ServiceError> {
        // Surface NotFound for unknown games instead of an empty list.
        self.games.find(id)?;
        Ok(self.history.history_for(id))
    }

    /// Every game `player` is seated in.
    pub fn player_games(&self, player: &PlayerId) -> Result<Vec<GameId>, ServiceError> {
        Ok(self.games.games_for_player(player)?)
    }

    /// Win/loss records over completed games, best ratio first.
    ///
    /// The leader of each completed game wins it; every other player
    /// loses. Ties in ratio are ordered by player name.
    pub fn rankings(&self) -> Result<Vec<RankingRecord>, ServiceError> {
        let mut tally: FxHashMap<PlayerId, (u32, u32)> = FxHashMap::default();
        for (_, game) in self.games.all_with_mode(GameMode::Completed)? {
            let Some(winner) = game.leader().map(|p| p.seat()) else {
                continue;
            };
            for p in game.players() {
                let entry = tally.entry(p.player().clone()).or_default();
                if p.seat() == winner {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }

        let mut records: Vec<RankingRecord> = tally
            .into_iter()
            .map(|(player, (wins, losses))| RankingRecord {
                player,
                wins,
                losses,
            })
            .collect();
        records.sort_by(|a, b| {
            b.ratio()
                .total_cmp(&a.ratio())
                .then_with(|| a.player.cmp(&b.player))
        });
        Ok(records)
    }

    // === Reminders ===

    /// Players to nudge at `now`: whoever is up in a game idle past the
    /// configured limit, unless they were reminded within the cooldown.
    pub fn players_to_remind(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, ServiceError> {
        let idle_cutoff = self.reminders.idle_cutoff(now);
        let cooldown_cutoff = self.reminders.cooldown_cutoff(now);

        let mut reminders = Vec::new();
        for (id, game) in self.games.all_with_mode(GameMode::InProgress)? {
            if game.last_update() >= idle_cutoff {
                continue;
            }
            let Some(up) = game.current_player() else {
                continue;
            };
            if self.notifications.notified_since(up.player(), cooldown_cutoff) {
                continue;
            }
            reminders.push(Reminder {
                game: id,
                player: up.player().clone(),
                idle_since: game.last_update(),
            });
        }
        Ok(reminders)
    }

    /// Note that `player` was reminded about `game` at `now`.
    pub fn record_reminder(&mut self, game: GameId, player: PlayerId, now: DateTime<Utc>) {
        debug!(%game, %player, "reminder recorded");
        self.notifications.record(Notification {
            game,
            player,
            sent_at: now,
        });
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    /// Direct access to stored games, for administrative fixes.
    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.games
    }
}
