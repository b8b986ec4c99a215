//! Game rules: lifecycle, turn order, word placement and scoring.
//!
//! `GameEngine` is the state machine for one game. Everything it needs
//! to validate a play lives here; persistence and orchestration sit in
//! `store` and `service`.

pub mod engine;
pub mod error;
pub mod mode;
pub mod moves;
pub mod placement;
pub mod snapshot;

pub use engine::{GameEngine, Placement, MAX_PLAYERS};
pub use error::{GameError, StateConflict};
pub use mode::GameMode;
pub use moves::Move;
pub use placement::{parse_word, Direction, PlacementPlan};
pub use snapshot::{GameSnapshot, PlayerSnapshot, SnapshotError, SNAPSHOT_VERSION};
