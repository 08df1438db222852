//! # rotation_core - Substitution Rotation Engine
//!
//! A pure, deterministic engine for managing live substitution rotation in
//! small-sided football: who is on the field, on the bench, or in goal, how
//! players cycle fairly through those roles, and how much time each player
//! accumulates in each role.
//!
//! ## Design
//! - Every operation is a synchronous pure transform over the aggregate
//!   `GameState`; the caller owns the state and replaces it wholesale.
//! - Wall-clock time is always an explicit epoch argument, never read from
//!   a hidden clock, so every call is deterministic and testable.
//! - Recognized misuse is reported as a rejected [`engine::Transition`],
//!   never a panic; the input aggregate stays authoritative.

pub mod api;
pub mod definitions;
pub mod engine;
pub mod error;
pub mod models;
pub mod time;

// Re-export the aggregate and its building blocks
pub use models::{
    Formation, FormationShape, GameState, LastSubstitution, MatchFormat, Occupant, PairRole,
    Player, PlayerId, PlayerRole, PlayerStats, PlayerStatus, RotationQueue, SlotEntry, SlotId,
    StintClock, SubstitutionScheme, TeamConfig,
};

// Re-export the calculator surface
pub use engine::animation::{
    capture_player_positions, player_animations, CapturedPosition, MoveDirection,
    PlayerMovement, PositionMap,
};
pub use engine::{RejectReason, Transition};

// Re-export lookup and boundary helpers
pub use api::{game_state_from_json, game_state_to_json};
pub use definitions::{formation_definition, FormationDefinition};
pub use error::{Result, RotationError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
