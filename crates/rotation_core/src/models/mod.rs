pub mod formation;
pub mod game_state;
pub mod player;
pub mod team_config;

pub use formation::{role_for, Formation, Occupant, PairRole, SlotEntry, SlotId};
pub use game_state::{GameState, LastSubstitution, RotationQueue};
pub use player::{Player, PlayerId, PlayerRole, PlayerStats, PlayerStatus, StintClock};
pub use team_config::{FormationShape, MatchFormat, SubstitutionScheme, TeamConfig};
