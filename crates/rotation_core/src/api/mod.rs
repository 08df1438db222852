pub mod json_api;

pub use json_api::{game_state_from_json, game_state_to_json};
