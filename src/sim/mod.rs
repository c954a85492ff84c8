//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Input arrives as an explicit [`TickInput`] value
//! - Output leaves as an owned [`MatchSnapshot`] plus [`MatchEvent`]s
//! - Roster order is stable (blue players first), so iteration is deterministic
//! - Randomness comes only from the match's seeded RNG

pub mod ball;
pub mod collision;
pub mod input;
pub mod player;
pub mod roster;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Rect, ball_player_collision, ball_wall_collision, reflect_ball_off_player};
pub use input::{ControlEvent, Controls, InputSnapshot, TickInput};
pub use player::{ControlScheme, Player, Team};
pub use snapshot::{BallView, MatchSnapshot, PlayerView};
pub use state::{MatchEvent, MatchState, Scoreboard};
pub use tick::tick;
