//! Read-only view of a match for drawing and HUD
//!
//! A snapshot is an owned copy, so the presentation side can hold it for a
//! whole render pass without any path back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Team;
use super::state::{MatchState, Scoreboard};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub size: f32,
    /// Degrees, [0, 360)
    pub angle: f32,
    /// Shown in the debug overlay
    pub vel: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub display_pos: Vec2,
    pub size: Vec2,
    pub team: Team,
    pub active: bool,
    pub ai: bool,
    pub can_kick: bool,
    pub move_dir: Vec2,
    pub anim_time: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub ball: BallView,
    pub players: Vec<PlayerView>,
    pub score: Scoreboard,
    pub show_debug: bool,
}

impl MatchState {
    pub fn snapshot(&self) -> MatchSnapshot {
        let ball = &self.ball;
        MatchSnapshot {
            ball: BallView {
                pos: ball.pos,
                size: ball.size,
                angle: ball.angle,
                vel: ball.vel,
            },
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    pos: p.pos,
                    display_pos: p.display_pos,
                    size: p.size,
                    team: p.team,
                    active: p.active,
                    ai: p.ai,
                    can_kick: p.can_kick(ball),
                    move_dir: p.move_dir,
                    anim_time: p.anim_time,
                })
                .collect(),
            score: self.score,
            show_debug: self.show_debug,
        }
    }
}
