//! Players: manual movement, chase AI and kicking

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::Rect;
use super::input::Controls;
use crate::tuning::Tuning;

/// The two sides of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Defends the left goal
    Blue,
    /// Defends the right goal
    Red,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies which set of abstract controls a player listens to.
///
/// The input layer decides what physical keys or pads a scheme maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlScheme(pub u8);

impl ControlScheme {
    pub const PRIMARY: ControlScheme = ControlScheme(0);
    pub const SECONDARY: ControlScheme = ControlScheme(1);
}

/// A player on the pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player box
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement speed (px/s)
    pub speed: f32,
    pub team: Team,
    /// Receives manual input this tick
    pub active: bool,
    /// Driven by the chase AI (overrides manual input)
    pub ai: bool,
    pub kick_range: f32,
    pub scheme: ControlScheme,

    // Presentation-only state
    /// Movement intent from the last update, each axis in {-1, 0, 1}
    pub move_dir: Vec2,
    /// Seconds spent moving since the player last stood still
    pub anim_time: f32,
    /// Smoothed position for drawing
    pub display_pos: Vec2,
}

impl Player {
    pub fn new(team: Team, pos: Vec2, scheme: ControlScheme, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            team,
            active: false,
            ai: false,
            kick_range: tuning.kick_range,
            scheme,
            move_dir: Vec2::ZERO,
            anim_time: 0.0,
            display_pos: pos,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// True when this player reads the input device this tick
    #[inline]
    pub fn is_manual(&self) -> bool {
        self.active && !self.ai
    }

    /// Keep the whole box inside the field
    pub fn clamp_to_field(&mut self, field_size: Vec2) {
        self.pos = self.pos.clamp(Vec2::ZERO, (field_size - self.size).max(Vec2::ZERO));
    }

    /// Move from directional input. No-op unless the player is manual.
    pub fn update_manual(&mut self, controls: &Controls, dt: f32, field_size: Vec2) {
        if !self.is_manual() {
            return;
        }

        let intent = controls.direction();
        self.move_dir = intent;

        // Diagonals move at axis speed
        let step = if intent.x != 0.0 && intent.y != 0.0 {
            intent.normalize()
        } else {
            intent
        };
        self.pos += step * self.speed * dt;
        self.clamp_to_field(field_size);
    }

    /// Track the ball vertically. No-op unless the player is AI-driven.
    pub fn update_ai(&mut self, ball: &Ball, dt: f32, field_size: Vec2, tuning: &Tuning) {
        if !self.ai {
            return;
        }

        let target_y = ball.center().y - self.size.y / 2.0;
        let dy = target_y - self.pos.y;
        self.move_dir = Vec2::ZERO;

        if dy.abs() > tuning.ai_dead_zone {
            let dir = dy.signum();
            let step = (self.speed * tuning.ai_speed_factor * dt).min(dy.abs());
            self.pos.y += dir * step;
            self.move_dir = Vec2::new(0.0, dir);
        }
        self.clamp_to_field(field_size);
    }

    /// Player neither manual nor AI this tick: stand still
    pub fn idle(&mut self) {
        self.move_dir = Vec2::ZERO;
    }

    /// Advance the animation clock and ease the display position
    pub fn update_presentation(&mut self, dt: f32, smooth_rate: f32) {
        if self.move_dir != Vec2::ZERO {
            self.anim_time += dt;
        } else {
            self.anim_time = 0.0;
        }
        let t = (smooth_rate * dt).clamp(0.0, 1.0);
        self.display_pos += (self.pos - self.display_pos) * t;
    }

    /// Ball center within kick range of the player center
    pub fn can_kick(&self, ball: &Ball) -> bool {
        self.center().distance_squared(ball.center()) <= self.kick_range * self.kick_range
    }

    /// Kick the ball away from the player if it is in range
    pub fn kick(&self, ball: &mut Ball, tuning: &Tuning) -> bool {
        if !self.can_kick(ball) {
            return false;
        }
        ball.kick(self.center(), tuning.kick_force, tuning.kick_spin)
    }
}
