//! Data-driven game balance
//!
//! Every gameplay constant and the starting roster live in [`Tuning`], so a
//! match can be rebalanced from a JSON file without touching the sim.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{ControlScheme, Team};

/// Where a player starts and how it is controlled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub team: Team,
    /// Top-left corner of the player box
    pub x: f32,
    pub y: f32,
    pub scheme: ControlScheme,
    /// Starts as the team's active player
    #[serde(default)]
    pub starter: bool,
    /// Starts AI-controlled
    #[serde(default)]
    pub ai: bool,
}

/// Game balance (all rates are per second)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    // === Ball ===
    pub ball_size: f32,
    pub friction_per_sec: f32,
    pub stop_speed: f32,
    pub spin_coeff: f32,
    pub spin_smooth: f32,
    pub kick_spin: f32,
    pub max_ball_speed: f32,
    pub kickoff_speed: f32,
    pub kickoff_jitter: f32,

    // === Players ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub kick_range: f32,
    pub kick_force: f32,
    pub display_smooth: f32,
    pub ai_dead_zone: f32,
    pub ai_speed_factor: f32,

    // === Collisions ===
    pub collision_epsilon: f32,
    pub max_deflection_deg: f32,
    pub deflection_boost: f32,

    // === Goals ===
    pub goal_line_inset: f32,
    pub goal_mouth_fraction: f32,

    /// Starting roster, blue team first
    pub roster: Vec<PlayerSpawn>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ball_size: BALL_SIZE,
            friction_per_sec: BALL_FRICTION_PER_SEC,
            stop_speed: BALL_STOP_SPEED,
            spin_coeff: BALL_SPIN_COEFF,
            spin_smooth: BALL_SPIN_SMOOTH,
            kick_spin: BALL_KICK_SPIN,
            max_ball_speed: BALL_MAX_SPEED,
            kickoff_speed: KICKOFF_SPEED,
            kickoff_jitter: KICKOFF_JITTER,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            kick_range: PLAYER_KICK_RANGE,
            kick_force: PLAYER_KICK_FORCE,
            display_smooth: PLAYER_DISPLAY_SMOOTH,
            ai_dead_zone: AI_DEAD_ZONE,
            ai_speed_factor: AI_SPEED_FACTOR,

            collision_epsilon: COLLISION_EPSILON,
            max_deflection_deg: MAX_DEFLECTION_DEG,
            deflection_boost: DEFLECTION_BOOST,

            goal_line_inset: GOAL_LINE_INSET,
            goal_mouth_fraction: GOAL_MOUTH_FRACTION,

            roster: default_roster(),
        }
    }
}

/// Three per side: blue on WASD + Q, red on arrows + Enter
pub fn default_roster() -> Vec<PlayerSpawn> {
    let mid = FIELD_HEIGHT / 2.0;
    let spawn = |team: Team, x: f32, y: f32, starter: bool| PlayerSpawn {
        team,
        x,
        y,
        scheme: match team {
            Team::Blue => ControlScheme::PRIMARY,
            Team::Red => ControlScheme::SECONDARY,
        },
        starter,
        ai: false,
    };
    vec![
        spawn(Team::Blue, 60.0, mid - 120.0, true),
        spawn(Team::Blue, 60.0, mid - 20.0, false),
        spawn(Team::Blue, 60.0, mid + 80.0, false),
        spawn(Team::Red, 829.0, 171.0, true),
        spawn(Team::Red, 829.0, 581.0, false),
        spawn(Team::Red, 1159.0, 370.0, false),
    ]
}

/// Inconsistent tuning detected by [`Tuning::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A dimension or rate that must be positive is not
    NonPositive(&'static str),
    /// A team has no players in the roster
    EmptyTeam(Team),
    /// A team must have exactly one starter
    StarterCount { team: Team, count: usize },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::NonPositive(field) => write!(f, "`{field}` must be positive"),
            TuningError::EmptyTeam(team) => write!(f, "team {team} has no players"),
            TuningError::StarterCount { team, count } => {
                write!(f, "team {team} needs exactly one starter, found {count}")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the invariants the sim relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ball_size", self.ball_size),
            ("friction_per_sec", self.friction_per_sec),
            ("max_ball_speed", self.max_ball_speed),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive(name));
            }
        }

        for team in Team::ALL {
            let members: Vec<_> = self.roster.iter().filter(|s| s.team == team).collect();
            if members.is_empty() {
                return Err(TuningError::EmptyTeam(team));
            }
            let count = members.iter().filter(|s| s.starter).count();
            if count != 1 {
                return Err(TuningError::StarterCount { team, count });
            }
        }
        Ok(())
    }

    /// Vertical span (top, bottom) of the goal mouth
    pub fn goal_band(&self) -> (f32, f32) {
        let height = self.field_height * self.goal_mouth_fraction;
        let top = self.field_height / 2.0 - height / 2.0;
        (top, top + height)
    }
}
