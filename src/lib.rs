//! Tiny Football - simulation core for a two-team arcade football game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (ball physics, players, collisions, scoring)
//! - `tuning`: Data-driven game balance and starting roster
//!
//! Input capture and drawing are left to the embedding application: the
//! core consumes a [`sim::TickInput`] each frame and hands back a
//! [`sim::MatchSnapshot`].

pub mod sim;
pub mod tuning;

pub use tuning::{PlayerSpawn, Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 1300.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 20.0;
    /// Velocity multiplier per 1/60 s
    pub const BALL_FRICTION_PER_SEC: f32 = 0.98;
    /// Velocity components below this snap to zero (px/s)
    pub const BALL_STOP_SPEED: f32 = 10.0;
    /// px/s of travel to deg/s of spin
    pub const BALL_SPIN_COEFF: f32 = 5.0;
    pub const BALL_SPIN_SMOOTH: f32 = 0.85;
    /// Spin added by a kick (deg/s)
    pub const BALL_KICK_SPIN: f32 = 250.0;
    pub const BALL_MAX_SPEED: f32 = 900.0;
    pub const KICKOFF_SPEED: f32 = 280.0;
    pub const KICKOFF_JITTER: f32 = 80.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 21.0;
    pub const PLAYER_HEIGHT: f32 = 31.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_KICK_RANGE: f32 = 50.0;
    pub const PLAYER_KICK_FORCE: f32 = 450.0;
    /// Display position catch-up rate (1/s)
    pub const PLAYER_DISPLAY_SMOOTH: f32 = 12.0;
    pub const AI_DEAD_ZONE: f32 = 6.0;
    pub const AI_SPEED_FACTOR: f32 = 0.8;

    /// Player-ball collision response
    pub const COLLISION_EPSILON: f32 = 2.0;
    pub const MAX_DEFLECTION_DEG: f32 = 75.0;
    pub const DEFLECTION_BOOST: f32 = 1.05;

    /// Goal geometry
    pub const GOAL_LINE_INSET: f32 = 80.0;
    /// Goal mouth height as a fraction of field height
    pub const GOAL_MOUTH_FRACTION: f32 = 0.15 * 0.8;

    /// Frame delta cap used by the runner
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Nominal frame rate the per-frame constants are calibrated for
    pub const REFERENCE_FPS: f32 = 60.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Sign that treats zero as positive
#[inline]
pub fn sign_or_positive(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}
