//! Match state and scoring types
//!
//! [`MatchState`] is the single owner of everything the simulation mutates.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::player::{Player, Team};
use super::roster;
use crate::tuning::Tuning;

/// Goals per team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub blue: u32,
    pub red: u32,
}

impl Scoreboard {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue,
            Team::Red => self.red,
        }
    }

    pub fn record_goal(&mut self, scorer: Team) {
        match scorer {
            Team::Blue => self.blue += 1,
            Team::Red => self.red += 1,
        }
    }
}

/// Things that happened during a tick, for audio/HUD reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    Goal { scorer: Team, score: Scoreboard },
    DebugOverlay(bool),
    QuitRequested,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub tuning: Tuning,
    pub ball: Ball,
    /// Blue players first, then red
    pub players: Vec<Player>,
    pub score: Scoreboard,
    pub show_debug: bool,
    /// Cleared by a Quit event
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Kick-off jitter source
    pub rng: Pcg32,
}

impl MatchState {
    /// Create a match with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a match from tuning; the ball starts centered and still
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let field = Vec2::new(tuning.field_width, tuning.field_height);
        let ball = Ball::new(field, tuning.ball_size);

        let mut players: Vec<Player> = tuning
            .roster
            .iter()
            .map(|spawn| {
                let mut p = Player::new(spawn.team, Vec2::new(spawn.x, spawn.y), spawn.scheme, &tuning);
                p.active = spawn.starter;
                p.ai = spawn.ai;
                p
            })
            .collect();
        // Keep the blue side first regardless of file order
        players.sort_by_key(|p| p.team != Team::Blue);

        if !roster::activation_invariant_holds(&players) {
            log::warn!("Roster does not have exactly one starter per team");
        }
        log::info!("Match created with seed {} ({} players)", seed, players.len());

        Self {
            tuning,
            ball,
            players,
            score: Scoreboard::default(),
            show_debug: false,
            running: true,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width, self.tuning.field_height)
    }
}
