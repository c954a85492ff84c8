//! Abstract per-tick input consumed by the simulation
//!
//! The embedding application resolves its devices into one [`Controls`] per
//! [`ControlScheme`] and queues discrete [`ControlEvent`]s. Nothing here knows
//! about keyboards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::{ControlScheme, Team};

/// Held state of one control scheme's directional and kick signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub kick: bool,
}

impl Controls {
    /// Raw movement intent; opposite directions cancel. y grows downward.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Controls for every scheme, captured once per tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    schemes: Vec<(ControlScheme, Controls)>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, scheme: ControlScheme, controls: Controls) -> Self {
        self.set(scheme, controls);
        self
    }

    pub fn set(&mut self, scheme: ControlScheme, controls: Controls) {
        match self.schemes.iter_mut().find(|(s, _)| *s == scheme) {
            Some((_, c)) => *c = controls,
            None => self.schemes.push((scheme, controls)),
        }
    }

    /// Controls for a scheme; unknown schemes read as nothing held
    pub fn get(&self, scheme: ControlScheme) -> Controls {
        self.schemes
            .iter()
            .find(|(s, _)| *s == scheme)
            .map(|(_, c)| *c)
            .unwrap_or_default()
    }
}

/// Discrete control events, applied in queue order before movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    /// Stop the match loop
    Quit,
    ToggleDebugOverlay,
    /// Flip the AI flag of the player at this roster index
    ToggleAi(usize),
    /// Hand control to the team's next player
    Cycle(Team),
    /// Debug: make only this roster index active, across both teams
    DirectSelect(usize),
    SetAi(usize, bool),
}

/// Everything the simulation reads for one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub controls: InputSnapshot,
    pub events: Vec<ControlEvent>,
}
